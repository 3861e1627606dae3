// Adapters layer: terminal-side implementations of the screen's platform ports.

pub mod console;

pub use console::{ConsoleAlerts, LoggingNavigator, SimulatedLocation};
