// Domain layer: screen models and ports (interfaces) for the platform collaborators.

pub mod model;
pub mod ports;
