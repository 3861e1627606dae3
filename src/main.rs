use clap::Parser;
use orphanage_map::core::location::LocationOutcome;
use orphanage_map::core::presenter::FetchOutcome;
use orphanage_map::utils::{error::MapError, logger};
use orphanage_map::{CliConfig, ConsoleAlerts, LoggingNavigator, MapPresenter, MapView};

fn fail(e: MapError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

fn print_view(view: &MapView) {
    println!(
        "🗺️  Region: {:.6}, {:.6} (Δ {}, {})",
        view.region.latitude,
        view.region.longitude,
        view.region.latitude_delta,
        view.region.longitude_delta
    );
    for marker in &view.markers {
        println!(
            "  📍 [{}] {} @ {:.6}, {:.6}",
            marker.key, marker.title, marker.coordinate.latitude, marker.coordinate.longitude
        );
    }
    println!("{}", view.footer.text);
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting orphanage-map");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli.resolve().unwrap_or_else(|e| fail(e));
    let directory = config.directory().unwrap_or_else(|e| fail(e));
    tracing::info!("Listing endpoint: {}", directory.endpoint());

    let navigator = LoggingNavigator::new();
    let presenter = MapPresenter::with_options(
        directory,
        config.simulated_location(),
        navigator.clone(),
        ConsoleAlerts,
        config.presenter_options(),
    );

    // Mount and the first focus happen together, as on a real screen.
    let (location, first_fetch) = tokio::join!(presenter.mount(), presenter.on_focus());

    match location {
        Some(LocationOutcome::Acquired(coordinate)) => tracing::info!(
            "📡 Device location: {}, {}",
            coordinate.latitude,
            coordinate.longitude
        ),
        Some(LocationOutcome::PermissionDenied) => {
            tracing::info!("Location permission denied, keeping default coordinate")
        }
        Some(LocationOutcome::PositionUnavailable(reason)) => {
            tracing::debug!("No device position: {}", reason)
        }
        None => {}
    }

    let mut fetches = vec![first_fetch];
    for _ in 1..cli.refreshes {
        fetches.push(presenter.on_focus().await);
    }
    let superseded = fetches
        .iter()
        .filter(|f| matches!(f, Ok(FetchOutcome::Superseded)))
        .count();
    if superseded > 0 {
        tracing::debug!("{} responses superseded by newer ones", superseded);
    }

    print_view(&presenter.render().await);

    if let Some(id) = cli.open {
        presenter.press_callout(id).await.unwrap_or_else(|e| fail(e));
    }
    if cli.create {
        presenter.press_create_button().unwrap_or_else(|e| fail(e));
    }

    for route in navigator.history() {
        match serde_json::to_string(&route) {
            Ok(json) => println!("➡️  {}", json),
            Err(_) => println!("➡️  {}", route.screen_name()),
        }
    }
}
