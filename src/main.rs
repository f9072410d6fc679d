//! Turn Clock - A two-player chess clock
//! 
//! This is the main entry point for the turn-clock server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use turn_clock::{
    api::create_router,
    config::Config,
    services::{CommandCueSink, CueSink, LogCueSink},
    state::AppState,
    tasks::{cue_dispatch_task, tick_driver_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("turn_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting turn-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, minutes={}, tick={}ms",
          config.host, config.port, config.minutes, config.tick_ms);

    let default_preset = config.default_preset().map_err(anyhow::Error::msg)?;

    let cue_sink: Arc<dyn CueSink> = match config.cue_command.as_deref() {
        Some(command) => match CommandCueSink::from_command_line(command) {
            Some(sink) => {
                info!("Playing cues with: {}", command);
                Arc::new(sink)
            }
            None => {
                warn!("Empty cue command, logging cues instead");
                Arc::new(LogCueSink)
            }
        },
        None => Arc::new(LogCueSink),
    };

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        default_preset,
        cue_sink,
    ));

    // Start the background tasks
    tokio::spawn(cue_dispatch_task(Arc::clone(&state), state.subscribe()));
    tokio::spawn(tick_driver_task(Arc::clone(&state), config.tick_interval()));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /press/:side - Player presses their button (white|black)");
    info!("  POST /switch      - Hand the move to the other side");
    info!("  POST /start       - Start the active side's time");
    info!("  POST /stop        - Pause the clock");
    info!("  POST /reset       - Restart, optional body {{\"minutes\": n}}");
    info!("  GET  /presets     - Restart menu");
    info!("  GET  /status      - Clock state and rendered faces");
    info!("  GET  /health      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
