use anyhow::Result;
use roundbell::prelude::*;
use roundbell::{SERVICE_NAME, VERSION};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    info!("{} v{} starting up...", SERVICE_NAME, VERSION);

    // 2. Load configuration (roundbell.toml if present, defaults otherwise).
    let config = RoundbellConfig::load()?;

    // 3. Build the service and restore the recents queue from disk.
    let service = Arc::new(WorkoutService::new(&config)?);
    service.hydrate().await;

    // 4. Spawn tasks listening to the event streams.
    spawn_event_listeners(&service);

    // 5. Register a few demonstration timers and exercise pause/resume.
    register_demo_timers(&service).await?;

    info!("belldev running. Press Ctrl+C to shut down.");
    tokio::signal::ctrl_c().await?;

    // 6. Flush the recents queue on the way out.
    info!("Shutdown signal received. Flushing recents...");
    service.flush().await;
    info!("belldev has shut down.");
    Ok(())
}

/// Spawns a task per event stream so expirations and registry changes show
/// up in the log as they happen.
fn spawn_event_listeners(service: &Arc<WorkoutService>) {
    let mut timer_rx = service.subscribe_timer_events();
    tokio::spawn(async move {
        while let Ok(TimerEvent::Fired { id, message }) = timer_rx.recv().await {
            info!("[TIMER] {} => {}", id, message);
        }
    });

    let mut system_rx = service.subscribe_system_events();
    tokio::spawn(async move {
        while let Ok(event) = system_rx.recv().await {
            info!("[SYSTEM] => {:?}", event);
        }
    });
}

/// Registers demonstration timers against the running service.
async fn register_demo_timers(service: &Arc<WorkoutService>) -> Result<()> {
    service
        .create_timer("warmup", Duration::from_secs(3), "Warmup over, get ready!")
        .await?;
    service
        .create_timer("round-1", Duration::from_secs(10), "Round one done.")
        .await?;

    service
        .touch_recent(Workout {
            name: "demo".to_string(),
            rounds: vec![Round {
                name: "jumping jacks".to_string(),
                time: 30,
            }],
        })
        .await;

    // Freeze the whole session for two seconds mid-run, then pick it back up.
    let handle = Arc::clone(service);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        handle.pause_all_timers().await;
        tokio::time::sleep(Duration::from_secs(2)).await;
        handle.resume_all_timers().await;
    });

    Ok(())
}
