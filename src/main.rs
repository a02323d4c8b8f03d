//! SoundDeck - Channel control panel for a sound engine host
//!
//! Single-threaded panel core driven by one frame loop, talking to the host
//! over stdio: state pushes in as JSON lines, commands out as strings.

mod config;
mod event_bus;
mod host;
mod panel;
mod scheduler;

use config::PanelConfig;
use log::{debug, error, info};
use panel::Panel;
use std::error::Error;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting SoundDeck...");

    let config = PanelConfig::load_default();
    debug!("Config: {:?}", config);

    // Outbound: panel -> stdout
    let (out_tx, out_rx) = crossbeam_channel::unbounded();
    let writer = host::stdio::spawn_writer(out_rx);
    let commands = host::stdio::command_channel(config.bridge, &config.handler_name, out_tx);

    let mut panel = Panel::new(&config, commands)?;

    // Inbound: stdin -> frame loop
    let (in_tx, mut in_rx) = mpsc::channel(event_bus::CHANNEL_CAPACITY);
    host::stdio::spawn_reader(in_tx);

    let (stop, stop_token) = scheduler::stop_pair();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupted, shutting down");
                stop.stop();
            }
            Err(e) => error!("Failed to listen for ctrl-c: {}", e),
        }
    });
    let frame_interval = Duration::from_millis(config.frame_interval_ms.max(1));
    let frames = scheduler::run(&mut panel, &mut in_rx, stop_token, frame_interval).await;

    info!(
        "SoundDeck stopped after {} frames ({} channels, {} alerts, {} errors)",
        frames,
        panel.channels().len(),
        panel.alerts().len(),
        panel.errors().len()
    );
    debug!(
        "Channels at exit: {:?}",
        panel.channels().names().collect::<Vec<_>>()
    );
    debug!("Final document: {}", panel.dom().to_html());

    // Dropping the panel closes the command channel and lets the writer finish.
    drop(panel);
    if writer.join().is_err() {
        error!("Host writer thread panicked");
    }

    Ok(())
}
