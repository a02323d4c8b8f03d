//! Frame scheduler.
//!
//! One repeating task drives the panel: every frame it measures the elapsed
//! time and ticks the alert queue; between frames it applies host messages.
//! It stops when the stop token fires or the host stream ends.

use crate::host::HostMessage;
use crate::panel::Panel;
use log::info;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};

/// Converts frame timestamps into elapsed seconds.
#[derive(Debug, Default)]
pub struct FrameClock {
    previous_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame. The first frame reports 0.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        let delta = match self.previous_ms {
            Some(prev) if now_ms > prev => (now_ms - prev) / 1000.0,
            _ => 0.0,
        };
        self.previous_ms = Some(now_ms);
        delta
    }
}

/// Stops a running scheduler.
#[derive(Debug)]
pub struct StopHandle(watch::Sender<bool>);

/// Observed by the scheduler.
#[derive(Debug, Clone)]
pub struct StopToken(watch::Receiver<bool>);

pub fn stop_pair() -> (StopHandle, StopToken) {
    let (tx, rx) = watch::channel(false);
    (StopHandle(tx), StopToken(rx))
}

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.0.send(true);
    }
}

impl StopToken {
    /// Resolves once stop is requested. Never resolves if the handle was
    /// dropped without stopping.
    pub async fn stopped(&mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Drive `panel` until stopped. Returns the number of frames run.
pub async fn run(
    panel: &mut Panel,
    inbound: &mut mpsc::Receiver<HostMessage>,
    mut stop: StopToken,
    frame_interval: Duration,
) -> u64 {
    let start = Instant::now();
    let mut clock = FrameClock::new();
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = 0u64;

    info!("Frame loop running every {:?}", frame_interval);

    loop {
        tokio::select! {
            _ = stop.stopped() => {
                info!("Frame loop stopped");
                break;
            }
            message = inbound.recv() => match message {
                Some(message) => panel.apply(message),
                None => {
                    info!("Host stream ended");
                    break;
                }
            },
            _ = ticker.tick() => {
                let now_ms = start.elapsed().as_secs_f64() * 1000.0;
                panel.tick(clock.advance(now_ms));
                frames += 1;
            }
        }
    }

    frames
}
