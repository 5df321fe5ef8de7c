/*
[INPUT]:  Wall-clock time and the configured cycle interval
[OUTPUT]: Sleeps that end exactly on interval boundaries
[POS]:    Loop layer - cycle timing
[UPDATE]: When changing boundary alignment or countdown reporting
*/

use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Where the trading loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    RunningCycle,
    CooldownAfterSuccess,
    CooldownAfterFailure,
}

/// Seconds until the next interval boundary, computed from the current
/// epoch second. The current partial minute is always skipped, so a call
/// exactly on a boundary yields a full interval, never zero.
pub fn next_boundary_secs(now_epoch_secs: u64, interval_secs: u64) -> u64 {
    let next_minute_secs = (now_epoch_secs / 60 + 1) * 60;
    let boundary = next_minute_secs.div_ceil(interval_secs) * interval_secs;
    boundary - now_epoch_secs
}

/// Sleep until the next interval boundary, logging a countdown once per
/// second. Returns `false` if the shutdown token fired before the boundary.
pub async fn wait_for_boundary(interval_secs: u64, shutdown: &CancellationToken) -> bool {
    let now_epoch_secs = chrono::Utc::now().timestamp().max(0) as u64;
    let wait_secs = next_boundary_secs(now_epoch_secs, interval_secs);
    info!(wait_secs, "waiting for next cycle boundary");

    let deadline = Instant::now() + Duration::from_secs(wait_secs);
    let mut tick = tokio::time::interval(Duration::from_secs(1));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    tick.tick().await; // first tick completes immediately

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("shutdown requested while waiting for boundary");
                return false;
            }
            _ = sleep_until(deadline) => {
                return true;
            }
            _ = tick.tick() => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                debug!(remaining_secs = remaining.as_secs(), "boundary countdown");
            }
        }
    }
}

/// Cooldown pause between cycles; interruptible by shutdown. Returns
/// `false` when shutdown fired during the pause.
pub async fn cooldown(phase: CyclePhase, secs: u64, shutdown: &CancellationToken) -> bool {
    info!(?phase, secs, "entering cooldown");
    tokio::select! {
        _ = shutdown.cancelled() => false,
        _ = tokio::time::sleep(Duration::from_secs(secs)) => true,
    }
}
