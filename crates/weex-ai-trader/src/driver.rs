/*
[INPUT]:  Pipeline, cycle timing configuration, shutdown token
[OUTPUT]: Long-running trading loop aligned to interval boundaries
[POS]:    Loop layer - lifecycle and phase transitions
[UPDATE]: When changing startup behavior, cooldowns, or shutdown handling
*/

use crate::config::TraderConfig;
use crate::pipeline::CycleRunner;
use crate::scheduler::{self, CyclePhase};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Owns the trading loop: startup verification pass, boundary-aligned
/// cycles, and cooldowns. A failed cycle never terminates the loop; only
/// the shutdown token does.
pub struct Driver<R: CycleRunner> {
    pipeline: R,
    interval_secs: u64,
    success_cooldown_secs: u64,
    failure_cooldown_secs: u64,
    shutdown: CancellationToken,
}

impl<R: CycleRunner> Driver<R> {
    pub fn new(pipeline: R, config: &TraderConfig, shutdown: CancellationToken) -> Self {
        Self {
            pipeline,
            interval_secs: config.interval_secs(),
            success_cooldown_secs: config.success_cooldown_secs,
            failure_cooldown_secs: config.failure_cooldown_secs,
            shutdown,
        }
    }

    /// Run until the shutdown token fires. `dry_run` forces every cycle to
    /// skip order placement, not just the startup pass.
    pub async fn run(&self, dry_run: bool) {
        // verification pass before the first boundary: exercises the whole
        // pipeline without placing orders so misconfiguration shows up at
        // startup, not at the first live cycle
        info!("running startup verification pass (no orders)");
        match self.pipeline.run_cycle(true).await {
            Ok(outcome) => {
                info!(action = %outcome.action, "startup pass complete");
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "startup pass failed; loop continues");
            }
        }

        let mut phase = CyclePhase::Idle;
        loop {
            info!(?phase, "awaiting next cycle");
            if !scheduler::wait_for_boundary(self.interval_secs, &self.shutdown).await {
                break;
            }

            phase = CyclePhase::RunningCycle;
            info!(?phase, "cycle boundary reached");
            let (next_phase, cooldown_secs) = match self.pipeline.run_cycle(dry_run).await {
                Ok(outcome) => {
                    info!(
                        placed = outcome.placed_count(),
                        failed = outcome.failed_count(),
                        "cycle succeeded"
                    );
                    (CyclePhase::CooldownAfterSuccess, self.success_cooldown_secs)
                }
                Err(err) => {
                    error!(error = %format!("{err:#}"), "cycle failed; loop continues");
                    (CyclePhase::CooldownAfterFailure, self.failure_cooldown_secs)
                }
            };

            phase = next_phase;
            if !scheduler::cooldown(phase, cooldown_secs, &self.shutdown).await {
                break;
            }
            phase = CyclePhase::Idle;
        }

        info!("trading loop stopped");
    }
}
