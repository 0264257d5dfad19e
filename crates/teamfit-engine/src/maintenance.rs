//! Periodic fitness recompute.
//!
//! Reads the roster through a [`FitnessStore`], recomputes fitness for every
//! team at capacity, and writes the results back. This runs off the
//! interactive path: a cycle that cannot read its inputs is skipped, and a
//! team that cannot be computed or saved is skipped. Nothing is propagated.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use teamfit_config::MaintenanceConfig;
use teamfit_core::entities::TeamFitness;
use teamfit_core::roster::RosterSnapshot;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::fitness::FitnessCalculator;

/// Persistence collaborator owned by the surrounding application.
pub trait FitnessStore: Send + Sync + 'static {
    /// # Errors
    ///
    /// Returns [`StoreError`] if the roster cannot be read.
    fn load_roster(&self) -> Result<RosterSnapshot, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the value cannot be written.
    fn save_fitness(&self, team_id: u32, fitness: &TeamFitness) -> Result<(), StoreError>;
}

/// Outcome of one recompute cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub ran_at: DateTime<Utc>,
    /// Full teams whose fitness was recomputed and saved.
    pub refreshed: usize,
    /// Full teams that could not be computed or saved.
    pub skipped: usize,
}

pub struct MaintenanceTask<S> {
    store: Arc<S>,
    calculator: FitnessCalculator,
}

impl<S> Clone for MaintenanceTask<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            calculator: self.calculator,
        }
    }
}

impl<S: FitnessStore> MaintenanceTask<S> {
    #[must_use]
    pub const fn new(store: Arc<S>, calculator: FitnessCalculator) -> Self {
        Self { store, calculator }
    }

    /// Run a single cycle. Returns `None` if the roster could not be loaded.
    pub fn run_once(&self) -> Option<MaintenanceReport> {
        let roster = match self.store.load_roster() {
            Ok(roster) => roster,
            Err(e) => {
                warn!(error = %e, "skipping maintenance cycle: roster unavailable");
                return None;
            }
        };

        let mut refreshed = 0;
        let mut skipped = 0;
        for team in roster.teams.iter().filter(|t| t.is_full()) {
            let saved = self
                .calculator
                .compute(team, &roster.projects, &roster.preferences)
                .map_err(|e| e.to_string())
                .and_then(|fitness| {
                    self.store
                        .save_fitness(team.id, &fitness)
                        .map_err(|e| e.to_string())
                });
            match saved {
                Ok(()) => refreshed += 1,
                Err(reason) => {
                    debug!(team_id = team.id, %reason, "skipping team");
                    skipped += 1;
                }
            }
        }

        let report = MaintenanceReport {
            ran_at: Utc::now(),
            refreshed,
            skipped,
        };
        info!(refreshed, skipped, "maintenance cycle finished");
        Some(report)
    }

    /// Run a cycle every `interval` until the returned handle is shut down.
    /// The first cycle runs one interval after spawning.
    #[must_use]
    pub fn spawn(self, interval: Duration) -> MaintenanceHandle {
        let (shutdown, mut stop) = oneshot::channel();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = &mut stop => break,
                    _ = ticker.tick() => {
                        let cycle = self.clone();
                        if let Err(e) = tokio::task::spawn_blocking(move || cycle.run_once()).await {
                            warn!(error = %e, "maintenance cycle aborted");
                        }
                    }
                }
            }
            info!("maintenance task stopped");
        });

        info!(interval_secs = interval.as_secs(), "maintenance task started");
        MaintenanceHandle { shutdown, task }
    }

    /// [`spawn`](Self::spawn) with the configured interval, if enabled.
    #[must_use]
    pub fn spawn_if_enabled(self, config: &MaintenanceConfig) -> Option<MaintenanceHandle> {
        config.enabled.then(|| self.spawn(config.interval()))
    }
}

pub struct MaintenanceHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl MaintenanceHandle {
    /// Stop the task, letting an in-progress cycle finish.
    pub async fn shutdown(self) {
        // The task may already have exited.
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            warn!(error = %e, "maintenance task failed");
        }
    }
}
