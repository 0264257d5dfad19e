//! Dedicated analysis worker.
//!
//! A single task drains a bounded job queue and runs each analyzer on the
//! blocking pool, one at a time. Callers submit an analyzer together with the
//! roster snapshot it should search and wait for the result.
//!
//! A panicking analyzer is logged and reported as "no suggestion"; the worker
//! keeps serving later jobs. There is no cancellation or timeout.

use teamfit_config::WorkerConfig;
use teamfit_core::roster::RosterSnapshot;
use teamfit_core::suggestion::Suggestion;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span};

use crate::analyzers::Analyzer;
use crate::error::{EngineError, WorkerError};
use crate::fitness::FitnessCalculator;

type Reply = Result<Option<Suggestion>, EngineError>;

struct Job {
    analyzer: Box<dyn Analyzer>,
    roster: RosterSnapshot,
    reply: oneshot::Sender<Reply>,
}

/// Handle to the worker task. Dropping it closes the queue; the worker exits
/// once queued jobs are done.
pub struct AnalysisWorker {
    jobs: mpsc::Sender<Job>,
    task: JoinHandle<()>,
}

impl AnalysisWorker {
    /// Start the worker on the current tokio runtime.
    #[must_use]
    pub fn spawn(calculator: FitnessCalculator, config: &WorkerConfig) -> Self {
        let (jobs, rx) = mpsc::channel(config.queue_depth.max(1));
        let task = tokio::spawn(run(rx, calculator));
        info!(queue_depth = config.queue_depth, "analysis worker started");
        Self { jobs, task }
    }

    /// Queue `analyzer` against `roster` and wait for its result.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Closed`] if the worker has stopped, or
    /// [`WorkerError::Analysis`] if the analyzer rejected the request.
    pub async fn submit(
        &self,
        analyzer: impl Analyzer + 'static,
        roster: RosterSnapshot,
    ) -> Result<Option<Suggestion>, WorkerError> {
        let (reply, response) = oneshot::channel();
        let job = Job {
            analyzer: Box::new(analyzer),
            roster,
            reply,
        };
        self.jobs.send(job).await.map_err(|_| WorkerError::Closed)?;
        Ok(response.await.map_err(|_| WorkerError::Closed)??)
    }

    /// Blocking variant of [`submit`](Self::submit) for callers outside the
    /// runtime.
    ///
    /// # Errors
    ///
    /// Same as [`submit`](Self::submit).
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context.
    pub fn blocking_submit(
        &self,
        analyzer: impl Analyzer + 'static,
        roster: RosterSnapshot,
    ) -> Result<Option<Suggestion>, WorkerError> {
        let (reply, response) = oneshot::channel();
        let job = Job {
            analyzer: Box::new(analyzer),
            roster,
            reply,
        };
        self.jobs.blocking_send(job).map_err(|_| WorkerError::Closed)?;
        Ok(response.blocking_recv().map_err(|_| WorkerError::Closed)??)
    }

    /// Stop accepting jobs and wait for queued ones to finish.
    pub async fn shutdown(self) {
        drop(self.jobs);
        if let Err(e) = self.task.await {
            error!(error = %e, "analysis worker task failed");
        }
    }
}

async fn run(mut rx: mpsc::Receiver<Job>, calculator: FitnessCalculator) {
    while let Some(Job {
        analyzer,
        roster,
        reply,
    }) = rx.recv().await
    {
        let name = analyzer.name();
        let span = info_span!("analysis", analyzer = name);
        let outcome =
            tokio::task::spawn_blocking(move || span.in_scope(|| analyzer.analyze(&roster, &calculator)))
                .await;

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                error!(analyzer = name, error = %e, "analyzer did not complete; reporting no suggestion");
                Ok(None)
            }
        };

        if reply.send(result).is_err() {
            debug!(analyzer = name, "caller went away before the result was ready");
        }
    }
    info!("analysis worker stopped");
}
