//! Analysis worker configuration.

use serde::{Deserialize, Serialize};

/// Default number of submissions that may wait for the worker.
const fn default_queue_depth() -> usize {
    16
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkerConfig {
    /// Capacity of the submission channel. Submissions beyond it wait.
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_depth: default_queue_depth(),
        }
    }
}
