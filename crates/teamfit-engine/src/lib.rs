//! # teamfit-engine
//!
//! Team fitness scoring and move suggestion for Teamfit.
//!
//! - [`fitness`]: competency, preference satisfaction, and shortfall for a team
//! - [`constraints`]: leader, conflict, and personality-balance checks
//! - [`analyzers`]: search strategies that propose the next assignment or swap
//! - [`moves`] and [`history`]: committing a suggestion and undoing it
//! - [`worker`]: a single dedicated worker that runs analyzers one at a time
//! - [`maintenance`]: periodic best-effort fitness recompute
//!
//! The engine works on an in-memory [`RosterSnapshot`](teamfit_core::roster::RosterSnapshot).
//! Loading and persisting it is the caller's job.

pub mod analyzers;
pub mod constraints;
pub mod error;
pub mod fitness;
pub mod history;
pub mod maintenance;
pub mod moves;
pub mod worker;

pub use analyzers::{
    Analyzer, AssignAcrossTeams, AssignToTeam, SecondTeamFor, SwapAcrossAllPairs, SwapBetweenTeams,
};
pub use error::{EngineError, StoreError, WorkerError};
pub use fitness::FitnessCalculator;
pub use history::History;
pub use maintenance::{FitnessStore, MaintenanceHandle, MaintenanceReport, MaintenanceTask};
pub use worker::AnalysisWorker;
