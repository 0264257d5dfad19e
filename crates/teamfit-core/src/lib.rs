//! # teamfit-core
//!
//! Core types, skill vocabulary, and error types for Teamfit.
//!
//! This crate provides the foundational types shared across all Teamfit crates:
//! - Skill, ranking, and personality enums
//! - Entity structs (students, projects, preferences, teams, team fitness)
//! - History entries describing committed moves
//! - Suggestion values returned by the analyzers
//! - The in-memory roster snapshot with typed lookups
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod history;
pub mod roster;
pub mod suggestion;
