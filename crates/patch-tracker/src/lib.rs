//! Core crate for PatchTracker, the crowdsourced directory of legacy
//! museum/archive systems and their security fixes.
//!
//! The `directory` module holds the filter engine the directory view is built
//! on; `registry` holds the registration and fix-submission intake flows that
//! feed the directory's moderation queue.

pub mod config;
pub mod directory;
pub mod error;
pub mod registry;
pub mod telemetry;
