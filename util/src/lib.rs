//! Shared building blocks for the lab dashboard crates: runtime configuration
//! and the immutable result snapshots passed between the client, the
//! classifiers and the presenter.

pub mod config;
pub mod models;
