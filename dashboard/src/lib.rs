//! # Dashboard
//!
//! Orchestrates fetch, classification and rendering for the lab results view.
//!
//! - [`surface`]: the [`UiSurface`] sink the dashboard renders into, plus an
//!   in-memory and a terminal implementation.
//! - [`render`]: pure functions from payloads to [`RenderOp`] lists.
//! - [`presenter`]: [`DashboardPresenter`], which owns the current selection and
//!   sequences fetch → plan → apply for every user action.

pub mod presenter;
pub mod render;
pub mod surface;

pub use presenter::DashboardPresenter;
pub use render::RenderOp;
pub use surface::{CellId, Field, NoticeKind, UiSurface};
