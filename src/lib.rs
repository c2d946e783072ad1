//! scrolly-rs: scroll-driven narrative core.
//!
//! Stage regions entering the viewport drive which chart panel is visible
//! and which slice of data it renders. Drawing stays with the host; this
//! crate owns the synchronization between scrolling, panels and charts.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ScrollyConfig, ScrollyEngine};
pub use error::{ScrollyError, ScrollyResult};
