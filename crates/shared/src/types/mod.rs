//! Common types used across the application.

pub mod amount;
pub mod id;

pub use amount::{exceeds_scale, rescale};
pub use id::*;
