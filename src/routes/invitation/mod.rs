//! src/routes/invitation/mod.rs

mod post;
mod preflight;

pub use post::*;
pub use preflight::*;
