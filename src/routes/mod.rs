//! src/routes/mod.rs

mod health_check;
mod invitation;

pub use health_check::*;
pub use invitation::*;
