//! Data models for the room directory.
//!
//! These models match the frontend TypeScript interfaces for seamless interoperability.

mod account;
mod room;
mod sync;

pub use account::*;
pub use room::*;
pub use sync::*;
