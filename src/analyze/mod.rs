//! Decides which members take part in equality and hashing.
//!
//! The steps run in a fixed order: [`validate`] the declaration, then
//! [`resolve_participants`], which runs [`classify`] on every member before
//! applying visibility and the target's markers.

mod classify;
mod resolve;
mod validate;

pub use classify::classify;
pub use resolve::{Access, Participant, resolve_participants};
pub use validate::validate;

