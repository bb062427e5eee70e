//! Foundation types for the Sideout backend.
//!
//! This crate provides the identifier types shared by every other Sideout
//! crate. Every other crate in the workspace depends on `sideout-types`.
//!
//! # Key Types
//!
//! - [`MatchId`] — Random UUID identifying a match report, the only external
//!   reference a client ever holds
//! - [`UserId`] — Opaque, non-empty account identifier as issued by the
//!   authentication collaborator

pub mod error;
pub mod id;

pub use error::TypeError;
pub use id::{MatchId, UserId};
