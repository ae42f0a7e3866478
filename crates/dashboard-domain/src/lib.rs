//! Objective Dashboard Domain
//!
//! Entities mirrored from the backend plus the client-side rules that act on
//! them: permission gating, revenue distribution, branch progress, board
//! stage transitions and session tokens.
//! This layer has no browser dependencies and is tested natively.

mod entity;
mod error;

pub mod analytics;
pub mod board;
pub mod catalog;
pub mod distribution;
pub mod filter;
pub mod forms;
pub mod model;
pub mod permissions;
pub mod progress;
pub mod session;
pub mod util;

pub use entity::{find_by_id, remove_by_id, replace_by_id, Entity};
pub use error::{DomainError, DomainResult};
