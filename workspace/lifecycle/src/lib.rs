//! The job lifecycle manager: the invariant layer between the CRUD handlers
//! and the relational store.
//!
//! The schema alone cannot express the rules that make the marketplace
//! consistent: capacity-triggered auto-closure, one-way status transitions,
//! duplicate-application protection, offer expiry. Every such rule lives
//! here, enforced as a conditional update whose WHERE clause re-checks the
//! precondition, so concurrent writers resolve to exactly one winner.

pub mod application;
pub mod dismissal;
pub mod error;
pub mod offer;
pub mod posting;

#[cfg(test)]
mod testing;

pub use error::{LifecycleError, Result};
