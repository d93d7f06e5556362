//! Relational model of the KaamSet marketplace.
//!
//! Entities describe storage only; state transitions (capacity accounting,
//! status flips, offer expiry) live in the `lifecycle` crate so every write
//! path shares the same invariants.

pub mod entities;
