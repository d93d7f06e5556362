//! Shared domain types used by the lifecycle crate and the HTTP layer.
//! Kept free of database dependencies so both sides can reuse them.

mod progress;
mod snapshot;

pub use progress::{PostingPhase, PostingProgress};
pub use snapshot::{ApplicantSnapshot, employer_display_name};
