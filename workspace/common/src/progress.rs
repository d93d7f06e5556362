use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display-level phase of a posting, derived from its flags and counters.
///
/// The stored columns only carry `status`, `is_closed` and `auto_closed`;
/// everything else is computed so the counters remain the single source of
/// truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PostingPhase {
    Open,
    PartiallyFilled,
    Filled,
    ManuallyClosed,
    AutoClosed,
    Deleted,
}

/// Capacity summary of a posting as shown on employer dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostingProgress {
    pub required_candidates: i32,
    pub hired_count: i32,
    pub applications_count: i32,
    pub remaining_slots: i32,
    pub phase: PostingPhase,
}

impl PostingProgress {
    pub fn from_counts(
        deleted: bool,
        is_closed: bool,
        auto_closed: bool,
        required_candidates: i32,
        hired_count: i32,
        applications_count: i32,
    ) -> Self {
        let phase = if deleted {
            PostingPhase::Deleted
        } else if is_closed {
            if auto_closed {
                PostingPhase::AutoClosed
            } else {
                PostingPhase::ManuallyClosed
            }
        } else if hired_count >= required_candidates {
            PostingPhase::Filled
        } else if hired_count > 0 {
            PostingPhase::PartiallyFilled
        } else {
            PostingPhase::Open
        };

        Self {
            required_candidates,
            hired_count,
            applications_count,
            remaining_slots: (required_candidates - hired_count).max(0),
            phase,
        }
    }
}
