// Moderation transition for activity verification
//
// Verified is not a terminal state: moderators may flip an activity between
// verified and unverified any number of times. Every transition therefore
// reports the balance delta that keeps the user's aggregate equal to the
// sum of their currently-verified activity points.

use crate::rewards::Decision;

/// Result of applying a moderation decision to an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModerationOutcome {
    /// New verified flag for the activity
    pub verified: bool,
    /// New points recorded on the activity
    pub points: i32,
    /// Signed adjustment to the user's balance. Re-approving an already
    /// verified activity yields 0; rejecting a verified one debits back
    /// whatever had been credited.
    pub balance_delta: i32,
}

/// Apply a decision to an activity's current verification state.
///
/// `table_points` is the current point value for the activity's type.
/// Approval always recomputes from the table, never trusts whatever number
/// the record carried.
pub fn apply_decision(
    currently_verified: bool,
    current_points: i32,
    decision: Decision,
    table_points: i32,
) -> ModerationOutcome {
    let previously_credited = if currently_verified { current_points } else { 0 };

    match decision {
        Decision::Approve => ModerationOutcome {
            verified: true,
            points: table_points,
            balance_delta: table_points - previously_credited,
        },
        Decision::Reject => ModerationOutcome {
            verified: false,
            points: 0,
            balance_delta: -previously_credited,
        },
    }
}
