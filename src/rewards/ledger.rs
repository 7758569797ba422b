// Rewards Ledger
//
// Owns the append-only activity log and the per-user point balances. All
// state lives behind a single async mutex: "append activity" and "credit
// balance" commit inside one critical section, so no request can ever
// observe an activity marked verified whose points are missing from the
// balance, or the reverse.

use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::rewards::config::{REDEMPTION_DEBIT, REDEMPTION_THRESHOLD, REDEMPTION_VOUCHER};
use crate::rewards::moderation::apply_decision;
use crate::rewards::{Activity, ActivityType, Decision, RedemptionOutcome, RewardsError, UserBalance};

/// The ledger's mutable state. Methods are synchronous and run under the
/// ledger's mutex; each public method is one atomic unit.
#[derive(Debug, Default)]
pub(crate) struct LedgerState {
    activities: Vec<Activity>,
    users: HashMap<String, UserBalance>,
}

impl LedgerState {
    /// Balance record for a user, created zeroed on first touch
    fn balance_entry(&mut self, user_id: &str) -> &mut UserBalance {
        self.users
            .entry(user_id.to_string())
            .or_insert_with(|| UserBalance::new(user_id))
    }

    /// Append a new activity; auto-verifying types credit immediately
    pub(crate) fn submit(
        &mut self,
        user_id: &str,
        activity_type: ActivityType,
        description: String,
        proof_url: Option<String>,
    ) -> (Activity, UserBalance) {
        let auto_verified = activity_type.auto_verifies();
        let points = if auto_verified {
            activity_type.point_value()
        } else {
            0
        };

        let activity = Activity {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            activity_type,
            description,
            proof_url,
            points,
            verified: auto_verified,
            date: Utc::now(),
        };

        self.activities.push(activity.clone());

        let balance = self.balance_entry(user_id);
        if auto_verified {
            balance.points += points;
        }

        (activity, balance.clone())
    }

    /// Apply a moderation decision to an activity, reconciling the balance
    ///
    /// Approval recomputes points from the type table; rejection zeroes
    /// them and debits back whatever was previously credited, so repeated
    /// flips stay consistent. The debit saturates at zero: a balance
    /// already spent by redemption is not driven negative.
    pub(crate) fn moderate(
        &mut self,
        activity_id: Uuid,
        decision: Decision,
    ) -> Result<(Activity, UserBalance), RewardsError> {
        let activity = self
            .activities
            .iter_mut()
            .find(|a| a.id == activity_id)
            .ok_or(RewardsError::ActivityNotFound(activity_id))?;

        let outcome = apply_decision(
            activity.verified,
            activity.points,
            decision,
            activity.activity_type.point_value(),
        );
        activity.verified = outcome.verified;
        activity.points = outcome.points;
        let updated = activity.clone();

        let balance = self.balance_entry(&updated.user_id);
        balance.points = (balance.points + outcome.balance_delta).max(0);

        Ok((updated, balance.clone()))
    }

    /// Redeem points for a voucher; exactly one voucher per call
    pub(crate) fn redeem(&mut self, user_id: &str) -> RedemptionOutcome {
        let Some(balance) = self.users.get_mut(user_id) else {
            return RedemptionOutcome {
                success: false,
                message: "User not found.".to_string(),
                points_after: 0,
                vouchers: Vec::new(),
            };
        };

        if balance.points < REDEMPTION_THRESHOLD {
            return RedemptionOutcome {
                success: false,
                message: "Not enough points to redeem.".to_string(),
                points_after: balance.points,
                vouchers: balance.discounts.clone(),
            };
        }

        balance.points -= REDEMPTION_DEBIT;
        balance.discounts.push(REDEMPTION_VOUCHER.to_string());

        RedemptionOutcome {
            success: true,
            message: "Discount redeemed!".to_string(),
            points_after: balance.points,
            vouchers: balance.discounts.clone(),
        }
    }

    pub(crate) fn activities(&self) -> Vec<Activity> {
        self.activities.clone()
    }

    pub(crate) fn balance(&self, user_id: &str) -> UserBalance {
        self.users
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| UserBalance::new(user_id))
    }
}

/// Shared, serialized rewards state
#[derive(Debug, Default)]
pub struct RewardsLedger {
    state: Mutex<LedgerState>,
}

impl RewardsLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an activity and return it with the balance after any credit
    pub async fn submit_activity(
        &self,
        user_id: &str,
        activity_type: ActivityType,
        description: String,
        proof_url: Option<String>,
    ) -> (Activity, UserBalance) {
        let mut state = self.state.lock().await;
        state.submit(user_id, activity_type, description, proof_url)
    }

    /// Full activity log, in submission order
    pub async fn list_activities(&self) -> Vec<Activity> {
        self.state.lock().await.activities()
    }

    /// Moderate an activity by id
    pub async fn moderate_activity(
        &self,
        activity_id: Uuid,
        decision: Decision,
    ) -> Result<(Activity, UserBalance), RewardsError> {
        let mut state = self.state.lock().await;
        state.moderate(activity_id, decision)
    }

    /// Attempt a redemption for the user
    pub async fn redeem_points(&self, user_id: &str) -> RedemptionOutcome {
        let mut state = self.state.lock().await;
        state.redeem(user_id)
    }

    /// Current balance view; unknown users read as zeroed
    pub async fn balance(&self, user_id: &str) -> UserBalance {
        self.state.lock().await.balance(user_id)
    }
}
