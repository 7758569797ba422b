use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::rewards::{
    Activity, ActivityType, Decision, RedeemRequest, RedemptionOutcome, RewardsError,
    RewardsLedger, SubmitActivityRequest, SubmitActivityResponse, UserBalance,
};
use crate::validation;

/// Service layer for rewards business logic
#[derive(Clone)]
pub struct RewardsService {
    ledger: Arc<RewardsLedger>,
}

impl RewardsService {
    /// Create a new RewardsService over a fresh ledger
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(RewardsLedger::new()),
        }
    }

    /// Submit a sustainability activity
    ///
    /// This method:
    /// 1. Validates the request shape
    /// 2. Resolves the activity type; unknown types are a distinct error,
    ///    never silently treated as a zero-point submission
    /// 3. Appends to the log and credits auto-verifying types, atomically
    pub async fn submit_activity(
        &self,
        request: SubmitActivityRequest,
    ) -> Result<SubmitActivityResponse, RewardsError> {
        // 1. Structural validation
        request.validate()?;
        validation::validate_user_id(&request.user_id)
            .map_err(|_| RewardsError::ValidationError("userId is required".to_string()))?;

        // 2. Resolve the type
        let activity_type = ActivityType::from_str(&request.activity_type)
            .map_err(|_| RewardsError::UnknownActivityType(request.activity_type.clone()))?;

        // 3. Record
        let (activity, user_balance_after) = self
            .ledger
            .submit_activity(
                &request.user_id,
                activity_type,
                request.description,
                request.proof_url,
            )
            .await;

        tracing::info!(
            "recorded {} activity for {} ({} points, verified: {})",
            activity.activity_type,
            activity.user_id,
            activity.points,
            activity.verified
        );

        Ok(SubmitActivityResponse {
            activity,
            user_balance_after,
        })
    }

    /// Full activity log for moderation review, oldest first
    pub async fn list_activities(&self) -> Vec<Activity> {
        let mut activities = self.ledger.list_activities().await;
        activities.sort_by(|a, b| a.date.cmp(&b.date));
        activities
    }

    /// Apply a moderation decision to an activity
    pub async fn moderate_activity(
        &self,
        activity_id: Uuid,
        decision: &str,
    ) -> Result<Activity, RewardsError> {
        let decision = Decision::from_str(decision)
            .map_err(|_| RewardsError::UnknownDecision(decision.to_string()))?;

        let (activity, balance) = self.ledger.moderate_activity(activity_id, decision).await?;

        tracing::info!(
            "moderated activity {} as {:?}; {} now has {} points",
            activity.id,
            decision,
            activity.user_id,
            balance.points
        );

        Ok(activity)
    }

    /// Redeem points for a voucher
    ///
    /// Insufficient balance and unknown users are normal negative outcomes
    /// carried in the result, not errors.
    pub async fn redeem_points(
        &self,
        request: RedeemRequest,
    ) -> Result<RedemptionOutcome, RewardsError> {
        request.validate()?;

        let outcome = self.ledger.redeem_points(&request.user_id).await;
        if outcome.success {
            tracing::info!(
                "{} redeemed a voucher, {} points remaining",
                request.user_id,
                outcome.points_after
            );
        } else {
            tracing::debug!("redemption declined for {}: {}", request.user_id, outcome.message);
        }
        Ok(outcome)
    }

    /// Balance view for a user; unknown users read as zeroed
    pub async fn get_balance(&self, user_id: &str) -> UserBalance {
        self.ledger.balance(user_id).await
    }
}

impl Default for RewardsService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_request(user_id: &str, ty: &str, description: &str) -> SubmitActivityRequest {
        SubmitActivityRequest {
            user_id: user_id.to_string(),
            activity_type: ty.to_string(),
            description: description.to_string(),
            proof_url: None,
        }
    }

    #[tokio::test]
    async fn test_submit_auto_verified_activity() {
        let service = RewardsService::new();
        let response = service
            .submit_activity(submit_request("u1", "packaging", "used compostable mailers"))
            .await
            .unwrap();

        assert!(response.activity.verified);
        assert_eq!(response.activity.points, 8);
        assert_eq!(response.user_balance_after.points, 8);
    }

    #[tokio::test]
    async fn test_submit_unknown_type_is_distinct_error() {
        let service = RewardsService::new();
        let result = service
            .submit_activity(submit_request("u1", "recycling", "sorted glass"))
            .await;

        match result {
            Err(RewardsError::UnknownActivityType(ty)) => assert_eq!(ty, "recycling"),
            other => panic!("Expected UnknownActivityType, got {:?}", other.map(|r| r.activity)),
        }
    }

    #[tokio::test]
    async fn test_submit_requires_user_id() {
        let service = RewardsService::new();
        let result = service
            .submit_activity(submit_request("", "purchase", "order"))
            .await;
        assert!(matches!(result, Err(RewardsError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_submit_requires_description() {
        let service = RewardsService::new();
        let result = service
            .submit_activity(submit_request("u1", "purchase", ""))
            .await;
        assert!(matches!(result, Err(RewardsError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_full_moderation_scenario() {
        let service = RewardsService::new();

        service
            .submit_activity(submit_request("u1", "packaging", "used compostable mailers"))
            .await
            .unwrap();
        let pending = service
            .submit_activity(submit_request("u1", "social", "posted online"))
            .await
            .unwrap();
        assert!(!pending.activity.verified);
        assert_eq!(pending.user_balance_after.points, 8);

        let approved = service
            .moderate_activity(pending.activity.id, "approve")
            .await
            .unwrap();
        assert!(approved.verified);
        assert_eq!(approved.points, 5);
        assert_eq!(service.get_balance("u1").await.points, 13);

        let rejected = service
            .moderate_activity(pending.activity.id, "reject")
            .await
            .unwrap();
        assert!(!rejected.verified);
        assert_eq!(rejected.points, 0);
        assert_eq!(service.get_balance("u1").await.points, 8);
    }

    #[tokio::test]
    async fn test_moderate_with_unknown_decision() {
        let service = RewardsService::new();
        let submitted = service
            .submit_activity(submit_request("u1", "social", "posted online"))
            .await
            .unwrap();

        let result = service
            .moderate_activity(submitted.activity.id, "escalate")
            .await;
        assert!(matches!(result, Err(RewardsError::UnknownDecision(_))));
    }

    #[tokio::test]
    async fn test_moderate_unknown_activity() {
        let service = RewardsService::new();
        let result = service.moderate_activity(Uuid::new_v4(), "approve").await;
        assert!(matches!(result, Err(RewardsError::ActivityNotFound(_))));
    }

    #[tokio::test]
    async fn test_activities_listed_oldest_first() {
        let service = RewardsService::new();
        let first = service
            .submit_activity(submit_request("u1", "purchase", "first order"))
            .await
            .unwrap();
        let second = service
            .submit_activity(submit_request("u2", "social", "second post"))
            .await
            .unwrap();

        let activities = service.list_activities().await;
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].id, first.activity.id);
        assert_eq!(activities[1].id, second.activity.id);
    }

    #[tokio::test]
    async fn test_redeem_round_trip() {
        let service = RewardsService::new();
        for _ in 0..10 {
            service
                .submit_activity(submit_request("u1", "purchase", "order"))
                .await
                .unwrap();
        }

        let outcome = service
            .redeem_points(RedeemRequest { user_id: "u1".to_string() })
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.points_after, 0);
        assert_eq!(outcome.vouchers, vec!["10% off next order".to_string()]);

        let declined = service
            .redeem_points(RedeemRequest { user_id: "u1".to_string() })
            .await
            .unwrap();
        assert!(!declined.success);
        assert_eq!(declined.points_after, 0);
    }

    #[tokio::test]
    async fn test_balance_for_unknown_user_is_zeroed() {
        let service = RewardsService::new();
        let balance = service.get_balance("ghost").await;
        assert_eq!(balance.points, 0);
        assert!(balance.discounts.is_empty());
    }
}
