use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Closed set of sustainability activity types.
///
/// Each type carries a fixed point value; `purchase` and `packaging` are
/// verifiable from order data alone, so they credit immediately. The rest
/// depend on user-supplied evidence and wait for moderation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Purchase,
    Upcycle,
    Packaging,
    Social,
}

impl ActivityType {
    /// Points awarded for a verified activity of this type
    pub fn point_value(&self) -> i32 {
        match self {
            ActivityType::Purchase => 10,
            ActivityType::Upcycle => 15,
            ActivityType::Packaging => 8,
            ActivityType::Social => 5,
        }
    }

    /// Whether this type verifies at submission time
    pub fn auto_verifies(&self) -> bool {
        matches!(self, ActivityType::Purchase | ActivityType::Packaging)
    }

    /// Convert type to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Purchase => "purchase",
            ActivityType::Upcycle => "upcycle",
            ActivityType::Packaging => "packaging",
            ActivityType::Social => "social",
        }
    }

    /// Parse an activity type from a request string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "purchase" => Ok(ActivityType::Purchase),
            "upcycle" => Ok(ActivityType::Upcycle),
            "packaging" => Ok(ActivityType::Packaging),
            "social" => Ok(ActivityType::Social),
            _ => Err(format!("Invalid activity type: {}", s)),
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Moderation decision for a pending (or previously moderated) activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Parse a decision from a request string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(Decision::Approve),
            "reject" => Ok(Decision::Reject),
            _ => Err(format!("Invalid decision: {}", s)),
        }
    }
}

/// One entry in the append-only activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[schema(value_type = String, example = "9c5b9d2e-95d0-4c0b-a8a3-0f2f24b1a1f0")]
    pub id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_url: Option<String>,
    /// Points actually credited; non-zero only while verified
    pub points: i32,
    pub verified: bool,
    pub date: DateTime<Utc>,
}

/// Per-user rewards balance, created lazily on first activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBalance {
    pub user_id: String,
    /// Running total; never negative
    pub points: i32,
    /// Earned badge names, opaque display data
    pub badges: Vec<String>,
    /// Voucher strings issued by redemptions, in issue order
    pub discounts: Vec<String>,
}

impl UserBalance {
    /// Fresh zeroed balance for a user
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            points: 0,
            badges: Vec::new(),
            discounts: Vec::new(),
        }
    }
}

/// Request payload for submitting a sustainability activity.
///
/// The activity type arrives as a raw string so an unknown type can be
/// rejected with a distinct error instead of a generic decode failure.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitActivityRequest {
    #[validate(length(min = 1, message = "userId is required"))]
    #[schema(example = "user123")]
    pub user_id: String,
    #[serde(rename = "type")]
    #[schema(example = "packaging")]
    pub activity_type: String,
    #[validate(length(min = 1, max = 2000, message = "description must be 1-2000 characters"))]
    #[schema(example = "Used compostable mailers for shipping")]
    pub description: String,
    pub proof_url: Option<String>,
}

/// Response for a submitted activity: the created entry plus the balance
/// after any auto-verify credit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitActivityResponse {
    pub activity: Activity,
    pub user_balance_after: UserBalance,
}

/// Request payload for moderating an activity
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModerateActivityRequest {
    /// "approve" or "reject"
    #[schema(example = "approve")]
    pub decision: String,
}

/// Response wrapper for the moderation view of the activity log
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityListResponse {
    pub activities: Vec<Activity>,
}

/// Request payload for redeeming points
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    #[validate(length(min = 1, message = "userId is required"))]
    #[schema(example = "user123")]
    pub user_id: String,
}

/// Outcome of a redemption attempt.
///
/// Insufficient balance is an expected business outcome, not a fault, so it
/// travels as `success: false` rather than an error status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionOutcome {
    pub success: bool,
    pub message: String,
    pub points_after: i32,
    pub vouchers: Vec<String>,
}
