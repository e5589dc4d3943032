use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to record a swipe
///
/// `action` stays a string so that malformed values surface as an
/// invalid-action error instead of a generic JSON error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "from_user_id", rename = "fromUserId")]
    pub from_user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "to_user_id", rename = "toUserId")]
    pub to_user_id: String,
    pub action: String,
}
