use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SwipeError;

/// Directional action a user takes toward another user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Dislike,
}

impl SwipeAction {
    /// Wire representation stored in the swipe record
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeAction::Like => "like",
            SwipeAction::Dislike => "dislike",
        }
    }

    pub fn is_like(&self) -> bool {
        matches!(self, SwipeAction::Like)
    }
}

impl fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwipeAction {
    type Err = SwipeError;

    /// Only the exact lowercase values are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(SwipeAction::Like),
            "dislike" => Ok(SwipeAction::Dislike),
            other => Err(SwipeError::InvalidAction(other.to_string())),
        }
    }
}

/// Number of matches a user ended up with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMatchCount {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub matches: usize,
}
