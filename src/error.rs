use thiserror::Error;

/// Errors raised by the swipe store, the match service and the simulator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwipeError {
    #[error("Store unreachable: {0}")]
    Connection(String),

    #[error("Invalid action '{0}': expected 'like' or 'dislike'")]
    InvalidAction(String),

    #[error("Procedure error: {0}")]
    Procedure(String),

    #[error("User '{0}' cannot swipe on themselves")]
    SameUser(String),

    #[error("Invalid user id: {0}")]
    InvalidUser(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SwipeError {
    /// Whether the error originates from the store being unreachable
    pub fn is_connection(&self) -> bool {
        matches!(self, SwipeError::Connection(_))
    }
}

impl From<redis::RedisError> for SwipeError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            SwipeError::Connection(err.to_string())
        } else {
            SwipeError::Procedure(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SwipeError>;
