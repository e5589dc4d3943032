/// Prefix of the per-pair swipe record
pub const SWIPES_PREFIX: &str = "swipes";

/// Prefix of the per-user match set
pub const MATCHES_PREFIX: &str = "matches";

/// Store key builder
pub struct StoreKey;

impl StoreKey {
    /// Build the canonical swipe record key for an unordered user pair
    ///
    /// The lexicographically smaller id always comes first, so
    /// `swipes(a, b) == swipes(b, a)`.
    pub fn swipes(user1: &str, user2: &str) -> String {
        let (low, high) = if user1 <= user2 {
            (user1, user2)
        } else {
            (user2, user1)
        };
        format!("{}:{}:{}", SWIPES_PREFIX, low, high)
    }

    /// Build the match set key for a user
    pub fn matches(user_id: &str) -> String {
        format!("{}:{}", MATCHES_PREFIX, user_id)
    }
}
