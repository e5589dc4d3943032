use crate::core::keys::StoreKey;
use crate::error::{Result, SwipeError};
use crate::models::SwipeAction;

/// Name under which the swipe-and-match procedure is registered
pub const SWIPE_AND_CHECK_MATCH: &str = "swipeAndCheckMatch";

/// Redis function library implementing [`SWIPE_AND_CHECK_MATCH`]
pub const SWIPE_MATCH_LIBRARY: &str = include_str!("swipe_and_check_match.lua");

/// Mutation primitives available to a procedure while it holds the store
///
/// Everything done through a scope during one procedure call is applied
/// as a single atomic unit.
pub trait ProcedureScope {
    /// Set `field` of the map stored at `key`, overwriting any prior value
    fn map_set(&mut self, key: &str, field: &str, value: &str);

    /// Read `field` of the map stored at `key`
    fn map_get(&self, key: &str, field: &str) -> Option<String>;

    /// Add `member` to the set at `key`, returning whether it was newly added
    fn set_add(&mut self, key: &str, member: &str) -> bool;
}

/// Signature of a natively executed store procedure
pub type Procedure = fn(&mut dyn ProcedureScope, &[String], &[String]) -> Result<i64>;

/// Record a swipe and create the match when both sides liked each other
///
/// `keys` holds the canonical pair key, `args` holds
/// `[from_user, to_user, action]`. Returns `1` only when this call created
/// the match, `0` otherwise. Input errors are raised before any mutation.
pub fn swipe_and_check_match(
    scope: &mut dyn ProcedureScope,
    keys: &[String],
    args: &[String],
) -> Result<i64> {
    let [pair_key] = keys else {
        return Err(SwipeError::Procedure(format!(
            "{} expects 1 key, got {}",
            SWIPE_AND_CHECK_MATCH,
            keys.len()
        )));
    };
    let [from_user, to_user, action] = args else {
        return Err(SwipeError::Procedure(format!(
            "{} expects 3 arguments, got {}",
            SWIPE_AND_CHECK_MATCH,
            args.len()
        )));
    };

    let action: SwipeAction = action.parse()?;
    if from_user == to_user {
        return Err(SwipeError::SameUser(from_user.clone()));
    }

    scope.map_set(pair_key, from_user, action.as_str());

    if !action.is_like() {
        return Ok(0);
    }

    match scope.map_get(pair_key, to_user).as_deref() {
        Some("like") => {
            let created = scope.set_add(&StoreKey::matches(from_user), to_user);
            scope.set_add(&StoreKey::matches(to_user), from_user);
            Ok(i64::from(created))
        }
        _ => Ok(0),
    }
}
