// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{SwipeAction, UserMatchCount};
pub use requests::SwipeRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchesResponse, SwipeResponse};
