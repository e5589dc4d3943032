use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::error::SwipeError;
use crate::models::{ErrorResponse, HealthResponse, MatchesResponse, SwipeRequest, SwipeResponse};
use crate::services::MatchService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: MatchService,
}

/// Configure all swipe-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/swipes", web::post().to(submit_swipe))
        .route("/matches/{user_id}", web::get().to(list_matches));
}

/// Map a swipe error onto an HTTP status and JSON body
fn error_response(err: &SwipeError) -> HttpResponse {
    let (status, error) = match err {
        SwipeError::InvalidAction(_) => (StatusCode::BAD_REQUEST, "Invalid action"),
        SwipeError::SameUser(_) => (StatusCode::BAD_REQUEST, "Same user"),
        SwipeError::InvalidUser(_) => (StatusCode::BAD_REQUEST, "Invalid user"),
        SwipeError::Connection(_) => (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable"),
        SwipeError::Procedure(_) | SwipeError::Config(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Swipe failed")
        }
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = match state.service.store().ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Submit swipe endpoint
///
/// POST /api/v1/swipes
///
/// Request body:
/// ```json
/// {
///   "fromUserId": "string",
///   "toUserId": "string",
///   "action": "like|dislike"
/// }
/// ```
async fn submit_swipe(
    state: web::Data<AppState>,
    req: web::Json<SwipeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for swipe request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state
        .service
        .submit_swipe_raw(&req.from_user_id, &req.to_user_id, &req.action)
        .await
    {
        Ok(matched) => {
            tracing::info!(
                "{} -> {} {} (matched: {})",
                req.from_user_id,
                req.action,
                req.to_user_id,
                matched
            );
            HttpResponse::Ok().json(SwipeResponse { matched })
        }
        Err(e) => {
            tracing::error!(
                "Swipe {} -> {} ({}) failed: {}",
                req.from_user_id,
                req.to_user_id,
                req.action,
                e
            );
            error_response(&e)
        }
    }
}

/// List matches endpoint
///
/// GET /api/v1/matches/{userId}
async fn list_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();

    match state.service.list_matches(&user_id).await {
        Ok(matches) => {
            let matches: Vec<String> = matches.into_iter().collect();
            HttpResponse::Ok().json(MatchesResponse {
                count: matches.len(),
                user_id,
                matches,
            })
        }
        Err(e) => {
            tracing::error!("Failed to fetch matches for {}: {}", user_id, e);
            error_response(&e)
        }
    }
}
