//! HTTP handlers for `/billing` endpoints.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::middleware::OptionalSession;
use crate::adapters::http::state::KitAuthState;
use crate::application::StartCheckoutCommand;
use crate::domain::billing::CheckoutError;

use super::dto::{CheckoutQuery, PlanResponse};

/// GET /billing/plans - All configured plans
pub async fn list_plans(State(state): State<KitAuthState>) -> impl IntoResponse {
    let plans: Vec<PlanResponse> = state
        .plans
        .list()
        .into_iter()
        .map(PlanResponse::from)
        .collect();

    Json(plans)
}

/// GET|POST /billing/checkout - Start a subscription for the current user
///
/// Redirects (303) to the success page for free and trial plans, and to the
/// provider's checkout page otherwise.
pub async fn checkout(
    State(state): State<KitAuthState>,
    OptionalSession(current): OptionalSession,
    Query(query): Query<CheckoutQuery>,
) -> Result<Redirect, CheckoutApiError> {
    let cmd = StartCheckoutCommand {
        user: current.map(|c| c.user),
        plan_id: query.plan_id(),
    };

    let result = state.start_checkout_handler().handle(cmd).await?;

    Ok(Redirect::to(&result.redirect_to))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to HTTP responses.
#[derive(Debug)]
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl CheckoutApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CheckoutError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            CheckoutError::AlreadySubscribed(_)
            | CheckoutError::NoPlan
            | CheckoutError::PlanNotFound(_) => StatusCode::FORBIDDEN,
            CheckoutError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        ErrorResponse::new(self.0.code(), self.0.to_string()).with_status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn status_of(err: CheckoutError) -> StatusCode {
        CheckoutApiError::from(err).into_response().status()
    }

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(
            status_of(CheckoutError::AuthenticationRequired),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(CheckoutError::already_subscribed(UserId::new("u").unwrap())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_of(CheckoutError::NoPlan), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(CheckoutError::PlanNotFound("x".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(CheckoutError::provider("declined")),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn body_carries_code_and_message() {
        let response = CheckoutApiError::from(CheckoutError::NoPlan).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body.code, "NO_PLAN");
        assert_eq!(
            body.message,
            "No default plan, and plan was not specified in URL"
        );
    }
}
