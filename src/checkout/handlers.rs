//! REST API handlers for the checkout flow

use super::{
    errors::CheckoutError,
    models::{default_cod_amount, CheckoutForm, CheckoutResponse},
};
use crate::{
    cart::helpers::{attach_session_cookie, resolve_session_id},
    state::{AppState, SharedState, Session},
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

/// Creates routes for checkout operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/checkout", get(get_checkout).post(submit))
        .route("/checkout/begin", post(begin))
        .route("/checkout/cancel", post(cancel))
        .route("/checkout/dismiss", post(dismiss_error))
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        let status = match self {
            _ if self.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
            CheckoutError::SubmissionInterrupted => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::CONFLICT,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn checkout_response(state: &AppState, session_id: &str) -> CheckoutResponse {
    state.read_session(session_id, |session| CheckoutResponse {
        cart_id: session_id.to_owned(),
        phase: session.checkout.phase(),
        confirming: session.checkout.is_confirming(),
        error: session.checkout.error().map(str::to_owned),
        default_cod_amount: default_cod_amount(&session.cart, state.default_delivery_charge()),
    })
}

/// Applies `step` to the caller's session and answers with the checkout state.
fn update_checkout(
    state: &AppState,
    headers: &HeaderMap,
    step: impl FnOnce(&mut Session) -> Result<(), CheckoutError>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(headers);

    let response = match state.with_session(&session_id, step) {
        Ok(()) => Json(checkout_response(state, &session_id)).into_response(),
        Err(error) => error.into_response(),
    };

    attach_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: GET /checkout
async fn get_checkout(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    let response = Json(checkout_response(&state, &session_id)).into_response();
    attach_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: POST /checkout/begin
/// Opens the checkout form for a non-empty cart.
async fn begin(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    update_checkout(&state, &headers, |session| {
        session.checkout.begin(&session.cart)
    })
}

/// Endpoint: POST /checkout/cancel
/// Returns to the cart view with its lines intact.
async fn cancel(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    update_checkout(&state, &headers, |session| session.checkout.cancel())
}

/// Endpoint: POST /checkout/dismiss
async fn dismiss_error(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    update_checkout(&state, &headers, |session| {
        session.checkout.dismiss_error();
        Ok(())
    })
}

/// Endpoint: POST /checkout
/// Validates the form, submits the order and empties the cart.
async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(form): Json<CheckoutForm>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    let response = match state.submit_checkout(&session_id, &form).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(error) => error.into_response(),
    };

    attach_session_cookie(response, &session_id, is_new_session)
}
