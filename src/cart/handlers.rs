//! REST API handlers for shopping cart operations
//!
//! This module implements HTTP endpoints for the cart of the calling session.
//! Every endpoint answers with the resulting cart state.

use super::{helpers::*, models::*, store::CartStore};
use crate::{
    catalog::{handlers::ProductView, images::ImageSize},
    state::{AppState, SharedState},
};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", put(set_quantity).delete(remove_item))
        .route("/cart/toggle", post(toggle_cart))
        .route("/cart/open", post(open_cart))
        .route("/cart/close", post(close_cart))
}

/// Builds the API view of a session's cart.
pub fn cart_response(state: &AppState, session_id: &str) -> CartResponse {
    state.read_session(session_id, |session| {
        let cart = &session.cart;
        CartResponse {
            cart_id: session_id.to_owned(),
            items: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    product: ProductView::new(
                        line.product.clone(),
                        &state.images,
                        ImageSize::Thumbnail,
                    ),
                    quantity: line.quantity,
                    line_total: line.line_total(),
                })
                .collect(),
            total_items: cart.total_items(),
            subtotal: cart.display_subtotal(),
            is_open: cart.is_visible(),
        }
    })
}

/// Applies `update` to the caller's cart and answers with the new cart state.
fn update_cart(
    state: &AppState,
    headers: &HeaderMap,
    update: impl FnOnce(&mut CartStore),
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(headers);

    state.with_session(&session_id, |session| update(&mut session.cart));

    let response = Json(cart_response(state, &session_id)).into_response();
    attach_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: GET /cart
/// Unknown sessions see an empty cart without one being stored.
async fn get_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    let response = Json(cart_response(&state, &session_id)).into_response();
    attach_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: POST /cart/items
/// Adds one unit of a product and opens the cart.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddToCartInput>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    let response = match state.add_to_cart(&session_id, payload.product_id).await {
        Ok(_) => Json(cart_response(&state, &session_id)).into_response(),
        Err(error) => error.into_response(),
    };

    attach_session_cookie(response, &session_id, is_new_session)
}

/// Endpoint: PUT /cart/items/:id
/// Sets a line's quantity; quantities below 1 leave the line unchanged.
async fn set_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(payload): Json<SetQuantityInput>,
) -> Response {
    update_cart(&state, &headers, |cart| {
        cart.set_quantity(id, payload.quantity);
    })
}

/// Endpoint: DELETE /cart/items/:id
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    update_cart(&state, &headers, |cart| {
        cart.remove(id);
    })
}

/// Endpoint: DELETE /cart
async fn clear_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    update_cart(&state, &headers, CartStore::clear)
}

/// Endpoint: POST /cart/toggle
async fn toggle_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    update_cart(&state, &headers, |cart| {
        cart.toggle_visible();
    })
}

/// Endpoint: POST /cart/open
async fn open_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    update_cart(&state, &headers, CartStore::open)
}

/// Endpoint: POST /cart/close
async fn close_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    update_cart(&state, &headers, CartStore::close)
}
