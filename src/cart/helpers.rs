//! Shopping Cart Business Logic Helpers
//!
//! This module contains helper functions for cart sessions and formatting.

use super::models::CartLine;
use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::Response,
};
use uuid::Uuid;

/// Cookie carrying the session (and therefore cart) identifier.
pub const SESSION_COOKIE: &str = "cart_session";

/// Returns the provided `cart_id` or creates a new UUID string when `None`.
///
/// This guarantees that every cart operation works with a non-empty identifier.
pub fn get_or_create_cart_id(cart_id: Option<String>) -> String {
    cart_id.unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

/// Reads the session id from the request cookies.
///
/// Returns the id and whether it was newly minted, in which case the response
/// must set the cookie with [`attach_session_cookie`].
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_owned());

    let is_new = existing.is_none();
    (get_or_create_cart_id(existing), is_new)
}

/// Adds the `Set-Cookie` header for a newly minted session.
pub fn attach_session_cookie(mut response: Response, session_id: &str, is_new: bool) -> Response {
    if !is_new {
        return response;
    }

    let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }

    response
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x Organic Cotton T-Shirt, 1x Premium Leather Jacket"`.
pub fn format_item_summary(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}x {}", line.quantity, line.product.name))
        .collect::<Vec<_>>()
        .join(", ")
}
