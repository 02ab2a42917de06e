//! Response envelope
//!
//! Every response leaving the API has one of two shapes:
//!
//! ```json
//! { "success": true,  "message": "Product added", "product": { ... } }
//! { "success": false, "status": "NOT_FOUND", "code": 404, "message": "Product not found" }
//! ```
//!
//! The front ends read `success`/`status` plus the named payload field, so the
//! payload field name is part of the contract and chosen per endpoint. A
//! payload struct can also be merged into the top level (login returns both
//! `user` and `token` next to `message`).

use std::borrow::Cow;

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::app_error::AppError;

/// Success envelope with an optional named payload field
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    status: StatusCode,
    message: Cow<'static, str>,
    payload: Option<Payload<T>>,
}

#[derive(Debug, Clone)]
enum Payload<T> {
    Named(&'static str, T),
    Merged(T),
}

#[derive(Serialize)]
struct MergedBody<'a, T> {
    success: bool,
    message: &'a str,
    #[serde(flatten)]
    payload: &'a T,
}

impl Envelope<()> {
    /// 200 with a message and no payload
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            payload: None,
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// 200 with `field: payload`
    pub fn ok(message: impl Into<Cow<'static, str>>, field: &'static str, payload: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            payload: Some(Payload::Named(field, payload)),
        }
    }

    /// 200 with the fields of `payload` next to `success` and `message`
    ///
    /// `payload` must serialize as a map (a struct with named fields).
    pub fn merged(message: impl Into<Cow<'static, str>>, payload: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            payload: Some(Payload::Merged(payload)),
        }
    }

    /// 201 with `field: payload`
    pub fn created(message: impl Into<Cow<'static, str>>, field: &'static str, payload: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(message, field, payload)
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(Payload::Merged(payload)) = &self.payload {
            return MergedBody {
                success: true,
                message: &self.message,
                payload,
            }
            .serialize(serializer);
        }

        let len = if self.payload.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("success", &true)?;
        map.serialize_entry("message", &self.message)?;
        if let Some(Payload::Named(field, payload)) = &self.payload {
            map.serialize_entry(field, payload)?;
        }
        map.end()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Failure envelope rendered from an [`AppError`]
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    success: bool,
    status: &'static str,
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
}

impl From<&AppError> for Failure {
    fn from(err: &AppError) -> Self {
        Self {
            success: false,
            status: err.kind().tag(),
            code: err.status_code(),
            message: err.message().to_string(),
            action: err.action().map(str::to_string),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// JSON body extractor whose rejection is rendered as a failure envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejection is rendered as a failure envelope
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope::ok("Product added", "product", json!({ "id": 1 }));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({ "success": true, "message": "Product added", "product": { "id": 1 } })
        );
        assert_eq!(envelope.status(), StatusCode::OK);
    }

    #[test]
    fn test_created_envelope_status() {
        let envelope = Envelope::created("Order placed", "order", 7);
        assert_eq!(envelope.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_merged_envelope_shape() {
        #[derive(Serialize)]
        struct Login {
            user: &'static str,
            token: &'static str,
        }

        let envelope = Envelope::merged("Logged in", Login { user: "jane", token: "t" });
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({ "success": true, "message": "Logged in", "user": "jane", "token": "t" })
        );
    }

    #[test]
    fn test_message_only_envelope() {
        let value = serde_json::to_value(Envelope::message("OK")).unwrap();
        assert_eq!(value, json!({ "success": true, "message": "OK" }));
    }

    #[test]
    fn test_failure_envelope_shape() {
        let err = AppError::not_found("Product not found");
        let value = serde_json::to_value(Failure::from(&err)).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "status": "NOT_FOUND",
                "code": 404,
                "message": "Product not found"
            })
        );
    }

    #[test]
    fn test_failure_response_status() {
        let response = AppError::conflict("Already in cart").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
