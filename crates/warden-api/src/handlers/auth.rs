//! Auth handlers: login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::Value;

use warden_auth::RequestContext;
use warden_core::config::StrategyKind;
use warden_core::error::{AppError, ErrorKind};
use warden_entity::Subject;

use crate::dto::request::LoginRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthSubject;
use crate::state::ApiState;

/// POST /v1/login
///
/// Returns the credential under the configured header name, both as a
/// response header and as a body field, and as a cookie for the cookie
/// strategy.
pub async fn login(
    State(state): State<ApiState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;
    let (email, password) = req.credentials()?;

    let outcome = state.authenticator.login(email, password).await?;
    let strategy = state.dispatcher.strategy();
    let header_name = strategy.credential_name();

    let mut body =
        serde_json::to_value(ApiResponse::ok("Login successful", &outcome.subject))
            .map_err(AppError::from)?;
    if let Some(fields) = body.as_object_mut() {
        fields.insert(
            header_name.to_string(),
            Value::String(outcome.credential.clone()),
        );
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::try_from(header_name)
            .map_err(|e| AppError::configuration(format!("Invalid header name: {e}")))?,
        HeaderValue::from_str(&outcome.credential)
            .map_err(|e| AppError::internal(format!("Credential is not a valid header: {e}")))?,
    );

    let jar = match strategy.kind() {
        StrategyKind::Cookie => jar.add(session_cookie(
            header_name,
            outcome.credential,
            state.config.auth.session_ttl_seconds,
        )?),
        _ => jar,
    };

    Ok((jar, headers, Json(body)).into_response())
}

/// DELETE /v1/logout
pub async fn logout(
    State(state): State<ApiState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<(CookieJar, Json<ApiResponse<()>>), ApiError> {
    let strategy = state.dispatcher.strategy();
    let ctx = RequestContext::from_headers(headers);

    strategy
        .destroy_session(&ctx)
        .await
        .map_err(|e| match e.kind {
            ErrorKind::StoreUnavailable => e,
            _ => AppError::validation(e.message),
        })?;

    let jar = match strategy.kind() {
        StrategyKind::Cookie => {
            jar.remove(Cookie::build((strategy.credential_name().to_string(), "")).path("/"))
        }
        _ => jar,
    };

    Ok((jar, Json(ApiResponse::message("Logout success"))))
}

/// GET /v1/me
pub async fn me(AuthSubject(subject): AuthSubject) -> Json<ApiResponse<Subject>> {
    Json(ApiResponse::ok("Current user", subject))
}

fn session_cookie(
    name: &str,
    value: String,
    ttl_seconds: u64,
) -> Result<Cookie<'static>, AppError> {
    let max_age = i64::try_from(ttl_seconds).map_err(|_| {
        AppError::configuration(format!("Cookie max-age out of range: {ttl_seconds}s"))
    })?;
    Ok(Cookie::build((name.to_string(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age))
        .build())
}
