/**
 * Authentication Middleware
 *
 * This module protects routes that require a bearer token. The middleware
 * strips the `Bearer` scheme, asks the token service to verify the rest and
 * stores the decoded claims in the request extensions. Handlers pick them
 * up with the `AuthUser` or `AdminUser` extractors.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::backend::auth::sessions::{Claims, TokenService};
use crate::backend::error::BackendError;

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme name is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Authentication middleware
///
/// Returns 401 if the token is missing or invalid. Expired, forged and
/// malformed tokens are not distinguished.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        BackendError::unauthorized()
    })?;

    let claims = tokens.verify(token).ok_or_else(|| {
        tracing::warn!("Invalid bearer token");
        BackendError::unauthorized()
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated caller
#[derive(Clone, Debug)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<Claims>().cloned().ok_or_else(|| {
            tracing::warn!("Claims not found in request extensions");
            BackendError::unauthorized()
        })?;

        Ok(AuthUser(claims))
    }
}

/// Axum extractor for an authenticated caller with the admin role
///
/// Rejects with 403 when the token is valid but the role is not admin.
#[derive(Clone, Debug)]
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if !claims.is_admin() {
            tracing::warn!("User {} attempted an admin operation", claims.user_id);
            return Err(BackendError::forbidden());
        }
        Ok(AdminUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("abc.def.ghi")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_auth_user_missing_claims() {
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_user_requires_admin_role() {
        use crate::shared::models::Role;

        let claims = Claims {
            user_id: "u1".to_string(),
            role: Role::Normal,
            tenant_id: "t1".to_string(),
            exp: 0,
            iat: 0,
        };
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .extension(claims.clone())
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let AuthUser(found) = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(found, claims);

        let err = AdminUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }
}
