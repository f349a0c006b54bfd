use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{verify_token, Claims};
use crate::error::ApiError;
use crate::models::Role;

/// Authenticated identity extracted from a bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Reject the request unless it carries a valid bearer token; on success the
/// decoded identity is attached to the request extensions.
pub async fn require_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("No token provided"))?;

    let claims =
        verify_token(&token).ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Requires `require_auth` to have run earlier in the chain. Customers get
/// 403; a request that skipped authentication entirely gets 401.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if !user.role.is_admin() {
        return Err(ApiError::forbidden("Admin access required"));
    }

    Ok(next.run(request).await)
}

/// Same decode as `require_auth` but all failures fall through to an
/// unauthenticated request. Lets public listings widen scope for admins
/// without blocking anonymous callers.
pub async fn optional_auth(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    if let Some(token) = extract_bearer_token(&headers) {
        if let Some(claims) = verify_token(&token) {
            request.extensions_mut().insert(AuthUser::from(claims));
        }
    }

    next.run(request).await
}

/// Pull the token out of `Authorization: Bearer <token>`. A missing header,
/// a non-Bearer scheme and an empty token all count as "no token".
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn non_bearer_scheme_yields_none() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert!(extract_bearer_token(&headers).is_none());
    }

    #[test]
    fn empty_token_yields_none() {
        assert!(extract_bearer_token(&headers_with_auth("Bearer ")).is_none());
        assert!(extract_bearer_token(&headers_with_auth("Bearer    ")).is_none());
    }
}
