use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, decoded from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
    pub name: String,
}

/// Extractor that requires a valid bearer token.
/// Returns 401 when the Authorization header is missing or the token fails
/// verification; an expired token gets its own message.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".into()))?;

        let claims = state.tokens.verify(token)?;
        Ok(AuthUser {
            user_id: claims.user_id,
            email: claims.email,
            name: claims.name,
        })
    }
}

fn extract_bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/reservations");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn bearer_token_is_extracted() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        let parts = parts_with_auth(None);
        assert_eq!(extract_bearer_token(&parts), None);
    }

    #[test]
    fn non_bearer_scheme_yields_none() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_bearer_token(&parts), None);
    }

    #[test]
    fn empty_bearer_token_yields_none() {
        let parts = parts_with_auth(Some("Bearer "));
        assert_eq!(extract_bearer_token(&parts), None);
    }
}
