use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use mongodb::bson::oid::ObjectId;

use crate::utils::error::{AppError, AppResult};
use crate::utils::session::{self, Claims, ROLE_ADMIN, ROLE_ORGANIZER};

/// The caller as the core sees it. Raw credentials never travel past
/// this point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Identity {
    Anonymous,
    Organizer(ObjectId),
    Admin,
}

impl Identity {
    fn from_claims(claims: &Claims) -> Self {
        if claims.role == ROLE_ADMIN {
            return Identity::Admin;
        }
        if claims.role == ROLE_ORGANIZER {
            if let Ok(id) = ObjectId::parse_str(&claims.sub) {
                return Identity::Organizer(id);
            }
        }
        Identity::Anonymous
    }

    /// Organizer-only operations: anonymous callers get 401, admins 403
    /// (an admin account is not an organizer and owns nothing).
    pub fn require_organizer(&self) -> AppResult<ObjectId> {
        match self {
            Identity::Organizer(id) => Ok(*id),
            Identity::Anonymous => Err(AppError::Authentication(
                "Authentication required".to_string(),
            )),
            Identity::Admin => Err(AppError::Forbidden),
        }
    }
}

/// Resolves the request's JWT (cookie or bearer) into an [`Identity`]
/// extension. Missing or invalid tokens resolve to Anonymous rather
/// than failing the request; handlers decide what the route requires.
pub async fn resolve_identity(cookie_jar: CookieJar, mut req: Request, next: Next) -> Response {
    let token = bearer_token(&req).or_else(|| {
        cookie_jar
            .get("token")
            .map(|cookie| cookie.value().to_string())
    });

    let identity = token
        .and_then(|token| session::verify_token(&token).ok())
        .map(|claims| Identity::from_claims(&claims))
        .unwrap_or(Identity::Anonymous);

    req.extensions_mut().insert(identity);

    next.run(req).await
}

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}
