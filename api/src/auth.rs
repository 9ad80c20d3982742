use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    routing::post,
    Router,
};
use serde::Serialize;
use theater_service::{
    auth::Auth,
    form::{LoginForm, RegisterForm},
    view::Session,
    Query, ServiceError,
};
use tracing::debug;
use uuid::Uuid;

use crate::{error::ApiError, extract::Json, AppState};

/// The caller behind a verified bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

impl AuthUser {
    async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Self, ApiError> {
        let token = bearer_token(headers).ok_or_else(ApiError::unauthorized)?;
        let claims = state.tokens.verify(token).map_err(|err| {
            debug!("rejected token: {err}");
            ApiError::unauthorized()
        })?;
        // a token for a user that no longer exists is as good as no token
        let user = Query::find_user_by_id(&state.conn, claims.sub)
            .await?
            .ok_or_else(ApiError::unauthorized)?;
        Ok(Self {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(ApiError::unauthorized)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Gate in front of every protected route.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = AuthUser::authenticate(&state, request.headers()).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[derive(Serialize)]
struct SessionResponse {
    ok: bool,
    user: Session,
}

impl From<Session> for SessionResponse {
    fn from(user: Session) -> Self {
        Self { ok: true, user }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    match Auth::register(&state.conn, &state.tokens, form).await {
        Ok(session) => Ok((StatusCode::CREATED, Json(session.into()))),
        Err(err @ (ServiceError::Validation(_) | ServiceError::Conflict(_))) => {
            Err(ApiError::new(StatusCode::BAD_REQUEST, "Registration failed").with_error(err.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = Auth::login(&state.conn, &state.tokens, form).await?;
    Ok(Json(session.into()))
}
