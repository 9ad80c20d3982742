use axum::{extract::State, http::StatusCode, routing::get, Router};
use entity::actor;
use theater_service::{form::ActorForm, view::ActorDetails, Mutation, Query};
use tracing::info;
use uuid::Uuid;

use super::Message;
use crate::{
    auth::AuthUser,
    error::ApiError,
    extract::{Json, Path},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_actors).post(create_actor))
        .route(
            "/{id}",
            get(get_actor).put(update_actor).delete(delete_actor),
        )
}

async fn create_actor(
    State(state): State<AppState>,
    Json(form): Json<ActorForm>,
) -> Result<(StatusCode, Json<actor::Model>), ApiError> {
    let actor = Mutation::create_actor(&state.conn, form).await?;
    Ok((StatusCode::CREATED, Json(actor)))
}

async fn list_actors(State(state): State<AppState>) -> Result<Json<Vec<ActorDetails>>, ApiError> {
    Ok(Json(Query::find_actors_with_employments(&state.conn).await?))
}

async fn get_actor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<actor::Model>, ApiError> {
    Query::find_actor_by_id(&state.conn, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Actor"))
}

async fn update_actor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<ActorForm>,
) -> Result<Json<actor::Model>, ApiError> {
    Ok(Json(Mutation::update_actor_by_id(&state.conn, id, form).await?))
}

async fn delete_actor(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    let outcome = Mutation::delete_actor(&state.conn, id).await?;
    info!(
        user = %user.id,
        actor = %id,
        employments = outcome.employments_removed,
        "delete served"
    );
    Ok(Json(Message::new(
        "Actor and associated employments deleted successfully",
    )))
}
