use axum::{extract::State, http::StatusCode, routing::get, Router};
use entity::employment;
use theater_service::{
    form::EmploymentForm,
    view::{EmploymentDetails, EmploymentWithActor, EmploymentWithPerformance},
    Integrity, Mutation, Query,
};
use uuid::Uuid;

use super::Message;
use crate::{
    error::ApiError,
    extract::{Json, Path},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employments).post(create_employment))
        .route("/actor/{actor_id}", get(employments_by_actor))
        .route("/performance/{performance_id}", get(employments_by_performance))
        .route(
            "/{id}",
            get(get_employment)
                .put(update_employment)
                .delete(delete_employment),
        )
}

async fn create_employment(
    State(state): State<AppState>,
    Json(form): Json<EmploymentForm>,
) -> Result<(StatusCode, Json<employment::Model>), ApiError> {
    let employment = Mutation::create_employment(&state.conn, form).await?;
    Ok((StatusCode::CREATED, Json(employment)))
}

async fn list_employments(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmploymentDetails>>, ApiError> {
    Ok(Json(Query::find_employments(&state.conn).await?))
}

async fn get_employment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmploymentDetails>, ApiError> {
    Query::find_employment_by_id(&state.conn, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Employment"))
}

async fn employments_by_actor(
    State(state): State<AppState>,
    Path(actor_id): Path<Uuid>,
) -> Result<Json<Vec<EmploymentWithPerformance>>, ApiError> {
    Ok(Json(
        Integrity::list_employments_for_actor(&state.conn, actor_id).await?,
    ))
}

async fn employments_by_performance(
    State(state): State<AppState>,
    Path(performance_id): Path<Uuid>,
) -> Result<Json<Vec<EmploymentWithActor>>, ApiError> {
    Ok(Json(
        Integrity::list_employments_for_performance(&state.conn, performance_id).await?,
    ))
}

async fn update_employment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<EmploymentForm>,
) -> Result<Json<EmploymentDetails>, ApiError> {
    Ok(Json(
        Mutation::update_employment_by_id(&state.conn, id, form).await?,
    ))
}

async fn delete_employment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    Mutation::delete_employment(&state.conn, id).await?;
    Ok(Json(Message::new("Employment deleted successfully")))
}
