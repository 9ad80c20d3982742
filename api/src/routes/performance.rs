use axum::{extract::State, http::StatusCode, routing::get, Router};
use entity::performance;
use theater_service::{
    form::PerformanceForm,
    view::{CastMember, PerformanceDetails, PerformanceWithCast},
    Integrity, Mutation, Query,
};
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
        .route("/", get(list_performances).post(create_performance))
        .route("/year/{year}", get(performances_by_year))
        .route(
            "/{id}",
            get(get_performance)
                .put(update_performance)
                .delete(delete_performance),
        )
        .route("/{id}/cast", get(performance_cast))
}

async fn create_performance(
    State(state): State<AppState>,
    Json(form): Json<PerformanceForm>,
) -> Result<(StatusCode, Json<PerformanceWithCast>), ApiError> {
    let created = Mutation::create_performance(&state.conn, form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_performances(
    State(state): State<AppState>,
) -> Result<Json<Vec<PerformanceDetails>>, ApiError> {
    Ok(Json(Query::find_performances_with_cast(&state.conn).await?))
}

async fn get_performance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<performance::Model>, ApiError> {
    Query::find_performance_by_id(&state.conn, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Performance"))
}

async fn performance_cast(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CastMember>>, ApiError> {
    Ok(Json(Integrity::list_cast_for_performance(&state.conn, id).await?))
}

async fn performances_by_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<Vec<performance::Model>>, ApiError> {
    Ok(Json(Query::find_performances_by_year(&state.conn, year).await?))
}

async fn update_performance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<PerformanceForm>,
) -> Result<Json<performance::Model>, ApiError> {
    Ok(Json(
        Mutation::update_performance_by_id(&state.conn, id, form).await?,
    ))
}

async fn delete_performance(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    let outcome = Mutation::delete_performance(&state.conn, id, state.performance_cascade).await?;
    info!(
        user = %user.id,
        performance = %id,
        employments = outcome.employments_removed,
        "delete served"
    );
    Ok(Json(Message::new("Performance deleted successfully")))
}
