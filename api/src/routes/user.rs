use axum::{extract::State, routing::get, Router};
use entity::user;
use theater_service::Query;

use crate::{error::ApiError, extract::Json, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}

// password hashes never serialize, see `user::Model`
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<user::Model>>, ApiError> {
    Ok(Json(Query::find_all_users(&state.conn).await?))
}
