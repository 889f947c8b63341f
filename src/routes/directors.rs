use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use sea_orm::EntityTrait;

use crate::{
    AppState,
    entities::director,
    error::{AppError, AppResult},
    models::DirectorRecord,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/directors", get(list))
        .route("/directors/", get(list))
        .route("/directors/{director_id}", get(show))
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<DirectorRecord>>> {
    let directors = director::Entity::find().all(&state.db).await?;
    Ok(Json(directors.into_iter().map(DirectorRecord::from).collect()))
}

// Zero-or-one lookup: an unknown id is a 404, not a store error.
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(director_id): Path<i32>,
) -> AppResult<Json<DirectorRecord>> {
    let director = director::Entity::find_by_id(director_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("Такого директора не существует"))?;
    Ok(Json(director.into()))
}
