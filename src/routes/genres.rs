use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use sea_orm::EntityTrait;

use crate::{
    AppState,
    entities::genre,
    error::{AppError, AppResult},
    models::GenreRecord,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/genre", get(list))
        .route("/genre/", get(list))
        .route("/genre/{genre_id}", get(show))
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<GenreRecord>>> {
    let genres = genre::Entity::find().all(&state.db).await?;
    Ok(Json(genres.into_iter().map(GenreRecord::from).collect()))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(genre_id): Path<i32>,
) -> AppResult<Json<GenreRecord>> {
    let genre = genre::Entity::find_by_id(genre_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound("Такого жанра не существует"))?;
    Ok(Json(genre.into()))
}
