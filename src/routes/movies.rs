use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, JoinType,
    ModelTrait, QueryFilter, QuerySelect, RelationTrait, Select, TransactionTrait,
};

use crate::{
    AppState,
    entities::{director, genre, movie},
    error::{AppError, AppResult},
    extract::JsonBody,
    models::{MovieFilter, MoviePayload, MovieRecord},
};

const NO_SUCH_MOVIE: &str = "Нету такого фильма";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list).post(create))
        .route("/movies/", get(list).post(create))
        .route(
            "/movies/{movie_id}",
            get(show).patch(update_one_field).put(replace).delete(remove),
        )
}

fn with_names() -> Select<movie::Entity> {
    movie::Entity::find()
        .select_only()
        .columns([
            movie::Column::Id,
            movie::Column::Title,
            movie::Column::Description,
            movie::Column::Rating,
            movie::Column::Trailer,
        ])
        .column_as(genre::Column::Name, "genre")
        .column_as(director::Column::Name, "director")
        .join(JoinType::InnerJoin, movie::Relation::Genre.def())
        .join(JoinType::InnerJoin, movie::Relation::Director.def())
}

async fn find_movie<C: ConnectionTrait>(db: &C, movie_id: i32) -> AppResult<movie::Model> {
    movie::Entity::find_by_id(movie_id).one(db).await?.ok_or(AppError::NotFound(NO_SUCH_MOVIE))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MovieFilter>,
) -> AppResult<Json<Vec<MovieRecord>>> {
    let mut query = with_names();
    if let Some(director_id) = filter.director_id {
        query = query.filter(movie::Column::DirectorId.eq(director_id));
    }
    if let Some(genre_id) = filter.genre_id {
        query = query.filter(movie::Column::GenreId.eq(genre_id));
    }

    let movies = query.into_model::<MovieRecord>().all(&state.db).await?;
    Ok(Json(movies))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<MoviePayload>,
) -> AppResult<(StatusCode, String)> {
    let txn = state.db.begin().await?;
    let movie = payload.into_new_movie().insert(&txn).await?;
    txn.commit().await?;

    tracing::info!(movie_id = movie.id, "movie created");
    Ok((StatusCode::CREATED, format!("Объект с id {} создан!", movie.id)))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
) -> AppResult<Json<MovieRecord>> {
    let movie = with_names()
        .filter(movie::Column::Id.eq(movie_id))
        .into_model::<MovieRecord>()
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound(NO_SUCH_MOVIE))?;
    Ok(Json(movie))
}

pub async fn update_one_field(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
    body: Result<JsonBody<MoviePayload>, AppError>,
) -> AppResult<(StatusCode, String)> {
    let txn = state.db.begin().await?;
    // An unknown id is a 404 whatever the body looks like.
    let movie = find_movie(&txn, movie_id).await?;
    let JsonBody(payload) = body?;
    let change = payload
        .first_change()?
        .ok_or_else(|| AppError::Payload("no recognized movie field in body".to_string()))?;

    tracing::debug!(movie_id, ?change, "patching movie");
    let mut active = movie.into_active_model();
    change.apply(&mut active);
    let movie = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(movie_id = movie.id, "movie updated");
    Ok((StatusCode::NO_CONTENT, format!("Объект с id {} обновлен!", movie.id)))
}

pub async fn replace(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
    body: Result<JsonBody<MoviePayload>, AppError>,
) -> AppResult<(StatusCode, String)> {
    let txn = state.db.begin().await?;
    let movie = find_movie(&txn, movie_id).await?;
    let JsonBody(payload) = body?;
    let changes = payload.into_full_update()?;

    let mut active = movie.into_active_model();
    for change in changes {
        change.apply(&mut active);
    }
    let movie = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(movie_id = movie.id, "movie replaced");
    Ok((StatusCode::NO_CONTENT, format!("Объект с id {} обновлен!", movie.id)))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
) -> AppResult<(StatusCode, String)> {
    let txn = state.db.begin().await?;
    let movie = find_movie(&txn, movie_id).await?;
    let id = movie.id;
    movie.delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(movie_id = id, "movie deleted");
    Ok((StatusCode::NO_CONTENT, format!("Объект с id {id} удален!")))
}
