//! In-memory catalog wired to the real router, for handler tests.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{Method, Request, StatusCode, header},
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    AppState, app, db,
    entities::{director, genre, movie},
};

pub struct TestApp {
    pub db: DatabaseConnection,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        // One connection so every query sees the same in-memory database.
        let db = db::connect_and_migrate("sqlite::memory:", 1).await.expect("migrate");
        let router = app(Arc::new(AppState { db: db.clone() }));
        Self { db, router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Bytes) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let resp = self.router.clone().oneshot(req).await.expect("infallible");
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        (status, bytes)
    }

    pub async fn director(&self, name: &str) -> i32 {
        let row = director::ActiveModel { name: Set(name.to_string()), ..Default::default() };
        row.insert(&self.db).await.expect("insert director").id
    }

    pub async fn genre(&self, name: &str) -> i32 {
        let row = genre::ActiveModel { name: Set(name.to_string()), ..Default::default() };
        row.insert(&self.db).await.expect("insert genre").id
    }

    pub async fn movie(&self, title: &str, genre_id: i32, director_id: i32) -> i32 {
        let row = movie::ActiveModel {
            title: Set(title.to_string()),
            description: Set(format!("About {title}")),
            trailer: Set("http://trailers.test/1".to_string()),
            year: Set(2000),
            rating: Set(7.0),
            genre_id: Set(genre_id),
            director_id: Set(director_id),
            ..Default::default()
        };
        row.insert(&self.db).await.expect("insert movie").id
    }

    pub async fn stored_movie(&self, id: i32) -> movie::Model {
        movie::Entity::find_by_id(id).one(&self.db).await.expect("query").expect("movie row")
    }
}

pub fn body_json(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

pub fn body_text(bytes: &Bytes) -> String {
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
