//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod entities;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app::{Detailed, Managed};
use crate::domain::entities::{
    Course, Exam, ExamResult, Instructor, Lesson, Registration, Student,
};
use crate::domain::ports::UnitOfWorkFactory;
use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create, read, update and remove routes for one aggregate
fn crud_routes<E, F>() -> Router<AppState<F>>
where
    E: Managed,
    F: UnitOfWorkFactory,
{
    Router::new()
        .route(
            "/",
            get(entities::list::<E, F>)
                .post(entities::create::<E, F>)
                .put(entities::update::<E, F>)
                .delete(entities::remove::<E, F>),
        )
        .route("/:id", get(entities::find::<E, F>))
}

/// CRUD routes plus the joined detail reads
fn detail_routes<E, F>() -> Router<AppState<F>>
where
    E: Detailed,
    F: UnitOfWorkFactory,
{
    crud_routes::<E, F>()
        .route("/detail", get(entities::list_detail::<E, F>))
        .route("/detail/:id", get(entities::find_detail::<E, F>))
}

/// Build the application router
pub fn router<F: UnitOfWorkFactory>(state: AppState<F>) -> Router {
    let api = Router::new()
        .nest("/students", crud_routes::<Student, F>())
        .nest("/instructors", crud_routes::<Instructor, F>())
        .nest("/courses", detail_routes::<Course, F>())
        .nest("/lessons", detail_routes::<Lesson, F>())
        .nest("/exams", crud_routes::<Exam, F>())
        .nest("/exam-results", detail_routes::<ExamResult, F>())
        .nest("/registrations", detail_routes::<Registration, F>());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
