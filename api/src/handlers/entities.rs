//! Aggregate handlers
//!
//! One generic set of endpoints, instantiated per aggregate by the router.
//! Handlers only shape requests and responses; every decision is the
//! manager's. A successful outcome is answered with 200, a failed one with
//! 400, and the body is always the outcome itself.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::dto::DeleteDto;
use crate::app::{Detailed, EntityManager, Managed, Outcome};
use crate::domain::ports::UnitOfWorkFactory;
use crate::AppState;

/// Query parameters accepted by reads
#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    #[serde(default = "default_track")]
    pub track: bool,
}

fn default_track() -> bool {
    true
}

fn manager<E, F>(state: &AppState<F>) -> EntityManager<E, F>
where
    E: Managed,
    F: UnitOfWorkFactory,
{
    EntityManager::new(state.units.clone())
}

fn respond<T: Serialize>(is_success: bool, body: T) -> Response {
    let status = if is_success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(body)).into_response()
}

/// A missing or unreadable body never reaches the manager
fn rejected<E: Managed>(base: &str, rejection: JsonRejection) -> Outcome {
    tracing::debug!(entity = E::NAME, error = %rejection.body_text(), "Request body rejected");
    Outcome::failure(format!("{}: request body is missing or malformed", base))
}

/// Read the `track` flag, or the failed outcome for an unreadable query string
fn track<E: Managed>(
    query: Result<Query<TrackQuery>, QueryRejection>,
    base: &str,
) -> Result<bool, Response> {
    match query {
        Ok(Query(query)) => Ok(query.track),
        Err(rejection) => {
            tracing::debug!(entity = E::NAME, error = %rejection.body_text(), "Query rejected");
            let outcome = Outcome::failure(format!("{}: query string is malformed", base));
            Err(respond(false, outcome))
        }
    }
}

/// GET /api/<plural>
pub async fn list<E, F>(
    State(state): State<AppState<F>>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> Response
where
    E: Managed,
    F: UnitOfWorkFactory,
{
    let track = match track::<E>(query, E::MESSAGES.list_empty) {
        Ok(track) => track,
        Err(response) => return response,
    };
    let outcome = manager::<E, F>(&state).get_all(track).await;
    respond(outcome.is_success(), outcome)
}

/// GET /api/<plural>/:id
pub async fn find<E, F>(
    State(state): State<AppState<F>>,
    Path(id): Path<String>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> Response
where
    E: Managed,
    F: UnitOfWorkFactory,
{
    let track = match track::<E>(query, E::MESSAGES.not_found) {
        Ok(track) => track,
        Err(response) => return response,
    };
    let outcome = manager::<E, F>(&state).get_by_id(&id, track).await;
    respond(outcome.is_success(), outcome)
}

/// POST /api/<plural>
pub async fn create<E, F>(
    State(state): State<AppState<F>>,
    payload: Result<Json<E::Create>, JsonRejection>,
) -> Response
where
    E: Managed,
    F: UnitOfWorkFactory,
{
    let outcome = match payload {
        Ok(Json(dto)) => manager::<E, F>(&state).create(dto).await,
        Err(rejection) => rejected::<E>(E::MESSAGES.create_failed, rejection),
    };
    respond(outcome.is_success(), outcome)
}

/// PUT /api/<plural>
pub async fn update<E, F>(
    State(state): State<AppState<F>>,
    payload: Result<Json<E::Update>, JsonRejection>,
) -> Response
where
    E: Managed,
    F: UnitOfWorkFactory,
{
    let outcome = match payload {
        Ok(Json(dto)) => manager::<E, F>(&state).update(dto).await,
        Err(rejection) => rejected::<E>(E::MESSAGES.update_failed, rejection),
    };
    respond(outcome.is_success(), outcome)
}

/// DELETE /api/<plural>
pub async fn remove<E, F>(
    State(state): State<AppState<F>>,
    payload: Result<Json<DeleteDto>, JsonRejection>,
) -> Response
where
    E: Managed,
    F: UnitOfWorkFactory,
{
    let outcome = match payload {
        Ok(Json(dto)) => manager::<E, F>(&state).remove(dto).await,
        Err(rejection) => rejected::<E>(E::MESSAGES.delete_failed, rejection),
    };
    respond(outcome.is_success(), outcome)
}

/// GET /api/<plural>/detail
pub async fn list_detail<E, F>(
    State(state): State<AppState<F>>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> Response
where
    E: Detailed,
    F: UnitOfWorkFactory,
{
    let track = match track::<E>(query, E::MESSAGES.list_empty) {
        Ok(track) => track,
        Err(response) => return response,
    };
    let outcome = manager::<E, F>(&state).get_all_detail(track).await;
    respond(outcome.is_success(), outcome)
}

/// GET /api/<plural>/detail/:id
pub async fn find_detail<E, F>(
    State(state): State<AppState<F>>,
    Path(id): Path<String>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> Response
where
    E: Detailed,
    F: UnitOfWorkFactory,
{
    let track = match track::<E>(query, E::MESSAGES.not_found) {
        Ok(track) => track,
        Err(response) => return response,
    };
    let outcome = manager::<E, F>(&state).get_by_id_detail(&id, track).await;
    respond(outcome.is_success(), outcome)
}
