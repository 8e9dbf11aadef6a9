use anyhow::Result;
use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::{
    domains::{validate_number, NewPerson, NumberChange, PersonId},
    http::{ErrorBody, Html, IntoResponse, Json, Request, Response},
    AppState,
};

pub async fn route_request(request: Request, app_state: AppState) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let result = match (method.as_str(), segments.as_slice()) {
        ("GET", []) => Ok((StatusCode::OK, Html("<h1>Hello World!</h1>")).into_response()),
        ("GET", ["api", "persons"]) => list_persons(app_state).await,
        ("POST", ["api", "persons"]) => create_person(app_state, request).await,
        ("GET", ["api", "persons", id]) => get_person(app_state, id).await,
        ("PUT", ["api", "persons", id]) => update_person(app_state, id, request).await,
        ("DELETE", ["api", "persons", id]) => delete_person(app_state, id).await,
        _ => Ok((StatusCode::NOT_FOUND, ErrorBody::new("unknown endpoint")).into_response()),
    };

    result.unwrap_or_else(|err| {
        tracing::error!(%err, %method, %path, "handler failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new("internal server error"),
        )
            .into_response()
    })
}

async fn list_persons(app_state: AppState) -> Result<Response> {
    let persons = app_state.repository.find_all().await?;

    Ok((StatusCode::OK, Json(persons)).into_response())
}

async fn create_person(app_state: AppState, request: Request) -> Result<Response> {
    let candidate: NewPerson = match read_json(request) {
        Ok(candidate) => candidate,
        Err(response) => return Ok(response),
    };

    let person = match candidate.try_into_person() {
        Ok(person) => person,
        Err(err) => return Ok(bad_request(err.to_string())),
    };

    app_state.repository.insert_one(&person).await?;

    Ok((StatusCode::OK, Json(person)).into_response())
}

async fn get_person(app_state: AppState, id: &str) -> Result<Response> {
    let Ok(id) = id.parse::<PersonId>() else {
        return Ok(malformatted_id());
    };

    Ok(match app_state.repository.find_one(id).await? {
        Some(person) => (StatusCode::OK, Json(person)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

async fn update_person(app_state: AppState, id: &str, request: Request) -> Result<Response> {
    let change: NumberChange = match read_json(request) {
        Ok(change) => change,
        Err(response) => return Ok(response),
    };

    // A missing number fails the same format check an invalid one does.
    // The number is checked before the id so a request that is wrong on
    // both counts reports the format error.
    let number = change.number.unwrap_or_default();
    if let Err(err) = validate_number(&number) {
        return Ok(bad_request(err.to_string()));
    }

    let Ok(id) = id.parse::<PersonId>() else {
        return Ok(malformatted_id());
    };

    Ok(match app_state.repository.update_number(id, &number).await? {
        Some(person) => (StatusCode::OK, Json(person)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

async fn delete_person(app_state: AppState, id: &str) -> Result<Response> {
    let Ok(id) = id.parse::<PersonId>() else {
        return Ok(malformatted_id());
    };

    // Deleting an absent person is not an error.
    app_state.repository.delete_one(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Reads the request body as JSON. An absent or empty body deserializes to
/// the payload's default so field-presence validation owns the error message.
fn read_json<T: DeserializeOwned + Default>(request: Request) -> Result<T, Response> {
    match request.into_body() {
        Some(body) if !body.is_empty() => {
            serde_json::from_slice(&body).map_err(|_| bad_request("invalid json"))
        }
        _ => Ok(T::default()),
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, ErrorBody::new(message)).into_response()
}

fn malformatted_id() -> Response {
    bad_request("malformatted id")
}
