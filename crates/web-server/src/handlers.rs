use crate::{
    error::AppError,
    forms::{parse_id, read_form, CityForm, TemperatureForm},
    AppState,
};
use axum::{
    extract::{
        rejection::{FormRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use chrono::Utc;
use core_types::{City, Temperature};
use database::WeatherStore;
use std::sync::Arc;

/// # POST /cities
pub async fn create_city<S: WeatherStore>(
    State(state): State<Arc<AppState<S>>>,
    query: Result<Query<CityForm>, QueryRejection>,
    form: Result<Form<CityForm>, FormRejection>,
) -> Result<Json<City>, AppError> {
    let city = read_form(query, form)?.into_city()?;
    city.validate()?;

    let city = state.store.insert_city(city).await?;
    tracing::info!(id = city.id, name = %city.name, "City created.");
    Ok(Json(city))
}

/// # PATCH /cities/:id
/// Replaces every field of an existing city.
pub async fn modify_city<S: WeatherStore>(
    path: Result<Path<String>, PathRejection>,
    State(state): State<Arc<AppState<S>>>,
    query: Result<Query<CityForm>, QueryRejection>,
    form: Result<Form<CityForm>, FormRejection>,
) -> Result<Json<City>, AppError> {
    let mut city = read_form(query, form)?.into_city()?;
    city.validate()?;
    let Path(id) = path?;
    city.id = parse_id(&id)?;

    state.store.update_city(&city).await?;
    tracing::info!(id = city.id, name = %city.name, "City updated.");
    Ok(Json(city))
}

/// # DELETE /cities/:id
/// Responds with the values the city had before it was deleted.
pub async fn delete_city<S: WeatherStore>(
    path: Result<Path<String>, PathRejection>,
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<City>, AppError> {
    let Path(id) = path?;
    let id = parse_id(&id)?;

    let city = state.store.delete_city(id).await?;
    tracing::info!(id, name = %city.name, "City deleted.");
    Ok(Json(city))
}

/// # POST /temperatures
/// Records a measurement stamped with the current server time.
pub async fn create_measurement<S: WeatherStore>(
    State(state): State<Arc<AppState<S>>>,
    query: Result<Query<TemperatureForm>, QueryRejection>,
    form: Result<Form<TemperatureForm>, FormRejection>,
) -> Result<Json<Temperature>, AppError> {
    let temperature = read_form(query, form)?.into_temperature(Utc::now().timestamp())?;
    temperature.validate()?;

    let temperature = state.store.insert_temperature(temperature).await?;
    notify_callbacks(&temperature);
    Ok(Json(temperature))
}

/// # GET /forecasts/:id
/// Not implemented yet: logs the city id and answers with an empty body.
pub async fn get_forecasts(path: Result<Path<String>, PathRejection>) -> impl IntoResponse {
    tracing::info!(city_id = %segment(path), "getForecasts");
    empty_json()
}

/// # POST /webhooks
/// Not implemented yet.
pub async fn create_webhook() -> impl IntoResponse {
    tracing::info!("createWebhook");
    empty_json()
}

/// # DELETE /webhooks/:id
/// Not implemented yet.
pub async fn delete_webhook(path: Result<Path<String>, PathRejection>) -> impl IntoResponse {
    tracing::info!(id = %segment(path), "deleteWebhook");
    empty_json()
}

// Webhook delivery does not exist yet, so a new measurement only gets logged.
fn notify_callbacks(temperature: &Temperature) {
    tracing::info!(city_id = temperature.city_id, "notifyCallbacks");
}

// The stubs answer 200 whatever the segment is; an undecodable one is logged as the rejection.
fn segment(path: Result<Path<String>, PathRejection>) -> String {
    match path {
        Ok(Path(id)) => id,
        Err(rejection) => format!("<{}>", rejection.body_text()),
    }
}

fn empty_json() -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")])
}
