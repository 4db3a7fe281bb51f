//! JSON API consumed by the dashboard front end

use axum::{
    Json, Router,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::AeroSightError;
use crate::aqi::{self, AqiCategory};
use crate::dashboard::{Dashboard, DashboardSnapshot, StepDirection};
use crate::map::{self, LegendEntry, MapView, StationMarker, Viewport};
use crate::models::{ExplainabilityData, Forecast, Station};

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
    pub map: MapView,
}

#[derive(Serialize, Deserialize)]
pub struct SelectStationRequest {
    pub station_id: String,
}

#[derive(Serialize, Deserialize)]
pub struct SeekRequest {
    pub index: usize,
}

#[derive(Serialize, Deserialize)]
pub struct StepRequest {
    pub direction: StepDirection,
}

#[derive(Serialize, Deserialize)]
pub struct PollutantName {
    pub code: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct MapResponse {
    pub markers: Vec<StationMarker>,
    pub viewport: Viewport,
    pub legend: Vec<LegendEntry>,
}

impl IntoResponse for AeroSightError {
    fn into_response(self) -> Response {
        let status = match &self {
            AeroSightError::NotFound { .. } => StatusCode::NOT_FOUND,
            AeroSightError::Validation { .. } => StatusCode::BAD_REQUEST,
            AeroSightError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

fn rejected(rejection: JsonRejection) -> AeroSightError {
    AeroSightError::validation(rejection.body_text())
}

/// Parse an AQI path segment. Integers beyond `i64` saturate, so huge
/// readings still classify as hazardous.
pub fn parse_aqi(segment: &str) -> Result<i64, AeroSightError> {
    let (negative, digits) = match segment.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, segment.strip_prefix('+').unwrap_or(segment)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AeroSightError::validation(format!(
            "AQI must be an integer, got '{segment}'"
        )));
    }
    Ok(segment
        .parse::<i64>()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/stations", get(get_stations))
        .route("/stations/{id}", get(get_station))
        .route("/aqi/{value}", get(get_aqi))
        .route("/pollutants/{code}", get(get_pollutant))
        .route("/map", get(get_map))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/forecast", get(get_forecast))
        .route("/dashboard/explain", get(get_explain))
        .route("/dashboard/station", post(select_station))
        .route("/dashboard/seek", post(seek))
        .route("/dashboard/step", post(step))
        .route("/dashboard/play", post(toggle_play))
        .with_state(state)
}

async fn get_stations(State(state): State<AppState>) -> Json<Vec<Station>> {
    Json(state.dashboard.catalog().await.all().to_vec())
}

async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Station>, AeroSightError> {
    let catalog = state.dashboard.catalog().await;
    Ok(Json(catalog.get(&id)?.clone()))
}

async fn get_aqi(
    value: Result<Path<String>, PathRejection>,
) -> Result<Json<&'static AqiCategory>, AeroSightError> {
    let Path(value) =
        value.map_err(|rejection| AeroSightError::validation(rejection.body_text()))?;
    Ok(Json(aqi::classify(parse_aqi(&value)?)))
}

async fn get_pollutant(Path(code): Path<String>) -> Json<PollutantName> {
    let name = aqi::pollutant_display_name(&code);
    Json(PollutantName { code, name })
}

async fn get_map(State(state): State<AppState>) -> Json<MapResponse> {
    let catalog = state.dashboard.catalog().await;
    let snapshot = state.dashboard.snapshot().await;
    let selected = catalog.find(&snapshot.station.id);

    Json(MapResponse {
        markers: state.map.markers(catalog.all(), Some(snapshot.station.id.as_str())),
        viewport: state.map.viewport(selected),
        legend: map::legend(),
    })
}

async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.snapshot().await)
}

async fn get_forecast(State(state): State<AppState>) -> Json<Forecast> {
    Json(state.dashboard.forecast().await)
}

async fn get_explain(
    State(state): State<AppState>,
) -> Result<Json<ExplainabilityData>, AeroSightError> {
    state
        .dashboard
        .explainability()
        .await
        .map(Json)
        .ok_or_else(|| AeroSightError::not_found("forecast has no points"))
}

async fn select_station(
    State(state): State<AppState>,
    payload: Result<Json<SelectStationRequest>, JsonRejection>,
) -> Result<Json<DashboardSnapshot>, AeroSightError> {
    let Json(payload) = payload.map_err(rejected)?;
    let snapshot = state.dashboard.select_station(&payload.station_id).await?;
    Ok(Json(snapshot))
}

async fn seek(
    State(state): State<AppState>,
    payload: Result<Json<SeekRequest>, JsonRejection>,
) -> Result<Json<DashboardSnapshot>, AeroSightError> {
    let Json(payload) = payload.map_err(rejected)?;
    Ok(Json(state.dashboard.seek(payload.index).await))
}

async fn step(
    State(state): State<AppState>,
    payload: Result<Json<StepRequest>, JsonRejection>,
) -> Result<Json<DashboardSnapshot>, AeroSightError> {
    let Json(payload) = payload.map_err(rejected)?;
    Ok(Json(state.dashboard.step(payload.direction).await))
}

async fn toggle_play(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.toggle_play().await)
}
