// 🌐 JSON API
// Prediction and map endpoints over the shared dashboard context

use crate::context::AppContext;
use crate::encoder::PropertyInput;
use crate::format::selection_mean_line;
use crate::map::{markers, price_colormap, MapMarker, MapStyle, ViewMode, DEFAULT_ZOOM, MUMBAI_CENTER};
use crate::colormap::LinearColormap;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Response {
        (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(data),
                error: None,
            }),
        )
            .into_response()
    }
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message.into()),
        }),
    )
        .into_response()
}

#[derive(Serialize)]
struct RegionsResponse<'a> {
    /// Slot order, as the model sees them
    catalog: &'a [String],
    /// Picker order
    sorted: Vec<&'a str>,
}

#[derive(Serialize)]
struct SchemaResponse<'a> {
    features: &'a [String],
    model_fingerprint: Option<String>,
    units: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    /// Comma separated region names
    regions: Option<String>,
    style: Option<String>,
    mode: Option<String>,
}

#[derive(Serialize)]
struct MapResponse {
    style: MapStyle,
    mode: ViewMode,
    center: (f64, f64),
    zoom: u8,
    colormap: LinearColormap,
    markers: Vec<MapMarker>,
    heat: Vec<(f64, f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selection_mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selection_summary: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check with load summary
async fn health_check(State(state): State<AppState>) -> Response {
    ApiResponse::ok(state.ctx.summary())
}

/// GET /api/regions - Region catalog
async fn get_regions(State(state): State<AppState>) -> Response {
    let catalog = state.ctx.catalog();
    ApiResponse::ok(RegionsResponse {
        catalog: catalog.names(),
        sorted: catalog.sorted_names(),
    })
}

/// GET /api/schema - Feature layout the model consumes
async fn get_schema(State(state): State<AppState>) -> Response {
    ApiResponse::ok(SchemaResponse {
        features: state.ctx.schema().names(),
        model_fingerprint: state.ctx.summary().model_fingerprint,
        units: state.ctx.units(),
    })
}

/// POST /api/predict - Price estimate for one property
async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected prediction input");
            return api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Prediction failed: {}", rejection.body_text()),
            );
        }
    };

    match state.ctx.predict(&input) {
        Ok(prediction) => ApiResponse::ok(prediction),
        Err(e) => {
            warn!(error = %e, "prediction failed");
            api_error(StatusCode::UNPROCESSABLE_ENTITY, format!("Prediction failed: {}", e))
        }
    }
}

/// GET /api/map - Markers, heat points and the selection mean
async fn get_map(State(state): State<AppState>, Query(query): Query<MapQuery>) -> Response {
    let style = match query.style.as_deref().map(str::parse::<MapStyle>).transpose() {
        Ok(style) => style.unwrap_or_default(),
        Err(e) => return api_error(StatusCode::BAD_REQUEST, e),
    };
    let mode = match query.mode.as_deref().map(str::parse::<ViewMode>).transpose() {
        Ok(mode) => mode.unwrap_or_default(),
        Err(e) => return api_error(StatusCode::BAD_REQUEST, e),
    };

    let selected: Vec<&str> = query
        .regions
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect();

    let view = state.ctx.view();
    let selection_mean = if selected.is_empty() {
        None
    } else {
        view.mean_median(&selected)
    };

    ApiResponse::ok(MapResponse {
        style,
        mode,
        center: MUMBAI_CENTER,
        zoom: DEFAULT_ZOOM,
        colormap: price_colormap(view),
        markers: markers(view, &selected),
        heat: view.heat_points(),
        selection_mean,
        selection_summary: selection_mean.map(selection_mean_line),
    })
}

/// GET /api/map/heat - `[lat, lon, median]` triples with price data
async fn get_heat(State(state): State<AppState>) -> Response {
    ApiResponse::ok(state.ctx.view().heat_points())
}

/// GET /api/map/regions/:name - Marker for a single region
async fn get_region(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    // Path has already percent-decoded the name
    match markers(state.ctx.view(), &[name.as_str()]).into_iter().next() {
        Some(marker) => ApiResponse::ok(marker),
        None => api_error(StatusCode::NOT_FOUND, format!("Region '{}' is not on the map", name)),
    }
}

/// Build the full API router around a loaded context
pub fn router(ctx: Arc<AppContext>) -> Router {
    let state = AppState { ctx };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/regions", get(get_regions))
        .route("/schema", get(get_schema))
        .route("/predict", post(predict))
        .route("/map", get(get_map))
        .route("/map/heat", get(get_heat))
        .route("/map/regions/:name", get(get_region))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
