// metar_api - HTTP lookup service for raw METAR reports
//
// Copyright 2024 The metar_api Authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use crate::client::{ClientError, Icao, MetarClient, MetarReport};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// JSON error body plus the HTTP status it is sent under. Every lookup
/// failure maps to exactly one of these at the handler boundary.
#[derive(Debug)]
pub struct ApiError {
    message: String,
    status: u16,
}

impl ApiError {
    fn new<S: Into<String>>(message: S, status: u16) -> Self {
        ApiError {
            message: message.into(),
            status,
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::InvalidIcao(_) => {
                ApiError::new("Invalid ICAO code. Must be a 4-letter code.", 400)
            }
            // Upstream failures other than 200 keep their status so callers
            // can tell a blocked scrape from a missing station.
            ClientError::Unexpected(status, _) => ApiError::new(
                format!("Failed to fetch page: HTTP {}", status.as_u16()),
                status.as_u16(),
            ),
            ClientError::Timeout => {
                ApiError::new("Request timed out while fetching the page.", 504)
            }
            ClientError::Connect => ApiError::new("Failed to connect to the website.", 503),
            ClientError::MetarNotFound(_) => ApiError::new(
                "Raw METAR data not found on the page. Check if the website structure has changed.",
                404,
            ),
            ClientError::StationMismatch(_) => {
                ApiError::new("METAR data does not match the provided ICAO code.", 404)
            }
            ClientError::Internal(e) => ApiError::new(format!("An error occurred: {}", e), 500),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Build the service router. The client is shared across requests but holds
/// no mutable state.
pub fn app(client: Arc<MetarClient>) -> Router {
    Router::new()
        .route("/metar/:icao", get(metar))
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

async fn metar(
    State(client): State<Arc<MetarClient>>,
    Path(icao): Path<String>,
) -> Result<Json<MetarReport>, ApiError> {
    let icao = Icao::parse(&icao)?;
    let report = client.metar(&icao).await.map_err(|e| {
        tracing::warn!(message = "METAR lookup failed", station = %icao, error = %e);
        ApiError::from(e)
    })?;

    Ok(Json(report))
}
