//! Blocking HTTP backend for an OSRM-compatible routing server.

use std::time::Duration;

use reqwest::blocking::Client;

use ev_core::Point;

use crate::response::{OsrmRouteResponse, parse_route_response};
use crate::{FetchError, RawRoute, RouteService, RoutingResult};

/// Routes via `GET {endpoint}/route/v1/driving/{from};{to}`.
///
/// Points must be longitude/latitude; [`RoutingClient`](crate::RoutingClient)
/// reprojects before calling.
#[derive(Debug, Clone)]
pub struct OsrmService {
    client:   Client,
    endpoint: String,
}

impl OsrmService {
    /// Create a service for `endpoint` (e.g. `http://localhost:5000`) with a
    /// per-request transport timeout.
    pub fn new(endpoint: &str, timeout: Duration) -> RoutingResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint: endpoint.trim_end_matches('/').to_string() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The request URL for one route: full overview, per-segment distance
    /// annotations, GeoJSON geometry.
    pub fn route_url(&self, from: Point, to: Point) -> String {
        format!(
            "{}/route/v1/driving/{:.6},{:.6};{:.6},{:.6}?overview=full&annotations=distance&geometries=geojson",
            self.endpoint, from.x, from.y, to.x, to.y,
        )
    }
}

impl RouteService for OsrmService {
    fn fetch(&self, from: Point, to: Point) -> Result<RawRoute, FetchError> {
        let response = self
            .client
            .get(self.route_url(from, to))
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let parsed: OsrmRouteResponse =
            response.json().map_err(|e| FetchError::Malformed(e.to_string()))?;
        parse_route_response(parsed)
    }
}
