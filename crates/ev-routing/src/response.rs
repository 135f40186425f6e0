//! OSRM `/route` response types.
//!
//! Only the fields the simulator needs are modelled.  Requests ask for
//! `geometries=geojson`, so the path arrives as `[lng, lat]` pairs rather
//! than an encoded polyline.

use serde::Deserialize;

use crate::{FetchError, RawRoute};

#[derive(Debug, Deserialize)]
pub struct OsrmRouteResponse {
    pub code:    String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes:  Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    pub distance: f64, // metres
    pub geometry: OsrmGeometry,
    #[serde(default)]
    pub legs:     Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmGeometry {
    pub coordinates: Vec<[f64; 2]>, // [lng, lat]
}

#[derive(Debug, Deserialize)]
pub struct OsrmLeg {
    #[serde(default)]
    pub annotation: Option<OsrmAnnotation>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmAnnotation {
    #[serde(default)]
    pub distance: Vec<f64>,
}

/// Turn the first route of a response into a [`RawRoute`].
pub fn parse_route_response(response: OsrmRouteResponse) -> Result<RawRoute, FetchError> {
    if response.code != "Ok" {
        return Err(FetchError::NoRoute(response.message.unwrap_or(response.code)));
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NoRoute("response contains no routes".into()))?;

    let mut annotations = Vec::new();
    for leg in route.legs {
        let annotation = leg
            .annotation
            .ok_or_else(|| FetchError::Malformed("leg without distance annotation".into()))?;
        annotations.extend(annotation.distance);
    }

    let coordinates = route.geometry.coordinates;
    if coordinates.len() != annotations.len() + 1 {
        return Err(FetchError::Malformed(format!(
            "{} coordinates but {} annotated distances",
            coordinates.len(),
            annotations.len()
        )));
    }

    Ok(RawRoute { coordinates, annotations, distance_m: route.distance })
}
