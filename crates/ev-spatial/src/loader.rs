//! CSV loaders for the road network and the pre-built charging stations.
//!
//! # Road network format
//!
//! One row per vertex.  Rows for the same segment share `segment_id` and
//! `level`; `seq` orders the vertices along the segment.  Rows may appear in
//! any order.
//!
//! ```csv
//! segment_id,level,seq,x,y
//! 17,3,0,500120.5,4401230.0
//! 17,3,1,500180.0,4401290.2
//! 18,1,0,510000.0,4400000.0
//! 18,1,1,512000.0,4400100.0
//! ```
//!
//! Segments get dense `SegmentId`s in order of first appearance; the input
//! `segment_id` is only used for grouping.
//!
//! # Station format
//!
//! One row per station, coordinates in the system passed to the loader.
//!
//! ```csv
//! x,y,charger_count
//! -104.99,39.74,4
//! -105.27,40.01,2
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ev_core::{Crs, Point};

use crate::{ChargerRegistry, RoadNetwork, RoadNetworkBuilder, SpatialError, SpatialResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VertexRecord {
    segment_id: u64,
    level:      u8,
    seq:        u32,
    x:          f64,
    y:          f64,
}

#[derive(Deserialize)]
struct StationRecord {
    x:             f64,
    y:             f64,
    charger_count: u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a road network from a CSV file whose coordinates are in `crs`.
pub fn load_network_csv(path: &Path, crs: Crs) -> SpatialResult<RoadNetwork> {
    let file = std::fs::File::open(path).map_err(SpatialError::Io)?;
    load_network_reader(file, crs)
}

/// Like [`load_network_csv`] but accepts any `Read` source.
pub fn load_network_reader<R: Read>(reader: R, crs: Crs) -> SpatialResult<RoadNetwork> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    // segment_id → position in `order`; keeps first-appearance order stable.
    let mut slot: HashMap<u64, usize> = HashMap::new();
    let mut order: Vec<(u8, Vec<(u32, [f64; 2])>)> = Vec::new();

    for result in csv_reader.deserialize::<VertexRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        let i = *slot.entry(row.segment_id).or_insert_with(|| {
            order.push((row.level, Vec::new()));
            order.len() - 1
        });
        if order[i].0 != row.level {
            return Err(SpatialError::Parse(format!(
                "segment {} has conflicting levels {} and {}",
                row.segment_id, order[i].0, row.level
            )));
        }
        order[i].1.push((row.seq, [row.x, row.y]));
    }

    let mut builder = RoadNetworkBuilder::with_capacity(crs, order.len());
    for (level, mut vertices) in order {
        vertices.sort_by_key(|&(seq, _)| seq);
        let coords: Vec<[f64; 2]> = vertices.into_iter().map(|(_, xy)| xy).collect();
        builder.add_segment(level, &coords);
    }
    Ok(builder.build())
}

/// Load pre-built stations from a CSV file whose coordinates are in
/// `input_crs` into a new registry stored in `registry_crs`.
pub fn load_stations_csv(
    path:         &Path,
    input_crs:    Crs,
    registry_crs: Crs,
) -> SpatialResult<ChargerRegistry> {
    let file = std::fs::File::open(path).map_err(SpatialError::Io)?;
    load_stations_reader(file, input_crs, registry_crs)
}

/// Like [`load_stations_csv`] but accepts any `Read` source.
pub fn load_stations_reader<R: Read>(
    reader:       R,
    input_crs:    Crs,
    registry_crs: Crs,
) -> SpatialResult<ChargerRegistry> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut registry = ChargerRegistry::new(registry_crs);

    for result in csv_reader.deserialize::<StationRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        registry.add_prebuilt(Point::new(row.x, row.y, input_crs), row.charger_count)?;
    }

    tracing::debug!(stations = registry.len(), "loaded pre-built charging stations");
    Ok(registry)
}
