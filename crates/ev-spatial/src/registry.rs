//! The charger registry: known and proposed charging-station sites.
//!
//! # Growth model
//!
//! The registry is append-only for the lifetime of a driver run.  Pre-built
//! stations are seeded from input; every simulated stranding appends a
//! proposed station at the stranding position, and later trips in the same
//! run see (and may charge at) it.  Nothing is ever removed.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over the raw `[x, y]` coordinates of every
//! station answers nearest-station queries.  Distances inside the tree are
//! squared Euclidean in the registry's own system, which for WGS-84 is
//! degree space — adequate for picking the closest site, not for measuring
//! how far it is (the routing service does that).

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ev_core::{Crs, FailureKind, Point, SourceKind, StationId};

use crate::{SpatialError, SpatialResult};

// ── ChargerRecord ─────────────────────────────────────────────────────────────

/// One charging station.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargerRecord {
    pub id:            StationId,
    /// Position in the registry's system.
    pub location:      Point,
    /// Number of chargers at the station, at least 1.
    pub charger_count: u32,
    pub source:        SourceKind,
    /// Why the station was proposed; `None` for pre-built stations.
    pub failure:       Option<FailureKind>,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct StationEntry {
    point: [f64; 2],
    id:    StationId,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── ChargerRegistry ───────────────────────────────────────────────────────────

/// Append-only collection of charging stations with nearest-neighbour lookup.
///
/// Owned exclusively by the driver; the trip simulator only reads it.
#[derive(Debug)]
pub struct ChargerRegistry {
    crs:     Crs,
    records: Vec<ChargerRecord>,
    index:   RTree<StationEntry>,
}

impl ChargerRegistry {
    /// An empty registry storing locations in `crs`.
    pub fn new(crs: Crs) -> Self {
        Self { crs, records: Vec::new(), index: RTree::new() }
    }

    /// Rebuild a registry from previously persisted records.
    ///
    /// Record ids are reassigned sequentially in the given order; locations
    /// are reprojected into `crs`.
    pub fn from_records(crs: Crs, records: Vec<ChargerRecord>) -> SpatialResult<Self> {
        let mut rebuilt = Vec::with_capacity(records.len());
        for (i, mut r) in records.into_iter().enumerate() {
            if r.charger_count == 0 {
                return Err(SpatialError::InvalidChargerCount(r.location));
            }
            r.id = StationId(i as u32);
            r.location = r.location.reproject(crs)?;
            rebuilt.push(r);
        }
        let entries = rebuilt
            .iter()
            .map(|r| StationEntry { point: r.location.coords(), id: r.id })
            .collect();
        Ok(Self { crs, records: rebuilt, index: RTree::bulk_load(entries) })
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of stations loaded from input.
    pub fn prebuilt_count(&self) -> usize {
        self.records.iter().filter(|r| r.source == SourceKind::PreBuilt).count()
    }

    /// Number of stations proposed at stranding sites.
    pub fn proposed_count(&self) -> usize {
        self.records.len() - self.prebuilt_count()
    }

    pub fn records(&self) -> &[ChargerRecord] {
        &self.records
    }

    pub fn get(&self, id: StationId) -> Option<&ChargerRecord> {
        self.records.get(id.index())
    }

    /// Proposed stations in the order they were added.
    pub fn proposed(&self) -> impl Iterator<Item = &ChargerRecord> + '_ {
        self.records.iter().filter(|r| r.source == SourceKind::Proposed)
    }

    /// Add a station from input.
    pub fn add_prebuilt(&mut self, location: Point, charger_count: u32) -> SpatialResult<StationId> {
        self.push(location, charger_count, SourceKind::PreBuilt, None)
    }

    /// Add a candidate station at the site of a stranding.
    pub fn propose(
        &mut self,
        location:      Point,
        failure:       FailureKind,
        charger_count: u32,
    ) -> SpatialResult<StationId> {
        self.push(location, charger_count, SourceKind::Proposed, Some(failure))
    }

    /// The station closest to `pos`, or `None` if the registry is empty.
    pub fn nearest(&self, pos: Point) -> SpatialResult<Option<&ChargerRecord>> {
        let pos = pos.reproject(self.crs)?;
        Ok(self
            .index
            .nearest_neighbor(&pos.coords())
            .map(|e| &self.records[e.id.index()]))
    }

    fn push(
        &mut self,
        location:      Point,
        charger_count: u32,
        source:        SourceKind,
        failure:       Option<FailureKind>,
    ) -> SpatialResult<StationId> {
        if charger_count == 0 {
            return Err(SpatialError::InvalidChargerCount(location));
        }
        let location = location.reproject(self.crs)?;
        let id = StationId(self.records.len() as u32);
        self.index.insert(StationEntry { point: location.coords(), id });
        self.records.push(ChargerRecord { id, location, charger_count, source, failure });
        Ok(id)
    }
}
