//! Road network representation and builder.
//!
//! # Data layout
//!
//! The network is a flat list of [`RoadSegment`]s, each an ordered polyline
//! of vertices plus a classification `level` (level 3 = minor/residential).
//! Segments are addressed by `SegmentId`, which is their position in the
//! list.  All vertices share the network's [`Crs`], normally a projected UTM
//! zone so straight-line separation is a plain Euclidean distance.
//!
//! Trips never route over this graph directly — the external routing service
//! does that — so no adjacency is stored.  The network only feeds the point
//! provider in [`crate::sampler`].

use ev_core::{Crs, Point, SegmentId};

/// One road segment: an ordered polyline and its classification level.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadSegment {
    pub id:       SegmentId,
    pub level:    u8,
    pub geometry: Vec<Point>,
}

/// Immutable collection of road segments in a single coordinate system.
///
/// Do not construct directly; use [`RoadNetworkBuilder`].
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    crs:      Crs,
    segments: Vec<RoadSegment>,
}

impl RoadNetwork {
    /// An empty network in `crs`.  Every sampling request against it fails
    /// with [`SpatialError::NoCandidates`](crate::SpatialError::NoCandidates).
    pub fn empty(crs: Crs) -> Self {
        RoadNetworkBuilder::new(crs).build()
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.segments.iter().map(|s| s.geometry.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[RoadSegment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> Option<&RoadSegment> {
        self.segments.get(id.index())
    }

    /// Segments of classification `level`.
    pub fn segments_with_level(&self, level: u8) -> impl Iterator<Item = &RoadSegment> + '_ {
        self.segments.iter().filter(move |s| s.level == level)
    }

    /// Segments whose closest approach to `from` (same system as the
    /// network) is at least `min_distance_m`.
    pub fn segments_beyond(
        &self,
        from: Point,
        min_distance_m: f64,
    ) -> impl Iterator<Item = &RoadSegment> + '_ {
        self.segments
            .iter()
            .filter(move |s| from.distance_to_polyline_m(&s.geometry) >= min_distance_m)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ev_core::Crs;
/// use ev_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new(Crs::Utm { zone: 13, north: true });
/// b.add_segment(3, &[[500_000.0, 4_400_000.0], [500_100.0, 4_400_000.0]]);
/// let net = b.build();
/// assert_eq!(net.segment_count(), 1);
/// assert_eq!(net.vertex_count(), 2);
/// ```
pub struct RoadNetworkBuilder {
    crs:      Crs,
    segments: Vec<RoadSegment>,
}

impl RoadNetworkBuilder {
    pub fn new(crs: Crs) -> Self {
        Self { crs, segments: Vec::new() }
    }

    /// Pre-allocate for the expected number of segments.
    pub fn with_capacity(crs: Crs, segments: usize) -> Self {
        Self { crs, segments: Vec::with_capacity(segments) }
    }

    /// Add a segment from raw `[x, y]` vertices in the builder's system and
    /// return its `SegmentId` (sequential from 0).
    pub fn add_segment(&mut self, level: u8, coords: &[[f64; 2]]) -> SegmentId {
        let id = SegmentId(self.segments.len() as u32);
        let geometry = coords.iter().map(|&[x, y]| Point::new(x, y, self.crs)).collect();
        self.segments.push(RoadSegment { id, level, geometry });
        id
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn build(self) -> RoadNetwork {
        RoadNetwork { crs: self.crs, segments: self.segments }
    }
}
