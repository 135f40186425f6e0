//! Random trip start/end sampling.
//!
//! The driver asks a [`PointProvider`] for an `(origin, destination)` pair
//! for every candidate trip.  [`NetworkSampler`] is the production provider:
//!
//! - **start**: a uniform random segment among those of the start level
//!   (minor/residential roads), then a uniform random vertex on it;
//! - **end**: a uniform random segment among those whose closest approach to
//!   the start is at least `min_separation_m`, then a uniform random vertex.
//!
//! Distances are measured in the network's own system; the returned points
//! are reprojected into the caller's output system (normally the routing
//! system).

use ev_core::{Crs, Location, SegmentId, SimRng};

use crate::{RoadNetwork, RoadSegment, SpatialError, SpatialResult};

/// Supplier of trip endpoints.
pub trait PointProvider {
    /// Sample a trip origin.
    fn start_location(&mut self) -> SpatialResult<Location>;

    /// Sample a trip destination at least `min_separation_m` in a straight
    /// line from `start`.
    fn end_location(&mut self, start: &Location, min_separation_m: f64) -> SpatialResult<Location>;
}

/// [`PointProvider`] drawing vertices from a [`RoadNetwork`].
pub struct NetworkSampler<'a> {
    network:    &'a RoadNetwork,
    rng:        SimRng,
    output_crs: Crs,
    /// Segments eligible as trip starts, computed once.
    starts:     Vec<SegmentId>,
}

impl<'a> NetworkSampler<'a> {
    pub fn new(network: &'a RoadNetwork, start_level: u8, output_crs: Crs, rng: SimRng) -> Self {
        let starts = network.segments_with_level(start_level).map(|s| s.id).collect();
        Self { network, rng, output_crs, starts }
    }

    /// Number of segments eligible as trip starts.
    pub fn start_candidates(&self) -> usize {
        self.starts.len()
    }

    fn vertex_on(&mut self, segment: &RoadSegment) -> SpatialResult<Location> {
        let point = *self
            .rng
            .choose(&segment.geometry)
            .ok_or(SpatialError::EmptySegment(segment.id))?;
        Ok(Location::new(segment.id, point.reproject(self.output_crs)?))
    }
}

impl PointProvider for NetworkSampler<'_> {
    fn start_location(&mut self) -> SpatialResult<Location> {
        let id = *self
            .rng
            .choose(&self.starts)
            .ok_or(SpatialError::NoCandidates("no segments of the start level"))?;
        let network = self.network;
        let segment = network.segment(id).ok_or(SpatialError::NoCandidates("start segment missing"))?;
        self.vertex_on(segment)
    }

    fn end_location(&mut self, start: &Location, min_separation_m: f64) -> SpatialResult<Location> {
        let network = self.network;
        let from = start.point.reproject(network.crs())?;
        let candidates: Vec<&RoadSegment> = network.segments_beyond(from, min_separation_m).collect();
        let segment = *self
            .rng
            .choose(&candidates)
            .ok_or(SpatialError::NoCandidates("no segments far enough from the start"))?;
        self.vertex_on(segment)
    }
}
