//! Flat row types for the CSV exports.

use ev_spatial::ChargerRecord;

/// One row of `stations.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRow {
    pub station_id:    u32,
    pub x:             f64,
    pub y:             f64,
    pub epsg:          u32,
    pub charger_count: u32,
    /// `pre_built` or `proposed`.
    pub source:        &'static str,
    /// Empty for pre-built stations.
    pub failure:       &'static str,
}

impl From<&ChargerRecord> for StationRow {
    fn from(r: &ChargerRecord) -> Self {
        Self {
            station_id:    r.id.0,
            x:             r.location.x,
            y:             r.location.y,
            epsg:          r.location.crs.epsg(),
            charger_count: r.charger_count,
            source:        r.source.as_str(),
            failure:       r.failure.map_or("", |f| f.as_str()),
        }
    }
}

/// One row of `outcomes.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeRow {
    /// 1-based attempt number.
    pub attempt:  u64,
    /// `1` if the trip stranded.
    pub stranded: u8,
}
