//! Charger availability at a station.
//!
//! Each draw samples how many of the station's chargers are in use.  A draw
//! strictly below the charger count means one is free.  The
//! [`AvailabilityPolicy`] decides how many draws a vehicle makes before
//! giving up on the station.

use ev_core::{AvailabilityPolicy, CountSampler};

/// Result of one availability check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    /// Draws taken, at least 1.
    pub draws:     u32,
}

/// Draw occupancy until a charger is free or the policy's draw budget is
/// spent.
///
/// With [`AvailabilityPolicy::Unbounded`] this only returns once a draw
/// clears the threshold.
pub fn check_availability<C: CountSampler>(
    sampler:       &mut C,
    policy:        AvailabilityPolicy,
    mean:          f64,
    charger_count: u32,
) -> Availability {
    let budget = policy.max_draws();
    let mut draws = 0u32;
    loop {
        draws = draws.saturating_add(1);
        if sampler.draw(mean) < charger_count {
            return Availability { available: true, draws };
        }
        if budget.is_some_and(|max| draws >= max) {
            return Availability { available: false, draws };
        }
    }
}
