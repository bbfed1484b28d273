//! Splits a total population across groups according to their ratios.

use crate::{
    error::{Error, Result},
    group::Group,
};
use rand::Rng;

/// Assigns `population` on every group so the counts sum to `total`.
///
/// 1. Each group first gets `floor(total * ratio / sum(ratios))`.
/// 2. While the sum is short of `total`, a group is picked uniformly at
///    random (zero-ratio groups included) and its count is bumped by one.
///
/// ### Parameters
/// - `total` - Requested number of particles; `0` leaves every group empty.
/// - `groups` - Ordered group list, mutated in place.
/// - `rng` - Source for the remainder draws.
///
/// ### Errors
/// - [`Error::InvalidParam`] if `groups` is empty or a ratio is negative or not finite.
/// - [`Error::ZeroRatioSum`] if the ratios sum to zero.
pub fn allocate(total: usize, groups: &mut [Group], rng: &mut impl Rng) -> Result<()> {
    if groups.is_empty() {
        return Err(Error::InvalidParam("at least one group is required".into()));
    }
    if let Some(g) = groups.iter().find(|g| !g.ratio.is_finite() || g.ratio < 0.0) {
        return Err(Error::InvalidParam(format!(
            "ratio of group {:?} must be finite and >= 0",
            g.name
        )));
    }

    let whole: f64 = groups.iter().map(|g| f64::from(g.ratio)).sum();
    if whole <= 0.0 {
        return Err(Error::ZeroRatioSum);
    }

    for g in groups.iter_mut() {
        g.population = (total as f64 * f64::from(g.ratio) / whole).floor() as usize;
    }

    let mut assigned: usize = groups.iter().map(|g| g.population).sum();
    let floored = assigned;
    while assigned < total {
        let i = rng.random_range(0..groups.len());
        groups[i].population += 1;
        assigned += 1;
    }

    log::debug!(
        "allocated {total} particles over {} groups ({} by remainder draws)",
        groups.len(),
        assigned - floored
    );
    Ok(())
}
