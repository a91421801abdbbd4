//! Conversions between an observed m/z and the neutral monoisotopic mass of
//! the molecule behind it, under an adduct hypothesis.
//!
//! An adduct label encodes a multimer count `k` (the digits before `M`) and
//! a charge magnitude `z` (the digits before the trailing sign), both
//! defaulting to 1. The mass offset Δ comes from an [`AdductLibrary`] and is
//! signed so that protonation has a negative Δ.
//!
//! The forward direction is uniform, `M = (mz + Δ) · z / k`. The reverse
//! direction is a case split on `z = 1`, then `k > 1`, then everything else.
//! It only inverts the forward direction exactly when `k = 1`.
use std::num::{NonZeroU32, ParseIntError};

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use super::library::AdductLibrary;
use super::AdductError;

lazy_static! {
    static ref MULTIMER_PATTERN: Regex = Regex::new(r"(\d+)M").unwrap();
    static ref CHARGE_PATTERN: Regex = Regex::new(r"(\d+)([+\-]$)").unwrap();
}

fn count_from(pattern: &Regex, adduct: &str) -> Result<u32, ParseIntError> {
    match pattern.captures(adduct).and_then(|c| c.get(1)) {
        Some(digits) => digits.as_str().parse::<NonZeroU32>().map(|n| n.get()),
        None => Ok(1),
    }
}

/// The number of molecules clustered in the ion, read from the digits right
/// before the `M` of the label. Defaults to 1.
pub fn multimer(adduct: &str) -> Result<u32, ParseIntError> {
    count_from(&MULTIMER_PATTERN, adduct)
}

/// The magnitude of the ion's charge, read from the digits right before the
/// trailing sign of the label. Defaults to 1.
pub fn charge(adduct: &str) -> Result<u32, ParseIntError> {
    count_from(&CHARGE_PATTERN, adduct)
}

fn counts(adduct: &str) -> (u32, u32) {
    let k = multimer(adduct).unwrap_or_else(|e| {
        warn!("Treating the multimer of {adduct} as 1: {e}");
        1
    });
    let z = charge(adduct).unwrap_or_else(|e| {
        warn!("Treating the charge of {adduct} as 1: {e}");
        1
    });
    (k, z)
}

pub(crate) fn neutral_mass_with_delta(mz: f64, delta: f64, adduct: &str) -> f64 {
    let (k, z) = counts(adduct);
    (mz + delta) * z as f64 / k as f64
}

pub(crate) fn mz_with_delta(mass: f64, delta: f64, adduct: &str) -> f64 {
    let (k, z) = counts(adduct);
    if z == 1 {
        mass - delta
    } else if k > 1 {
        (mass * k as f64) - delta
    } else {
        (mass / z as f64) - delta
    }
}

impl AdductLibrary {
    /// The neutral mass implied by observing `mz` as `adduct`.
    ///
    /// A label missing from both polarities is treated as having no mass
    /// offset at all rather than as an error.
    pub fn neutral_mass_from_mz(&self, mz: f64, adduct: &str) -> f64 {
        let delta = match self.delta(adduct) {
            Some(delta) => delta,
            None => {
                debug!("{adduct} is not in the adduct library, using a zero mass offset");
                0.0
            }
        };
        neutral_mass_with_delta(mz, delta, adduct)
    }

    /// The m/z at which a molecule of neutral mass `mass` would be observed
    /// as `adduct`.
    pub fn mz_from_neutral_mass(&self, mass: f64, adduct: &str) -> Result<f64, AdductError> {
        let delta = self
            .delta(adduct)
            .ok_or_else(|| AdductError::UnknownAdduct(adduct.to_string()))?;
        Ok(mz_with_delta(mass, delta, adduct))
    }
}

/// [`AdductLibrary::neutral_mass_from_mz`] against [`AdductLibrary::global`]
pub fn neutral_mass_from_mz(mz: f64, adduct: &str) -> f64 {
    AdductLibrary::global().neutral_mass_from_mz(mz, adduct)
}

/// [`AdductLibrary::mz_from_neutral_mass`] against [`AdductLibrary::global`]
pub fn mz_from_neutral_mass(mass: f64, adduct: &str) -> Result<f64, AdductError> {
    AdductLibrary::global().mz_from_neutral_mass(mass, adduct)
}
