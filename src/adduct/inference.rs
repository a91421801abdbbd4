//! Adduct inference from co-eluting signals.
//!
//! For each adduct hypothesis `A` of the target m/z, the implied neutral mass
//! is projected back through every adduct `B` of the same polarity. If any
//! other grouped peak lands on one of those projections, `A` is accepted.
//! Hypotheses are tried in library order, peaks in ascending m/z order, so
//! the first corroborated `A` wins.
use std::fmt::Display;

use log::{debug, trace, warn};

use super::label::IonizationMode;
use super::library::AdductLibrary;
use crate::peaks::{GroupedSignals, Peak};

/// The outcome of adduct inference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdductCall {
    Detected(String),
    #[default]
    Unknown,
}

impl AdductCall {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Detected(adduct) => adduct,
            Self::Unknown => Self::UNKNOWN,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Self::Detected(_))
    }

    pub fn adduct(&self) -> Option<&str> {
        match self {
            Self::Detected(adduct) => Some(adduct),
            Self::Unknown => None,
        }
    }
}

impl Display for AdductCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Option<Corroboration<'_>>> for AdductCall {
    fn from(value: Option<Corroboration<'_>>) -> Self {
        match value {
            Some(hit) => Self::Detected(hit.adduct.to_string()),
            None => Self::Unknown,
        }
    }
}

/// The evidence behind a detected adduct: the target is `adduct`, and
/// `peak` is the same molecule observed as `corroborating_adduct`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corroboration<'a> {
    pub adduct: &'a str,
    pub corroborating_adduct: &'a str,
    pub peak: Peak,
    pub neutral_mass: f64,
    pub expected_mz: f64,
}

impl Display for Corroboration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (M={:.5}) via {} at {:.4} (expected {:.4})",
            self.adduct, self.neutral_mass, self.corroborating_adduct, self.peak.mz, self.expected_mz
        )
    }
}

/// Find the first adduct hypothesis for `mz` that another peak in `signals`
/// corroborates within `tolerance` Daltons.
///
/// Peaks within `tolerance` of `mz` are taken to be the target itself and
/// never count as evidence. Fewer than two signals cannot corroborate
/// anything.
pub fn find_corroboration<'a>(
    library: &'a AdductLibrary,
    mz: f64,
    signals: &GroupedSignals,
    mode: IonizationMode,
    tolerance: f64,
) -> Option<Corroboration<'a>> {
    if signals.len() < 2 {
        debug!(
            "Not enough signals to detect an adduct for {mz:.4} ({})",
            signals.len()
        );
        return None;
    }

    for adduct in library.labels_for(mode) {
        let neutral_mass = library.neutral_mass_from_mz(mz, adduct);
        trace!("Testing {adduct} for {mz:.4}: M = {neutral_mass}");

        for peak in signals.iter() {
            if (peak.mz - mz).abs() <= tolerance {
                continue;
            }
            for corroborating_adduct in library.labels_for(mode) {
                let expected_mz = match library.mz_from_neutral_mass(neutral_mass, corroborating_adduct) {
                    Ok(expected_mz) => expected_mz,
                    Err(e) => {
                        warn!("Skipping {corroborating_adduct} while testing {adduct}: {e}");
                        continue;
                    }
                };
                let diff = (expected_mz - peak.mz).abs();
                trace!(
                    "  {corroborating_adduct}: expected {expected_mz}, observed {}, diff {diff}",
                    peak.mz
                );
                if diff <= tolerance {
                    let hit = Corroboration {
                        adduct,
                        corroborating_adduct,
                        peak: *peak,
                        neutral_mass,
                        expected_mz,
                    };
                    debug!("Detected adduct {hit}");
                    return Some(hit);
                }
            }
        }
    }
    debug!("No adduct for {mz:.4} was corroborated by {} signals", signals.len());
    None
}

/// Infer the adduct of `mz` from the co-eluting `signals`. See
/// [`find_corroboration`] for the search itself.
pub fn detect_adduct(
    library: &AdductLibrary,
    mz: f64,
    signals: &GroupedSignals,
    mode: IonizationMode,
    tolerance: f64,
) -> AdductCall {
    find_corroboration(library, mz, signals, mode, tolerance).into()
}
