//! `mzadduct` infers the ionization adduct of an LC-MS lipid annotation by
//! cross-checking the peaks that co-elute with it.
//!
//! The crate has three layers:
//!
//! - [`adduct::library`] holds the read-only table of adduct mass offsets
//!   split by [`IonizationMode`].
//! - [`adduct::arithmetic`] converts between an observed m/z and a neutral
//!   monoisotopic mass for any adduct label, and [`mass_error`] carries the
//!   ppm utilities.
//! - [`adduct::inference`] and [`Annotation`] search for the adduct whose
//!   implied neutral mass is corroborated by another grouped signal.
//!
//! ```
//! use mzadduct::prelude::*;
//!
//! let lipid = Lipid::new(1, "PC 34:1", "C42H82NO8P", "PC", 34, 1);
//! let signals: GroupedSignals = [Peak::new(700.500, 80000.0), Peak::new(722.482, 100000.0)]
//!     .into_iter()
//!     .collect();
//! let annotation = Annotation::with_signals(lipid, 700.500, 80000.0, 6.5, IonizationMode::Positive, signals);
//! let call = annotation.detect_adduct_from_signals(IonizationMode::Positive, 0.01);
//! assert_eq!(call.as_str(), "[M+H]+");
//! ```
pub mod adduct;
pub mod annotation;
pub mod lipid;
pub mod mass_error;
pub mod peaks;
pub mod prelude;

pub use crate::adduct::{
    mz_from_neutral_mass, neutral_mass_from_mz, AdductCall, AdductEntry, AdductError,
    AdductLabel, AdductLibrary, Corroboration, IonizationMode, LabelParseError,
};
pub use crate::annotation::Annotation;
pub use crate::lipid::Lipid;
pub use crate::mass_error::{absolute_window, delta_for_ppm, ppm_error, Tolerance};
pub use crate::peaks::{GroupedSignals, Peak};

pub use mzpeaks;
