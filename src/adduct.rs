//! Adduct labels, the library of their mass offsets, the arithmetic that
//! maps between m/z and neutral mass, and the search that infers an
//! annotation's adduct from its grouped signals.
pub mod arithmetic;
pub mod inference;
pub mod label;
pub mod library;

use thiserror::Error;

pub use crate::adduct::arithmetic::{
    charge, multimer, mz_from_neutral_mass, neutral_mass_from_mz,
};
pub use crate::adduct::inference::{detect_adduct, find_corroboration, AdductCall, Corroboration};
pub use crate::adduct::label::{AdductLabel, IonizationMode, IonizationModeParseError, LabelParseError};
pub use crate::adduct::library::{AdductEntry, AdductLibrary};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdductError {
    #[error("Adduct not found: {0}")]
    UnknownAdduct(String),
    #[error("Adduct label {0:?} is malformed: {1}")]
    InvalidLabel(String, LabelParseError),
    #[error("Adduct label {label:?} does not carry the {expected} sign")]
    PolarityMismatch {
        label: String,
        expected: IonizationMode,
    },
}
