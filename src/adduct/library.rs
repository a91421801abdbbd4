//! The registry of adduct mass offsets.
//!
//! Each polarity keeps its labels in insertion order, which is the order
//! adduct inference tries them in.
use indexmap::IndexMap;
use lazy_static::lazy_static;

use super::label::{AdductLabel, IonizationMode};
use super::AdductError;

/// The proton offset as published in the adduct table, to six decimals. The
/// physical proton mass is 1.00727646677 Da.
const TABLE_PROTON: f64 = 1.007276;

/// Positive mode adducts with the offset that, added to the observed m/z,
/// removes the adduct's contribution for a single charge.
const POSITIVE_ADDUCTS: &[(&str, f64)] = &[
    ("[M+H]+", -TABLE_PROTON),
    ("[2M+H]+", -TABLE_PROTON),
    ("[M+2H]2+", -TABLE_PROTON),
    ("[M+Na]+", -22.989218),
    ("[2M+Na]+", -22.989218),
    ("[M+K]+", -38.963158),
    ("[M+NH4]+", -18.033823),
    ("[2M+NH4]+", -18.033823),
    ("[M+H-H2O]+", 17.003289),
    ("[M+H+NH4]2+", -9.520550),
    ("[M+H+Na]2+", -11.998247),
    ("[M+3H]3+", -TABLE_PROTON),
    ("[M+2Na]2+", -22.989218),
];

const NEGATIVE_ADDUCTS: &[(&str, f64)] = &[
    ("[M-H]-", TABLE_PROTON),
    ("[M-H-H2O]-", 19.018390),
    ("[M-2H]2-", TABLE_PROTON),
    ("[2M-H]-", TABLE_PROTON),
    ("[M+Na-2H]-", -20.974666),
    ("[M+K-2H]-", -36.948606),
    ("[M+Cl]-", -34.969402),
    ("[M+HCOO]-", -44.998201),
    ("[M+CH3COO]-", -59.013851),
    ("[M-3H]3-", TABLE_PROTON),
];

lazy_static! {
    static ref STANDARD_LIBRARY: AdductLibrary = AdductLibrary::standard();
}

/// What the library knows about a single adduct label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdductEntry {
    pub delta: f64,
    pub mode: IonizationMode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdductLibrary {
    positive: IndexMap<String, f64>,
    negative: IndexMap<String, f64>,
}

impl AdductLibrary {
    /// The shared, read-only library of standard lipidomics adducts
    pub fn global() -> &'static AdductLibrary {
        &STANDARD_LIBRARY
    }

    /// Build a fresh copy of the standard lipidomics adduct table
    pub fn standard() -> Self {
        let collect = |table: &[(&str, f64)]| {
            table
                .iter()
                .map(|(label, delta)| (label.to_string(), *delta))
                .collect::<IndexMap<_, _>>()
        };
        Self {
            positive: collect(POSITIVE_ADDUCTS),
            negative: collect(NEGATIVE_ADDUCTS),
        }
    }

    /// Build a library from `(label, Δ)` pairs for each polarity.
    ///
    /// Every label must parse as an [`AdductLabel`] whose sign matches the
    /// polarity it is listed under. A label listed twice keeps its first
    /// position and its last Δ.
    pub fn from_entries<'a, I, J>(positive: I, negative: J) -> Result<Self, AdductError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
        J: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut library = Self::default();
        for (label, delta) in positive {
            Self::check_label(label, IonizationMode::Positive)?;
            library.positive.insert(label.to_string(), delta);
        }
        for (label, delta) in negative {
            Self::check_label(label, IonizationMode::Negative)?;
            library.negative.insert(label.to_string(), delta);
        }
        Ok(library)
    }

    fn check_label(label: &str, expected: IonizationMode) -> Result<(), AdductError> {
        let parsed: AdductLabel = label
            .parse()
            .map_err(|e| AdductError::InvalidLabel(label.to_string(), e))?;
        if parsed.mode != expected {
            return Err(AdductError::PolarityMismatch {
                label: label.to_string(),
                expected,
            });
        }
        Ok(())
    }

    fn table(&self, mode: IonizationMode) -> &IndexMap<String, f64> {
        match mode {
            IonizationMode::Positive => &self.positive,
            IonizationMode::Negative => &self.negative,
        }
    }

    /// Find `label`, searching the positive adducts before the negative ones
    pub fn lookup(&self, label: &str) -> Option<AdductEntry> {
        if let Some(delta) = self.positive.get(label) {
            return Some(AdductEntry {
                delta: *delta,
                mode: IonizationMode::Positive,
            });
        }
        self.negative.get(label).map(|delta| AdductEntry {
            delta: *delta,
            mode: IonizationMode::Negative,
        })
    }

    pub fn delta(&self, label: &str) -> Option<f64> {
        self.lookup(label).map(|entry| entry.delta)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.positive.contains_key(label) || self.negative.contains_key(label)
    }

    pub fn labels_for(&self, mode: IonizationMode) -> impl Iterator<Item = &str> + '_ {
        self.table(mode).keys().map(|k| k.as_str())
    }

    pub fn entries_for(&self, mode: IonizationMode) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.table(mode).iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}
