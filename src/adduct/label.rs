use std::fmt::Display;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use super::arithmetic::{charge, multimer};

/// The polarity an ion was acquired in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IonizationMode {
    Positive,
    Negative,
}

impl IonizationMode {
    /// The trailing character an adduct label of this polarity ends with
    pub const fn sign(&self) -> char {
        match self {
            Self::Positive => '+',
            Self::Negative => '-',
        }
    }

    pub fn from_sign(sign: char) -> Option<Self> {
        match sign {
            '+' => Some(Self::Positive),
            '-' => Some(Self::Negative),
            _ => None,
        }
    }
}

impl Display for IonizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "POSITIVE"),
            Self::Negative => write!(f, "NEGATIVE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not an ionization mode")]
pub struct IonizationModeParseError(String);

impl FromStr for IonizationMode {
    type Err = IonizationModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positive" | "pos" | "+" => Ok(Self::Positive),
            "negative" | "neg" | "-" => Ok(Self::Negative),
            _ => Err(IonizationModeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelParseError {
    #[error("no molecule `M` term")]
    MissingMolecule,
    #[error("no trailing `+` or `-` sign")]
    MissingSign,
    #[error("count is not a positive integer: {0}")]
    InvalidCount(#[from] ParseIntError),
}

/// An adduct specifier of the form `[<k>M<chemistry>]<z><sign>` broken
/// into its multimer, charge and polarity.
///
/// ```
/// use mzadduct::{AdductLabel, IonizationMode};
///
/// let label: AdductLabel = "[M+2H]2+".parse().unwrap();
/// assert_eq!(label.multimer, 1);
/// assert_eq!(label.charge, 2);
/// assert_eq!(label.mode, IonizationMode::Positive);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdductLabel {
    pub multimer: u32,
    pub charge: u32,
    pub mode: IonizationMode,
    text: String,
}

impl AdductLabel {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for AdductLabel {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = s
            .chars()
            .last()
            .and_then(IonizationMode::from_sign)
            .ok_or(LabelParseError::MissingSign)?;
        if !s.contains('M') {
            return Err(LabelParseError::MissingMolecule);
        }
        let multimer = multimer(s)?;
        let charge = charge(s)?;
        Ok(Self {
            multimer,
            charge,
            mode,
            text: s.to_string(),
        })
    }
}

impl Display for AdductLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for AdductLabel {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_labels() {
        let label: AdductLabel = "[2M+Na]+".parse().unwrap();
        assert_eq!((label.multimer, label.charge), (2, 1));
        assert_eq!(label.mode, IonizationMode::Positive);
        assert_eq!(label.to_string(), "[2M+Na]+");

        let label: AdductLabel = "[M-3H]3-".parse().unwrap();
        assert_eq!((label.multimer, label.charge), (1, 3));
        assert_eq!(label.mode, IonizationMode::Negative);

        let label: AdductLabel = "[M+HCOO]-".parse().unwrap();
        assert_eq!((label.multimer, label.charge), (1, 1));
    }

    #[test]
    fn test_explicit_unit_counts() {
        let implicit: AdductLabel = "[M+H]+".parse().unwrap();
        let explicit: AdductLabel = "[1M+H]1+".parse().unwrap();
        assert_eq!(implicit.multimer, explicit.multimer);
        assert_eq!(implicit.charge, explicit.charge);
    }

    #[test]
    fn test_malformed_labels() {
        assert_eq!(
            "[M+H]".parse::<AdductLabel>(),
            Err(LabelParseError::MissingSign)
        );
        assert_eq!(
            "[X+H]+".parse::<AdductLabel>(),
            Err(LabelParseError::MissingMolecule)
        );
        assert!(matches!(
            "[0M+H]+".parse::<AdductLabel>(),
            Err(LabelParseError::InvalidCount(_))
        ));
    }

    #[test]
    fn test_ionization_mode() {
        assert_eq!(IonizationMode::Positive.to_string(), "POSITIVE");
        assert_eq!(
            "NEGATIVE".parse::<IonizationMode>().unwrap(),
            IonizationMode::Negative
        );
        assert_eq!(IonizationMode::from_sign('+'), Some(IonizationMode::Positive));
        assert_eq!(IonizationMode::Negative.sign(), '-');
        assert!("neutral".parse::<IonizationMode>().is_err());
    }
}
