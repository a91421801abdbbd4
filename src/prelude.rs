pub use crate::adduct::{
    AdductCall, AdductError, AdductLabel, AdductLibrary, Corroboration, IonizationMode,
};
pub use crate::annotation::Annotation;
pub use crate::lipid::Lipid;
pub use crate::mass_error::Tolerance;
pub use crate::peaks::{GroupedSignals, Peak};
pub use mzpeaks::{CoordinateLike, IntensityMeasurement};
