//! Peaks observed alongside an annotation and the m/z ordered set that
//! groups them.
pub mod peak;
pub mod peak_set;

pub use crate::peaks::peak::Peak;
pub use crate::peaks::peak_set::{GroupedSignals, GroupedSignalsIter};
