use std::cmp;
use std::fmt;
use std::hash;

use mzpeaks::{CentroidPeak, CoordinateLike, IndexType, IndexedCoordinate, IntensityMeasurement, MZ};

/// A single centroided signal, located by its m/z.
///
/// Ordering, equality and hashing only look at `mz` so that a set of peaks
/// treats two signals at the same m/z as the same peak regardless of how
/// intense they were. The `index` is the peak's position in the
/// [`GroupedSignals`](crate::peaks::GroupedSignals) holding it and is
/// ignored by all three.
#[derive(Default, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Peak {
    pub mz: f64,
    pub intensity: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub index: IndexType,
}

impl Peak {
    pub fn new(mz: f64, intensity: f32) -> Peak {
        Peak {
            mz,
            intensity,
            index: 0,
        }
    }

    pub fn mz(&self) -> f64 {
        self.mz
    }
}

impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Peak(mz={:.4}, intensity={:.1})", self.mz, self.intensity)
    }
}

impl hash::Hash for Peak {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.mz.to_bits().hash(state);
    }
}

impl cmp::Ord for Peak {
    #[inline]
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.mz.total_cmp(&other.mz)
    }
}

impl cmp::PartialOrd for Peak {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl cmp::PartialEq for Peak {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == cmp::Ordering::Equal
    }
}

impl cmp::Eq for Peak {}

impl CoordinateLike<MZ> for Peak {
    #[inline]
    fn coordinate(&self) -> f64 {
        self.mz
    }
}

impl IndexedCoordinate<MZ> for Peak {
    #[inline]
    fn get_index(&self) -> IndexType {
        self.index
    }

    #[inline]
    fn set_index(&mut self, index: IndexType) {
        self.index = index
    }
}

impl IntensityMeasurement for Peak {
    #[inline]
    fn intensity(&self) -> f32 {
        self.intensity
    }
}

impl From<CentroidPeak> for Peak {
    fn from(peak: CentroidPeak) -> Self {
        (&peak).into()
    }
}

impl From<&CentroidPeak> for Peak {
    fn from(peak: &CentroidPeak) -> Self {
        Peak {
            mz: peak.mz,
            intensity: peak.intensity,
            index: peak.index,
        }
    }
}
