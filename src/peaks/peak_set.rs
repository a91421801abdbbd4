use std::fmt;
use std::hash;
use std::ops;

use mzpeaks::peak_set::{PeakCollection, PeakCollectionMut, PeakSetVec};
use mzpeaks::{Tolerance, MZ};

use super::peak::Peak;

/// The signals grouped with an annotation, kept sorted by ascending m/z.
///
/// No two members share an m/z. When a peak is added at an m/z that is
/// already present, the peak that was there first is kept.
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Peak>", into = "Vec<Peak>")
)]
pub struct GroupedSignals {
    peaks: PeakSetVec<Peak, MZ>,
}

impl GroupedSignals {
    pub fn new(peaks: Vec<Peak>) -> Self {
        peaks.into_iter().collect()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            peaks: PeakSetVec::with_capacity(capacity),
        }
    }

    pub fn empty() -> Self {
        Self::with_capacity(0)
    }

    /// Insert `peak` at its sorted position. Returns `false` if a peak with
    /// the same m/z was already present, in which case the set is unchanged.
    pub fn push(&mut self, peak: Peak) -> bool {
        match self.peaks.last() {
            Some(p) if *p < peak => {}
            None => {}
            Some(_) => {
                if self.peaks.as_slice().binary_search(&peak).is_ok() {
                    return false;
                }
            }
        }
        self.peaks.push(peak);
        true
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Peak> {
        self.peaks.as_slice().get(i)
    }

    pub fn first(&self) -> Option<&Peak> {
        self.peaks.first()
    }

    pub fn last(&self) -> Option<&Peak> {
        self.peaks.last()
    }

    pub fn as_slice(&self) -> &[Peak] {
        self.peaks.as_slice()
    }

    /// The underlying `mzpeaks` peak set, for use with the rest of that
    /// crate's [`PeakCollection`] API
    pub fn as_peak_set(&self) -> &PeakSetVec<Peak, MZ> {
        &self.peaks
    }

    pub fn iter(&self) -> GroupedSignalsIter<'_> {
        GroupedSignalsIter::new(self)
    }

    /// The most intense peak in the group
    pub fn base_peak(&self) -> Option<&Peak> {
        self.peaks.base_peak()
    }

    /// Find the peak closest to `query` that lies within `error_tolerance`
    /// Daltons of it.
    pub fn search(&self, query: f64, error_tolerance: f64) -> Option<usize> {
        self.peaks.search(query, Tolerance::Da(error_tolerance))
    }

    pub fn has_peak(&self, query: f64, error_tolerance: f64) -> Option<&Peak> {
        self.peaks.has_peak(query, Tolerance::Da(error_tolerance))
    }

    /// All peaks whose m/z lies in the closed interval `[low, high]`
    pub fn between(&self, low: f64, high: f64) -> &[Peak] {
        let empty = &self.as_slice()[0..0];
        match (self.first(), self.last()) {
            (Some(first), Some(last)) if low <= high && low <= last.mz && high >= first.mz => {
                self.peaks.between(low, high, Tolerance::Da(0.0))
            }
            _ => empty,
        }
    }
}

impl Eq for GroupedSignals {}

impl hash::Hash for GroupedSignals {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl ops::Index<usize> for GroupedSignals {
    type Output = Peak;

    fn index(&self, i: usize) -> &Self::Output {
        &(self.peaks[i])
    }
}

impl fmt::Display for GroupedSignals {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GroupedSignals(<{} Peaks>)", self.len())?;
        Ok(())
    }
}

impl FromIterator<Peak> for GroupedSignals {
    fn from_iter<T: IntoIterator<Item = Peak>>(iter: T) -> Self {
        let mut peaks: Vec<Peak> = iter.into_iter().collect();
        // A stable sort keeps the first of any equal-m/z run for `dedup`
        peaks.sort();
        peaks.dedup();
        Self {
            peaks: PeakSetVec::new(peaks),
        }
    }
}

impl From<Vec<Peak>> for GroupedSignals {
    fn from(v: Vec<Peak>) -> GroupedSignals {
        GroupedSignals::new(v)
    }
}

impl From<GroupedSignals> for Vec<Peak> {
    fn from(value: GroupedSignals) -> Self {
        value.peaks.into_inner()
    }
}

impl Extend<Peak> for GroupedSignals {
    fn extend<T: IntoIterator<Item = Peak>>(&mut self, iter: T) {
        for peak in iter {
            self.push(peak);
        }
    }
}

impl<'a> IntoIterator for &'a GroupedSignals {
    type Item = &'a Peak;
    type IntoIter = GroupedSignalsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        GroupedSignalsIter::new(self)
    }
}

impl IntoIterator for GroupedSignals {
    type Item = Peak;
    type IntoIter = std::vec::IntoIter<Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.into_iter()
    }
}

pub struct GroupedSignalsIter<'a> {
    iter: std::slice::Iter<'a, Peak>,
}

impl<'a> GroupedSignalsIter<'a> {
    fn new(peaks: &'a GroupedSignals) -> GroupedSignalsIter<'a> {
        GroupedSignalsIter {
            iter: peaks.as_slice().iter(),
        }
    }
}

impl<'a> Iterator for GroupedSignalsIter<'a> {
    type Item = &'a Peak;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> ExactSizeIterator for GroupedSignalsIter<'a> {}

impl<'a> DoubleEndedIterator for GroupedSignalsIter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use mzpeaks::IndexedCoordinate;

    fn signals() -> GroupedSignals {
        vec![
            Peak::new(722.482, 100000.0),
            Peak::new(350.754, 85000.0),
            Peak::new(700.500, 80000.0),
        ]
        .into()
    }

    #[test]
    fn test_sorted_and_unique() {
        let mut group = signals();
        assert_eq!(group.len(), 3);
        assert!(!group.push(Peak::new(700.500, 1.0)));
        assert_eq!(group.len(), 3);
        assert_eq!(group[1].intensity, 80000.0);

        assert!(group.push(Peak::new(500.0, 1.0)));
        assert!(group.push(Peak::new(900.0, 1.0)));
        let mzs: Vec<f64> = group.iter().map(|p| p.mz).collect();
        assert_eq!(mzs, vec![350.754, 500.0, 700.5, 722.482, 900.0]);
        assert!(group.as_slice().windows(2).all(|w| w[0].mz < w[1].mz));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let group: GroupedSignals = [Peak::new(700.5, 1.0), Peak::new(700.5, 2.0)]
            .into_iter()
            .collect();
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].intensity, 1.0);
    }

    #[test]
    fn test_search() {
        let group = signals();
        let hit = group.has_peak(700.505, 0.01).unwrap();
        assert_eq!(hit.mz, 700.5);
        assert!(group.has_peak(710.0, 0.01).is_none());
        assert_eq!(group.search(350.75, 0.01), Some(0));
        assert!(GroupedSignals::empty().has_peak(700.5, 1.0).is_none());
    }

    #[test]
    fn test_between_and_base_peak() {
        let group = signals();
        let window = group.between(700.0, 722.482);
        assert_eq!(window.len(), 2);
        assert!(group.between(100.0, 200.0).is_empty());
        assert_eq!(group.base_peak().unwrap().mz, 722.482);
        assert_eq!(group.first().unwrap().mz, 350.754);
        assert_eq!(group.last().unwrap().mz, 722.482);
        assert!(group.between(400.0, 600.0).is_empty());
        assert!(group.between(800.0, 900.0).is_empty());
        assert!(group.between(722.482, 700.0).is_empty());
    }

    #[test]
    fn test_index_follows_position() {
        let mut group = signals();
        assert!(group.push(Peak::new(500.0, 1.0)));
        assert!(group.push(Peak::new(100.0, 1.0)));
        for (i, peak) in group.iter().enumerate() {
            assert_eq!(peak.get_index() as usize, i);
        }
        assert_eq!(group.as_peak_set().len(), group.len());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_sorts_and_dedups() -> Result<(), serde_json::Error> {
        let text = r#"[
            {"mz": 722.482, "intensity": 1.0},
            {"mz": 700.5, "intensity": 2.0},
            {"mz": 700.5, "intensity": 3.0}
        ]"#;
        let group: GroupedSignals = serde_json::from_str(text)?;
        let mzs: Vec<f64> = group.iter().map(|p| p.mz).collect();
        assert_eq!(mzs, vec![700.5, 722.482]);
        assert_eq!(group[0].intensity, 2.0);
        assert_eq!(group[1].get_index(), 1);
        assert!(group.has_peak(722.48, 0.01).is_some());

        let text = serde_json::to_string(&group)?;
        let group2: GroupedSignals = serde_json::from_str(&text)?;
        assert_eq!(group, group2);
        Ok(())
    }
}
