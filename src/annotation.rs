//! A lipid annotation over an observed ion and the signals grouped with it.
use std::fmt::Display;
use std::hash;

use crate::adduct::inference::{detect_adduct, find_corroboration, AdductCall, Corroboration};
use crate::adduct::label::IonizationMode;
use crate::adduct::library::AdductLibrary;
use crate::lipid::Lipid;
use crate::mass_error::{absolute_window, Tolerance};
use crate::peaks::GroupedSignals;

/// An observed ion tentatively assigned to a [`Lipid`].
///
/// Only the adduct and the score are mutable after construction. The adduct
/// is filled in by inference and the score by an external rule engine
/// through [`Annotation::add_score`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    lipid: Lipid,
    mz: f64,
    /// Intensity of the most abundant peak in the group
    intensity: f64,
    rt_min: f64,
    ionization_mode: IonizationMode,
    grouped_signals: GroupedSignals,
    adduct: Option<AdductCall>,
    score: i32,
    total_scores_applied: u32,
}

impl Annotation {
    pub fn new(
        lipid: Lipid,
        mz: f64,
        intensity: f64,
        rt_min: f64,
        ionization_mode: IonizationMode,
    ) -> Self {
        Self::with_signals(
            lipid,
            mz,
            intensity,
            rt_min,
            ionization_mode,
            GroupedSignals::empty(),
        )
    }

    pub fn with_signals(
        lipid: Lipid,
        mz: f64,
        intensity: f64,
        rt_min: f64,
        ionization_mode: IonizationMode,
        grouped_signals: impl Into<GroupedSignals>,
    ) -> Self {
        Self {
            lipid,
            mz,
            intensity,
            rt_min,
            ionization_mode,
            grouped_signals: grouped_signals.into(),
            adduct: None,
            score: 0,
            total_scores_applied: 0,
        }
    }

    pub fn lipid(&self) -> &Lipid {
        &self.lipid
    }

    pub fn mz(&self) -> f64 {
        self.mz
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn rt_min(&self) -> f64 {
        self.rt_min
    }

    pub fn ionization_mode(&self) -> IonizationMode {
        self.ionization_mode
    }

    pub fn grouped_signals(&self) -> &GroupedSignals {
        &self.grouped_signals
    }

    pub fn adduct(&self) -> Option<&AdductCall> {
        self.adduct.as_ref()
    }

    pub fn set_adduct(&mut self, adduct: impl Into<String>) {
        self.adduct = Some(AdductCall::Detected(adduct.into()));
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    pub fn total_scores_applied(&self) -> u32 {
        self.total_scores_applied
    }

    /// Record one rule's verdict on this annotation
    pub fn add_score(&mut self, delta: i32) {
        self.score += delta;
        self.total_scores_applied += 1;
    }

    /// The score averaged over the number of rules applied, or `None` if no
    /// rule has been applied yet
    pub fn normalized_score(&self) -> Option<f64> {
        if self.total_scores_applied == 0 {
            None
        } else {
            Some(self.score as f64 / self.total_scores_applied as f64)
        }
    }

    /// Infer this annotation's adduct from its grouped signals using the
    /// standard adduct library.
    ///
    /// `mode` selects which adducts are tried and need not agree with
    /// [`Annotation::ionization_mode`]. `tolerance` is an absolute m/z
    /// window in Daltons.
    pub fn detect_adduct_from_signals(&self, mode: IonizationMode, tolerance: f64) -> AdductCall {
        self.detect_adduct_in(AdductLibrary::global(), mode, tolerance)
    }

    pub fn detect_adduct_in(
        &self,
        library: &AdductLibrary,
        mode: IonizationMode,
        tolerance: f64,
    ) -> AdductCall {
        detect_adduct(library, self.mz, &self.grouped_signals, mode, tolerance)
    }

    /// Like [`Annotation::detect_adduct_from_signals`] in this annotation's
    /// own ionization mode, with the tolerance converted to a window around
    /// this annotation's m/z first.
    pub fn detect_adduct_with(&self, tolerance: Tolerance) -> AdductCall {
        self.detect_adduct_from_signals(self.ionization_mode, absolute_window(tolerance, self.mz))
    }

    /// The evidence behind [`Annotation::detect_adduct_from_signals`]
    pub fn corroborate<'a>(
        &self,
        library: &'a AdductLibrary,
        mode: IonizationMode,
        tolerance: f64,
    ) -> Option<Corroboration<'a>> {
        find_corroboration(library, self.mz, &self.grouped_signals, mode, tolerance)
    }

    /// Run adduct inference and store the outcome on this annotation
    pub fn assign_adduct_from_signals(&mut self, mode: IonizationMode, tolerance: f64) -> &AdductCall {
        let call = self.detect_adduct_from_signals(mode, tolerance);
        self.adduct.insert(call)
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.mz.to_bits() == other.mz.to_bits()
            && self.rt_min.to_bits() == other.rt_min.to_bits()
            && self.lipid == other.lipid
    }
}

impl Eq for Annotation {}

impl hash::Hash for Annotation {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.lipid.hash(state);
        self.mz.to_bits().hash(state);
        self.rt_min.to_bits().hash(state);
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let adduct = self.adduct.as_ref().map(|a| a.as_str()).unwrap_or("None");
        write!(
            f,
            "Annotation({}, mz={:.4}, RT={:.2}, adduct={}, intensity={:.1}, score={})",
            self.lipid.name, self.mz, self.rt_min, adduct, self.intensity, self.score
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::peaks::Peak;
    use std::collections::HashSet;

    fn pc_34_1() -> Lipid {
        Lipid::new(1, "PC 34:1", "C42H82NO8P", "PC", 34, 1)
    }

    #[test]
    fn test_scoring() {
        let mut annotation = Annotation::new(pc_34_1(), 700.5, 80000.0, 6.5, IonizationMode::Positive);
        assert_eq!(annotation.normalized_score(), None);
        annotation.add_score(1);
        annotation.add_score(-1);
        annotation.add_score(1);
        assert_eq!(annotation.score(), 1);
        assert_eq!(annotation.total_scores_applied(), 3);
        assert!((annotation.normalized_score().unwrap() - 1.0 / 3.0).abs() < 1e-12);

        annotation.set_score(5);
        assert_eq!(annotation.score(), 5);
        assert_eq!(annotation.total_scores_applied(), 3);
    }

    #[test]
    fn test_equality() {
        let a = Annotation::new(pc_34_1(), 700.5, 80000.0, 6.5, IonizationMode::Positive);
        let mut b = Annotation::with_signals(
            pc_34_1(),
            700.5,
            1.0,
            6.5,
            IonizationMode::Negative,
            vec![Peak::new(700.5, 1.0)],
        );
        b.add_score(3);
        let c = Annotation::new(pc_34_1(), 700.5, 80000.0, 7.0, IonizationMode::Positive);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Annotation> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test_log::test]
    fn test_assign_adduct() {
        let signals = vec![Peak::new(700.500, 80000.0), Peak::new(722.482, 100000.0)];
        let mut annotation = Annotation::with_signals(
            pc_34_1(),
            722.482,
            100000.0,
            6.5,
            IonizationMode::Positive,
            signals,
        );
        assert!(annotation.adduct().is_none());
        let call = annotation
            .assign_adduct_from_signals(IonizationMode::Positive, 0.01)
            .clone();
        assert_eq!(call.as_str(), "[M+Na]+");
        assert_eq!(annotation.adduct(), Some(&call));
        assert_eq!(annotation.score(), 0);
        assert_eq!(annotation.total_scores_applied(), 0);
    }

    #[test]
    fn test_display() {
        let mut annotation = Annotation::new(pc_34_1(), 700.5, 80000.0, 6.5, IonizationMode::Positive);
        assert_eq!(
            annotation.to_string(),
            "Annotation(PC 34:1, mz=700.5000, RT=6.50, adduct=None, intensity=80000.0, score=0)"
        );
        annotation.set_adduct("[M+H]+");
        annotation.add_score(1);
        assert_eq!(
            annotation.to_string(),
            "Annotation(PC 34:1, mz=700.5000, RT=6.50, adduct=[M+H]+, intensity=80000.0, score=1)"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialized_signals_stay_sorted() -> Result<(), serde_json::Error> {
        let annotation = Annotation::with_signals(
            pc_34_1(),
            700.5,
            80000.0,
            6.5,
            IonizationMode::Positive,
            vec![Peak::new(700.5, 80000.0), Peak::new(722.482, 100000.0)],
        );
        let mut value = serde_json::to_value(&annotation)?;
        value["grouped_signals"] = serde_json::json!([
            {"mz": 722.482, "intensity": 100000.0},
            {"mz": 700.5, "intensity": 80000.0},
            {"mz": 700.5, "intensity": 1.0}
        ]);
        let restored: Annotation = serde_json::from_value(value)?;
        let mzs: Vec<f64> = restored.grouped_signals().iter().map(|p| p.mz).collect();
        assert_eq!(mzs, vec![700.5, 722.482]);
        assert_eq!(restored, annotation);
        assert_eq!(
            restored
                .detect_adduct_from_signals(IonizationMode::Positive, 0.01)
                .as_str(),
            "[M+H]+"
        );
        Ok(())
    }
}
