//! Mass accuracy in parts-per-million.
//!
//! Tolerance windows come from [`mzpeaks::Tolerance`], re-exported here so
//! callers can write `mzadduct::Tolerance::PPM(10.0)`.
pub use mzpeaks::{Tolerance, ToleranceParsingError};

const PPM_SCALE: f64 = 1e6;

/// The absolute difference between `observed` and `theoretical` in
/// parts-per-million of `theoretical`, rounded to the nearest integer.
#[inline]
pub fn ppm_error(observed: f64, theoretical: f64) -> i64 {
    ((observed - theoretical) * PPM_SCALE / theoretical)
        .abs()
        .round() as i64
}

/// The mass that `ppm` parts-per-million of `mass` spans, rounded to the
/// nearest whole Dalton.
///
/// Sub-dalton windows round to zero. Use [`Tolerance::PPM`] and
/// [`absolute_window`] when the unrounded width is needed.
#[inline]
pub fn delta_for_ppm(mass: f64, ppm: i32) -> f64 {
    ((mass * ppm as f64).abs() / PPM_SCALE).round()
}

/// The half-width in Daltons of the window `tolerance` allows around `mz`
pub fn absolute_window(tolerance: Tolerance, mz: f64) -> f64 {
    match tolerance {
        Tolerance::Da(tol) => tol.abs(),
        Tolerance::PPM(_) => {
            let (lower, upper) = tolerance.bounds(mz);
            (upper - lower).abs() / 2.0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ppm_error() {
        assert_eq!(ppm_error(700.500, 700.493), 10);
        assert_eq!(ppm_error(700.493, 700.500), 10);
        assert_eq!(ppm_error(700.5, 700.5), 0);
    }

    #[test]
    fn test_delta_for_ppm() {
        assert_eq!(delta_for_ppm(700.500, 10), 0.0);
        assert_eq!(delta_for_ppm(1_000_000.0, 10), 10.0);
        assert_eq!(delta_for_ppm(150_000.0, 10), 2.0);
        assert_eq!(delta_for_ppm(149_000.0, -10), 1.0);
        assert_eq!(delta_for_ppm(1_000_000.0, -10), delta_for_ppm(1_000_000.0, 10));
        assert_eq!(delta_for_ppm(700.5, 0), 0.0);
    }

    #[test]
    fn test_absolute_window() {
        let tol = Tolerance::PPM(10.0);
        let window = absolute_window(tol, 700.5);
        assert!((window - 0.007005).abs() < 1e-9, "{window}");
        assert!(tol.test(700.505, 700.5));
        assert!(!tol.test(700.51, 700.5));

        assert_eq!(absolute_window(Tolerance::Da(0.02), 700.5), 0.02);
        assert!(Tolerance::Da(0.02).test(700.51, 700.5));
    }

    #[test]
    fn test_parse_tolerance() -> Result<(), ToleranceParsingError> {
        let tol: Tolerance = "10ppm".parse()?;
        assert_eq!(tol, Tolerance::PPM(10.0));
        let tol: Tolerance = "0.01Da".parse()?;
        assert_eq!(tol, Tolerance::Da(0.01));
        assert!("0.01".parse::<Tolerance>().is_err());
        Ok(())
    }
}
