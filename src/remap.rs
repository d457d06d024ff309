use core::fmt;

/// The observed bounds of raw samples, established by calibration.
///
/// # Examples
///
/// ```
/// use adc_remapper::CalibratedRange;
///
/// // Readings from a sensor that never quite reaches the rails.
/// let calibrated = CalibratedRange { low: 900, high: 2800 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalibratedRange {
    pub low: i32,
    pub high: i32,
}

/// The bounds the mapped output should be expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetRange {
    pub low: i32,
    pub high: i32,
}

/// Mapping failed because the calibrated range has zero width, which would
/// put zero in the divisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    DivisionByZero,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DivisionByZero => write!(f, "calibrated range has zero width"),
        }
    }
}

/// Both results of [`map_approximate`], so callers can compare either
/// against [`map_exact`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Approximation {
    /// The fixed-point result, a slight underestimate of the exact mapping.
    pub approx: i32,
    /// `approx + (approx >> 8)`, which cancels most of the underestimate.
    pub corrected: i32,
}

/// Maps `sample` from the calibrated range into the target range using
/// truncating integer division.
///
/// Samples outside the calibrated range extrapolate linearly; nothing is
/// clamped. Intermediate products must fit in an `i32`: callers with large
/// spans are responsible for keeping
/// `(target.high - target.low) * (sample - calibrated.low)` in range.
///
/// Returns [`Error::DivisionByZero`] if the calibrated range has zero width.
///
/// # Examples
///
/// ```
/// use adc_remapper::{map_exact, CalibratedRange, TargetRange};
///
/// let calibrated = CalibratedRange { low: 900, high: 2800 };
/// let target = TargetRange { low: 1000, high: 3000 };
///
/// // 1500 sits 600/1900 of the way through the calibrated range.
/// assert_eq!(map_exact(1500, calibrated, target), Ok(1631));
/// ```
pub fn map_exact(
    sample: i32,
    calibrated: CalibratedRange,
    target: TargetRange,
) -> Result<i32, Error> {
    if calibrated.high == calibrated.low {
        return Err(Error::DivisionByZero);
    }

    Ok(exact(sample, calibrated, target))
}

/// Maps `sample` like [`map_exact`], but the way the blend hardware does:
/// the position within the calibrated range becomes an 8-bit fraction `a`,
/// and the result is `target.low + (((target.high - target.low) * a) >> 8)`.
///
/// Because `a` is `255 * position / span` while the implicit denominator is
/// 256, the approximation underestimates the exact mapping by up to about
/// 0.4% of the target span. `corrected` adds back `approx >> 8` to recover
/// most of that; a small residual remains.
///
/// Only the low 8 bits of `a` are kept, so samples far outside the
/// calibrated range alias into it instead of saturating.
///
/// Returns [`Error::DivisionByZero`] if the calibrated range has zero width.
///
/// # Examples
///
/// ```
/// use adc_remapper::{map_approximate, map_exact, CalibratedRange, TargetRange};
///
/// let calibrated = CalibratedRange { low: 900, high: 2800 };
/// let target = TargetRange { low: 1000, high: 3000 };
///
/// let result = map_approximate(1500, calibrated, target).unwrap();
///
/// assert_eq!(result.approx, 1625);
/// assert_eq!(result.corrected, 1631);
/// assert_eq!(map_exact(1500, calibrated, target), Ok(1631));
/// ```
pub fn map_approximate(
    sample: i32,
    calibrated: CalibratedRange,
    target: TargetRange,
) -> Result<Approximation, Error> {
    if calibrated.high == calibrated.low {
        return Err(Error::DivisionByZero);
    }

    Ok(approximate(sample, calibrated, target))
}

pub(crate) fn exact(sample: i32, calibrated: CalibratedRange, target: TargetRange) -> i32 {
    target.low
        + (target.high - target.low) * (sample - calibrated.low)
            / (calibrated.high - calibrated.low)
}

pub(crate) fn approximate(
    sample: i32,
    calibrated: CalibratedRange,
    target: TargetRange,
) -> Approximation {
    // The accumulator holds only the low 8 bits of the fraction, so
    // out-of-range samples alias rather than clamp.
    let alpha = (255 * (sample - calibrated.low) / (calibrated.high - calibrated.low)) as u8;
    let approx = target.low + (((target.high - target.low) * i32::from(alpha)) >> 8);

    Approximation {
        approx,
        corrected: approx + (approx >> 8),
    }
}
