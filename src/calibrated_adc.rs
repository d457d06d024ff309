use crate::remap::{self, Approximation, CalibratedRange, Error, TargetRange};
use embedded_hal::adc::{Channel, OneShot};

/// Configuration for a [`CalibratedAdc`].
///
/// - `calibrated`: the observed bounds of raw readings from the pin
/// - `target`: the bounds the mapped output should be expressed in
///
/// # Examples
///
/// ```
/// use adc_remapper::{CalibratedRange, Config, TargetRange};
///
/// let config = Config {
///     calibrated: CalibratedRange { low: 900, high: 2800 },
///     target: TargetRange { low: 1000, high: 3000 },
/// };
/// ```
pub struct Config {
    pub calibrated: CalibratedRange,
    pub target: TargetRange,
}

#[derive(Debug)]
pub struct CalibratedAdc<Pin> {
    pin: Pin,
    calibrated: CalibratedRange,
    target: TargetRange,
}

type ReadError<Adc, ADC, Word, Pin> = nb::Error<<Adc as OneShot<ADC, Word, Pin>>::Error>;

impl<Pin> CalibratedAdc<Pin> {
    /// Returns a remapper for `pin` using the provided `config`.
    ///
    /// Fails with [`Error::DivisionByZero`] if `config`'s calibrated range
    /// has zero width, since its span divides every reading.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_remapper::{CalibratedAdc, CalibratedRange, Config, TargetRange};
    /// # use embedded_hal_mock::adc::MockChan0;
    /// #
    /// # let pin = MockChan0 {};
    ///
    /// let config = Config {
    ///     calibrated: CalibratedRange { low: 900, high: 2800 },
    ///     target: TargetRange { low: 1000, high: 3000 },
    /// };
    ///
    /// let remapper = CalibratedAdc::new(pin, config).unwrap();
    /// ```
    pub fn new<ADC>(pin: Pin, config: Config) -> Result<Self, Error>
    where
        Pin: Channel<ADC>,
    {
        if config.calibrated.high == config.calibrated.low {
            return Err(Error::DivisionByZero);
        }

        Ok(Self {
            pin,
            calibrated: config.calibrated,
            target: config.target,
        })
    }

    /// Destroys the remapper and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.pin
    }

    /// Takes a one-shot reading from the pin and maps it into the target
    /// range.
    ///
    /// # Examples
    ///
    /// ```
    /// use adc_remapper::{CalibratedAdc, CalibratedRange, Config, TargetRange};
    /// # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
    /// #
    /// # let expectations: [Transaction<u16>; 1] = [Transaction::read(0, 1500)];
    /// # let mut adc = Mock::new(&expectations);
    /// # let pin = MockChan0 {};
    ///
    /// let config = Config {
    ///     calibrated: CalibratedRange { low: 900, high: 2800 },
    ///     target: TargetRange { low: 1000, high: 3000 },
    /// };
    ///
    /// let mut remapper = CalibratedAdc::new(pin, config).unwrap();
    ///
    /// // A raw reading of 1500 sits 600/1900 of the way through the
    /// // calibrated range, which lands at 1631 in the target range.
    /// assert_eq!(remapper.read(&mut adc), Ok(1631));
    /// ```
    pub fn read<Adc, ADC, Word>(
        &mut self,
        adc: &mut Adc,
    ) -> Result<i32, ReadError<Adc, ADC, Word, Pin>>
    where
        Word: Into<i32>,
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, Word, Pin>,
    {
        let raw = adc.read(&mut self.pin)?;

        Ok(remap::exact(raw.into(), self.calibrated, self.target))
    }

    /// Takes a one-shot reading from the pin and maps it the way the blend
    /// hardware would, returning both the fixed-point result and its
    /// corrected form. See [`map_approximate`](crate::map_approximate).
    pub fn read_approximate<Adc, ADC, Word>(
        &mut self,
        adc: &mut Adc,
    ) -> Result<Approximation, ReadError<Adc, ADC, Word, Pin>>
    where
        Word: Into<i32>,
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, Word, Pin>,
    {
        let raw = adc.read(&mut self.pin)?;

        Ok(remap::approximate(raw.into(), self.calibrated, self.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::{
        adc::{Mock, MockChan0, Transaction},
        common::Generic,
        MockError,
    };
    use std::io::ErrorKind;

    fn config() -> Config {
        Config {
            calibrated: CalibratedRange {
                low: 900,
                high: 2800,
            },
            target: TargetRange {
                low: 1000,
                high: 3000,
            },
        }
    }

    fn remapper(config: Config) -> CalibratedAdc<MockChan0> {
        let pin = MockChan0 {};
        CalibratedAdc::new(pin, config).unwrap()
    }

    fn adc(expectations: &[Transaction<u16>]) -> Generic<Transaction<u16>> {
        Mock::new(expectations)
    }

    #[test]
    fn maps_raw_reading() {
        let mut remapper = remapper(config());
        let mut adc = adc(&[Transaction::read(0, 1500)]);

        assert_eq!(remapper.read(&mut adc), Ok(1631));
    }

    #[test]
    fn maps_boundary_readings() {
        let mut remapper = remapper(config());
        let mut adc = adc(&[Transaction::read(0, 900), Transaction::read(0, 2800)]);

        assert_eq!(remapper.read(&mut adc), Ok(1000));
        assert_eq!(remapper.read(&mut adc), Ok(3000));
    }

    #[test]
    fn approximate_tracks_exact() {
        let mut remapper = remapper(config());
        let mut adc = adc(&[Transaction::read(0, 1500)]);

        assert_eq!(
            remapper.read_approximate(&mut adc),
            Ok(Approximation {
                approx: 1625,
                corrected: 1631,
            })
        );
    }

    #[test]
    fn rejects_zero_width_calibration() {
        let pin = MockChan0 {};
        let config = Config {
            calibrated: CalibratedRange { low: 5, high: 5 },
            target: TargetRange {
                low: 1000,
                high: 3000,
            },
        };

        assert_eq!(
            CalibratedAdc::new(pin, config).err(),
            Some(Error::DivisionByZero)
        );
    }

    #[test]
    fn error() {
        let mut adc =
            adc(&[Transaction::read(0, 0).with_error(MockError::Io(ErrorKind::InvalidData))]);

        assert!(remapper(config()).read(&mut adc).is_err());
    }
}
