//! Distance-banded speed tables.
//!
//! ACP rules give a minimum and a maximum average speed for each distance
//! range. The time allowed to reach a control is accumulated band by band:
//! every kilometre inside a band costs `1 / rate` hours.

use super::error::AcpError;

/// Highest control distance any table covers.
pub const MAX_CONTROL_KM: f64 = 1300.0;

/// One contiguous range of the table, `(lower_km, upper_km]`, ridden at
/// `rate_kmh`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBand {
    pub lower_km: f64,
    pub upper_km: f64,
    pub rate_kmh: f64,
}

impl SpeedBand {
    const fn new(lower_km: f64, upper_km: f64, rate_kmh: f64) -> Self {
        Self {
            lower_km,
            upper_km,
            rate_kmh,
        }
    }

    /// Kilometres of this band that lie below `distance_km`.
    fn covered_km(&self, distance_km: f64) -> f64 {
        (distance_km.min(self.upper_km) - self.lower_km).max(0.0)
    }
}

/// An ordered, gap-free set of speed bands starting at 0 km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedTable {
    bands: &'static [SpeedBand],
}

/// Maximum speeds, used for opening times.
pub const OPENING_SPEEDS: SpeedTable = SpeedTable {
    bands: &[
        SpeedBand::new(0.0, 200.0, 34.0),
        SpeedBand::new(200.0, 400.0, 32.0),
        SpeedBand::new(400.0, 600.0, 30.0),
        SpeedBand::new(600.0, 1000.0, 28.0),
        SpeedBand::new(1000.0, 1300.0, 26.0),
    ],
};

/// Minimum speeds, used for closing times.
pub const CLOSING_SPEEDS: SpeedTable = SpeedTable {
    bands: &[
        SpeedBand::new(0.0, 600.0, 15.0),
        SpeedBand::new(600.0, 1000.0, 11.428),
        SpeedBand::new(1000.0, 1300.0, 13.333),
    ],
};

impl SpeedTable {
    /// The bands of this table, lowest first.
    pub fn bands(&self) -> &'static [SpeedBand] {
        self.bands
    }

    /// Upper bound of the last band.
    pub fn ceiling_km(&self) -> f64 {
        self.bands.last().map_or(0.0, |b| b.upper_km)
    }

    /// Hours needed to cover `distance_km` at the table's rates.
    ///
    /// # Examples
    ///
    /// ```
    /// use brevet_server::acp::OPENING_SPEEDS;
    ///
    /// let hours = OPENING_SPEEDS.elapsed_hours(68.0).unwrap();
    /// assert_eq!(hours, 2.0);
    ///
    /// assert!(OPENING_SPEEDS.elapsed_hours(1300.5).is_err());
    /// ```
    pub fn elapsed_hours(&self, distance_km: f64) -> Result<f64, AcpError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(AcpError::InvalidDistance(distance_km));
        }
        if distance_km > self.ceiling_km() {
            return Err(AcpError::OutOfRange(distance_km));
        }

        let hours: f64 = self
            .bands
            .iter()
            .map(|band| (band.covered_km(distance_km), band.rate_kmh))
            .take_while(|&(covered, _)| covered > 0.0)
            .map(|(covered, rate)| covered / rate)
            .sum();

        Ok(hours)
    }
}
