//! Size-band price matrix.
//!
//! Widths and heights are bucketed into half-open bands `[min, max)`; the
//! pair of band indices selects a cell in a two-dimensional price table.
//! Values are never clamped or rounded: a value outside every band is an
//! error, and a fractional value falls into whichever band contains it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Dimension, PricingError};

/// A half-open interval `[min, max)` on one dimension, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBand {
    pub min: Decimal,
    pub max: Decimal,
}

impl SizeBand {
    #[must_use]
    pub fn contains(&self, value: Decimal) -> bool {
        self.min <= value && value < self.max
    }
}

/// Base prices indexed by `prices[width_band][height_band]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBandMatrix {
    pub width_bands: Vec<SizeBand>,
    pub height_bands: Vec<SizeBand>,
    pub prices: Vec<Vec<Decimal>>,
}

/// A resolved matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandLookup {
    pub width_band: usize,
    pub height_band: usize,
    pub price: Decimal,
}

impl PriceBandMatrix {
    /// Looks up the base price for a width/height pair.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::OutOfRange`] when either dimension is not
    /// covered by a band and [`PricingError::Misconfigured`] when the
    /// matching cell is missing.
    pub fn lookup_base_price(
        &self,
        width_mm: Decimal,
        height_mm: Decimal,
    ) -> Result<Decimal, PricingError> {
        self.lookup(width_mm, height_mm).map(|cell| cell.price)
    }

    /// Like [`Self::lookup_base_price`] but also reports the band indices.
    ///
    /// # Errors
    ///
    /// See [`Self::lookup_base_price`].
    pub fn lookup(&self, width_mm: Decimal, height_mm: Decimal) -> Result<BandLookup, PricingError> {
        let width_band = band_index(&self.width_bands, Dimension::Width, width_mm)?;
        let height_band = band_index(&self.height_bands, Dimension::Height, height_mm)?;

        let price = self
            .prices
            .get(width_band)
            .and_then(|row| row.get(height_band))
            .copied()
            .ok_or(PricingError::Misconfigured {
                width_band,
                height_band,
            })?;

        Ok(BandLookup {
            width_band,
            height_band,
            price,
        })
    }

    /// The `[min, max)` domain covered by a dimension's bands.
    #[must_use]
    pub fn domain(&self, dimension: Dimension) -> Option<(Decimal, Decimal)> {
        let bands = match dimension {
            Dimension::Width => &self.width_bands,
            Dimension::Height => &self.height_bands,
        };
        Some((bands.first()?.min, bands.last()?.max))
    }

    /// Lowest price in the table, used as the "from" figure on listings.
    #[must_use]
    pub fn min_price(&self) -> Option<Decimal> {
        self.prices.iter().flatten().copied().min()
    }

    /// Checks the structural invariants of the matrix.
    ///
    /// Bands must be non-empty, each with `min < max`, and contiguous so that
    /// every value in the domain maps to exactly one band. The table must
    /// have one row per width band and one cell per height band.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::DataIntegrity`] for band problems and
    /// [`PricingError::Misconfigured`] for the first missing cell.
    pub fn validate(&self) -> Result<(), PricingError> {
        validate_bands(&self.width_bands, Dimension::Width)?;
        validate_bands(&self.height_bands, Dimension::Height)?;

        if self.prices.len() > self.width_bands.len() {
            return Err(PricingError::DataIntegrity(format!(
                "price matrix has {} rows but only {} width bands",
                self.prices.len(),
                self.width_bands.len()
            )));
        }

        for width_band in 0..self.width_bands.len() {
            let row_len = self.prices.get(width_band).map_or(0, Vec::len);
            if row_len > self.height_bands.len() {
                return Err(PricingError::DataIntegrity(format!(
                    "price matrix row {width_band} has {row_len} cells but only {} height bands",
                    self.height_bands.len()
                )));
            }
            if row_len < self.height_bands.len() {
                return Err(PricingError::Misconfigured {
                    width_band,
                    height_band: row_len,
                });
            }
        }

        Ok(())
    }
}

fn band_index(bands: &[SizeBand], dimension: Dimension, value: Decimal) -> Result<usize, PricingError> {
    bands
        .iter()
        .position(|band| band.contains(value))
        .ok_or_else(|| {
            let (min, max) = match (bands.first(), bands.last()) {
                (Some(first), Some(last)) => (first.min, last.max),
                _ => (Decimal::ZERO, Decimal::ZERO),
            };
            PricingError::OutOfRange {
                dimension,
                value,
                min,
                max,
            }
        })
}

fn validate_bands(bands: &[SizeBand], dimension: Dimension) -> Result<(), PricingError> {
    if bands.is_empty() {
        return Err(PricingError::DataIntegrity(format!(
            "no {dimension} bands defined"
        )));
    }

    for (idx, band) in bands.iter().enumerate() {
        if band.min < Decimal::ZERO || band.min >= band.max {
            return Err(PricingError::DataIntegrity(format!(
                "{dimension} band {idx} [{}, {}) is empty or negative",
                band.min, band.max
            )));
        }
    }

    for (idx, pair) in bands.windows(2).enumerate() {
        if pair[0].max != pair[1].min {
            let problem = if pair[0].max > pair[1].min {
                "overlap"
            } else {
                "leave a gap"
            };
            return Err(PricingError::DataIntegrity(format!(
                "{dimension} bands {idx} and {} {problem} ({} vs {})",
                idx + 1,
                pair[0].max,
                pair[1].min
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(min: i64, max: i64) -> SizeBand {
        SizeBand {
            min: Decimal::from(min),
            max: Decimal::from(max),
        }
    }

    fn prices(rows: &[&[i64]]) -> Vec<Vec<Decimal>> {
        rows.iter()
            .map(|row| row.iter().copied().map(Decimal::from).collect())
            .collect()
    }

    fn sample_matrix() -> PriceBandMatrix {
        PriceBandMatrix {
            width_bands: vec![band(300, 600), band(600, 900)],
            height_bands: vec![band(400, 800), band(800, 1200)],
            prices: prices(&[&[120, 150], &[140, 175]]),
        }
    }

    #[test]
    fn lookup_uses_width_row_and_height_column() {
        let matrix = sample_matrix();
        let cell = matrix
            .lookup(Decimal::from(600), Decimal::from(799))
            .expect("in range");
        assert_eq!((cell.width_band, cell.height_band), (1, 0));
        assert_eq!(cell.price, Decimal::from(140));
    }

    #[test]
    fn upper_bound_belongs_to_next_band() {
        let matrix = sample_matrix();
        let below = matrix
            .lookup_base_price(Decimal::from(300), Decimal::from(799))
            .expect("in range");
        let at = matrix
            .lookup_base_price(Decimal::from(300), Decimal::from(800))
            .expect("in range");
        assert_eq!(below, Decimal::from(120));
        assert_eq!(at, Decimal::from(150));
    }

    #[test]
    fn fractional_values_are_not_rounded_up() {
        let matrix = sample_matrix();
        // 599.9 rounds to 600 but must stay in band 0.
        let price = matrix
            .lookup_base_price(Decimal::new(5999, 1), Decimal::from(400))
            .expect("in range");
        assert_eq!(price, Decimal::from(120));
    }

    #[test]
    fn below_minimum_is_out_of_range() {
        let err = sample_matrix()
            .lookup_base_price(Decimal::from(299), Decimal::from(500))
            .unwrap_err();
        assert!(
            matches!(err, PricingError::OutOfRange { dimension: Dimension::Width, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn at_maximum_is_out_of_range() {
        let err = sample_matrix()
            .lookup_base_price(Decimal::from(500), Decimal::from(1200))
            .unwrap_err();
        assert!(
            matches!(err, PricingError::OutOfRange { dimension: Dimension::Height, max, .. } if max == Decimal::from(1200)),
            "got {err:?}"
        );
    }

    #[test]
    fn missing_cell_is_misconfigured() {
        let mut matrix = sample_matrix();
        matrix.prices[1].pop();
        let err = matrix
            .lookup_base_price(Decimal::from(700), Decimal::from(900))
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::Misconfigured {
                width_band: 1,
                height_band: 1
            }
        );
        assert_eq!(matrix.validate().unwrap_err(), err);
    }

    #[test]
    fn lookup_is_deterministic_across_domain() {
        let matrix = sample_matrix();
        for width in (300..900).step_by(37) {
            for height in (400..1200).step_by(53) {
                let w = Decimal::from(width);
                let h = Decimal::from(height);
                let first = matrix.lookup_base_price(w, h).expect("covered");
                let second = matrix.lookup_base_price(w, h).expect("covered");
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn validate_accepts_contiguous_bands() {
        assert!(sample_matrix().validate().is_ok());
    }

    #[test]
    fn validate_rejects_gap_between_bands() {
        let mut matrix = sample_matrix();
        matrix.width_bands[1] = band(650, 900);
        let err = matrix.validate().unwrap_err();
        assert!(err.to_string().contains("leave a gap"), "got {err}");
    }

    #[test]
    fn validate_rejects_overlapping_bands() {
        let mut matrix = sample_matrix();
        matrix.height_bands[1] = band(700, 1200);
        let err = matrix.validate().unwrap_err();
        assert!(err.to_string().contains("overlap"), "got {err}");
    }

    #[test]
    fn validate_rejects_inverted_band() {
        let mut matrix = sample_matrix();
        matrix.width_bands = vec![band(600, 300)];
        matrix.prices = prices(&[&[120, 150]]);
        assert!(matches!(
            matrix.validate(),
            Err(PricingError::DataIntegrity(_))
        ));
    }

    #[test]
    fn validate_rejects_extra_rows() {
        let mut matrix = sample_matrix();
        matrix.prices.push(vec![Decimal::from(1), Decimal::from(2)]);
        assert!(matches!(
            matrix.validate(),
            Err(PricingError::DataIntegrity(_))
        ));
    }

    #[test]
    fn domain_and_min_price() {
        let matrix = sample_matrix();
        assert_eq!(
            matrix.domain(Dimension::Width),
            Some((Decimal::from(300), Decimal::from(900)))
        );
        assert_eq!(matrix.min_price(), Some(Decimal::from(120)));
    }
}
