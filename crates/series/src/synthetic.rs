use crate::error::SeriesError;
use crate::SeriesProvider;
use catalog::{IndicatorCatalog, SeriesProfile};
use chrono::NaiveDate;
use core_types::{round2, Frequency, IndicatorId, Observation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;
use std::sync::Arc;
use tracing::debug;

const SEASONAL_PERIOD: f64 = 12.0;
const CYCLICAL_PERIOD: f64 = 48.0;

/// Where the noise term of a synthetic series comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoisePolicy {
    /// Noise derived from the request itself: the same indicator, length and end
    /// date always produce the same series.
    Seeded { seed: u64 },
    /// Fresh OS entropy on every call.
    Entropy,
}

impl Default for NoisePolicy {
    fn default() -> Self {
        NoisePolicy::Seeded { seed: 0 }
    }
}

/// Generates a plausible monthly/quarterly history for an indicator from its
/// catalog profile: drift + seasonal wave + business-cycle wave + bounded noise.
#[derive(Debug, Clone)]
pub struct SyntheticSeriesProvider {
    catalog: Arc<IndicatorCatalog>,
    policy: NoisePolicy,
}

impl SyntheticSeriesProvider {
    pub fn new(catalog: Arc<IndicatorCatalog>, policy: NoisePolicy) -> Self {
        Self { catalog, policy }
    }

    fn build<R: Rng>(
        rng: &mut R,
        id: IndicatorId,
        frequency: Frequency,
        profile: &SeriesProfile,
        periods: usize,
        end_date: NaiveDate,
    ) -> Result<Vec<Observation>, SeriesError> {
        let mut series = Vec::with_capacity(periods);
        // Oldest first; `steps_back` counts periods from the anchor.
        for steps_back in (0..periods).rev() {
            let offset = i64::try_from(steps_back).map_err(|_| SeriesError::DateOutOfRange {
                indicator: id.to_string(),
                steps: steps_back,
            })?;
            let date = frequency
                .shift(end_date, -offset)
                .ok_or_else(|| SeriesError::DateOutOfRange {
                    indicator: id.to_string(),
                    steps: steps_back,
                })?;

            let k = steps_back as f64;
            let trend = profile.base_value + profile.drift_per_period * (periods as f64 - k);
            let seasonal = profile.seasonal_amplitude * (2.0 * PI * k / SEASONAL_PERIOD).sin();
            let cyclical = profile.cyclical_amplitude * (2.0 * PI * k / CYCLICAL_PERIOD).sin();
            let noise = (rng.gen_range(0.0..1.0) - 0.5) * profile.noise_amplitude;

            series.push(Observation::new(date, round2(trend + seasonal + cyclical + noise), id));
        }
        Ok(series)
    }
}

impl SeriesProvider for SyntheticSeriesProvider {
    fn generate(
        &self,
        indicator: IndicatorId,
        periods: usize,
        end_date: NaiveDate,
    ) -> Result<Vec<Observation>, SeriesError> {
        let entry = self.catalog.get(indicator)?;
        let frequency = entry.indicator.frequency;

        debug!(
            indicator = %indicator,
            periods,
            %end_date,
            policy = ?self.policy,
            "Generating synthetic series"
        );

        match self.policy {
            NoisePolicy::Seeded { seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(request_seed(seed, indicator, periods, end_date));
                Self::build(&mut rng, indicator, frequency, &entry.profile, periods, end_date)
            }
            NoisePolicy::Entropy => {
                let mut rng = rand::thread_rng();
                Self::build(&mut rng, indicator, frequency, &entry.profile, periods, end_date)
            }
        }
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(hash: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(hash, |h, b| (h ^ u64::from(*b)).wrapping_mul(FNV_PRIME))
}

/// FNV-1a over the request coordinates, mixed with the provider seed.
fn request_seed(seed: u64, indicator: IndicatorId, periods: usize, end_date: NaiveDate) -> u64 {
    let mut hash = fnv1a(FNV_OFFSET, indicator.as_str().as_bytes());
    hash = fnv1a(hash, &(periods as u64).to_le_bytes());
    hash = fnv1a(hash, end_date.format("%Y-%m-%d").to_string().as_bytes());
    hash ^ seed.rotate_left(32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(policy: NoisePolicy) -> SyntheticSeriesProvider {
        SyntheticSeriesProvider::new(Arc::new(IndicatorCatalog::builtin()), policy)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_series_is_anchored_and_stepped_by_frequency() {
        let p = provider(NoisePolicy::default());
        let end = date(2024, 6, 30);

        let cpi = p.generate(IndicatorId::Cpi, 24, end).unwrap();
        assert_eq!(cpi.len(), 24);
        assert_eq!(cpi.last().unwrap().date, end);
        assert_eq!(cpi[22].date, date(2024, 5, 30));
        assert_eq!(cpi[0].date, date(2022, 7, 30));
        assert!(cpi.windows(2).all(|w| w[0].date < w[1].date));
        assert!(cpi.iter().all(|o| o.indicator == IndicatorId::Cpi));

        let gdp = p.generate(IndicatorId::Gdp, 8, end).unwrap();
        assert_eq!(gdp[6].date, date(2024, 3, 30));
        assert_eq!(gdp[0].date, date(2022, 9, 30));
    }

    #[test]
    fn test_values_stay_inside_the_profile_envelope() {
        let p = provider(NoisePolicy::Entropy);
        let periods = 60;
        let series = p.generate(IndicatorId::InterestRate, periods, date(2024, 1, 1)).unwrap();
        for (pos, obs) in series.iter().enumerate() {
            let k = (periods - 1 - pos) as f64;
            let centre = 5.25 + 0.005 * (periods as f64 - k);
            // seasonal 0.1 + cyclical 0.2 + noise 0.15 + rounding
            assert!((obs.value - centre).abs() <= 0.455, "{} vs {}", obs.value, centre);
            assert_eq!(round2(obs.value), obs.value);
        }
    }

    #[test]
    fn test_seeded_policy_is_reproducible() {
        let p = provider(NoisePolicy::Seeded { seed: 7 });
        let end = date(2024, 3, 31);
        let a = p.generate(IndicatorId::Unemployment, 36, end).unwrap();
        let b = p.generate(IndicatorId::Unemployment, 36, end).unwrap();
        assert_eq!(a, b);

        let other_seed = provider(NoisePolicy::Seeded { seed: 8 })
            .generate(IndicatorId::Unemployment, 36, end)
            .unwrap();
        assert_ne!(a, other_seed);
    }

    #[test]
    fn test_zero_periods_yields_empty_series() {
        let p = provider(NoisePolicy::default());
        assert!(p.generate(IndicatorId::Gdp, 0, date(2024, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_indicator_is_reported() {
        let catalog = IndicatorCatalog::new(vec![]).unwrap();
        let p = SyntheticSeriesProvider::new(Arc::new(catalog), NoisePolicy::default());
        assert_eq!(
            p.generate(IndicatorId::Cpi, 3, date(2024, 1, 1)).unwrap_err(),
            SeriesError::IndicatorNotFound("cpi".to_string())
        );
    }

    #[test]
    fn test_request_seed_depends_on_every_coordinate() {
        let d = date(2024, 1, 1);
        let base = request_seed(0, IndicatorId::Cpi, 12, d);
        assert_ne!(base, request_seed(0, IndicatorId::Gdp, 12, d));
        assert_ne!(base, request_seed(0, IndicatorId::Cpi, 13, d));
        assert_ne!(base, request_seed(0, IndicatorId::Cpi, 12, date(2024, 1, 2)));
        assert_ne!(base, request_seed(1, IndicatorId::Cpi, 12, d));
    }
}
