use super::ForecastModel;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Half-width of the shock added to every projected difference.
pub const SHOCK_HALF_WIDTH: f64 = 0.05;

/// A simplified ARIMA(1,1,0): an AR(1) on first differences, integrated back onto the
/// last observed level, with a small bounded shock per step.
///
/// The shock stream is seeded from the input values and horizon, so identical inputs
/// always produce identical output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Autoregressive;

impl Autoregressive {
    /// Lag-one autoregression coefficient of `diffs`; `0` when it cannot be estimated.
    pub fn phi(diffs: &[f64]) -> f64 {
        if diffs.len() < 2 {
            return 0.0;
        }
        let (num, den) = diffs
            .windows(2)
            .fold((0.0, 0.0), |(num, den), w| (num + w[1] * w[0], den + w[0] * w[0]));
        if den != 0.0 { num / den } else { 0.0 }
    }
}

impl ForecastModel for Autoregressive {
    fn project(&self, values: &[f64], periods: usize) -> Vec<f64> {
        let Some(&last) = values.last() else {
            return Vec::new();
        };
        let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        let phi = Self::phi(&diffs);

        let mut rng = ChaCha8Rng::seed_from_u64(shock_seed(values, periods));
        let mut level = last;
        let mut diff = diffs.last().copied().unwrap_or(0.0);

        (0..periods)
            .map(|_| {
                let shock = rng.gen_range(-SHOCK_HALF_WIDTH..SHOCK_HALF_WIDTH);
                diff = phi * diff + shock;
                level += diff;
                level
            })
            .collect()
    }
}

fn shock_seed(values: &[f64], periods: usize) -> u64 {
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let start = 0xcbf2_9ce4_8422_2325_u64;
    values
        .iter()
        .map(|v| v.to_bits())
        .chain(std::iter::once(periods as u64))
        .flat_map(u64::to_le_bytes)
        .fold(start, |h, b| (h ^ u64::from(b)).wrapping_mul(PRIME))
}
