//! Seedable random-number streams.
//!
//! Reproducing a run bit for bit requires the exact generator as well as the exact transforms applied to its output,
//! so both are pinned here rather than delegated to whatever `rand` considers the current default. [`LegacyRandom`] is
//! a 48-bit linear congruential generator with the constants, output bits and Gaussian transform of the generator the
//! station model was first calibrated with; the same seed yields the same sequence as that generator.
//!
//! [`LegacyRandom`] also implements [`RngCore`] and [`SeedableRng`], so any `rand` distribution can draw from it.

use super::StationModel;

use rand::{RngCore, SeedableRng};

const MULTIPLIER: i64 = 0x5_DEEC_E66D;
const ADDEND: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// 48-bit linear congruential generator.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyRandom {
    state: i64,
    /// Second variate of the last polar-method pair, handed out by the next call to [`next_gaussian()`].
    ///
    /// [`next_gaussian()`]: LegacyRandom::next_gaussian
    spare_gaussian: Option<f64>,
}

impl LegacyRandom {
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed ^ MULTIPLIER) & MASK,
            spare_gaussian: None,
        }
    }

    /// Advance the state and return its top `bits` bits, truncated to a signed 32-bit value.
    fn next(&mut self, bits: u32) -> i32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.state >> (48 - bits)) as i32
    }

    /// Uniform draw on `[0, 1)` with 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        let high = i64::from(self.next(26)) << 27;
        let low = i64::from(self.next(27));
        (high + low) as f64 * DOUBLE_UNIT
    }

    /// Standard normal draw using the Marsaglia polar method. Each accepted pair yields two variates; the second is
    /// returned by the following call.
    pub fn next_gaussian(&mut self) -> f64 {
        if let Some(spare) = self.spare_gaussian.take() {
            return spare;
        }

        loop {
            let v1 = 2.0 * self.next_f64() - 1.0;
            let v2 = 2.0 * self.next_f64() - 1.0;
            let s = v1 * v1 + v2 * v2;
            if s < 1.0 && s != 0.0 {
                let multiplier = (-2.0 * s.ln() / s).sqrt();
                self.spare_gaussian = Some(v2 * multiplier);
                return v1 * multiplier;
            }
        }
    }
}

impl RngCore for LegacyRandom {
    fn next_u32(&mut self) -> u32 {
        self.next(32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = i64::from(self.next(32)) << 32;
        let low = i64::from(self.next(32));
        high.wrapping_add(low) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next(32).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for LegacyRandom {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as i64)
    }
}

/// One seed per stream, in the order they are read from the setup input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeds {
    pub arrival: i64,
    pub demand: i64,
    pub balking: i64,
    pub service: i64,
}

/// The four independent streams that drive a run.
///
/// Each stream is advanced only by its own sampling method, so changing how often one of them is drawn (say, by adding
/// a pump and so changing when balking is considered) leaves the others untouched.
#[derive(Debug, Clone)]
pub struct Streams {
    arrival: LegacyRandom,
    demand: LegacyRandom,
    balking: LegacyRandom,
    service: LegacyRandom,
}

impl Streams {
    pub fn new(seeds: Seeds) -> Self {
        Self {
            arrival: LegacyRandom::new(seeds.arrival),
            demand: LegacyRandom::new(seeds.demand),
            balking: LegacyRandom::new(seeds.balking),
            service: LegacyRandom::new(seeds.service),
        }
    }

    /// Exponential gap until the next arrival, by inversion.
    pub fn interarrival_time(&mut self, model: &StationModel) -> f64 {
        -model.mean_interarrival * self.arrival.next_f64().ln()
    }

    /// Litres wanted by a new customer, uniform on `[min_demand, min_demand + demand_range)`.
    pub fn demand(&mut self, model: &StationModel) -> f64 {
        model.min_demand + self.demand.next_f64() * model.demand_range
    }

    /// Uniform draw compared against the probability of not balking.
    pub fn balking_draw(&mut self) -> f64 {
        self.balking.next_f64()
    }

    /// Normal service time for a customer wanting `demand` litres. May be negative in the far lower tail.
    pub fn service_time(&mut self, model: &StationModel, demand: f64) -> f64 {
        model.mean_service_time(demand) + model.service_spread * self.service.next_gaussian()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand_distr::{Distribution, Exp};

    #[test]
    fn integer_sequence_matches_reference() {
        let mut rng = LegacyRandom::new(42);
        assert_eq!(-1_170_105_035, rng.next_u32() as i32);
        assert_eq!(234_785_527, rng.next_u32() as i32);
    }

    #[test]
    fn uniform_sequence_matches_reference() {
        let mut rng = LegacyRandom::new(42);
        assert_eq!(0.7275636800328681, rng.next_f64());
        assert_eq!(0.6832234717598454, rng.next_f64());
    }

    #[test]
    fn gaussian_pairs_match_reference() {
        let mut rng = LegacyRandom::new(42);
        let first = rng.next_gaussian();
        let second = rng.next_gaussian();
        assert!((first - 1.1419053154730547).abs() < 1e-12, "unexpected first variate {first}");
        assert!((second - 0.919407948982788).abs() < 1e-12, "unexpected spare variate {second}");

        let mut zero = LegacyRandom::new(0);
        assert!((zero.next_gaussian() - 0.8025330637390305).abs() < 1e-12);
    }

    #[test]
    fn gaussian_moments_are_standard() {
        let mut rng = LegacyRandom::new(2718);
        let n = 200_000;
        let draws: Vec<f64> = (0..n).map(|_| rng.next_gaussian()).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let variance = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert!(mean.abs() < 0.01, "mean {mean} too far from 0");
        assert!((variance - 1.0).abs() < 0.02, "variance {variance} too far from 1");
    }

    #[test]
    fn seeding_through_rand_matches_direct_construction() {
        let mut direct = LegacyRandom::new(-7);
        let mut seeded = LegacyRandom::seed_from_u64(-7_i64 as u64);
        assert_eq!(direct, seeded);
        assert_eq!(direct.next_u64(), seeded.next_u64());

        let mut from_bytes = LegacyRandom::from_seed((-7_i64).to_le_bytes());
        let mut fresh = LegacyRandom::new(-7);
        let mut bytes = [0u8; 6];
        from_bytes.fill_bytes(&mut bytes);
        assert_eq!(fresh.next_u32().to_le_bytes()[..], bytes[..4]);
        assert_eq!(fresh.next_u32().to_le_bytes()[..2], bytes[4..]);
    }

    #[test]
    fn drives_rand_distributions() {
        let mut rng = LegacyRandom::new(99);
        let exp = Exp::new(1.0 / 50.0).unwrap();
        let n = 50_000;
        let mean = (0..n).map(|_| exp.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 50.0).abs() < 1.5, "exponential mean {mean} too far from 50");
        let roll: u32 = rng.random_range(1..=6);
        assert!((1..=6).contains(&roll));
    }

    #[test]
    fn streams_advance_independently() {
        let seeds = Seeds {
            arrival: 1,
            demand: 2,
            balking: 3,
            service: 4,
        };
        let model = StationModel::default();
        let mut busy = Streams::new(seeds);
        let mut quiet = Streams::new(seeds);

        for _ in 0..25 {
            busy.balking_draw();
            busy.service_time(&model, 30.0);
        }
        assert_eq!(quiet.demand(&model), busy.demand(&model));
        assert_eq!(quiet.interarrival_time(&model), busy.interarrival_time(&model));
    }

    #[test]
    fn demand_stays_in_range() {
        let model = StationModel::default();
        let mut streams = Streams::new(Seeds {
            arrival: 5,
            demand: 6,
            balking: 7,
            service: 8,
        });
        for _ in 0..10_000 {
            let litres = streams.demand(&model);
            assert!(litres >= model.min_demand && litres < model.min_demand + model.demand_range);
        }
    }
}
