use crate::generator::config::DrawRange;
use crate::generator::hash::hash;

/// One `sin`-based draw in `[min, max]`, advancing `seed` by one.
///
/// Not a statistically sound PRNG. The formula is kept exactly so that the
/// same seed reproduces the same stream everywhere.
pub fn seeded_random(seed: &mut i64, min: i64, max: i64) -> i64 {
    debug_assert!(min <= max, "empty draw range {}..={}", min, max);
    let x = (*seed as f64).sin() * 10000.0;
    *seed += 1;
    let frac = x - x.floor();
    (frac * (max - min + 1) as f64).floor() as i64 + min
}

/// Seed cursor owned by a single generation call.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: i64,
}

impl SeededRandom {
    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    pub fn from_identifier(identifier: &str) -> Self {
        Self::new(hash(identifier) as i64)
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn next_in(&mut self, min: i64, max: i64) -> i64 {
        seeded_random(&mut self.seed, min, max)
    }

    pub fn draw(&mut self, range: DrawRange) -> i64 {
        self.next_in(range.min, range.max)
    }

    /// Draw in tenths: `12..=18` yields 1.2 to 1.8.
    pub fn draw_factor(&mut self, range: DrawRange) -> f64 {
        self.draw(range) as f64 / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_zero_draws_minimum() {
        // sin(0) == 0, so the fractional part is zero.
        let mut seed = 0;
        assert_eq!(seeded_random(&mut seed, 8000, 15000), 8000);
        assert_eq!(seed, 1);
    }

    #[test]
    fn test_stream_is_reproducible() {
        let mut a = SeededRandom::from_identifier("4111111111111111");
        let mut b = SeededRandom::from_identifier("4111111111111111");
        let first: Vec<i64> = (0..50).map(|_| a.next_in(0, 1000)).collect();
        let second: Vec<i64> = (0..50).map(|_| b.next_in(0, 1000)).collect();
        assert_eq!(first, second);
        assert_eq!(a.seed(), 1537796765 + 50);
    }

    #[test]
    fn test_draws_stay_in_range() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..2000 {
            let v = rng.next_in(12, 18);
            assert!((12..=18).contains(&v));
        }
        assert_eq!(rng.next_in(5, 5), 5);
    }

    #[test]
    fn test_draw_factor_scales_by_tenths() {
        let mut rng = SeededRandom::new(0);
        assert_eq!(rng.draw_factor(DrawRange::new(12, 18)), 1.2);
    }
}
