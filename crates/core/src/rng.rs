//! RNG module - seeded randomness for dealing boards
//!
//! Provides a small deterministic LCG plus the two operations the deck builder
//! needs: an unbiased Fisher-Yates shuffle and uniform sampling without
//! replacement. Same seed, same boards, which keeps tests reproducible.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits of the LCG output (the low bits of a power-of-two
    /// modulus LCG have short periods) and rejection sampling so every value
    /// in range is equally likely.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        if max <= 1 {
            return 0;
        }
        let max = max as u64;
        let zone = (1u64 << 32) - ((1u64 << 32) % max);
        loop {
            let v = self.next_u32().rotate_left(16) as u64;
            if v < zone {
                return (v % max) as u32;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Draw `count` distinct items from `pool`, uniformly, without replacement.
    ///
    /// Runs a partial Fisher-Yates over an index vector so the pool itself is
    /// never reordered. Returns `None` when the pool is smaller than `count`.
    pub fn sample<T: Clone>(&mut self, pool: &[T], count: usize) -> Option<Vec<T>> {
        if count > pool.len() {
            return None;
        }

        let mut indices: Vec<usize> = (0..pool.len()).collect();
        for i in 0..count {
            let remaining = (indices.len() - i) as u32;
            let j = i + self.next_range(remaining) as usize;
            indices.swap(i, j);
        }

        Some(indices[..count].iter().map(|&i| pool[i].clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..50u32 {
            for _ in 0..20 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::new(99);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_hits_every_position() {
        // Every element should be able to land in every slot.
        let mut rng = SimpleRng::new(2024);
        let mut seen = [[false; 4]; 4];
        for _ in 0..400 {
            let mut items = [0usize, 1, 2, 3];
            rng.shuffle(&mut items);
            for (pos, &v) in items.iter().enumerate() {
                seen[v][pos] = true;
            }
        }
        assert!(seen.iter().all(|row| row.iter().all(|&s| s)));
    }

    #[test]
    fn test_sample_distinct_and_from_pool() {
        let mut rng = SimpleRng::new(3);
        let pool = ["a", "b", "c", "d", "e", "f"];
        let picked = rng.sample(&pool, 4).unwrap();

        assert_eq!(picked.len(), 4);
        for p in &picked {
            assert!(pool.contains(p));
        }
        let mut dedup = picked.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), 4);
    }

    #[test]
    fn test_sample_whole_pool_and_empty() {
        let mut rng = SimpleRng::new(3);
        let pool = [1, 2, 3];
        let mut all = rng.sample(&pool, 3).unwrap();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3]);
        assert_eq!(rng.sample(&pool, 0).unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn test_sample_too_many_is_none() {
        let mut rng = SimpleRng::new(3);
        assert!(rng.sample(&[1, 2], 3).is_none());
    }
}
