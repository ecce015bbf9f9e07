//! The roll-number pool and the spin-the-wheel draw.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SpotlightError;

/// Outcome of a successful draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    /// The selected roll number.
    pub roll: u32,
    /// Candidates flashed by the spin animation, from the same snapshot as `roll`.
    pub preview: Vec<u32>,
    /// Rolls still available after this draw.
    pub remaining: usize,
}

/// Roll numbers `1..=roster_size` and the set already drawn.
#[derive(Debug, Clone)]
pub struct RollPool {
    roster_size: u32,
    used: BTreeSet<u32>,
}

impl RollPool {
    pub fn new(roster_size: u32) -> Self {
        Self {
            roster_size,
            used: BTreeSet::new(),
        }
    }

    pub fn roster_size(&self) -> u32 {
        self.roster_size
    }

    /// Rolls drawn since the last reset, in ascending order.
    pub fn used(&self) -> impl Iterator<Item = u32> + '_ {
        self.used.iter().copied()
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Rolls not yet drawn, in ascending order.
    pub fn available(&self) -> Vec<u32> {
        (1..=self.roster_size)
            .filter(|r| !self.used.contains(r))
            .collect()
    }

    pub fn is_exhausted(&self) -> bool {
        self.used.len() >= self.roster_size as usize
    }

    /// Draw an unused roll uniformly at random.
    ///
    /// The available set is computed once; the preview frames and the final
    /// pick both sample from that snapshot. The final pick is independent of
    /// the preview.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        preview_frames: usize,
    ) -> Result<Draw, SpotlightError> {
        let available = self.available();
        if available.is_empty() {
            return Err(SpotlightError::ExhaustedPool {
                roster_size: self.roster_size,
            });
        }

        let preview: Vec<u32> = (0..preview_frames)
            .filter_map(|_| available.choose(rng).copied())
            .collect();

        let Some(&roll) = available.choose(rng) else {
            return Err(SpotlightError::ExhaustedPool {
                roster_size: self.roster_size,
            });
        };
        self.used.insert(roll);

        Ok(Draw {
            roll,
            preview,
            remaining: available.len() - 1,
        })
    }

    /// Forget every drawn roll.
    pub fn reset(&mut self) {
        self.used.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn exhausts_after_roster_size_draws() {
        for n in 1..=10 {
            let mut rng = StdRng::seed_from_u64(u64::from(n));
            let mut pool = RollPool::new(n);
            for _ in 0..n {
                pool.draw(&mut rng, 0).unwrap();
            }
            assert!(pool.is_exhausted());
            assert!(matches!(
                pool.draw(&mut rng, 0),
                Err(SpotlightError::ExhaustedPool { roster_size }) if roster_size == n
            ));
        }
    }

    #[test]
    fn never_repeats_until_reset() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = RollPool::new(62);
        let mut seen = BTreeSet::new();
        for _ in 0..62 {
            let draw = pool.draw(&mut rng, 3).unwrap();
            assert!(seen.insert(draw.roll), "roll {} drawn twice", draw.roll);
            assert!((1..=62).contains(&draw.roll));
        }
        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn last_candidate_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = RollPool::new(3);
        pool.used.insert(2);
        pool.used.insert(1);
        let draw = pool.draw(&mut rng, 12).unwrap();
        assert_eq!(draw.roll, 3);
        assert_eq!(draw.remaining, 0);
        assert!(draw.preview.iter().all(|r| *r == 3));
    }

    #[test]
    fn preview_comes_from_available_snapshot() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pool = RollPool::new(20);
        for _ in 0..15 {
            pool.draw(&mut rng, 0).unwrap();
        }
        let before: BTreeSet<u32> = pool.available().into_iter().collect();
        let draw = pool.draw(&mut rng, 12).unwrap();
        assert_eq!(draw.preview.len(), 12);
        assert!(draw.preview.iter().all(|r| before.contains(r)));
        assert!(before.contains(&draw.roll));
    }

    #[test]
    fn reset_makes_every_roll_available_again() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = RollPool::new(4);
        for _ in 0..4 {
            pool.draw(&mut rng, 0).unwrap();
        }
        pool.reset();
        assert_eq!(pool.used_count(), 0);
        assert_eq!(pool.available(), vec![1, 2, 3, 4]);

        // Over enough reset cycles every roll shows up as the first draw.
        let mut firsts = BTreeSet::new();
        for _ in 0..200 {
            pool.reset();
            firsts.insert(pool.draw(&mut rng, 0).unwrap().roll);
        }
        assert_eq!(firsts, (1..=4).collect());
    }

    #[test]
    fn exhausted_draw_does_not_mutate() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut pool = RollPool::new(1);
        pool.draw(&mut rng, 0).unwrap();
        let _ = pool.draw(&mut rng, 0);
        assert_eq!(pool.used().collect::<Vec<_>>(), vec![1]);
    }
}
