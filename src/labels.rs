//! Label assignment for newly created tasks

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::LABEL_PALETTE;
use crate::task::Label;

/// Picks 2 or 3 distinct labels from the [palette](LABEL_PALETTE), in a random order
pub fn pick_labels<R: Rng>(rng: &mut R) -> Vec<Label> {
    let count = rng.gen_range(2..=3);
    LABEL_PALETTE
        .choose_multiple(rng, count)
        .map(|color| Label::new(color))
        .collect()
}

/// Produces the labels of new tasks.
///
/// Seed it to make label assignment reproducible
pub struct LabelPicker {
    rng: StdRng,
}

impl LabelPicker {
    /// A picker seeded from the operating system
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn next_labels(&mut self) -> Vec<Label> {
        pick_labels(&mut self.rng)
    }
}

impl Default for LabelPicker {
    fn default() -> Self {
        Self::new()
    }
}
