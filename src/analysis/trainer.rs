use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::model::TrainingMetrics;

/// Advances a model one epoch at a time.
pub trait Trainer {
    /// Run one epoch and report its metrics. Returns `None` once finished.
    fn step(&mut self) -> Option<TrainingMetrics>;
    fn is_finished(&self) -> bool;
    /// Fraction of epochs completed, in `[0, 1]`.
    fn progress(&self) -> f32;
    fn reset(&mut self);
}

/// Placeholder GAN trainer producing decaying, noisy loss curves.
pub struct MockGanTrainer {
    seed: u64,
    epochs: usize,
    epoch: usize,
    rng: StdRng,
}

impl MockGanTrainer {
    pub fn new(seed: u64, epochs: usize) -> Self {
        Self {
            seed,
            epochs,
            epoch: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    fn noise(&mut self, amplitude: f64) -> f64 {
        self.rng.gen_range(-amplitude..=amplitude)
    }
}

impl Trainer for MockGanTrainer {
    fn step(&mut self) -> Option<TrainingMetrics> {
        if self.is_finished() {
            return None;
        }
        self.epoch += 1;
        let t = self.epoch as f64;
        let generator_loss = (2.0 * (-t / 30.0).exp() + 0.7 + self.noise(0.05)).max(0.0);
        let discriminator_loss = (1.4 * (-t / 40.0).exp() + 0.5 + self.noise(0.05)).max(0.0);
        let fid = (150.0 * (-t / 25.0).exp() + 12.0 + self.noise(1.5)).max(0.0);
        if self.is_finished() {
            log::info!("GAN mock training finished after {} epochs", self.epoch);
        }
        Some(TrainingMetrics {
            epoch: self.epoch,
            generator_loss,
            discriminator_loss,
            fid,
        })
    }

    fn is_finished(&self) -> bool {
        self.epoch >= self.epochs
    }

    fn progress(&self) -> f32 {
        if self.epochs == 0 {
            return 1.0;
        }
        self.epoch as f32 / self.epochs as f32
    }

    fn reset(&mut self) {
        self.epoch = 0;
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(trainer: &mut MockGanTrainer) -> Vec<TrainingMetrics> {
        std::iter::from_fn(|| trainer.step()).collect()
    }

    #[test]
    fn runs_exactly_the_configured_epochs() {
        let mut trainer = MockGanTrainer::new(1, 20);
        let history = run(&mut trainer);
        assert_eq!(history.len(), 20);
        assert_eq!(history.last().map(|m| m.epoch), Some(20));
        assert!(trainer.is_finished());
        assert_eq!(trainer.progress(), 1.0);
        assert!(trainer.step().is_none());
    }

    #[test]
    fn losses_trend_downwards() {
        let history = run(&mut MockGanTrainer::new(8, 100));
        let first = &history[0];
        let last = &history[99];
        assert!(last.generator_loss < first.generator_loss);
        assert!(last.fid < first.fid);
        assert!(history.iter().all(|m| m.fid >= 0.0 && m.discriminator_loss >= 0.0));
    }

    #[test]
    fn reset_replays_the_same_run() {
        let mut trainer = MockGanTrainer::new(5, 10);
        let a = run(&mut trainer);
        trainer.reset();
        assert_eq!(trainer.progress(), 0.0);
        let b = run(&mut trainer);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_epochs_is_already_finished() {
        let mut trainer = MockGanTrainer::new(1, 0);
        assert!(trainer.is_finished());
        assert_eq!(trainer.progress(), 1.0);
        assert!(trainer.step().is_none());
    }
}
