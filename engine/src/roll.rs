use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic dice source for activation rolls.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn d20(&mut self) -> u8 {
        self.rng.gen_range(1..=20)
    }
}

/// Chat line produced when a source item is rolled on activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRoll {
    pub roll: u8,
    pub message: String,
}

pub fn roll_item_activation(dice: &mut Dice, item_name: &str) -> ActivationRoll {
    let roll = dice.d20();
    ActivationRoll {
        roll,
        message: format!("{item_name}: d20={roll}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rolls_are_deterministic() {
        let mut a = Dice::from_seed(7);
        let mut b = Dice::from_seed(7);
        let ra = roll_item_activation(&mut a, "Torch");
        let rb = roll_item_activation(&mut b, "Torch");
        assert_eq!(ra, rb);
        assert!((1..=20).contains(&ra.roll));
        assert!(ra.message.starts_with("Torch: d20="));
    }
}
