//! Power-up drops
//!
//! Selection walks the catalog in ascending odds order and rolls once per
//! entry. Every successful roll replaces the previous pick, so the winner is
//! the last (highest-odds) entry whose roll came up. Higher-odds entries thus
//! get the final say over lower ones.

use glam::Vec2;
use rand::Rng;

use super::physics::BodyHandle;
use crate::catalog::{MAX_ODDS, PowerUp, PowerUpCatalog};

impl PowerUpCatalog {
    /// Pick the power-up dropped by a destroyed block, if any
    pub fn select<R: Rng>(&self, rng: &mut R) -> Option<&PowerUp> {
        self.select_with(|| rng.random_range(0..=MAX_ODDS))
    }

    /// Same as [`select`](Self::select) with an explicit roll source.
    ///
    /// `roll` is called exactly once per catalog entry, in ascending odds order,
    /// and must return a value in `0..=100`.
    pub fn select_with(&self, mut roll: impl FnMut() -> u8) -> Option<&PowerUp> {
        let mut selected = None;
        for power_up in self.entries() {
            if roll() <= power_up.odds {
                selected = Some(power_up);
            }
        }
        selected
    }
}

/// Effect applied when the paddle catches a power-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Expand,
    Reduce,
    /// Any other name resets the paddle to normal width
    Other(String),
}

impl Effect {
    pub fn from_name(name: &str) -> Self {
        match name {
            "expand" => Effect::Expand,
            "reduce" => Effect::Reduce,
            other => Effect::Other(other.to_string()),
        }
    }
}

/// A power-up falling from a destroyed block
#[derive(Debug, Clone)]
pub struct FallingPowerUp {
    pub body: BodyHandle,
    /// Effect name, doubles as the sprite texture
    pub name: String,
    pub size: Vec2,
}

impl FallingPowerUp {
    pub fn effect(&self) -> Effect {
        Effect::from_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn power_up(image: &str, odds: u8) -> PowerUp {
        PowerUp {
            image: image.to_string(),
            odds,
        }
    }

    fn catalog() -> PowerUpCatalog {
        PowerUpCatalog::new(vec![
            power_up("expand", 30),
            power_up("reduce", 10),
            power_up("normal", 20),
        ])
        .unwrap()
    }

    /// Roll source replaying a fixed sequence
    fn rolls(seq: &[u8]) -> impl FnMut() -> u8 + '_ {
        let mut it = seq.iter().copied();
        move || it.next().expect("more rolls than entries")
    }

    #[test]
    fn test_no_success_no_drop() {
        let c = catalog();
        assert!(c.select_with(rolls(&[100, 100, 100])).is_none());
    }

    #[test]
    fn test_last_success_wins() {
        let c = catalog();
        // reduce (10) and expand (30) both succeed: expand was rolled last
        let pick = c.select_with(rolls(&[5, 90, 12])).unwrap();
        assert_eq!(pick.image, "expand");

        // only the lowest-odds entry succeeds
        let pick = c.select_with(rolls(&[10, 21, 31])).unwrap();
        assert_eq!(pick.image, "reduce");

        // roll equal to odds succeeds
        let pick = c.select_with(rolls(&[50, 20, 31])).unwrap();
        assert_eq!(pick.image, "normal");
    }

    #[test]
    fn test_rolls_once_per_entry() {
        let c = catalog();
        let mut calls = 0;
        c.select_with(|| {
            calls += 1;
            0
        });
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_zero_odds_only_on_zero_roll() {
        let c = PowerUpCatalog::new(vec![power_up("expand", 0)]).unwrap();
        assert!(c.select_with(rolls(&[1])).is_none());
        assert!(c.select_with(rolls(&[0])).is_some());
    }

    #[test]
    fn test_empty_catalog_never_drops() {
        let c = PowerUpCatalog::default();
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(c.select(&mut rng).is_none());
    }

    #[test]
    fn test_certain_entry_always_drops() {
        let c = PowerUpCatalog::new(vec![
            power_up("reduce", 40),
            power_up("expand", 100),
        ])
        .unwrap();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            assert_eq!(c.select(&mut rng).unwrap().image, "expand");
        }
    }

    #[test]
    fn test_effect_names() {
        assert_eq!(Effect::from_name("expand"), Effect::Expand);
        assert_eq!(Effect::from_name("reduce"), Effect::Reduce);
        assert_eq!(Effect::from_name("normal"), Effect::Other("normal".into()));
    }
}
