//! Block durability tiers
//!
//! Destructible blocks degrade Red → Orange → Yellow → Green → destroyed, one
//! step per ball contact. Indestructible (gray/metal) blocks never change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::BodyHandle;
use crate::catalog::is_indestructible_tag;

/// Durability tier of a destructible block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Red,
    Orange,
    Yellow,
    Green,
}

/// Result of one ball contact on a tiered block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Block survives with a weaker tier
    Downgrade(Tier),
    /// Block is destroyed and may drop a power-up
    DestroyAndMaybeDrop,
}

impl Tier {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "red" => Some(Tier::Red),
            "orange" => Some(Tier::Orange),
            "yellow" => Some(Tier::Yellow),
            "green" => Some(Tier::Green),
            _ => None,
        }
    }

    /// Texture name for this tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Red => "red",
            Tier::Orange => "orange",
            Tier::Yellow => "yellow",
            Tier::Green => "green",
        }
    }

    pub fn advance(self) -> Advance {
        match self {
            Tier::Red => Advance::Downgrade(Tier::Orange),
            Tier::Orange => Advance::Downgrade(Tier::Yellow),
            Tier::Yellow => Advance::Downgrade(Tier::Green),
            Tier::Green => Advance::DestroyAndMaybeDrop,
        }
    }
}

/// What a block is made of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Tiered(Tier),
    /// Gray/metal: bounces the ball, never removed
    Indestructible(String),
    /// Tag not in the tier table: rendered as-is, ignores hits
    Unknown(String),
}

impl BlockKind {
    pub fn from_tag(tag: &str) -> Self {
        if let Some(tier) = Tier::from_tag(tag) {
            BlockKind::Tiered(tier)
        } else if is_indestructible_tag(tag) {
            BlockKind::Indestructible(tag.to_string())
        } else {
            BlockKind::Unknown(tag.to_string())
        }
    }

    pub fn texture(&self) -> &str {
        match self {
            BlockKind::Tiered(tier) => tier.as_str(),
            BlockKind::Indestructible(tag) | BlockKind::Unknown(tag) => tag.as_str(),
        }
    }
}

/// A block entity in the current scene
#[derive(Debug, Clone)]
pub struct Block {
    pub body: BodyHandle,
    pub kind: BlockKind,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Outcome of a ball hitting a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Downgraded(Tier),
    Destroyed,
    /// Indestructible or unknown block: nothing happens
    Ignored,
}

impl Block {
    /// Apply one ball contact to this block
    pub fn hit(&mut self) -> HitOutcome {
        match self.kind {
            BlockKind::Tiered(tier) => match tier.advance() {
                Advance::Downgrade(next) => {
                    self.kind = BlockKind::Tiered(next);
                    HitOutcome::Downgraded(next)
                }
                Advance::DestroyAndMaybeDrop => HitOutcome::Destroyed,
            },
            _ => HitOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(tag: &str) -> Block {
        Block {
            body: BodyHandle(1),
            kind: BlockKind::from_tag(tag),
            pos: Vec2::ZERO,
            size: Vec2::new(10.0, 5.0),
        }
    }

    #[test]
    fn test_tier_table() {
        assert_eq!(Tier::Red.advance(), Advance::Downgrade(Tier::Orange));
        assert_eq!(Tier::Orange.advance(), Advance::Downgrade(Tier::Yellow));
        assert_eq!(Tier::Yellow.advance(), Advance::Downgrade(Tier::Green));
        assert_eq!(Tier::Green.advance(), Advance::DestroyAndMaybeDrop);
    }

    #[test]
    fn test_red_block_takes_four_hits() {
        let mut b = block("red");
        assert_eq!(b.hit(), HitOutcome::Downgraded(Tier::Orange));
        assert_eq!(b.hit(), HitOutcome::Downgraded(Tier::Yellow));
        assert_eq!(b.hit(), HitOutcome::Downgraded(Tier::Green));
        assert_eq!(b.kind.texture(), "green");
        assert_eq!(b.hit(), HitOutcome::Destroyed);
    }

    #[test]
    fn test_tags() {
        assert_eq!(BlockKind::from_tag("gray"), BlockKind::Indestructible("gray".into()));
        assert_eq!(
            BlockKind::from_tag("metal_gray"),
            BlockKind::Indestructible("metal_gray".into())
        );
        assert_eq!(BlockKind::from_tag("blue"), BlockKind::Unknown("blue".into()));
        assert_eq!(BlockKind::from_tag("yellow"), BlockKind::Tiered(Tier::Yellow));
    }

    #[test]
    fn test_non_tiered_blocks_ignore_hits() {
        let mut gray = block("gray");
        let mut blue = block("blue");
        for _ in 0..10 {
            assert_eq!(gray.hit(), HitOutcome::Ignored);
            assert_eq!(blue.hit(), HitOutcome::Ignored);
        }
        assert_eq!(gray.kind.texture(), "gray");
    }

    fn any_tier() -> impl Strategy<Value = Tier> {
        prop_oneof![
            Just(Tier::Red),
            Just(Tier::Orange),
            Just(Tier::Yellow),
            Just(Tier::Green),
        ]
    }

    fn rank(tier: Tier) -> u8 {
        match tier {
            Tier::Red => 0,
            Tier::Orange => 1,
            Tier::Yellow => 2,
            Tier::Green => 3,
        }
    }

    proptest! {
        #[test]
        fn prop_advance_is_one_step_forward(tier in any_tier()) {
            match tier.advance() {
                Advance::Downgrade(next) => prop_assert_eq!(rank(next), rank(tier) + 1),
                Advance::DestroyAndMaybeDrop => prop_assert_eq!(tier, Tier::Green),
            }
        }

        #[test]
        fn prop_destroyed_within_four_hits(tier in any_tier()) {
            let mut b = block(tier.as_str());
            let hits_left = 4 - rank(tier);
            for _ in 1..hits_left {
                prop_assert!(matches!(b.hit(), HitOutcome::Downgraded(_)));
            }
            prop_assert_eq!(b.hit(), HitOutcome::Destroyed);
        }
    }
}
