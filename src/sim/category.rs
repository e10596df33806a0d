//! Contact classification
//!
//! Maps a pair of touching bodies to the gameplay event it represents. The pair
//! is ordered by category before lookup, so `(ball, block)` and `(block, ball)`
//! classify the same way. Pairs outside the table produce nothing.

use serde::{Deserialize, Serialize};

use super::physics::BodyHandle;

/// Semantic group a physics body belongs to.
///
/// Declaration order is the ordering used to normalize contact pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Ball,
    Ground,
    Block,
    Paddle,
    Border,
    PowerUp,
}

/// Gameplay event produced by a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    BallPaddle { paddle: BodyHandle },
    BallGround { ball: BodyHandle },
    BallBlock { ball: BodyHandle, block: BodyHandle },
    GroundPowerUp { power_up: BodyHandle },
    PaddlePowerUp { power_up: BodyHandle },
}

/// Classify a contact between two bodies
pub fn classify(
    a: (Category, BodyHandle),
    b: (Category, BodyHandle),
) -> Option<ContactEvent> {
    let (first, second) = if a.0 <= b.0 { (a, b) } else { (b, a) };

    match (first, second) {
        ((Category::Ball, _), (Category::Paddle, paddle)) => {
            Some(ContactEvent::BallPaddle { paddle })
        }
        ((Category::Ball, ball), (Category::Ground, _)) => Some(ContactEvent::BallGround { ball }),
        ((Category::Ball, ball), (Category::Block, block)) => {
            Some(ContactEvent::BallBlock { ball, block })
        }
        ((Category::Ground, _), (Category::PowerUp, power_up)) => {
            Some(ContactEvent::GroundPowerUp { power_up })
        }
        ((Category::Paddle, _), (Category::PowerUp, power_up)) => {
            Some(ContactEvent::PaddlePowerUp { power_up })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: BodyHandle = BodyHandle(1);
    const B: BodyHandle = BodyHandle(2);

    #[test]
    fn test_classify_is_order_independent() {
        let forward = classify((Category::Ball, A), (Category::Block, B));
        let reverse = classify((Category::Block, B), (Category::Ball, A));
        assert_eq!(forward, Some(ContactEvent::BallBlock { ball: A, block: B }));
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_classify_table() {
        assert_eq!(
            classify((Category::Paddle, B), (Category::Ball, A)),
            Some(ContactEvent::BallPaddle { paddle: B })
        );
        assert_eq!(
            classify((Category::Ground, B), (Category::Ball, A)),
            Some(ContactEvent::BallGround { ball: A })
        );
        assert_eq!(
            classify((Category::PowerUp, A), (Category::Ground, B)),
            Some(ContactEvent::GroundPowerUp { power_up: A })
        );
        assert_eq!(
            classify((Category::Paddle, B), (Category::PowerUp, A)),
            Some(ContactEvent::PaddlePowerUp { power_up: A })
        );
    }

    #[test]
    fn test_unmatched_pairs_are_ignored() {
        assert_eq!(classify((Category::Block, A), (Category::Border, B)), None);
        assert_eq!(classify((Category::Ball, A), (Category::Border, B)), None);
        assert_eq!(classify((Category::Block, A), (Category::PowerUp, B)), None);
        assert_eq!(classify((Category::Ball, A), (Category::Ball, B)), None);
    }
}
