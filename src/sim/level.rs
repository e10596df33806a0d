//! Level completion and progression

use crate::catalog::Level;

/// Whether every destructible block of `level` is gone.
///
/// `live_blocks` counts every block entity still in the scene, indestructible
/// ones included; those can never leave, so the level is won once only they remain.
pub fn is_won(live_blocks: usize, level: &Level) -> bool {
    live_blocks == level.indestructible_count()
}

/// Level index to load on reload
pub fn next_level_index(current: usize, level_count: usize, won: bool) -> usize {
    if !won {
        return current;
    }
    if current + 1 < level_count {
        current + 1
    } else {
        0
    }
}
