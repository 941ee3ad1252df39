/// Contact rules: pure functions, no side effects.
///
/// Contact is a plain distance test between sprite anchors:
///
/// ┌──────────────────────────┬──────────────┐
/// │ Pair                      │ Flag set if  │
/// ├──────────────────────────┼──────────────┤
/// │ player ↔ any enemy        │ dist < 51    │
/// │ player ↔ gem              │ dist < 51    │
/// │ player ↔ key              │ dist < 51    │
/// └──────────────────────────┴──────────────┘
///
/// Enemy contacts are OR-combined: one bug in reach is enough.
/// A hidden key is parked far off-canvas and never in reach.

use super::board::{Pos, REACH};
use super::entity::{Enemy, Entity, Gem, Key};
use super::player::Player;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Collisions {
    pub enemy: bool,
    pub gem: bool,
    pub key: bool,
}

impl Collisions {
    pub fn any(&self) -> bool {
        self.enemy || self.gem || self.key
    }

    pub fn clear(&mut self) {
        *self = Collisions::default();
    }
}

#[inline]
pub fn within_reach(a: Pos, b: Pos) -> bool {
    a.distance(b) < REACH
}

/// Compute this tick's contact flags for the player.
pub fn detect(player: &Player, enemies: &[Enemy], gem: &Gem, key: &Key) -> Collisions {
    let p = player.position();
    Collisions {
        enemy: enemies.iter().any(|e| within_reach(p, e.position())),
        gem: within_reach(p, gem.position()),
        key: within_reach(p, key.position()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::START;
    use crate::domain::sprite::GemColor;

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy { pos: Pos::new(x, y), speed: 60.0 }
    }

    fn gem_at(x: f32, y: f32) -> Gem {
        Gem { pos: Pos::new(x, y), color: GemColor::Blue }
    }

    #[test]
    fn reach_is_strict() {
        let a = Pos::new(0.0, 0.0);
        assert!(within_reach(a, Pos::new(50.9, 0.0)));
        assert!(!within_reach(a, Pos::new(51.0, 0.0)));
        assert!(within_reach(a, Pos::new(30.0, 40.0))); // 50
    }

    #[test]
    fn nothing_near_start() {
        let p = Player::new(0);
        let c = detect(&p, &[enemy_at(-300.0, 60.0)], &gem_at(0.0, 55.0), &Key::hidden());
        assert_eq!(c, Collisions::default());
        assert!(!c.any());
    }

    #[test]
    fn any_single_enemy_triggers() {
        let mut p = Player::new(0);
        p.pos = Pos::new(202.0, 64.0);
        let enemies = [
            enemy_at(-400.0, 60.0),
            enemy_at(180.0, 60.0), // 22 px away
            enemy_at(-200.0, 220.0),
        ];
        let c = detect(&p, &enemies, &gem_at(0.0, 135.0), &Key::hidden());
        assert!(c.enemy);
        assert!(!c.gem);
        assert!(!c.key);
    }

    #[test]
    fn gem_and_key_in_reach_from_the_cell_below_their_anchor() {
        let mut p = Player::new(0);
        p.pos = Pos::new(101.0, 149.0);
        let key = Key { pos: Pos::new(101.0, 135.0) };
        let c = detect(&p, &[], &gem_at(101.0, 135.0), &key);
        assert!(c.gem && c.key);
    }

    #[test]
    fn no_enemies_no_enemy_flag() {
        let p = Player::new(0);
        assert!(!detect(&p, &[], &gem_at(START.x, START.y), &Key::hidden()).enemy);
    }

    #[test]
    fn clear_resets_flags() {
        let mut c = Collisions { enemy: true, gem: true, key: true };
        c.clear();
        assert!(!c.any());
    }
}
