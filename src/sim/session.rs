/// Session state: score, level, difficulty and this tick's contact flags.
///
/// One session is active per process. The struct is owned by `WorldState`
/// and mutated only by the progression step.

use crate::domain::rules::Collisions;

/// Gems per level before the key appears.
pub const GEMS_PER_KEY: u32 = 5;
pub const SPEED_STEP: f32 = 0.1;

#[derive(Clone, Debug)]
pub struct Session {
    /// False while the character-select screen is up.
    pub started: bool,
    pub score: u32,
    pub level: u32,
    /// Enemy speed band multiplier, >= 1.
    pub speed_factor: f32,
    /// Gems collected toward the next key, 0..GEMS_PER_KEY.
    pub gems_this_level: u32,
    pub collisions: Collisions,
}

impl Session {
    pub fn new() -> Self {
        Session {
            started: false,
            score: 0,
            level: 1,
            speed_factor: 1.0,
            gems_this_level: 0,
            collisions: Collisions::default(),
        }
    }

    /// Count a gem and score it at the current level.
    /// Returns true when this gem completes a set and the key is due.
    pub fn collect_gem(&mut self) -> bool {
        self.gems_this_level += 1;
        self.score += self.level;
        if self.gems_this_level >= GEMS_PER_KEY {
            self.gems_this_level = 0;
            true
        } else {
            false
        }
    }

    pub fn level_up(&mut self) {
        self.level += 1;
        self.gems_this_level = 0;
        self.speed_factor += SPEED_STEP;
    }

    /// Back to level 1 with nothing collected. `started` survives.
    pub fn reset_progress(&mut self) {
        self.score = 0;
        self.level = 1;
        self.speed_factor = 1.0;
        self.gems_this_level = 0;
        self.collisions.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session() {
        let s = Session::new();
        assert!(!s.started);
        assert_eq!((s.score, s.level, s.gems_this_level), (0, 1, 0));
        assert_eq!(s.speed_factor, 1.0);
    }

    #[test]
    fn fifth_gem_makes_key_due_and_wraps() {
        let mut s = Session::new();
        for _ in 0..4 {
            assert!(!s.collect_gem());
        }
        assert_eq!(s.gems_this_level, 4);
        assert!(s.collect_gem());
        assert_eq!(s.gems_this_level, 0);
        assert_eq!(s.score, 5);
    }

    #[test]
    fn gems_score_by_level() {
        let mut s = Session::new();
        s.level_up();
        s.level_up();
        s.collect_gem();
        assert_eq!(s.score, 3);
    }

    #[test]
    fn level_up_raises_difficulty() {
        let mut s = Session::new();
        s.collect_gem();
        s.level_up();
        assert_eq!(s.level, 2);
        assert_eq!(s.gems_this_level, 0);
        assert!((s.speed_factor - 1.1).abs() < 1e-5);
    }

    #[test]
    fn reset_progress_keeps_started() {
        let mut s = Session::new();
        s.started = true;
        s.collect_gem();
        s.level_up();
        s.collisions.enemy = true;
        s.reset_progress();
        assert!(s.started);
        assert_eq!((s.score, s.level, s.gems_this_level), (0, 1, 0));
        assert_eq!(s.speed_factor, 1.0);
        assert!(!s.collisions.any());
    }
}
