/// WorldState: everything on the board plus the active session.
///
/// ## Ownership
///
/// The world owns a flat list of enemies and exactly one player, gem and
/// key. Nothing owns anything else; entities only meet in `step`.
///
/// ## Clock
///
/// `clock_ms` is simulation time, the sum of every wall-clock `dt` passed
/// to `step`. The slide tween is scheduled against it, so input, ticks and
/// slide steps all share one timeline on one thread.

use rand::Rng;

use crate::config::GameConfig;
use crate::domain::entity::{Enemy, Gem, Key};
use crate::domain::player::{Player, SlideTiming};
use super::session::Session;

pub struct WorldState {
    // ── Entities ──
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub gem: Gem,
    pub key: Key,

    // ── Session ──
    pub session: Session,
    /// Enemy count a reset truncates back to.
    pub initial_enemies: usize,

    // ── Timing ──
    pub clock_ms: f64,
    pub slide_timing: SlideTiming,
    /// A session reset is waiting for the in-flight slide to release.
    pub reset_pending: bool,
}

impl WorldState {
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let session = Session::new();
        let enemies = (0..config.game.enemies)
            .map(|_| Enemy::spawned(rng, session.speed_factor))
            .collect();
        let key = Key::hidden();
        let gem = Gem::spawned(rng, &key);
        WorldState {
            player: Player::new(config.game.character),
            enemies,
            gem,
            key,
            session,
            initial_enemies: config.game.enemies,
            clock_ms: 0.0,
            slide_timing: config.timing.slide,
            reset_pending: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::START;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_world_layout() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = GameConfig::default();
        let w = WorldState::new(&config, &mut rng);
        assert_eq!(w.enemies.len(), 5);
        assert_eq!(w.initial_enemies, 5);
        assert!(w.enemies.iter().all(|e| e.pos.x <= -150.0));
        assert!(!w.key.is_active());
        assert_ne!(w.gem.pos, w.key.pos);
        assert_eq!(w.player.pos, START);
        assert_eq!(w.player.character, 2);
        assert!(!w.session.started);
        assert!(!w.reset_pending);
    }

    #[test]
    fn enemy_count_follows_config() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut config = GameConfig::default();
        config.game.enemies = 2;
        let w = WorldState::new(&config, &mut rng);
        assert_eq!(w.enemies.len(), 2);
        assert_eq!(w.initial_enemies, 2);
    }
}
