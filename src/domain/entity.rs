/// Entities: Enemy, Gem, Key (Player lives in `player.rs`).
///
/// Every entity shares one capability: it has a position and a sprite, may
/// advance with time, and draws itself through a `Surface`. Dispatch is
/// static; the board holds concrete types, never trait objects.

use rand::Rng;

use super::board::{
    self, Pos, ENEMY_BASE_SPEED, ENEMY_EXIT_X, ENEMY_SPAWN_MAX_X, ENEMY_SPAWN_MIN_X,
    ENEMY_SPEED_SPREAD, HIDDEN, LANES,
};
use super::sprite::{GemColor, Sprite, Surface};

pub trait Entity {
    fn position(&self) -> Pos;
    fn sprite(&self) -> Sprite;

    /// Advance by `dt` seconds. Most entities are static.
    fn update<R: Rng + ?Sized>(&mut self, _dt: f32, _speed_factor: f32, _rng: &mut R) {}

    fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let p = self.position();
        surface.draw_image(self.sprite(), p.x, p.y);
    }
}

// ── Enemy ──

/// A bug patrolling one lane left to right, recycled when it leaves the board.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Pos,
    /// Pixels per second.
    pub speed: f32,
}

impl Enemy {
    /// Create an enemy already placed off-screen left.
    pub fn spawned<R: Rng + ?Sized>(rng: &mut R, speed_factor: f32) -> Self {
        let mut enemy = Enemy { pos: HIDDEN, speed: ENEMY_BASE_SPEED };
        enemy.spawn(rng, speed_factor);
        enemy
    }

    /// Re-enter from the left with a fresh lane and speed.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, speed_factor: f32) {
        self.pos.x = rng.gen_range(ENEMY_SPAWN_MIN_X..=ENEMY_SPAWN_MAX_X);
        self.pos.y = LANES[rng.gen_range(0..LANES.len())];
        let top = ENEMY_BASE_SPEED + ENEMY_SPEED_SPREAD * speed_factor;
        self.speed = rng.gen_range(ENEMY_BASE_SPEED..=top);
    }
}

impl Entity for Enemy {
    fn position(&self) -> Pos {
        self.pos
    }

    fn sprite(&self) -> Sprite {
        Sprite::EnemyBug
    }

    fn update<R: Rng + ?Sized>(&mut self, dt: f32, speed_factor: f32, rng: &mut R) {
        self.pos.x += self.speed * dt;
        if self.pos.x > ENEMY_EXIT_X {
            self.spawn(rng, speed_factor);
        }
    }
}

// ── Gem ──

#[derive(Clone, Debug)]
pub struct Gem {
    pub pos: Pos,
    pub color: GemColor,
}

impl Gem {
    pub fn spawned<R: Rng + ?Sized>(rng: &mut R, key: &Key) -> Self {
        let mut gem = Gem { pos: HIDDEN, color: GemColor::Blue };
        gem.spawn(rng, key);
        gem
    }

    /// New colour and a random cell that is not the key's cell.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, key: &Key) {
        self.color = GemColor::ALL[rng.gen_range(0..GemColor::ALL.len())];
        self.pos = loop {
            let cell = board::random_cell(rng);
            if cell != key.pos {
                break cell;
            }
        };
    }
}

impl Entity for Gem {
    fn position(&self) -> Pos {
        self.pos
    }

    fn sprite(&self) -> Sprite {
        Sprite::Gem(self.color)
    }
}

// ── Key ──

/// The level key. Parked at `HIDDEN` while inactive.
#[derive(Clone, Debug)]
pub struct Key {
    pub pos: Pos,
}

impl Key {
    pub fn hidden() -> Self {
        Key { pos: HIDDEN }
    }

    pub fn is_active(&self) -> bool {
        self.pos != HIDDEN
    }

    /// Appear on a random cell that is not the gem's cell.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, gem: &Gem) {
        self.pos = loop {
            let cell = board::random_cell(rng);
            if cell != gem.pos {
                break cell;
            }
        };
    }

    pub fn out(&mut self) {
        self.pos = HIDDEN;
    }
}

impl Entity for Key {
    fn position(&self) -> Pos {
        self.pos
    }

    fn sprite(&self) -> Sprite {
        Sprite::Key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn enemy_spawns_off_screen_left() {
        let mut r = rng();
        for _ in 0..100 {
            let e = Enemy::spawned(&mut r, 1.0);
            assert!(e.pos.x >= -500.0 && e.pos.x <= -150.0, "x = {}", e.pos.x);
            assert!(LANES.contains(&e.pos.y));
            assert!(e.speed >= 55.0 && e.speed <= 130.0, "speed = {}", e.speed);
        }
    }

    #[test]
    fn enemy_speed_band_scales_with_factor() {
        let mut r = rng();
        let fastest = (0..300)
            .map(|_| Enemy::spawned(&mut r, 3.0).speed)
            .fold(0.0_f32, f32::max);
        assert!(fastest <= 55.0 + 75.0 * 3.0);
        assert!(fastest > 130.0, "band never exceeded the factor-1 top");
    }

    #[test]
    fn enemy_advances_by_speed_times_dt() {
        let mut r = rng();
        let mut e = Enemy { pos: Pos::new(0.0, 60.0), speed: 100.0 };
        e.update(0.5, 1.0, &mut r);
        assert!((e.pos.x - 50.0).abs() < 1e-4);
        assert_eq!(e.pos.y, 60.0);
    }

    #[test]
    fn enemy_respawns_after_exiting_right() {
        let mut r = rng();
        let mut e = Enemy { pos: Pos::new(590.0, 140.0), speed: 100.0 };
        e.update(0.2, 1.0, &mut r); // 590 + 20 = 610 > 600
        assert!(e.pos.x < -150.0 + f32::EPSILON, "x = {}", e.pos.x);
        assert!(e.pos.x >= -500.0);
    }

    #[test]
    fn enemy_at_threshold_keeps_going() {
        let mut r = rng();
        let mut e = Enemy { pos: Pos::new(599.0, 140.0), speed: 10.0 };
        e.update(0.1, 1.0, &mut r); // exactly 600, not past it
        assert!((e.pos.x - 600.0).abs() < 1e-4);
    }

    #[test]
    fn gem_and_key_never_share_a_cell() {
        let mut r = rng();
        let mut key = Key::hidden();
        let mut gem = Gem::spawned(&mut r, &key);
        for _ in 0..500 {
            key.spawn(&mut r, &gem);
            assert_ne!(key.pos, gem.pos);
            gem.spawn(&mut r, &key);
            assert_ne!(key.pos, gem.pos);
        }
    }

    #[test]
    fn key_out_hides_it() {
        let mut r = rng();
        let gem = Gem::spawned(&mut r, &Key::hidden());
        let mut key = Key::hidden();
        assert!(!key.is_active());
        key.spawn(&mut r, &gem);
        assert!(key.is_active());
        key.out();
        assert!(!key.is_active());
        assert_eq!(key.position(), HIDDEN);
    }

    #[test]
    fn gem_sprite_follows_color() {
        let gem = Gem { pos: Pos::new(0.0, 55.0), color: GemColor::Orange };
        assert_eq!(gem.sprite(), Sprite::Gem(GemColor::Orange));
    }
}
