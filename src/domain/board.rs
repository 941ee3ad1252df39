/// Board geometry: the fixed 5 × 6 grid every entity lives on.
///
/// All coordinates are logical pixels on a 505 × 606 canvas. Entities are
/// anchored at the top-left of their sprite image, which is why lanes and
/// collectible cells sit a little above the tile row they appear in.

use rand::Rng;

// ── Grid ──

pub const COLS: usize = 5;
pub const ROWS: usize = 6;
pub const COL_W: f32 = 101.0;
pub const ROW_H: f32 = 83.0;
pub const CANVAS_W: f32 = 505.0;
pub const CANVAS_H: f32 = 606.0;

// ── Enemy lanes ──

pub const LANE_SPACING: f32 = 80.0;
pub const LANES: [f32; 3] = [60.0, 140.0, 220.0];
/// Enemies past this x are respawned on the left.
pub const ENEMY_EXIT_X: f32 = 600.0;
pub const ENEMY_SPAWN_MIN_X: f32 = -500.0;
pub const ENEMY_SPAWN_MAX_X: f32 = -150.0;
pub const ENEMY_BASE_SPEED: f32 = 55.0;
pub const ENEMY_SPEED_SPREAD: f32 = 75.0;

// ── Player movement ──

pub const MOVE_X: f32 = 101.0;
pub const MOVE_Y: f32 = 85.0;
pub const START: Pos = Pos::new(202.0, 404.0);
pub const PLAYER_MIN_X: f32 = -2.0;
pub const PLAYER_MAX_X: f32 = 500.0;
pub const PLAYER_MIN_Y: f32 = 60.0;
pub const PLAYER_MAX_Y: f32 = 450.0;

// ── Collectibles ──

const COLLECTIBLE_LANES: usize = 3;
const COLLECTIBLE_TOP: f32 = 55.0;
/// Off-canvas parking spot for an inactive key.
pub const HIDDEN: Pos = Pos::new(-1000.0, -1000.0);

/// Entities closer than this (strictly) are touching.
pub const REACH: f32 = 51.0;

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub const fn new(x: f32, y: f32) -> Self {
        Pos { x, y }
    }

    pub fn distance(self, other: Pos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(self, dx: f32, dy: f32) -> Pos {
        Pos { x: self.x + dx, y: self.y + dy }
    }

    /// Can the player stand here? Edges are inclusive.
    pub fn in_player_area(self) -> bool {
        self.x >= PLAYER_MIN_X
            && self.x <= PLAYER_MAX_X
            && self.y >= PLAYER_MIN_Y
            && self.y <= PLAYER_MAX_Y
    }
}

/// Uniformly pick one of the 15 stone-row cells used by gems and keys.
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Pos {
    let col = rng.gen_range(0..COLS);
    let lane = rng.gen_range(0..COLLECTIBLE_LANES);
    Pos {
        x: col as f32 * COL_W,
        y: lane as f32 * LANE_SPACING + COLLECTIBLE_TOP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn distance_is_euclidean() {
        let a = Pos::new(0.0, 0.0);
        let b = Pos::new(30.0, 40.0);
        assert!((a.distance(b) - 50.0).abs() < 1e-4);
        assert!((b.distance(a) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn start_cell_is_playable() {
        assert!(START.in_player_area());
    }

    #[test]
    fn player_area_edges() {
        assert!(START.offset(0.0, -MOVE_Y * 4.0).in_player_area()); // y = 64
        assert!(!START.offset(0.0, -MOVE_Y * 5.0).in_player_area()); // y = -21
        assert!(!START.offset(0.0, MOVE_Y).in_player_area()); // y = 489
        assert!(Pos::new(-2.0, 404.0).in_player_area());
        assert!(!Pos::new(-2.5, 404.0).in_player_area());
        assert!(Pos::new(500.0, 404.0).in_player_area());
        assert!(!Pos::new(505.0, 404.0).in_player_area());
    }

    #[test]
    fn random_cells_are_on_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = random_cell(&mut rng);
            let col = p.x / COL_W;
            assert_eq!(col.fract(), 0.0);
            assert!((0.0..5.0).contains(&col));
            assert!([55.0, 135.0, 215.0].contains(&p.y), "y = {}", p.y);
        }
    }

    #[test]
    fn hidden_is_off_canvas() {
        assert!(HIDDEN.x < 0.0 && HIDDEN.y < 0.0);
        assert!(HIDDEN.distance(START) > REACH);
    }
}
