/// Scene composition: what gets drawn each frame, in which order.
///
/// Board tiles first, then gem, key, enemies and player, then either the
/// character-select overlay or the score/level HUD. Everything goes through
/// `Surface`, so this module knows nothing about terminals.

use crate::domain::board::{CANVAS_W, COLS, COL_W, ROW_H};
use crate::domain::entity::Entity;
use crate::domain::sprite::{Character, Sprite, Surface, TextStyle, ROW_TILES};
use crate::sim::world::WorldState;

const SELECTOR_Y: f32 = 375.0;
const ROSTER_Y: f32 = 404.0;

pub fn compose_scene<S: Surface + ?Sized>(world: &WorldState, surface: &mut S) {
    compose_board(surface);

    world.gem.render(surface);
    world.key.render(surface);
    for enemy in &world.enemies {
        enemy.render(surface);
    }

    if world.session.started {
        world.player.render(surface);
        compose_hud(world, surface);
    } else {
        compose_select(world, surface);
    }
}

fn compose_board<S: Surface + ?Sized>(surface: &mut S) {
    for (row, &tile) in ROW_TILES.iter().enumerate() {
        for col in 0..COLS {
            surface.draw_image(tile, col as f32 * COL_W, row as f32 * ROW_H);
        }
    }
}

fn compose_select<S: Surface + ?Sized>(world: &WorldState, surface: &mut S) {
    surface.draw_image(Sprite::Selector, world.player.character as f32 * COL_W, SELECTOR_Y);
    for (i, &c) in Character::ALL.iter().enumerate() {
        surface.draw_image(Sprite::Character(c), i as f32 * COL_W, ROSTER_Y);
    }

    let center = CANVAS_W / 2.0;
    surface.draw_text("F R O G G E R", center, 250.0, TextStyle::Title);
    surface.draw_text("Press UP to start", center, 420.0, TextStyle::Caption);
    surface.draw_text("LEFT/RIGHT choose  -  ESC quits", center, 570.0, TextStyle::Caption);
}

fn compose_hud<S: Surface + ?Sized>(world: &WorldState, surface: &mut S) {
    surface.draw_text(&format!("level: {}", world.session.level), 70.0, 100.0, TextStyle::Hud);
    surface.draw_text(&format!("score: {}", world.session.score), 430.0, 100.0, TextStyle::Hud);
}
