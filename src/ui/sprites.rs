/// Sprite cache: terminal art for every logical `Sprite`.
///
/// Each glyph is a 10 × 4 block of characters, one board column wide and
/// one tile row tall. Tiles carry a background colour and paint every
/// cell; entity glyphs are transparent where they hold a space.

use std::collections::HashMap;

use crossterm::style::Color;
use tracing::debug;

use crate::domain::sprite::{Character, GemColor, Sprite};

pub const GLYPH_W: usize = 10;
pub const GLYPH_H: usize = 4;

#[derive(Clone, Debug)]
pub struct Glyph {
    pub rows: [&'static str; GLYPH_H],
    pub fg: Color,
    /// Opaque background, or `None` for a transparent sprite.
    pub bg: Option<Color>,
}

pub struct SpriteCache {
    glyphs: HashMap<Sprite, Glyph>,
}

impl SpriteCache {
    pub fn new() -> Self {
        SpriteCache { glyphs: HashMap::with_capacity(16) }
    }

    /// Build glyphs for every sprite in `sprites` not cached yet.
    pub fn load(&mut self, sprites: &[Sprite]) {
        for &sprite in sprites {
            self.glyphs.entry(sprite).or_insert_with(|| {
                debug!(path = sprite.path(), "sprite loaded");
                glyph_for(sprite)
            });
        }
    }

    /// Are all of `sprites` available?
    pub fn is_ready(&self, sprites: &[Sprite]) -> bool {
        sprites.iter().all(|s| self.glyphs.contains_key(s))
    }

    pub fn get(&self, sprite: Sprite) -> Option<&Glyph> {
        self.glyphs.get(&sprite)
    }
}

// ── Art ──

const WATER: [&str; GLYPH_H] = [
    "~   ~    ~",
    "  ~    ~  ",
    "     ~    ",
    " ~     ~  ",
];

const STONE: [&str; GLYPH_H] = [
    "          ",
    "   .      ",
    "       .  ",
    "──────────",
];

const GRASS: [&str; GLYPH_H] = [
    "  ,    ,  ",
    "     ,    ",
    " ,      , ",
    "    ,     ",
];

const BUG: [&str; GLYPH_H] = [
    "          ",
    "  ▄▄▄▄▄   ",
    " █▀█▀█▀█> ",
    "  ▀  ▀ ▀  ",
];

const CHARACTER: [&str; GLYPH_H] = [
    "   ▄▄▄▄   ",
    "   █oo█   ",
    "   ▐██▌   ",
    "   ▘  ▝   ",
];

const GEM: [&str; GLYPH_H] = [
    "          ",
    "    ▄▄    ",
    "   ████   ",
    "    ▀▀    ",
];

const KEY: [&str; GLYPH_H] = [
    "          ",
    "  ▄▄      ",
    " █  █▄▄▄▄ ",
    "  ▀▀  ▀ ▀ ",
];

const SELECTOR: [&str; GLYPH_H] = [
    "          ",
    " ▄▄▄▄▄▄▄▄ ",
    " █      █ ",
    "          ",
];

fn glyph_for(sprite: Sprite) -> Glyph {
    let (rows, fg, bg) = match sprite {
        Sprite::WaterBlock => (WATER, Color::Rgb { r: 150, g: 200, b: 255 }, Some(Color::Rgb { r: 40, g: 90, b: 190 })),
        Sprite::StoneBlock => (STONE, Color::Rgb { r: 95, g: 95, b: 105 }, Some(Color::Rgb { r: 130, g: 130, b: 140 })),
        Sprite::GrassBlock => (GRASS, Color::Rgb { r: 40, g: 110, b: 40 }, Some(Color::Rgb { r: 75, g: 160, b: 65 })),
        Sprite::EnemyBug => (BUG, Color::Rgb { r: 200, g: 30, b: 30 }, None),
        Sprite::Character(c) => (CHARACTER, character_color(c), None),
        Sprite::Gem(c) => (GEM, gem_color(c), None),
        Sprite::Key => (KEY, Color::Rgb { r: 250, g: 210, b: 40 }, None),
        Sprite::Selector => (SELECTOR, Color::Rgb { r: 255, g: 255, b: 153 }, None),
    };
    Glyph { rows, fg, bg }
}

fn character_color(c: Character) -> Color {
    match c {
        Character::Boy => Color::White,
        Character::CatGirl => Color::Rgb { r: 255, g: 170, b: 60 },
        Character::HornGirl => Color::Rgb { r: 190, g: 120, b: 255 },
        Character::PinkGirl => Color::Rgb { r: 255, g: 130, b: 200 },
        Character::Princess => Color::Rgb { r: 255, g: 230, b: 90 },
    }
}

fn gem_color(c: GemColor) -> Color {
    match c {
        GemColor::Blue => Color::Rgb { r: 60, g: 140, b: 255 },
        GemColor::Green => Color::Rgb { r: 40, g: 220, b: 110 },
        GemColor::Orange => Color::Rgb { r: 255, g: 150, b: 30 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sprite::ALL_SPRITES;

    #[test]
    fn load_makes_cache_ready() {
        let mut cache = SpriteCache::new();
        assert!(!cache.is_ready(&ALL_SPRITES));
        assert!(cache.get(Sprite::Key).is_none());
        cache.load(&ALL_SPRITES);
        assert!(cache.is_ready(&ALL_SPRITES));
        assert!(cache.get(Sprite::Key).is_some());
    }

    #[test]
    fn glyphs_are_one_cell_in_size() {
        for sprite in ALL_SPRITES {
            let g = glyph_for(sprite);
            for row in g.rows {
                assert_eq!(row.chars().count(), GLYPH_W, "{sprite:?}: {row:?}");
            }
        }
    }

    #[test]
    fn only_tiles_are_opaque() {
        for sprite in ALL_SPRITES {
            let tile = matches!(sprite, Sprite::WaterBlock | Sprite::StoneBlock | Sprite::GrassBlock);
            assert_eq!(glyph_for(sprite).bg.is_some(), tile, "{sprite:?}");
        }
    }
}
