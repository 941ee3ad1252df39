/// Logical image keys and the surface contract they are drawn through.
///
/// The simulation never touches pixels or terminal cells. It names a
/// `Sprite` and a logical position; whatever implements `Surface` decides
/// what that looks like.

use super::board::ROWS;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Sprite {
    WaterBlock,
    StoneBlock,
    GrassBlock,
    EnemyBug,
    Character(Character),
    Gem(GemColor),
    Key,
    Selector,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Character {
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    Princess,
}

impl Character {
    pub const ALL: [Character; 5] = [
        Character::Boy,
        Character::CatGirl,
        Character::HornGirl,
        Character::PinkGirl,
        Character::Princess,
    ];

    /// Character for a selection index, clamped into range.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GemColor {
    Blue,
    Green,
    Orange,
}

impl GemColor {
    pub const ALL: [GemColor; 3] = [GemColor::Blue, GemColor::Green, GemColor::Orange];
}

impl Sprite {
    /// Asset path this sprite was authored as; also its cache key in logs.
    pub fn path(self) -> &'static str {
        match self {
            Sprite::WaterBlock => "images/water-block.png",
            Sprite::StoneBlock => "images/stone-block.png",
            Sprite::GrassBlock => "images/grass-block.png",
            Sprite::EnemyBug => "images/enemy-bug.png",
            Sprite::Character(Character::Boy) => "images/char-boy.png",
            Sprite::Character(Character::CatGirl) => "images/char-cat-girl.png",
            Sprite::Character(Character::HornGirl) => "images/char-horn-girl.png",
            Sprite::Character(Character::PinkGirl) => "images/char-pink-girl.png",
            Sprite::Character(Character::Princess) => "images/char-princess-girl.png",
            Sprite::Gem(GemColor::Blue) => "images/Gem Blue.png",
            Sprite::Gem(GemColor::Green) => "images/Gem Green.png",
            Sprite::Gem(GemColor::Orange) => "images/Gem Orange.png",
            Sprite::Key => "images/Key.png",
            Sprite::Selector => "images/Selector.png",
        }
    }
}

/// Every sprite the game draws. Loaded into the cache before the loop starts.
pub const ALL_SPRITES: [Sprite; 14] = [
    Sprite::StoneBlock,
    Sprite::WaterBlock,
    Sprite::GrassBlock,
    Sprite::EnemyBug,
    Sprite::Character(Character::Boy),
    Sprite::Character(Character::CatGirl),
    Sprite::Character(Character::HornGirl),
    Sprite::Character(Character::PinkGirl),
    Sprite::Character(Character::Princess),
    Sprite::Gem(GemColor::Blue),
    Sprite::Gem(GemColor::Green),
    Sprite::Gem(GemColor::Orange),
    Sprite::Key,
    Sprite::Selector,
];

/// Tile image per board row, top to bottom.
pub const ROW_TILES: [Sprite; ROWS] = [
    Sprite::WaterBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::GrassBlock,
    Sprite::GrassBlock,
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextStyle {
    /// Large banner text (title screen).
    Title,
    /// Prompt and credit lines.
    Caption,
    /// Score / level counters.
    Hud,
}

/// Render target in logical canvas units (505 × 606).
pub trait Surface {
    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32);

    /// Draw `text` horizontally centred on `x`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sprite_paths_are_unique() {
        let paths: HashSet<&str> = ALL_SPRITES.iter().map(|s| s.path()).collect();
        assert_eq!(paths.len(), ALL_SPRITES.len());
    }

    #[test]
    fn character_index_clamps() {
        assert_eq!(Character::from_index(0), Character::Boy);
        assert_eq!(Character::from_index(4), Character::Princess);
        assert_eq!(Character::from_index(99), Character::Princess);
    }
}
