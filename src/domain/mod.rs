/// Pure game domain: geometry, entities, contact rules.

pub mod board;
pub mod entity;
pub mod player;
pub mod rules;
pub mod sprite;
