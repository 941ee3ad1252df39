/// Presentation: terminal surface, sprite art, scene order, input decoding.

pub mod input;
pub mod renderer;
pub mod scene;
pub mod sprites;
