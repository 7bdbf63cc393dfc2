use super::input::InputSnapshot;
use super::rendering::AssetError;
use crate::motion::Vec2;
use crate::time::TickTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);

/// A loaded sprite: its handle plus natural pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub handle: SpriteHandle,
    pub size: Vec2,
}

impl Visual {
    pub fn new(handle: SpriteHandle, size: Vec2) -> Self {
        Self { handle, size }
    }

    pub fn scaled_size(&self, scale: f32) -> Vec2 {
        self.size * scale
    }
}

pub trait SpriteLoader {
    fn load_sprite(&mut self, key: &str) -> Result<Visual, AssetError>;
}

pub trait Canvas {
    /// Draws the sprite with its top-left corner at `top_left`.
    fn draw_sprite(&mut self, handle: SpriteHandle, top_left: Vec2, scale: f32);

    /// `size` is the approximate glyph height in pixels.
    fn draw_text(&mut self, text: &str, top_left: Vec2, size: u32, color: [u8; 4]);
}

pub trait Scene {
    fn update(&mut self, tick: TickTime, input: &InputSnapshot);

    /// Draw back-to-front. Must not mutate simulation state.
    fn render(&self, canvas: &mut dyn Canvas);

    fn entity_count(&self) -> usize {
        0
    }
}
