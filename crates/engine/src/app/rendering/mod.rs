mod renderer;
mod sprites;
mod text;

pub use renderer::{FrameCanvas, Renderer};
pub use sprites::{AssetError, SpriteStore};
