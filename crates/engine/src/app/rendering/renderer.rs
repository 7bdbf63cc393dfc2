use pixels::{Error, Pixels, SurfaceTexture, TextureError};
use std::sync::Arc;
use winit::window::Window;

use crate::app::{Canvas, SpriteHandle};
use crate::motion::Vec2;

use super::sprites::{LoadedSprite, SpriteStore};
use super::text::{draw_text_clipped, pixel_scale_for_size};

/// Presents a fixed-size RGBA buffer to the window surface.
///
/// The buffer keeps the logical window extents the scene simulates in; resizing
/// the window only rescales the presented image.
pub struct Renderer {
    pixels: Pixels<'static>,
    sprites: SpriteStore,
    buffer_width: u32,
    buffer_height: u32,
    background: [u8; 4],
}

impl Renderer {
    pub fn new(
        window: Arc<Window>,
        sprites: SpriteStore,
        buffer_size: (u32, u32),
        background: [u8; 4],
    ) -> Result<Self, Error> {
        let surface_size = window.inner_size();
        let (buffer_width, buffer_height) = (buffer_size.0.max(1), buffer_size.1.max(1));
        let surface = SurfaceTexture::new(surface_size.width, surface_size.height, window);
        let pixels = Pixels::new(buffer_width, buffer_height, surface)?;
        Ok(Self {
            pixels,
            sprites,
            buffer_width,
            buffer_height,
            background,
        })
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)
    }

    pub fn sprites_mut(&mut self) -> &mut SpriteStore {
        &mut self.sprites
    }

    pub fn begin_frame(&mut self) -> FrameCanvas<'_> {
        let frame = self.pixels.frame_mut();
        clear_frame(frame, self.background);
        FrameCanvas::new(frame, self.buffer_width, self.buffer_height, &self.sprites)
    }

    pub fn end_frame(&mut self) -> Result<(), Error> {
        self.pixels.render()
    }
}

pub struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    sprites: &'a SpriteStore,
    draw_calls: usize,
}

impl<'a> FrameCanvas<'a> {
    pub(crate) fn new(
        frame: &'a mut [u8],
        width: u32,
        height: u32,
        sprites: &'a SpriteStore,
    ) -> Self {
        Self {
            frame,
            width,
            height,
            sprites,
            draw_calls: 0,
        }
    }

    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }
}

impl Canvas for FrameCanvas<'_> {
    fn draw_sprite(&mut self, handle: SpriteHandle, top_left: Vec2, scale: f32) {
        let Some(sprite) = self.sprites.get(handle) else {
            return;
        };
        self.draw_calls += 1;
        draw_sprite_scaled(
            self.frame,
            self.width,
            self.height,
            top_left.x.round() as i32,
            top_left.y.round() as i32,
            sprite,
            scale,
        );
    }

    fn draw_text(&mut self, text: &str, top_left: Vec2, size: u32, color: [u8; 4]) {
        self.draw_calls += 1;
        draw_text_clipped(
            self.frame,
            self.width,
            self.height,
            top_left.x.round() as i32,
            top_left.y.round() as i32,
            text,
            pixel_scale_for_size(size),
            color,
        );
    }
}

fn clear_frame(frame: &mut [u8], color: [u8; 4]) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&color);
    }
}

fn normalized_sprite_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

fn scaled_sprite_dimensions(sprite: &LoadedSprite, scale: f32) -> (u32, u32) {
    let scale = normalized_sprite_scale(scale);
    let width = (sprite.width as f32 * scale).round().max(1.0) as u32;
    let height = (sprite.height as f32 * scale).round().max(1.0) as u32;
    (width, height)
}

fn draw_sprite_scaled(
    frame: &mut [u8],
    width: u32,
    height: u32,
    left: i32,
    top: i32,
    sprite: &LoadedSprite,
    scale: f32,
) {
    if sprite.width == 0 || sprite.height == 0 || width == 0 || height == 0 {
        return;
    }
    let expected_rgba_len = sprite.width as usize * sprite.height as usize * 4;
    if sprite.rgba.len() < expected_rgba_len {
        return;
    }
    if frame.len() < width as usize * height as usize * 4 {
        return;
    }

    let scale = normalized_sprite_scale(scale);
    let inv_scale = scale.recip();
    let (scaled_w, scaled_h) = scaled_sprite_dimensions(sprite, scale);
    let right = left.saturating_add(scaled_w as i32);
    let bottom = top.saturating_add(scaled_h as i32);

    let draw_left = left.max(0);
    let draw_top = top.max(0);
    let draw_right = right.min(width as i32);
    let draw_bottom = bottom.min(height as i32);
    if draw_left >= draw_right || draw_top >= draw_bottom {
        return;
    }

    let frame_width = width as usize;
    let sprite_width = sprite.width as usize;

    for out_y in draw_top..draw_bottom {
        let dy = out_y - top;
        let src_y = ((dy as f32) * inv_scale).floor() as u32;
        let src_y = src_y.min(sprite.height - 1) as usize;
        let src_row_offset = src_y * sprite_width * 4;
        let dst_row_offset = out_y as usize * frame_width * 4;

        for out_x in draw_left..draw_right {
            let dx = out_x - left;
            let src_x = ((dx as f32) * inv_scale).floor() as u32;
            let src_x = src_x.min(sprite.width - 1) as usize;
            let src_offset = src_row_offset + src_x * 4;
            let alpha = sprite.rgba[src_offset + 3];
            if alpha == 0 {
                continue;
            }
            let dst_offset = dst_row_offset + out_x as usize * 4;
            frame[dst_offset] = sprite.rgba[src_offset];
            frame[dst_offset + 1] = sprite.rgba[src_offset + 1];
            frame[dst_offset + 2] = sprite.rgba[src_offset + 2];
            frame[dst_offset + 3] = alpha;
        }
    }
}
