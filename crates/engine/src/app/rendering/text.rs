//! Fixed 3x5 bitmap font for HUD text.

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;
const MAX_PIXEL_SCALE: u32 = 64;

/// Printable ASCII from `' '` to `'~'`. Each row keeps its three columns in
/// the low bits, leftmost column highest.
static GLYPHS: [[u8; GLYPH_HEIGHT as usize]; 95] = [
    //  !"#$%&'
    [0x0, 0x0, 0x0, 0x0, 0x0],
    [0x2, 0x2, 0x2, 0x0, 0x2],
    [0x5, 0x5, 0x0, 0x0, 0x0],
    [0x5, 0x7, 0x5, 0x7, 0x5],
    [0x7, 0x6, 0x7, 0x3, 0x7],
    [0x5, 0x1, 0x2, 0x4, 0x5],
    [0x2, 0x5, 0x2, 0x5, 0x3],
    [0x2, 0x2, 0x0, 0x0, 0x0],
    // ()*+,-./
    [0x1, 0x2, 0x2, 0x2, 0x1],
    [0x4, 0x2, 0x2, 0x2, 0x4],
    [0x0, 0x5, 0x2, 0x5, 0x0],
    [0x0, 0x2, 0x7, 0x2, 0x0],
    [0x0, 0x0, 0x0, 0x2, 0x4],
    [0x0, 0x0, 0x7, 0x0, 0x0],
    [0x0, 0x0, 0x0, 0x0, 0x2],
    [0x1, 0x1, 0x2, 0x4, 0x4],
    // 01234567
    [0x7, 0x5, 0x5, 0x5, 0x7],
    [0x2, 0x6, 0x2, 0x2, 0x7],
    [0x7, 0x1, 0x7, 0x4, 0x7],
    [0x7, 0x1, 0x7, 0x1, 0x7],
    [0x5, 0x5, 0x7, 0x1, 0x1],
    [0x7, 0x4, 0x7, 0x1, 0x7],
    [0x7, 0x4, 0x7, 0x5, 0x7],
    [0x7, 0x1, 0x2, 0x2, 0x2],
    // 89:;<=>?
    [0x7, 0x5, 0x7, 0x5, 0x7],
    [0x7, 0x5, 0x7, 0x1, 0x7],
    [0x0, 0x2, 0x0, 0x2, 0x0],
    [0x0, 0x2, 0x0, 0x2, 0x4],
    [0x1, 0x2, 0x4, 0x2, 0x1],
    [0x0, 0x7, 0x0, 0x7, 0x0],
    [0x4, 0x2, 0x1, 0x2, 0x4],
    [0x7, 0x1, 0x3, 0x0, 0x2],
    // @ABCDEFG
    [0x7, 0x5, 0x7, 0x4, 0x7],
    [0x2, 0x5, 0x7, 0x5, 0x5],
    [0x6, 0x5, 0x6, 0x5, 0x6],
    [0x7, 0x4, 0x4, 0x4, 0x7],
    [0x6, 0x5, 0x5, 0x5, 0x6],
    [0x7, 0x4, 0x6, 0x4, 0x7],
    [0x7, 0x4, 0x6, 0x4, 0x4],
    [0x7, 0x4, 0x5, 0x5, 0x7],
    // HIJKLMNO
    [0x5, 0x5, 0x7, 0x5, 0x5],
    [0x7, 0x2, 0x2, 0x2, 0x7],
    [0x7, 0x1, 0x1, 0x5, 0x7],
    [0x5, 0x5, 0x6, 0x5, 0x5],
    [0x4, 0x4, 0x4, 0x4, 0x7],
    [0x5, 0x7, 0x7, 0x5, 0x5],
    [0x5, 0x7, 0x7, 0x7, 0x5],
    [0x7, 0x5, 0x5, 0x5, 0x7],
    // PQRSTUVW
    [0x6, 0x5, 0x6, 0x4, 0x4],
    [0x7, 0x5, 0x5, 0x7, 0x1],
    [0x6, 0x5, 0x6, 0x5, 0x5],
    [0x7, 0x4, 0x7, 0x1, 0x7],
    [0x7, 0x2, 0x2, 0x2, 0x2],
    [0x5, 0x5, 0x5, 0x5, 0x7],
    [0x5, 0x5, 0x5, 0x5, 0x2],
    [0x5, 0x5, 0x7, 0x7, 0x5],
    // XYZ[\]^_
    [0x5, 0x5, 0x2, 0x5, 0x5],
    [0x5, 0x5, 0x2, 0x2, 0x2],
    [0x7, 0x1, 0x2, 0x4, 0x7],
    [0x6, 0x4, 0x4, 0x4, 0x6],
    [0x4, 0x4, 0x2, 0x1, 0x1],
    [0x3, 0x1, 0x1, 0x1, 0x3],
    [0x2, 0x5, 0x0, 0x0, 0x0],
    [0x0, 0x0, 0x0, 0x0, 0x7],
    // `abcdefg
    [0x4, 0x2, 0x0, 0x0, 0x0],
    [0x0, 0x7, 0x1, 0x7, 0x7],
    [0x4, 0x4, 0x6, 0x5, 0x6],
    [0x0, 0x7, 0x4, 0x4, 0x7],
    [0x1, 0x1, 0x7, 0x5, 0x7],
    [0x0, 0x7, 0x6, 0x4, 0x7],
    [0x3, 0x4, 0x6, 0x4, 0x4],
    [0x0, 0x7, 0x5, 0x7, 0x1],
    // hijklmno
    [0x4, 0x4, 0x6, 0x5, 0x5],
    [0x2, 0x0, 0x2, 0x2, 0x2],
    [0x1, 0x0, 0x1, 0x5, 0x2],
    [0x4, 0x5, 0x6, 0x5, 0x5],
    [0x4, 0x4, 0x4, 0x4, 0x7],
    [0x0, 0x6, 0x7, 0x5, 0x5],
    [0x0, 0x6, 0x5, 0x5, 0x5],
    [0x0, 0x7, 0x5, 0x5, 0x7],
    // pqrstuvw
    [0x0, 0x6, 0x5, 0x6, 0x4],
    [0x0, 0x7, 0x5, 0x7, 0x1],
    [0x0, 0x6, 0x5, 0x4, 0x4],
    [0x0, 0x7, 0x6, 0x1, 0x7],
    [0x2, 0x7, 0x2, 0x2, 0x3],
    [0x0, 0x5, 0x5, 0x5, 0x7],
    [0x0, 0x5, 0x5, 0x5, 0x2],
    [0x0, 0x5, 0x5, 0x7, 0x2],
    // xyz{|}~
    [0x0, 0x5, 0x2, 0x2, 0x5],
    [0x0, 0x5, 0x5, 0x7, 0x1],
    [0x0, 0x7, 0x1, 0x2, 0x7],
    [0x3, 0x2, 0x6, 0x2, 0x3],
    [0x2, 0x2, 0x2, 0x2, 0x2],
    [0x6, 0x2, 0x3, 0x2, 0x6],
    [0x0, 0x3, 0x6, 0x0, 0x0],];

/// Characters outside printable ASCII draw as blank space.
fn glyph_for(ch: char) -> Option<&'static [u8; GLYPH_HEIGHT as usize]> {
    match ch {
        ' '..='~' => GLYPHS.get(ch as usize - ' ' as usize),
        _ => None,
    }
}

/// Integer block size that makes a glyph roughly `size` pixels tall.
pub(crate) fn pixel_scale_for_size(size: u32) -> i32 {
    (size / GLYPH_HEIGHT as u32).clamp(1, MAX_PIXEL_SCALE) as i32
}

pub(crate) fn glyph_advance(pixel_scale: i32) -> i32 {
    (GLYPH_WIDTH + 1) * pixel_scale
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_text_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    left: i32,
    top: i32,
    text: &str,
    pixel_scale: i32,
    color: [u8; 4],
) {
    if width == 0 || height == 0 || frame.len() < width as usize * height as usize * 4 {
        return;
    }
    let advance = glyph_advance(pixel_scale);
    let mut x = left;
    for ch in text.chars() {
        if let Some(rows) = glyph_for(ch) {
            draw_glyph_clipped(frame, width, height, x, top, rows, pixel_scale, color);
        }
        x = x.saturating_add(advance);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_glyph_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    left: i32,
    top: i32,
    rows: &[u8; GLYPH_HEIGHT as usize],
    pixel_scale: i32,
    color: [u8; 4],
) {
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            let block_left = left.saturating_add(col * pixel_scale);
            let block_top = top.saturating_add(row as i32 * pixel_scale);
            fill_block_clipped(frame, width, height, block_left, block_top, pixel_scale, color);
        }
    }
}

fn fill_block_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    left: i32,
    top: i32,
    size: i32,
    color: [u8; 4],
) {
    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = left.saturating_add(size).min(width as i32);
    let y1 = top.saturating_add(size).min(height as i32);
    for y in y0..y1 {
        let row_offset = y as usize * width as usize * 4;
        for x in x0..x1 {
            let offset = row_offset + x as usize * 4;
            frame[offset..offset + 4].copy_from_slice(&color);
        }
    }
}
