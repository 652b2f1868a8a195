use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::ImageReader;
use pixels::{Error, Pixels, SurfaceTexture};
use tracing::warn;
use winit::window::Window;

use super::transform::{parallax_dest_x, tile_start_x};
use super::{RenderCommand, TextureId, Viewport};

const CLEAR_COLOR: [u8; 4] = [30, 30, 30, 255];
const PLAYER_PLACEHOLDER_COLOR: [u8; 4] = [255, 0, 0, 255];
const BACKGROUND_FAR_PLACEHOLDER_COLOR: [u8; 4] = [36, 52, 104, 255];
const BACKGROUND_MID_PLACEHOLDER_COLOR: [u8; 4] = [56, 82, 148, 255];
const BACKGROUND_NEAR_PLACEHOLDER_COLOR: [u8; 4] = [88, 124, 200, 255];
const UNKNOWN_PLACEHOLDER_COLOR: [u8; 4] = [0, 255, 255, 255];

struct LoadedTexture {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

/// Software renderer over a fixed logical framebuffer. The buffer stays
/// at the configured logical resolution; `pixels` scales it to the
/// window surface, so a resize never changes command coordinates.
pub struct Renderer {
    window: &'static Window,
    pixels: Pixels<'static>,
    logical: Viewport,
    asset_dir: PathBuf,
    texture_cache: HashMap<TextureId, Option<LoadedTexture>>,
}

impl Renderer {
    pub fn new(
        window: &'static Window,
        asset_dir: PathBuf,
        logical: Viewport,
    ) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(window, logical, size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            logical,
            asset_dir,
            texture_cache: HashMap::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(self.window, self.logical, width, height)?;
        Ok(())
    }

    fn build_pixels(
        window: &'static Window,
        logical: Viewport,
        surface_width: u32,
        surface_height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(surface_width, surface_height, window);
        Pixels::new(logical.width, logical.height, surface)
    }

    pub fn begin_frame(&mut self) {
        for chunk in self.pixels.frame_mut().chunks_exact_mut(4) {
            chunk.copy_from_slice(&CLEAR_COLOR);
        }
    }

    /// Draws commands in list order (back to front). Each command's
    /// destination x is shifted by `scroll_factor * camera_offset_x`;
    /// background layers are tiled into a seamless horizontal band.
    pub fn draw_commands(&mut self, commands: &[RenderCommand], camera_offset_x: f32) {
        if self.logical.width == 0 || self.logical.height == 0 {
            return;
        }
        let asset_dir = self.asset_dir.as_path();
        let texture_cache = &mut self.texture_cache;
        let logical = self.logical;
        let frame = self.pixels.frame_mut();

        for command in commands {
            let texture = resolve_cached_texture(texture_cache, asset_dir, command.texture);
            draw_command(frame, logical, command, texture, camera_offset_x);
        }
    }

    pub fn end_frame(&mut self) -> Result<(), Error> {
        self.pixels.render()
    }
}

fn draw_command(
    frame: &mut [u8],
    viewport: Viewport,
    command: &RenderCommand,
    texture: Option<&LoadedTexture>,
    camera_offset_x: f32,
) {
    if command.texture.is_background_layer() {
        if let Some(texture) = texture {
            draw_tiled_layer(frame, viewport, command, texture, camera_offset_x);
            return;
        }
        // No art for this layer: a solid band reads the same tiled or not.
    }

    let dest_x = parallax_dest_x(command.x, command.scroll_factor, camera_offset_x).round() as i32;
    let dest_y = command.y.round() as i32;
    let dest_w = command.width.round() as i32;
    let dest_h = command.height.round() as i32;

    match texture {
        Some(texture) => blit_scaled(frame, viewport, dest_x, dest_y, dest_w, dest_h, texture),
        None => fill_rect(
            frame,
            viewport,
            dest_x,
            dest_y,
            dest_w,
            dest_h,
            placeholder_color(command.texture),
        ),
    }
}

fn draw_tiled_layer(
    frame: &mut [u8],
    viewport: Viewport,
    command: &RenderCommand,
    texture: &LoadedTexture,
    camera_offset_x: f32,
) {
    if texture.width == 0 || texture.height == 0 {
        return;
    }
    let start_x = tile_start_x(command.scroll_factor, camera_offset_x, texture.width);
    let tile_w = texture.width as i32;
    let tile_h = texture.height as i32;

    let mut y = command.y.round() as i32;
    while y < viewport.height as i32 {
        let mut x = start_x;
        while x < viewport.width as i32 {
            blit_scaled(frame, viewport, x, y, tile_w, tile_h, texture);
            x += tile_w;
        }
        y += tile_h;
    }
}

/// Nearest-neighbor blit into the destination rect, clipped to the
/// viewport. Fully transparent source pixels are skipped.
fn blit_scaled(
    frame: &mut [u8],
    viewport: Viewport,
    dest_x: i32,
    dest_y: i32,
    dest_w: i32,
    dest_h: i32,
    texture: &LoadedTexture,
) {
    if dest_w <= 0 || dest_h <= 0 || texture.width == 0 || texture.height == 0 {
        return;
    }
    for py in 0..dest_h {
        let fy = dest_y + py;
        if fy < 0 || fy >= viewport.height as i32 {
            continue;
        }
        let sy = (py * texture.height as i32 / dest_h) as u32;
        for px in 0..dest_w {
            let fx = dest_x + px;
            if fx < 0 || fx >= viewport.width as i32 {
                continue;
            }
            let sx = (px * texture.width as i32 / dest_w) as u32;
            let src = ((sy * texture.width + sx) * 4) as usize;
            if texture.rgba[src + 3] == 0 {
                continue;
            }
            let dst = ((fy as u32 * viewport.width + fx as u32) * 4) as usize;
            frame[dst..dst + 4].copy_from_slice(&texture.rgba[src..src + 4]);
        }
    }
}

fn fill_rect(
    frame: &mut [u8],
    viewport: Viewport,
    dest_x: i32,
    dest_y: i32,
    dest_w: i32,
    dest_h: i32,
    color: [u8; 4],
) {
    if dest_w <= 0 || dest_h <= 0 {
        return;
    }
    for fy in dest_y.max(0)..(dest_y + dest_h).min(viewport.height as i32) {
        for fx in dest_x.max(0)..(dest_x + dest_w).min(viewport.width as i32) {
            let dst = ((fy as u32 * viewport.width + fx as u32) * 4) as usize;
            frame[dst..dst + 4].copy_from_slice(&color);
        }
    }
}

fn placeholder_color(texture: TextureId) -> [u8; 4] {
    match texture {
        TextureId::Player => PLAYER_PLACEHOLDER_COLOR,
        TextureId::BackgroundFar => BACKGROUND_FAR_PLACEHOLDER_COLOR,
        TextureId::BackgroundMid => BACKGROUND_MID_PLACEHOLDER_COLOR,
        TextureId::BackgroundNear => BACKGROUND_NEAR_PLACEHOLDER_COLOR,
        TextureId::Hud => UNKNOWN_PLACEHOLDER_COLOR,
    }
}

fn resolve_cached_texture<'a>(
    texture_cache: &'a mut HashMap<TextureId, Option<LoadedTexture>>,
    asset_dir: &Path,
    id: TextureId,
) -> Option<&'a LoadedTexture> {
    texture_cache
        .entry(id)
        .or_insert_with(|| load_texture_from_disk(asset_dir, id))
        .as_ref()
}

fn load_texture_from_disk(asset_dir: &Path, id: TextureId) -> Option<LoadedTexture> {
    let file_name = id.asset_file_name()?;
    let path = asset_dir.join(file_name);
    let decoded = ImageReader::open(&path)
        .and_then(|reader| {
            reader
                .decode()
                .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))
        })
        .map_err(|error| {
            warn!(
                texture = ?id,
                path = %path.display(),
                error = %error,
                "texture_load_failed_using_placeholder"
            );
        })
        .ok()?;
    let rgba = decoded.to_rgba8();
    Some(LoadedTexture {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}
