mod renderer;
mod transform;

pub use renderer::Renderer;
pub use transform::{parallax_dest_x, tile_start_x, Viewport};

/// Opaque texture reference carried by render commands. Resolution to
/// pixel data is a renderer concern; unresolved ids fall back to a
/// solid placeholder color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Player,
    BackgroundFar,
    BackgroundMid,
    BackgroundNear,
    Hud,
}

impl TextureId {
    /// Background layers are tiled horizontally to form a seamless
    /// parallax band; everything else is blitted once.
    pub fn is_background_layer(self) -> bool {
        matches!(
            self,
            TextureId::BackgroundFar | TextureId::BackgroundMid | TextureId::BackgroundNear
        )
    }

    pub(crate) fn asset_file_name(self) -> Option<&'static str> {
        match self {
            TextureId::Player => Some("player.png"),
            TextureId::BackgroundFar => Some("background_far.png"),
            TextureId::BackgroundMid => Some("background_mid.png"),
            TextureId::BackgroundNear => Some("background_near.png"),
            TextureId::Hud => None,
        }
    }
}

/// One draw request. Commands are produced fresh each frame by gameplay
/// and consumed in list order by the renderer; later commands paint
/// over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCommand {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub texture: TextureId,
    /// Parallax multiplier in [0, 1]: 0 = screen-fixed (HUD), 1 = full
    /// world scroll.
    pub scroll_factor: f32,
}
