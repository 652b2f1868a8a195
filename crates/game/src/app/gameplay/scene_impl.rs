use engine::{InputSnapshot, RenderCommand, Scene, TextureId};
use tracing::info;

use super::config::WorldConfig;
use super::movement::PlayerMovement;

const BACKGROUND_FAR_SCROLL_FACTOR: f32 = 0.2;
const BACKGROUND_MID_SCROLL_FACTOR: f32 = 0.5;
const BACKGROUND_NEAR_SCROLL_FACTOR: f32 = 0.8;
const PLAYER_SCROLL_FACTOR: f32 = 1.0;
const HUD_MARGIN_PX: f32 = 16.0;
const HUD_BAR_WIDTH_PX: f32 = 220.0;
const HUD_BAR_HEIGHT_PX: f32 = 14.0;

/// The single gameplay scene: one player in a horizontally scrolling
/// world over three parallax background bands.
pub(crate) struct PlatformerScene {
    config: WorldConfig,
    movement: PlayerMovement,
}

impl PlatformerScene {
    pub(crate) fn new(config: WorldConfig) -> Self {
        Self {
            movement: PlayerMovement::new(&config),
            config,
        }
    }

    fn background_command(&self, texture: TextureId, scroll_factor: f32) -> RenderCommand {
        RenderCommand {
            x: 0.0,
            y: 0.0,
            width: self.config.screen_width,
            height: self.config.screen_height,
            texture,
            scroll_factor,
        }
    }
}

impl Scene for PlatformerScene {
    fn load(&mut self) {
        let body = self.movement.body();
        info!(
            player_x = body.x,
            player_y = body.y,
            world_width = self.config.world_width,
            "scene_loaded"
        );
    }

    fn update(&mut self, dt_seconds: f32, input: &InputSnapshot) {
        self.movement.update(dt_seconds, input);
    }

    fn camera_focus_x(&self) -> f32 {
        self.movement.body().x
    }

    /// Back-to-front: far/mid/near background bands, player, HUD.
    fn compose_frame(&self, commands: &mut Vec<RenderCommand>) {
        commands.push(self.background_command(
            TextureId::BackgroundFar,
            BACKGROUND_FAR_SCROLL_FACTOR,
        ));
        commands.push(self.background_command(
            TextureId::BackgroundMid,
            BACKGROUND_MID_SCROLL_FACTOR,
        ));
        commands.push(self.background_command(
            TextureId::BackgroundNear,
            BACKGROUND_NEAR_SCROLL_FACTOR,
        ));

        let body = self.movement.body();
        commands.push(RenderCommand {
            x: body.x,
            y: body.y,
            width: self.config.player_width,
            height: self.config.player_height,
            texture: TextureId::Player,
            scroll_factor: PLAYER_SCROLL_FACTOR,
        });

        commands.push(RenderCommand {
            x: HUD_MARGIN_PX,
            y: HUD_MARGIN_PX,
            width: HUD_BAR_WIDTH_PX,
            height: HUD_BAR_HEIGHT_PX,
            texture: TextureId::Hud,
            scroll_factor: 0.0,
        });
    }
}
