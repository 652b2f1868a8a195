/// Physics tuning for the player integrator. Held as data rather than
/// module constants so tests can override individual values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MovementTuning {
    /// Horizontal acceleration while a direction key is held, px/s^2.
    pub acceleration: f32,
    /// Deceleration applied against the current velocity sign, px/s^2.
    /// Higher = less slippery.
    pub friction: f32,
    /// Downward acceleration, px/s^2.
    pub gravity: f32,
    /// Falling speed cap, px/s. Upward speed is not clamped.
    pub terminal_velocity: f32,
    /// Instant vertical velocity on jump, px/s. Negative is up.
    pub jump_force: f32,
    /// Horizontal speed cap, px/s.
    pub max_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            acceleration: 5000.0,
            friction: 10_000.0,
            gravity: 980.0,
            terminal_velocity: 5399.8,
            jump_force: -500.0,
            max_speed: 500.0,
        }
    }
}

/// World and player geometry. The viewport width equals `screen_width`;
/// the world scrolls horizontally up to `world_width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WorldConfig {
    pub world_width: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub tuning: MovementTuning,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: 2560.0,
            screen_width: 1280.0,
            screen_height: 720.0,
            player_width: 50.0,
            player_height: 50.0,
            tuning: MovementTuning::default(),
        }
    }
}

impl WorldConfig {
    /// Rightmost x the player's top-left corner may occupy.
    pub(crate) fn max_player_x(&self) -> f32 {
        self.world_width - self.player_width
    }

    /// Lowest y (ground line) the player's top-left corner may occupy.
    pub(crate) fn max_player_y(&self) -> f32 {
        self.screen_height - self.player_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_world_matches_demo_dimensions() {
        let config = WorldConfig::default();
        assert_eq!(config.world_width, 2560.0);
        assert_eq!(config.screen_width, 1280.0);
        assert_eq!(config.screen_height, 720.0);
        assert_eq!(config.max_player_x(), 2510.0);
        assert_eq!(config.max_player_y(), 670.0);
    }

    #[test]
    fn default_tuning_matches_demo_physics() {
        let tuning = MovementTuning::default();
        assert_eq!(tuning.gravity, 980.0);
        assert_eq!(tuning.jump_force, -500.0);
        assert_eq!(tuning.max_speed, 500.0);
        assert_eq!(tuning.terminal_velocity, 5399.8);
    }
}
