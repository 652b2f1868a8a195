use engine::InputSnapshot;

use super::config::{MovementTuning, WorldConfig};

/// Player kinematic state. `grounded` is true while the body rests on
/// the ground line (the lower y bound) and gates the jump.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct KinematicBody {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub grounded: bool,
}

/// Semi-implicit Euler integrator for the player. Rates are applied as
/// `rate * dt` increments against the velocity, then position advances
/// by `velocity * dt`; the caller supplies a delta already capped by
/// the loop (100ms) to keep the step stable.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlayerMovement {
    tuning: MovementTuning,
    max_x: f32,
    max_y: f32,
    body: KinematicBody,
}

impl PlayerMovement {
    pub(crate) fn new(config: &WorldConfig) -> Self {
        Self {
            tuning: config.tuning,
            max_x: config.max_player_x(),
            max_y: config.max_player_y(),
            body: KinematicBody::default(),
        }
    }

    pub(crate) fn body(&self) -> &KinematicBody {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }

    /// Advances the body one step. Left wins when both directions are
    /// held (deliberate tie-break carried over from the demo's original
    /// behavior); gravity is applied inside every branch.
    pub(crate) fn update(&mut self, dt: f32, input: &InputSnapshot) {
        let tuning = self.tuning;
        let body = &mut self.body;

        if input.left() {
            body.velocity_x -= tuning.acceleration * dt;
            body.velocity_y += tuning.gravity * dt;
            if body.velocity_x >= 0.0 {
                body.velocity_x -= tuning.friction * dt;
            }
            if body.velocity_x < -tuning.max_speed {
                body.velocity_x = -tuning.max_speed;
            }
        } else if input.right() {
            body.velocity_x += tuning.acceleration * dt;
            body.velocity_y += tuning.gravity * dt;
            if body.velocity_x <= 0.0 {
                body.velocity_x += tuning.friction * dt;
            }
            if body.velocity_x > tuning.max_speed {
                body.velocity_x = tuning.max_speed;
            }
        } else {
            body.velocity_y += tuning.gravity * dt;

            if body.velocity_x > 0.0 {
                body.velocity_x -= tuning.friction * dt;
                if body.velocity_x < 0.0 {
                    body.velocity_x = 0.0;
                }
            } else if body.velocity_x < 0.0 {
                body.velocity_x += tuning.friction * dt;
                if body.velocity_x > 0.0 {
                    body.velocity_x = 0.0;
                }
            }
        }

        // Falling clamp only; a jump impulse may exceed this upward.
        if body.velocity_y > tuning.terminal_velocity {
            body.velocity_y = tuning.terminal_velocity;
        }

        if input.jump() && body.grounded {
            body.velocity_y = tuning.jump_force;
            body.grounded = false;
        }

        body.x += body.velocity_x * dt;
        body.y += body.velocity_y * dt;

        if body.x < 0.0 {
            body.x = 0.0;
            body.velocity_x = 0.0;
        }
        if body.x > self.max_x {
            body.x = self.max_x;
            body.velocity_x = 0.0;
        }
        if body.y < 0.0 {
            body.y = 0.0;
            body.velocity_y = 0.0;
        }
        if body.y > self.max_y {
            body.y = self.max_y;
            body.velocity_y = 0.0;
            body.grounded = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::InputAction;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn movement() -> PlayerMovement {
        PlayerMovement::new(&WorldConfig::default())
    }

    fn grounded_movement() -> PlayerMovement {
        let config = WorldConfig::default();
        let mut movement = PlayerMovement::new(&config);
        movement.body_mut().y = config.max_player_y();
        movement.body_mut().grounded = true;
        movement
    }

    fn input_with(action: InputAction) -> InputSnapshot {
        InputSnapshot::empty().with_action_down(action, true)
    }

    fn in_bounds(body: &KinematicBody, config: &WorldConfig) -> bool {
        body.x >= 0.0
            && body.x <= config.max_player_x()
            && body.y >= 0.0
            && body.y <= config.max_player_y()
    }

    #[test]
    fn free_fall_from_rest_advances_by_gravity_dt_squared() {
        let mut movement = movement();
        movement.body_mut().x = 100.0;
        movement.body_mut().y = 100.0;

        movement.update(DT, &InputSnapshot::empty());

        let body = movement.body();
        assert_eq!(body.x, 100.0);
        // vy = g*dt, y += vy*dt => g*dt^2 ~= 0.2722
        assert!((body.y - 100.0 - 980.0 * DT * DT).abs() < 1e-3);
        assert!(!body.grounded);
    }

    #[test]
    fn jump_from_ground_applies_impulse_and_clears_grounded() {
        let mut movement = grounded_movement();

        movement.update(DT, &input_with(InputAction::Jump));

        let body = movement.body();
        assert_eq!(body.velocity_y, -500.0);
        assert!(!body.grounded);
        assert!(body.y < WorldConfig::default().max_player_y());
    }

    #[test]
    fn airborne_jump_request_is_ignored() {
        let mut movement = movement();
        movement.body_mut().y = 300.0;
        movement.body_mut().velocity_y = -120.0;

        movement.update(DT, &input_with(InputAction::Jump));

        // Gravity still applies, but no new impulse.
        let body = movement.body();
        assert!((body.velocity_y - (-120.0 + 980.0 * DT)).abs() < 1e-3);
    }

    #[test]
    fn landing_zeroes_vertical_velocity_and_sets_grounded() {
        let config = WorldConfig::default();
        let mut movement = movement();
        movement.body_mut().y = config.max_player_y() - 1.0;
        movement.body_mut().velocity_y = 400.0;

        movement.update(DT, &InputSnapshot::empty());

        let body = movement.body();
        assert_eq!(body.y, config.max_player_y());
        assert_eq!(body.velocity_y, 0.0);
        assert!(body.grounded);
    }

    #[test]
    fn ceiling_clamp_zeroes_velocity_without_grounding() {
        let mut movement = movement();
        movement.body_mut().y = 2.0;
        movement.body_mut().velocity_y = -1000.0;

        movement.update(DT, &InputSnapshot::empty());

        let body = movement.body();
        assert_eq!(body.y, 0.0);
        assert_eq!(body.velocity_y, 0.0);
        assert!(!body.grounded);
    }

    #[test]
    fn vertical_speed_never_exceeds_terminal_velocity() {
        let mut movement = movement();
        movement.body_mut().y = 100.0;
        movement.body_mut().velocity_y = 5399.0;

        movement.update(0.1, &InputSnapshot::empty());

        assert!(movement.body().velocity_y <= 5399.8);
    }

    #[test]
    fn held_right_saturates_at_max_speed() {
        let mut movement = grounded_movement();
        let input = input_with(InputAction::MoveRight);

        for _ in 0..30 {
            movement.update(DT, &input);
            assert!(movement.body().velocity_x <= 500.0);
        }
        assert_eq!(movement.body().velocity_x, 500.0);
    }

    #[test]
    fn held_left_saturates_at_negative_max_speed() {
        let config = WorldConfig::default();
        let mut movement = grounded_movement();
        movement.body_mut().x = config.max_player_x();
        let input = input_with(InputAction::MoveLeft);

        for _ in 0..30 {
            movement.update(DT, &input);
            assert!(movement.body().velocity_x >= -500.0);
        }
        assert_eq!(movement.body().velocity_x, -500.0);
    }

    #[test]
    fn friction_decays_to_zero_without_sign_overshoot() {
        let mut movement = grounded_movement();
        movement.body_mut().x = 600.0;
        movement.body_mut().velocity_x = 50.0;

        // friction*dt = 166.7 would overshoot; must clamp at zero.
        movement.update(DT, &InputSnapshot::empty());

        assert_eq!(movement.body().velocity_x, 0.0);
    }

    #[test]
    fn reversing_direction_applies_friction_on_top_of_acceleration() {
        let mut movement = grounded_movement();
        movement.body_mut().x = 600.0;
        movement.body_mut().velocity_x = 100.0;

        movement.update(DT, &input_with(InputAction::MoveLeft));

        // accel alone: 100 - 5000/60 = 16.67 (still >= 0), so friction
        // also fires: 16.67 - 10000/60 = -150.
        let expected = 100.0 - (5000.0 + 10_000.0) * DT;
        assert!((movement.body().velocity_x - expected).abs() < 1e-3);
    }

    #[test]
    fn simultaneous_left_and_right_prioritizes_left() {
        let mut movement = grounded_movement();
        movement.body_mut().x = 600.0;
        let input = InputSnapshot::empty()
            .with_action_down(InputAction::MoveLeft, true)
            .with_action_down(InputAction::MoveRight, true);

        movement.update(DT, &input);

        assert!(movement.body().velocity_x < 0.0);
        assert!(movement.body().x < 600.0);
    }

    #[test]
    fn left_wall_clamp_zeroes_horizontal_velocity() {
        let mut movement = grounded_movement();
        movement.body_mut().x = 1.0;
        movement.body_mut().velocity_x = -500.0;

        movement.update(DT, &InputSnapshot::empty());

        assert_eq!(movement.body().x, 0.0);
        assert_eq!(movement.body().velocity_x, 0.0);
    }

    #[test]
    fn right_bound_is_world_width_minus_player_width() {
        let config = WorldConfig::default();
        let mut movement = grounded_movement();
        movement.body_mut().x = config.max_player_x() - 1.0;
        movement.body_mut().velocity_x = 500.0;

        movement.update(DT, &input_with(InputAction::MoveRight));

        assert_eq!(movement.body().x, 2510.0);
        assert_eq!(movement.body().velocity_x, 0.0);
    }

    #[test]
    fn position_stays_in_bounds_under_arbitrary_input_sequences() {
        let config = WorldConfig::default();
        let mut movement = movement();
        let inputs = [
            InputSnapshot::empty(),
            input_with(InputAction::MoveLeft),
            input_with(InputAction::MoveRight),
            input_with(InputAction::Jump),
            InputSnapshot::empty()
                .with_action_down(InputAction::MoveRight, true)
                .with_action_down(InputAction::Jump, true),
            InputSnapshot::empty()
                .with_action_down(InputAction::MoveLeft, true)
                .with_action_down(InputAction::MoveRight, true),
        ];

        for step in 0..600 {
            let input = inputs[step % inputs.len()];
            let dt = if step % 7 == 0 { 0.1 } else { DT };
            movement.update(dt, &input);
            assert!(
                in_bounds(movement.body(), &config),
                "step {step}: body out of bounds: {:?}",
                movement.body()
            );
        }
    }

    #[test]
    fn zero_dt_leaves_state_unchanged() {
        let mut movement = movement();
        movement.body_mut().x = 100.0;
        movement.body_mut().y = 100.0;
        movement.body_mut().velocity_x = 42.0;
        let before = *movement.body();

        movement.update(0.0, &input_with(InputAction::MoveRight));

        assert_eq!(*movement.body(), before);
    }

    #[test]
    fn tuning_overrides_flow_through_the_integrator() {
        let mut config = WorldConfig::default();
        config.tuning.gravity = 0.0;
        config.tuning.jump_force = -10.0;
        let mut movement = PlayerMovement::new(&config);
        movement.body_mut().y = config.max_player_y();
        movement.body_mut().grounded = true;

        movement.update(DT, &input_with(InputAction::Jump));

        assert_eq!(movement.body().velocity_y, -10.0);
    }

    #[test]
    fn holding_jump_rejumps_on_landing() {
        let config = WorldConfig::default();
        let mut movement = grounded_movement();
        let input = input_with(InputAction::Jump);

        movement.update(DT, &input);
        assert!(!movement.body().grounded);

        // Ride the arc back down to the ground line.
        for _ in 0..200 {
            movement.update(DT, &input);
            if movement.body().velocity_y == config.tuning.jump_force {
                return;
            }
        }
        panic!("player never re-jumped after landing");
    }
}
