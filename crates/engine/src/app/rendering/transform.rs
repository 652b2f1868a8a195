#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Screen-space x for a command after the camera scroll is applied,
/// scaled by the command's parallax factor.
pub fn parallax_dest_x(command_x: f32, scroll_factor: f32, camera_offset_x: f32) -> f32 {
    command_x - scroll_factor * camera_offset_x
}

/// Leftmost tile origin for a horizontally repeating background layer.
/// The result is always in `(-texture_width, 0]` for non-negative
/// camera offsets, so tiles stepped right from it cover the viewport
/// without a seam.
pub fn tile_start_x(scroll_factor: f32, camera_offset_x: f32, texture_width: u32) -> i32 {
    if texture_width == 0 {
        return 0;
    }
    let scrolled = (scroll_factor * camera_offset_x) as i32;
    -(scrolled.rem_euclid(texture_width as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_scroll_factor_pins_command_to_screen() {
        assert_eq!(parallax_dest_x(100.0, 0.0, 1280.0), 100.0);
    }

    #[test]
    fn full_scroll_factor_applies_whole_camera_offset() {
        assert_eq!(parallax_dest_x(100.0, 1.0, 40.0), 60.0);
    }

    #[test]
    fn half_scroll_factor_moves_layer_at_half_speed() {
        assert_eq!(parallax_dest_x(0.0, 0.5, 200.0), -100.0);
    }

    #[test]
    fn tile_start_is_zero_with_no_scroll() {
        assert_eq!(tile_start_x(0.2, 0.0, 512), 0);
    }

    #[test]
    fn tile_start_wraps_within_texture_width() {
        // 0.5 * 100 = 50 scrolled pixels against a 512-wide texture.
        assert_eq!(tile_start_x(0.5, 100.0, 512), -50);
        // One full texture width of scroll wraps back to zero.
        assert_eq!(tile_start_x(1.0, 512.0, 512), 0);
        // A bit past one wrap leaves only the remainder.
        assert_eq!(tile_start_x(1.0, 530.0, 512), -18);
    }

    #[test]
    fn tile_start_stays_in_half_open_range() {
        for offset in [0.0f32, 1.0, 63.0, 64.0, 65.0, 1280.0, 5000.0] {
            let start = tile_start_x(0.8, offset, 64);
            assert!(start > -64 && start <= 0, "start={start} offset={offset}");
        }
    }

    #[test]
    fn zero_width_texture_does_not_divide_by_zero() {
        assert_eq!(tile_start_x(1.0, 100.0, 0), 0);
    }
}
