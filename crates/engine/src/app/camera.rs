/// Horizontal follow camera for a side-scrolling viewport. Keeps the
/// tracked x centered and clamps the offset to the scrollable range
/// `[0, world_width - viewport_width]`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    offset_x: f32,
    viewport_width: f32,
    min_offset_x: f32,
    max_offset_x: f32,
}

impl Camera {
    pub fn new(world_width: f32, viewport_width: f32) -> Self {
        Self {
            offset_x: 0.0,
            viewport_width,
            min_offset_x: 0.0,
            max_offset_x: (world_width - viewport_width).max(0.0),
        }
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn set_offset_x(&mut self, value: f32) {
        self.offset_x = value.clamp(self.min_offset_x, self.max_offset_x);
    }

    pub fn update(&mut self, player_x: f32) {
        let target_offset = player_x - self.viewport_width / 2.0;
        self.offset_x = target_offset.clamp(self.min_offset_x, self.max_offset_x);
    }
}
