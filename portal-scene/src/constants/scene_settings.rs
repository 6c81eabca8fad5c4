use std::f32::consts::PI;

/// Rotation of the portal scene root around the vertical axis.
pub const SCENE_ROTATION_Y: f32 = PI * 1.1;

pub const OVERLAY_FADE_SECONDS: f32 = 3.0;
pub const PROGRESS_BAR_FADE_SECONDS: f32 = 2.0;

pub const POLE_LIGHT_RGB: [u8; 3] = [0xff, 0xff, 0xe5];
pub const PORTAL_LIGHT_RGB: [u8; 3] = [0xbe, 0x82, 0xff];

/// Thickness of the in-engine progress bar (logical pixels).
pub const PROGRESS_BAR_HEIGHT: f32 = 2.0;
