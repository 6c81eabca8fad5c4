use bevy::prelude::*;
use std::f32::consts::PI;

/// Limits and feel of the orbit controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of the pending motion applied each frame.
    pub damping_factor: f32,
    /// Distance scale applied per wheel line.
    pub zoom_step: f32,
}

pub const ORBIT_LIMITS: OrbitLimits = OrbitLimits {
    min_polar: 0.0,
    max_polar: PI * 0.49,
    min_azimuth: -PI * 0.5,
    max_azimuth: PI * 0.5,
    min_distance: 1.0,
    max_distance: 10.0,
    damping_factor: 0.05,
    zoom_step: 0.95,
};

pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START_POSITION: Vec3 = Vec3::new(4.0, 2.0, 4.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

/// Upper bound on device pixels per logical pixel.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

pub const CLEAR_COLOUR: Color = Color::srgb(0.07, 0.06, 0.09);
