use std::f32::consts::TAU;

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::constants::render_settings::{CAMERA_FOV_DEGREES, OrbitLimits};
use crate::engine::systems::viewport::ViewportSize;

/// Keeps the polar angle off the poles so `looking_at` has a stable up vector.
const POLAR_EPSILON: f32 = 1e-4;

/// Offset from the orbit target for spherical coordinates, azimuth measured
/// around +Y from +Z and polar measured down from +Y.
pub fn spherical_offset(azimuth: f32, polar: f32, distance: f32) -> Vec3 {
    let sin_polar = polar.sin();
    Vec3::new(
        distance * sin_polar * azimuth.sin(),
        distance * polar.cos(),
        distance * sin_polar * azimuth.cos(),
    )
}

/// Damped orbit around a target point.
///
/// Input accumulates into pending deltas; each `update` applies a
/// `damping_factor` share of them, decays the rest, and clamps the result.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
    pub limits: OrbitLimits,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_pan: Vec3,
    pending_scale: f32,
}

impl OrbitCamera {
    pub fn new(position: Vec3, target: Vec3, limits: OrbitLimits) -> Self {
        let offset = position - target;
        let distance = offset.length();
        let (azimuth, polar) = if distance > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / distance).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, 0.0)
        };

        let mut orbit = Self {
            target,
            azimuth,
            polar,
            distance,
            limits,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_pan: Vec3::ZERO,
            pending_scale: 1.0,
        };
        orbit.clamp();
        orbit
    }

    /// Queue a rotation; positive values swing the camera left and up.
    pub fn rotate(&mut self, left: f32, up: f32) {
        self.pending_azimuth -= left;
        self.pending_polar -= up;
    }

    /// Queue a target translation in world space.
    pub fn pan(&mut self, offset: Vec3) {
        self.pending_pan += offset;
    }

    /// Queue a distance scale; below 1 moves closer.
    pub fn dolly(&mut self, scale: f32) {
        if scale > 0.0 {
            self.pending_scale *= scale;
        }
    }

    pub fn position(&self) -> Vec3 {
        self.target + spherical_offset(self.azimuth, self.polar, self.distance)
    }

    pub fn update(&mut self) {
        let damping = self.limits.damping_factor;

        self.azimuth += self.pending_azimuth * damping;
        self.polar += self.pending_polar * damping;
        self.target += self.pending_pan * damping;
        self.distance *= self.pending_scale;

        self.pending_azimuth *= 1.0 - damping;
        self.pending_polar *= 1.0 - damping;
        self.pending_pan *= 1.0 - damping;
        self.pending_scale = 1.0;

        self.clamp();
    }

    fn clamp(&mut self) {
        let limits = &self.limits;
        self.azimuth = self.azimuth.clamp(limits.min_azimuth, limits.max_azimuth);
        self.polar = self
            .polar
            .clamp(limits.min_polar, limits.max_polar)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
        self.distance = self.distance.clamp(limits.min_distance, limits.max_distance);
    }
}

pub fn orbit_camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    viewport: Res<ViewportSize>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let height = viewport.logical_height.max(1.0);

    // Left drag orbits, a full viewport height is one turn
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.rotate(TAU * mouse_delta.x / height, TAU * mouse_delta.y / height);
    }

    // Right drag pans in the view plane, scaled so the target tracks the cursor
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        let target_distance = orbit.distance * (CAMERA_FOV_DEGREES.to_radians() * 0.5).tan();
        let right = *camera_transform.right();
        let up = *camera_transform.up();
        let offset = -right * (2.0 * mouse_delta.x * target_distance / height)
            + up * (2.0 * mouse_delta.y * target_distance / height);
        orbit.pan(offset);
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.01,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        let zoom_step = orbit.limits.zoom_step;
        orbit.dolly(zoom_step.powf(scroll_accum));
    }

    orbit.update();

    *camera_transform =
        Transform::from_translation(orbit.position()).looking_at(orbit.target, Vec3::Y);
}
