use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowBackendScaleFactorChanged, WindowResized};

use crate::constants::render_settings::MAX_PIXEL_RATIO;

/// Current drawable area of the primary window.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub logical_width: f32,
    pub logical_height: f32,
    pub pixel_ratio: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            logical_width: 1280.0,
            logical_height: 720.0,
            pixel_ratio: 1.0,
        }
    }
}

impl ViewportSize {
    pub fn aspect_ratio(&self) -> f32 {
        if self.logical_height <= 0.0 {
            return 1.0;
        }
        self.logical_width / self.logical_height
    }

    /// Render target size in device pixels.
    pub fn physical_size(&self) -> UVec2 {
        UVec2::new(
            (self.logical_width * self.pixel_ratio).round().max(0.0) as u32,
            (self.logical_height * self.pixel_ratio).round().max(0.0) as u32,
        )
    }
}

/// Device pixel ratio capped at `MAX_PIXEL_RATIO`.
pub fn clamp_pixel_ratio(device_ratio: f32) -> f32 {
    if !device_ratio.is_finite() || device_ratio <= 0.0 {
        return 1.0;
    }
    device_ratio.min(MAX_PIXEL_RATIO)
}

/// Read the window's logical size and its capped pixel ratio. The window's
/// own scale factor is left untouched; the swapchain stays at the native
/// surface size and `physical_size` reports the capped render resolution.
pub fn measure(window: &Window) -> ViewportSize {
    ViewportSize {
        logical_width: window.width(),
        logical_height: window.height(),
        pixel_ratio: clamp_pixel_ratio(window.scale_factor()),
    }
}

pub fn init_viewport_size(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportSize>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    *viewport = measure(window);
    info!(
        "Viewport {}x{} at pixel ratio {}",
        viewport.logical_width, viewport.logical_height, viewport.pixel_ratio
    );
}

pub fn handle_window_resize(
    mut resized: EventReader<WindowResized>,
    mut rescaled: EventReader<WindowBackendScaleFactorChanged>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportSize>,
) {
    let resize_count = resized.read().count();
    let rescale_count = rescaled.read().count();
    if resize_count + rescale_count == 0 {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };

    let measured = measure(window);
    if measured != *viewport {
        *viewport = measured;
        debug!(
            "Viewport resized to {}x{} (aspect {:.3}, {:?} device px)",
            measured.logical_width,
            measured.logical_height,
            measured.aspect_ratio(),
            measured.physical_size()
        );
    }
}
