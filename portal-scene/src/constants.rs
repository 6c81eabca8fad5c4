//! Compile-time configuration for the portal scene.

/// Asset paths relative to the asset root.
pub mod path;

/// Camera, orbit and viewport settings.
pub mod render_settings;

/// Scene placement, material colours and reveal timings.
pub mod scene_settings;

/// Page element selectors for web builds.
pub mod frontend;
