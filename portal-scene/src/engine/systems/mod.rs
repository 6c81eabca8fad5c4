//! Runtime systems shared across application states.

/// Viewport size tracking and pixel ratio capping.
///
/// Keeps the camera aspect and render resolution in step with the window.
pub mod viewport;
