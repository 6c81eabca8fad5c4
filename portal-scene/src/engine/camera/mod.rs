//! Orbit camera for inspecting the portal scene.
//!
//! Provides damped mouse orbit, pan and dolly around a target point, limited
//! so the view stays in front of and above the scene.

/// Orbit camera resource and controller system.
pub mod orbit_camera;
