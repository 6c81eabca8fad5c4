//! Scene assembly and reveal for the portal scene.
//!
//! Binds catalog materials onto the named nodes of the loaded mesh bundle and
//! fades the loading overlay out once every asset has arrived.

/// Named-node material binding and mesh bundle scene spawning.
pub mod assembly;

/// Material roles and the shared material catalog.
pub mod materials;

/// Overlay and progress bar fades run on completion.
pub mod reveal;
