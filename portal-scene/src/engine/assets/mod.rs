//! Asset declarations for the portal scene.
//!
//! Handles the scene manifest, the asset descriptors it declares and the
//! handles issued for them once loading starts.

/// Asset descriptors and their kinds.
pub mod asset_definitions;

/// Texture and mesh bundle handles with per-item load status.
pub mod portal_assets;

/// Scene manifest with binding table and validation.
pub mod scene_manifest;
