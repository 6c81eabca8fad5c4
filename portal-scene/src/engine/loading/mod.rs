//! Asset loading and progress tracking for the portal scene.
//!
//! Loads the scene manifest, requests the texture and mesh bundle it declares,
//! and turns asset server load states into ordered progress notifications.

/// Asset requests and load-state polling.
///
/// Converts settled loads into `LoadEvent::ItemProgress` notifications.
pub mod asset_loader;

/// Scene manifest loading and validation.
///
/// Issues asset loads and builds the material catalog once the manifest is accepted.
pub mod manifest_loader;

/// Load tracker state machine and the loading progress resource.
pub mod progress;
