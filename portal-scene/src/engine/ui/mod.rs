//! Loading presentation for native and web targets.
//!
//! The in-engine overlay and progress bar render on every platform; web builds
//! also mirror progress onto the host page's loading elements.

/// Page style writes for the host document (wasm32 only, no-op elsewhere).
pub mod frontend;

/// Full-screen overlay and progress bar UI nodes.
pub mod loading_overlay;
