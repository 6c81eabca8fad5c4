/// Scene manifest describing the assets to fetch and how to bind materials.
pub const RELATIVE_MANIFEST_PATH: &str = "portal/manifest.json";
