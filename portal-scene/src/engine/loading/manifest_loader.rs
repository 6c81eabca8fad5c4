use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::constants::path::RELATIVE_MANIFEST_PATH;
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::loading::asset_loader::{announce_session, issue_asset_loads};
use crate::engine::loading::progress::{LoadEvent, LoadingProgress};
use crate::engine::scene::materials::create_material_catalog;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SceneManifest>>,
    failure_reported: bool,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading scene manifest from: {}", RELATIVE_MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(RELATIVE_MANIFEST_PATH));
}

/// Validate the manifest, build the material catalog and request every asset.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    mut manifest_loader: ResMut<ManifestLoader>,
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut load_events: EventWriter<LoadEvent>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<SceneManifest>>,
) {
    if loading_progress.manifest_loaded {
        return;
    }

    let Some(handle) = manifest_loader.handle.clone() else {
        return;
    };

    let Some(manifest) = manifests.get(&handle) else {
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&handle) {
            if !manifest_loader.failure_reported {
                error!("Scene manifest failed to load: {}", err);
                manifest_loader.failure_reported = true;
            }
        }
        return;
    };

    loading_progress.manifest_loaded = true;

    if let Err(err) = manifest.validate() {
        error!("Scene manifest rejected: {}", err);
        return;
    }
    info!(
        "✓ Scene manifest loaded: {} assets, {} bindings",
        manifest.total_items(),
        manifest.bindings.len()
    );

    let portal_assets = issue_asset_loads(manifest, &asset_server);
    let catalog = create_material_catalog(&mut materials, portal_assets.baked_texture.clone());
    announce_session(&portal_assets, &mut load_events);

    commands.insert_resource(manifest.clone());
    commands.insert_resource(catalog);
    commands.insert_resource(portal_assets);
}
