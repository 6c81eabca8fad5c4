use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::assets::asset_definitions::AssetKind;
use crate::engine::assets::portal_assets::{PortalAssets, TrackedAsset, TrackedStatus};
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::loading::progress::LoadEvent;

/// What the asset server currently reports for one handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedLoad {
    Pending,
    Finished,
    Failed(String),
}

/// Request every declared asset from the asset server.
/// Expects a manifest that passed validation.
pub fn issue_asset_loads(manifest: &SceneManifest, asset_server: &AssetServer) -> PortalAssets {
    let mut portal_assets = PortalAssets::default();

    for descriptor in &manifest.assets {
        let handle = match descriptor.kind {
            AssetKind::Texture => {
                let texture: Handle<Image> = asset_server.load(&descriptor.url);
                if descriptor.identifier == manifest.baked_texture {
                    portal_assets.baked_texture = texture.clone();
                }
                texture.untyped()
            }
            AssetKind::MeshBundle => {
                let bundle: Handle<Gltf> = asset_server.load(&descriptor.url);
                portal_assets.mesh_bundle = bundle.clone();
                bundle.untyped()
            }
        };

        info!(
            "Requested {} `{}` from {}",
            descriptor.kind.as_str(),
            descriptor.identifier,
            descriptor.url
        );

        portal_assets.items.push(TrackedAsset {
            descriptor: descriptor.clone(),
            handle,
            status: TrackedStatus::Pending,
        });
    }

    portal_assets
}

/// Emit the start notifications and the initial 0% report for a fresh session.
pub fn announce_session(portal_assets: &PortalAssets, load_events: &mut EventWriter<LoadEvent>) {
    for item in &portal_assets.items {
        load_events.write(LoadEvent::ItemStarted {
            identifier: item.descriptor.identifier.clone(),
        });
    }
    load_events.write(LoadEvent::ItemProgress {
        items_loaded: 0,
        items_total: portal_assets.total_items(),
    });
}

fn observe_load(asset_server: &AssetServer, handle: &UntypedHandle) -> ObservedLoad {
    let id = handle.id();

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(id) {
        return ObservedLoad::Failed(err.to_string());
    }
    if let Some(RecursiveDependencyLoadState::Failed(err)) =
        asset_server.get_recursive_dependency_load_state(id)
    {
        return ObservedLoad::Failed(err.to_string());
    }
    if asset_server.is_loaded_with_dependencies(id) {
        ObservedLoad::Finished
    } else {
        ObservedLoad::Pending
    }
}

/// Apply one observation to a tracked item. Returns true when the item settled
/// on this observation.
pub fn settle_item(item: &mut TrackedAsset, observed: &ObservedLoad) -> bool {
    if item.status.is_settled() {
        return false;
    }

    match observed {
        ObservedLoad::Pending => false,
        ObservedLoad::Finished => {
            item.status = TrackedStatus::Finished;
            true
        }
        ObservedLoad::Failed(_) => {
            item.status = TrackedStatus::Failed;
            true
        }
    }
}

/// Apply one frame of observations, in declaration order, to the tracked
/// items. Returns the settled count after each newly settled item, so the
/// values are strictly increasing and the last equals the running total.
pub fn settle_frame(items: &mut [TrackedAsset], observations: &[ObservedLoad]) -> Vec<usize> {
    let mut settled = items.iter().filter(|item| item.status.is_settled()).count();
    let mut steps = Vec::new();

    for (item, observed) in items.iter_mut().zip(observations) {
        if !settle_item(item, observed) {
            continue;
        }

        match observed {
            ObservedLoad::Failed(reason) => error!(
                "Failed to load {} `{}`: {}",
                item.descriptor.kind.as_str(),
                item.descriptor.identifier,
                reason
            ),
            _ => info!("✓ Loaded `{}`", item.descriptor.identifier),
        }

        settled += 1;
        steps.push(settled);
    }

    steps
}

/// Poll the asset server and report each newly settled item as progress.
/// Failed items count as settled so the session still completes.
pub fn poll_asset_loads(
    mut portal_assets: ResMut<PortalAssets>,
    asset_server: Res<AssetServer>,
    mut load_events: EventWriter<LoadEvent>,
) {
    let total = portal_assets.total_items();
    if total == 0 || portal_assets.settled_items() == total {
        return;
    }

    let observations: Vec<ObservedLoad> = portal_assets
        .items
        .iter()
        .map(|item| observe_load(&asset_server, &item.handle))
        .collect();

    for items_loaded in settle_frame(&mut portal_assets.items, &observations) {
        load_events.write(LoadEvent::ItemProgress {
            items_loaded,
            items_total: total,
        });
    }
}
