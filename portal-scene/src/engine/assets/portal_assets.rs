use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::assets::asset_definitions::AssetDescriptor;

/// Load status of one declared asset as seen by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackedStatus {
    #[default]
    Pending,
    Finished,
    Failed,
}

impl TrackedStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Declared asset paired with the handle issued for it.
#[derive(Debug, Clone)]
pub struct TrackedAsset {
    pub descriptor: AssetDescriptor,
    pub handle: UntypedHandle,
    pub status: TrackedStatus,
}

/// Handles for every asset of the portal scene.
/// Empty until the manifest has been validated and loads are issued.
#[derive(Resource, Default)]
pub struct PortalAssets {
    pub items: Vec<TrackedAsset>,
    pub baked_texture: Handle<Image>,
    pub mesh_bundle: Handle<Gltf>,
    pub scene_spawned: bool,
}

impl PortalAssets {
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Items that finished or failed; both count toward progress.
    pub fn settled_items(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.status.is_settled())
            .count()
    }
}
