use std::collections::HashSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::assets::asset_definitions::{AssetDescriptor, AssetKind};
use crate::engine::scene::materials::MaterialRole;

/// Binds one named scene node to a catalog role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialBinding {
    pub node: String,
    pub role: MaterialRole,
}

#[cfg(test)]
impl MaterialBinding {
    pub fn new(node: impl Into<String>, role: MaterialRole) -> Self {
        Self {
            node: node.into(),
            role,
        }
    }
}

/// How materials reach the nodes of the mesh bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BindingPolicy {
    /// Resolve each binding by node name. Bindings whose node is missing are
    /// skipped and reported; the rest still apply.
    #[default]
    Named,
    /// Give every node of the bundle the same role, ignoring the binding table.
    Blanket { role: MaterialRole },
}

/// Precondition violations detected before any asset load is issued.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("scene manifest declares no assets")]
    NoAssets,
    #[error("asset declared with an empty identifier")]
    EmptyIdentifier,
    #[error("asset identifier `{0}` is declared more than once")]
    DuplicateIdentifier(String),
    #[error("baked texture `{0}` is not a declared asset")]
    UnknownBakedTexture(String),
    #[error("baked texture `{identifier}` is declared as a {kind}")]
    BakedTextureKind {
        identifier: String,
        kind: &'static str,
    },
    #[error("scene manifest declares no mesh bundle")]
    NoMeshBundle,
    #[error("scene manifest declares {0} mesh bundles, expected one")]
    MultipleMeshBundles(usize),
}

/// Scene manifest as a Bevy asset. Mirrors `manifest.json` exactly.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource)]
pub struct SceneManifest {
    pub assets: Vec<AssetDescriptor>,
    /// Identifier of the texture sampled by the baked-surface material.
    pub baked_texture: String,
    #[serde(default)]
    pub binding_policy: BindingPolicy,
    #[serde(default)]
    pub bindings: Vec<MaterialBinding>,
}

impl SceneManifest {
    /// Check the declared asset set before loading starts.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.assets.is_empty() {
            return Err(ManifestError::NoAssets);
        }

        let mut seen = HashSet::new();
        for asset in &self.assets {
            if asset.identifier.is_empty() {
                return Err(ManifestError::EmptyIdentifier);
            }
            if !seen.insert(asset.identifier.as_str()) {
                return Err(ManifestError::DuplicateIdentifier(asset.identifier.clone()));
            }
        }

        let baked = self
            .asset_by_identifier(&self.baked_texture)
            .ok_or_else(|| ManifestError::UnknownBakedTexture(self.baked_texture.clone()))?;
        if baked.kind != AssetKind::Texture {
            return Err(ManifestError::BakedTextureKind {
                identifier: baked.identifier.clone(),
                kind: baked.kind.as_str(),
            });
        }

        match self.count_of(AssetKind::MeshBundle) {
            0 => Err(ManifestError::NoMeshBundle),
            1 => Ok(()),
            n => Err(ManifestError::MultipleMeshBundles(n)),
        }
    }

    /// Number of items the load tracker should expect.
    pub fn total_items(&self) -> usize {
        self.assets.len()
    }

    pub fn asset_by_identifier(&self, identifier: &str) -> Option<&AssetDescriptor> {
        self.assets
            .iter()
            .find(|asset| asset.identifier == identifier)
    }

    fn count_of(&self, kind: AssetKind) -> usize {
        self.assets.iter().filter(|asset| asset.kind == kind).count()
    }
}
