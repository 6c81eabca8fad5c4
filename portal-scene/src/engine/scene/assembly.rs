use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use thiserror::Error;

use crate::constants::scene_settings::SCENE_ROTATION_Y;
use crate::engine::assets::portal_assets::PortalAssets;
use crate::engine::assets::scene_manifest::{BindingPolicy, MaterialBinding, SceneManifest};
use crate::engine::core::app_state::AppState;
use crate::engine::scene::materials::{MaterialCatalog, MaterialRole};

/// Named sub-part of the loaded mesh bundle and the material bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub entity: Entity,
    pub identifier: String,
    pub material: Option<Handle<StandardMaterial>>,
}

impl SceneNode {
    pub fn new(entity: Entity, identifier: impl Into<String>) -> Self {
        Self {
            entity,
            identifier: identifier.into(),
            material: None,
        }
    }
}

/// Bindings that could not be applied. Recoverable: the binding is skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("no scene node named `{identifier}` for the {role:?} material")]
    MissingNode {
        identifier: String,
        role: MaterialRole,
    },
    #[error("material catalog has no entry for {0:?}")]
    MissingMaterial(MaterialRole),
}

/// Root of the spawned mesh bundle scene.
#[derive(Component)]
pub struct PortalSceneRoot;

/// Set on a scene root whose instance is spawned but not yet bound.
#[derive(Component)]
pub struct PendingMaterialBinding;

/// Bind each `(node, role)` pair to the first node with that identifier.
/// Missing nodes or roles are returned and skipped; the remaining bindings
/// still apply.
pub fn bind_materials(
    nodes: &mut [SceneNode],
    catalog: &MaterialCatalog,
    bindings: &[MaterialBinding],
) -> Vec<BindingError> {
    let mut skipped = Vec::new();

    for binding in bindings {
        let Some(material) = catalog.get(binding.role) else {
            skipped.push(BindingError::MissingMaterial(binding.role));
            continue;
        };

        match nodes
            .iter_mut()
            .find(|node| node.identifier == binding.node)
        {
            Some(node) => node.material = Some(material.clone()),
            None => skipped.push(BindingError::MissingNode {
                identifier: binding.node.clone(),
                role: binding.role,
            }),
        }
    }

    skipped
}

/// Give every node the material for `role`.
pub fn bind_all(
    nodes: &mut [SceneNode],
    catalog: &MaterialCatalog,
    role: MaterialRole,
) -> Result<(), BindingError> {
    let material = catalog
        .get(role)
        .ok_or(BindingError::MissingMaterial(role))?;

    for node in nodes.iter_mut() {
        node.material = Some(material.clone());
    }
    Ok(())
}

pub fn apply_binding_policy(
    nodes: &mut [SceneNode],
    catalog: &MaterialCatalog,
    manifest: &SceneManifest,
) -> Vec<BindingError> {
    match manifest.binding_policy {
        BindingPolicy::Named => bind_materials(nodes, catalog, &manifest.bindings),
        BindingPolicy::Blanket { role } => bind_all(nodes, catalog, role).err().into_iter().collect(),
    }
}

/// Entities below `root` in depth-first, child-order sequence. `root` excluded.
fn descendants(root: Entity, children: &Query<&Children>) -> Vec<Entity> {
    let mut ordered = Vec::new();
    let mut stack = vec![root];

    while let Some(entity) = stack.pop() {
        if entity != root {
            ordered.push(entity);
        }
        if let Ok(entity_children) = children.get(entity) {
            let entity_children: &[Entity] = entity_children;
            stack.extend(entity_children.iter().rev());
        }
    }

    ordered
}

/// Spawn the mesh bundle's scene, rotated and hidden until the reveal.
pub fn spawn_portal_scene_when_ready(
    mut commands: Commands,
    mut portal_assets: ResMut<PortalAssets>,
    gltfs: Res<Assets<Gltf>>,
    state: Res<State<AppState>>,
) {
    if portal_assets.scene_spawned {
        return;
    }

    let Some(gltf) = gltfs.get(&portal_assets.mesh_bundle) else {
        return;
    };
    portal_assets.scene_spawned = true;

    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        warn!("Mesh bundle contains no scenes; nothing to assemble");
        return;
    };

    spawn_scene_root(&mut commands, scene, *state.get());
    info!("Portal scene spawned with {} named nodes", gltf.named_nodes.len());
}

/// Spawn the rotated scene root, hidden unless the reveal already ran.
pub fn spawn_scene_root(commands: &mut Commands, scene: Handle<Scene>, state: AppState) -> Entity {
    let visibility = if state == AppState::Running {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };

    commands
        .spawn((
            SceneRoot(scene),
            Transform::from_rotation(Quat::from_rotation_y(SCENE_ROTATION_Y)),
            visibility,
            PortalSceneRoot,
        ))
        .observe(mark_scene_ready)
        .id()
}

fn mark_scene_ready(trigger: Trigger<SceneInstanceReady>, mut commands: Commands) {
    commands
        .entity(trigger.target())
        .insert(PendingMaterialBinding);
}

/// Bind catalog materials onto the named nodes of every newly ready scene.
/// A bound node passes its material to each mesh primitive beneath it.
pub fn bind_pending_scene_materials(
    mut commands: Commands,
    pending: Query<Entity, With<PendingMaterialBinding>>,
    children: Query<&Children>,
    names: Query<&Name>,
    primitives: Query<(), With<MeshMaterial3d<StandardMaterial>>>,
    catalog: Option<Res<MaterialCatalog>>,
    manifest: Option<Res<SceneManifest>>,
) {
    let (Some(catalog), Some(manifest)) = (catalog, manifest) else {
        return;
    };

    for root in &pending {
        commands.entity(root).remove::<PendingMaterialBinding>();

        let mut nodes: Vec<SceneNode> = descendants(root, &children)
            .into_iter()
            .filter_map(|entity| {
                names
                    .get(entity)
                    .ok()
                    .map(|name| SceneNode::new(entity, name.as_str()))
            })
            .collect();

        for skipped in apply_binding_policy(&mut nodes, &catalog, &manifest) {
            warn!("Skipping material binding: {}", skipped);
        }

        let mut bound = 0;
        for node in &nodes {
            let Some(material) = &node.material else {
                continue;
            };
            bound += 1;

            let targets = std::iter::once(node.entity).chain(descendants(node.entity, &children));
            for target in targets.filter(|entity| primitives.contains(*entity)) {
                commands
                    .entity(target)
                    .insert(MeshMaterial3d(material.clone()));
            }
        }

        info!("✓ Bound materials to {} of {} scene nodes", bound, nodes.len());
    }
}
