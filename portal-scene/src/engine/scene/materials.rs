use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::scene_settings::{POLE_LIGHT_RGB, PORTAL_LIGHT_RGB};

/// Logical material roles referenced by the binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialRole {
    BakedSurface,
    PoleLight,
    PortalLight,
}

impl MaterialRole {
    pub const ALL: [MaterialRole; 3] = [Self::BakedSurface, Self::PoleLight, Self::PortalLight];
}

/// Shared material handles keyed by role. Read-only once built; every node
/// bound to a role references the same handle.
#[derive(Resource, Debug, Clone, Default)]
pub struct MaterialCatalog {
    entries: HashMap<MaterialRole, Handle<StandardMaterial>>,
}

impl MaterialCatalog {
    pub fn insert(&mut self, role: MaterialRole, material: Handle<StandardMaterial>) {
        self.entries.insert(role, material);
    }

    pub fn get(&self, role: MaterialRole) -> Option<&Handle<StandardMaterial>> {
        self.entries.get(&role)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Unlit surface showing the baked lighting texture as authored.
pub fn baked_surface_material(baked_texture: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(baked_texture),
        unlit: true,
        ..default()
    }
}

pub fn pole_light_material() -> StandardMaterial {
    let [r, g, b] = POLE_LIGHT_RGB;
    StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        unlit: true,
        ..default()
    }
}

/// Double sided.
pub fn portal_light_material() -> StandardMaterial {
    let [r, g, b] = PORTAL_LIGHT_RGB;
    StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

pub fn create_material_catalog(
    materials: &mut Assets<StandardMaterial>,
    baked_texture: Handle<Image>,
) -> MaterialCatalog {
    let mut catalog = MaterialCatalog::default();

    for role in MaterialRole::ALL {
        let material = match role {
            MaterialRole::BakedSurface => baked_surface_material(baked_texture.clone()),
            MaterialRole::PoleLight => pole_light_material(),
            MaterialRole::PortalLight => portal_light_material(),
        };
        catalog.insert(role, materials.add(material));
    }

    info!("Material catalog ready with {} roles", catalog.len());
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::render_resource::Face;

    #[test]
    fn catalog_covers_every_role() {
        let mut materials = Assets::<StandardMaterial>::default();
        let catalog = create_material_catalog(&mut materials, Handle::default());

        for role in MaterialRole::ALL {
            let handle = catalog.get(role).unwrap();
            assert!(materials.get(handle).is_some());
        }
        assert_eq!(materials.len(), 3);
    }

    #[test]
    fn light_materials_are_unlit_and_portal_is_double_sided() {
        let pole = pole_light_material();
        let portal = portal_light_material();

        assert!(pole.unlit);
        assert_eq!(pole.cull_mode, Some(Face::Back));
        assert!(portal.unlit && portal.double_sided);
        assert_eq!(portal.cull_mode, None);
        assert_eq!(portal.base_color, Color::srgb_u8(0xbe, 0x82, 0xff));
    }

    #[test]
    fn baked_surface_samples_the_baked_texture() {
        let texture = Handle::<Image>::weak_from_u128(7);
        let material = baked_surface_material(texture.clone());

        assert_eq!(material.base_color_texture, Some(texture));
        assert!(material.unlit);
    }

    #[test]
    fn roles_use_camel_case_names() {
        let role: MaterialRole = serde_json::from_str("\"portalLight\"").unwrap();
        assert_eq!(role, MaterialRole::PortalLight);
    }
}
