use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_POSITION, CAMERA_TARGET,
    CLEAR_COLOUR, ORBIT_LIMITS,
};
// Crate engine modules
use crate::engine::assets::portal_assets::PortalAssets;
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::orbit_camera::{OrbitCamera, orbit_camera_controller};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::asset_loader::poll_asset_loads;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::progress::{
    LoadEvent, LoadingComplete, LoadingProgress, track_loading_progress,
};
use crate::engine::scene::assembly::{bind_pending_scene_materials, spawn_portal_scene_when_ready};
use crate::engine::scene::reveal::{animate_fades, begin_reveal};
use crate::engine::systems::viewport::{ViewportSize, handle_window_resize, init_viewport_size};
use crate::engine::ui::loading_overlay::{spawn_loading_overlay, update_progress_bar};
// Transitions
use crate::engine::core::app_state::{AppState, transition_to_running};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers SceneManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SceneManifest>::new(&["json"]))
        .insert_resource(ClearColor(CLEAR_COLOUR));

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<PortalAssets>()
        .init_resource::<ViewportSize>()
        .add_event::<LoadEvent>()
        .add_event::<LoadingComplete>();

    // State-based system scheduling
    app.add_systems(Startup, ((setup, start_loading).chain(), init_viewport_size))
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_manifest_system,
                poll_asset_loads,
                track_loading_progress,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            (
                // Scene assembly runs whenever the mesh bundle lands
                spawn_portal_scene_when_ready,
                bind_pending_scene_materials,
                update_progress_bar,
                handle_window_resize,
            )
                .chain()
                .after(transition_to_running),
        )
        .add_systems(OnEnter(AppState::Running), begin_reveal)
        .add_systems(
            Update,
            (animate_fades, orbit_camera_controller).run_if(in_state(AppState::Running)),
        );

    app
}

fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(CAMERA_START_POSITION).looking_at(CAMERA_TARGET, Vec3::Y),
    ));
    commands.insert_resource(OrbitCamera::new(
        CAMERA_START_POSITION,
        CAMERA_TARGET,
        ORBIT_LIMITS,
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    info!("=== PORTAL SCENE ===");
    spawn_camera(&mut commands);
    spawn_loading_overlay(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
