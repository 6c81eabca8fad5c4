use bevy::prelude::*;

use crate::constants::scene_settings::PROGRESS_BAR_HEIGHT;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::ui::frontend;

/// Full-screen mask hiding the scene until loading completes.
#[derive(Component)]
pub struct LoadingOverlay;

/// Track and fill of the progress bar; faded together on reveal.
#[derive(Component)]
pub struct ProgressBar;

/// Part of the progress bar whose width follows load progress.
#[derive(Component)]
pub struct ProgressBarFill;

pub fn spawn_loading_overlay(commands: &mut Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::BLACK),
        GlobalZIndex(10),
        LoadingOverlay,
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(50.0),
                width: Val::Percent(100.0),
                height: Val::Px(PROGRESS_BAR_HEIGHT),
                ..default()
            },
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.15)),
            GlobalZIndex(11),
            ProgressBar,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Percent(0.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::WHITE),
                ProgressBar,
                ProgressBarFill,
            ));
        });
}

/// Push the latest progress to the bar and the host page.
pub fn update_progress_bar(
    loading_progress: Res<LoadingProgress>,
    mut fills: Query<&mut Node, With<ProgressBarFill>>,
) {
    if !loading_progress.is_changed() {
        return;
    }

    let percent = loading_progress.percent();
    for mut node in &mut fills {
        node.width = Val::Percent(percent);
    }
    frontend::set_progress_width(percent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_width_follows_progress() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<LoadingProgress>()
            .add_systems(Startup, |mut commands: Commands| {
                spawn_loading_overlay(&mut commands)
            })
            .add_systems(Update, update_progress_bar);

        app.update();
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .tracker
            .item_progress(1, 2)
            .unwrap();
        app.update();

        let mut fills = app
            .world_mut()
            .query_filtered::<&Node, With<ProgressBarFill>>();
        let widths: Vec<Val> = fills.iter(app.world()).map(|node| node.width).collect();
        assert_eq!(widths, vec![Val::Percent(50.0)]);
    }
}
