use bevy::prelude::*;

use crate::constants::scene_settings::{OVERLAY_FADE_SECONDS, PROGRESS_BAR_FADE_SECONDS};
use crate::engine::scene::assembly::PortalSceneRoot;
use crate::engine::ui::frontend;
use crate::engine::ui::loading_overlay::{LoadingOverlay, ProgressBar};

/// Which loading element a fade drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeTarget {
    Overlay,
    ProgressBar,
}

/// Quadratic ease-out over `t` in `[0, 1]`.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Fire-and-forget opacity animation on a UI element.
#[derive(Component, Debug, Clone)]
pub struct Fade {
    pub target: FadeTarget,
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl Fade {
    pub fn out(target: FadeTarget, from: f32, duration: f32) -> Self {
        Self {
            target,
            from,
            to: 0.0,
            duration,
            elapsed: 0.0,
        }
    }

    fn eased(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ease_out_quad(self.elapsed / self.duration)
    }

    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.eased()
    }

    /// Share of the animation still to play, 1 at the start and 0 at the end.
    pub fn remaining(&self) -> f32 {
        1.0 - self.eased()
    }

    /// Step the animation and return the new opacity.
    pub fn advance(&mut self, delta_secs: f32) -> f32 {
        self.elapsed = (self.elapsed + delta_secs.max(0.0)).min(self.duration.max(0.0));
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

fn fade_duration(target: FadeTarget) -> f32 {
    match target {
        FadeTarget::Overlay => OVERLAY_FADE_SECONDS,
        FadeTarget::ProgressBar => PROGRESS_BAR_FADE_SECONDS,
    }
}

/// Start the overlay and progress bar fades and show the scene.
/// Runs once, on entering `AppState::Running`.
pub fn begin_reveal(
    mut commands: Commands,
    overlays: Query<(Entity, &BackgroundColor), With<LoadingOverlay>>,
    progress_bars: Query<(Entity, &BackgroundColor), With<ProgressBar>>,
    mut scene_roots: Query<&mut Visibility, With<PortalSceneRoot>>,
) {
    let fades = overlays
        .iter()
        .map(|(entity, colour)| (entity, colour, FadeTarget::Overlay))
        .chain(
            progress_bars
                .iter()
                .map(|(entity, colour)| (entity, colour, FadeTarget::ProgressBar)),
        );

    for (entity, colour, target) in fades {
        commands
            .entity(entity)
            .insert(Fade::out(target, colour.0.alpha(), fade_duration(target)));
    }

    for mut visibility in &mut scene_roots {
        *visibility = Visibility::Visible;
    }

    info!("→ Revealing portal scene");
}

pub fn animate_fades(
    mut commands: Commands,
    time: Res<Time>,
    mut fades: Query<(Entity, &mut Fade, &mut BackgroundColor, &mut Visibility)>,
) {
    let mut progress_bar_opacity = None;

    for (entity, mut fade, mut colour, mut visibility) in &mut fades {
        let opacity = fade.advance(time.delta_secs());
        colour.0.set_alpha(opacity);

        if fade.target == FadeTarget::ProgressBar {
            progress_bar_opacity = Some(fade.remaining());
        }

        if fade.is_finished() {
            *visibility = Visibility::Hidden;
            commands.entity(entity).remove::<Fade>();
            debug!("{:?} fade finished", fade.target);
        }
    }

    if let Some(opacity) = progress_bar_opacity {
        frontend::set_loading_bar_opacity(opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::app_state::AppState;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[test]
    fn easing_is_monotonic_and_pinned_at_ends() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(-1.0), 0.0);
        assert_eq!(ease_out_quad(3.0), 1.0);

        let samples: Vec<f32> = (0..=20).map(|i| ease_out_quad(i as f32 / 20.0)).collect();
        assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn overlay_fade_reaches_zero_at_three_seconds() {
        let mut fade = Fade::out(FadeTarget::Overlay, 1.0, OVERLAY_FADE_SECONDS);

        let halfway = fade.advance(1.5);
        assert!(halfway > 0.0 && halfway < 0.5);
        assert!(!fade.is_finished());

        assert_eq!(fade.advance(1.5), 0.0);
        assert!(fade.is_finished());
    }

    #[test]
    fn fade_never_overshoots() {
        let mut fade = Fade::out(FadeTarget::ProgressBar, 0.8, PROGRESS_BAR_FADE_SECONDS);

        for _ in 0..10 {
            let opacity = fade.advance(0.7);
            assert!((0.0..=0.8).contains(&opacity));
        }
        assert_eq!(fade.value(), 0.0);
        assert_eq!(fade.elapsed, PROGRESS_BAR_FADE_SECONDS);
    }

    #[test]
    fn zero_duration_fade_finishes_immediately() {
        let fade = Fade::out(FadeTarget::Overlay, 1.0, 0.0);

        assert_eq!(fade.value(), 0.0);
        assert_eq!(fade.remaining(), 0.0);
        assert!(fade.is_finished());
    }

    struct RevealEntities {
        overlay: Entity,
        bar: Entity,
        scene: Entity,
    }

    fn reveal_app() -> (App, RevealEntities) {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)))
            .init_state::<AppState>()
            .add_systems(OnEnter(AppState::Running), begin_reveal)
            .add_systems(Update, animate_fades.run_if(in_state(AppState::Running)));

        let world = app.world_mut();
        let entities = RevealEntities {
            overlay: world
                .spawn((BackgroundColor(Color::BLACK), Visibility::Visible, LoadingOverlay))
                .id(),
            bar: world
                .spawn((BackgroundColor(Color::WHITE), Visibility::Visible, ProgressBar))
                .id(),
            scene: world.spawn((Visibility::Hidden, PortalSceneRoot)).id(),
        };
        (app, entities)
    }

    #[test]
    fn entering_running_starts_fades_and_shows_scene() {
        let (mut app, entities) = reveal_app();
        app.update();
        assert!(app.world().get::<Fade>(entities.overlay).is_none());

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Running);
        app.update();

        let world = app.world();
        let overlay_fade = world.get::<Fade>(entities.overlay).unwrap();
        assert_eq!(overlay_fade.target, FadeTarget::Overlay);
        assert_eq!(overlay_fade.duration, OVERLAY_FADE_SECONDS);
        let bar_fade = world.get::<Fade>(entities.bar).unwrap();
        assert_eq!(bar_fade.target, FadeTarget::ProgressBar);
        assert_eq!(bar_fade.duration, PROGRESS_BAR_FADE_SECONDS);
        assert_eq!(
            world.get::<Visibility>(entities.scene),
            Some(&Visibility::Visible)
        );
    }

    #[test]
    fn finished_fades_hide_loading_elements() {
        let (mut app, entities) = reveal_app();
        app.update();
        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Running);

        for _ in 0..40 {
            app.update();
        }

        let world = app.world();
        for entity in [entities.overlay, entities.bar] {
            assert!(world.get::<Fade>(entity).is_none());
            assert_eq!(world.get::<Visibility>(entity), Some(&Visibility::Hidden));
            assert_eq!(world.get::<BackgroundColor>(entity).unwrap().0.alpha(), 0.0);
        }
        assert_eq!(
            world.get::<Visibility>(entities.scene),
            Some(&Visibility::Visible)
        );
    }
}
