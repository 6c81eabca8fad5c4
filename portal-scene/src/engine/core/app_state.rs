use bevy::prelude::*;

use crate::engine::loading::progress::LoadingComplete;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Leave the loading state once the tracker reports completion.
pub fn transition_to_running(
    mut completions: EventReader<LoadingComplete>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if completions.read().count() > 0 {
        info!("→ All assets loaded, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[derive(Resource, Default)]
    struct RunningEntries(u32);

    fn count_entry(mut entries: ResMut<RunningEntries>) {
        entries.0 += 1;
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .init_resource::<RunningEntries>()
            .add_event::<LoadingComplete>()
            .add_systems(OnEnter(AppState::Running), count_entry)
            .add_systems(
                Update,
                transition_to_running.run_if(in_state(AppState::Loading)),
            );
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn stays_loading_without_completion() {
        let mut app = test_app();
        app.update();
        app.update();

        assert_eq!(state(&app), AppState::Loading);
        assert_eq!(app.world().resource::<RunningEntries>().0, 0);
    }

    #[test]
    fn completion_enters_running_once() {
        let mut app = test_app();
        app.update();

        app.world_mut().send_event(LoadingComplete);
        app.update();
        app.update();

        assert_eq!(state(&app), AppState::Running);

        app.world_mut().send_event(LoadingComplete);
        app.update();
        assert_eq!(app.world().resource::<RunningEntries>().0, 1);
    }
}
