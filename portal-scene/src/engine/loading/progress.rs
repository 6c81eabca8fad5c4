use bevy::prelude::*;
use thiserror::Error;

/// Lifecycle of one load session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    NotStarted,
    Loading,
    Complete,
}

/// Notifications rejected by the tracker. None of these mutate its state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("progress reported with zero total items")]
    ZeroTotal,
    #[error("total changed from {expected} to {reported} during the session")]
    TotalChanged { expected: usize, reported: usize },
    #[error("{loaded} items loaded exceeds the {total} declared")]
    Overflow { loaded: usize, total: usize },
    #[error("items loaded went backwards from {previous} to {reported}")]
    Regressed { previous: usize, reported: usize },
    #[error("load session already complete")]
    SessionComplete,
}

/// Outcome of an accepted progress notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    pub items_loaded: usize,
    pub items_total: usize,
    /// Progress in percent, `[0, 100]`.
    pub percent: f32,
    /// Set on the single report that moved the session to `Complete`.
    pub completed: bool,
}

/// Progress state machine for a bounded set of assets.
///
/// `NotStarted -> Loading` on the first item start or progress report,
/// `Loading -> Complete` exactly once when every item has been accounted for.
/// `Complete` is terminal.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    phase: LoadPhase,
    items_loaded: usize,
    items_total: Option<usize>,
}

impl LoadTracker {
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Fraction loaded in `[0, 1]`; zero until a total is known.
    pub fn ratio(&self) -> f32 {
        match self.items_total {
            Some(total) if total > 0 => self.items_loaded as f32 / total as f32,
            _ => 0.0,
        }
    }

    /// An asset began loading.
    pub fn item_started(&mut self, _identifier: &str) -> Result<(), ProgressError> {
        match self.phase {
            LoadPhase::Complete => Err(ProgressError::SessionComplete),
            LoadPhase::NotStarted => {
                self.phase = LoadPhase::Loading;
                Ok(())
            }
            LoadPhase::Loading => Ok(()),
        }
    }

    /// Record that `items_loaded` of `items_total` assets are done.
    pub fn item_progress(
        &mut self,
        items_loaded: usize,
        items_total: usize,
    ) -> Result<ProgressReport, ProgressError> {
        if self.phase == LoadPhase::Complete {
            return Err(ProgressError::SessionComplete);
        }
        if items_total == 0 {
            return Err(ProgressError::ZeroTotal);
        }
        if let Some(expected) = self.items_total {
            if expected != items_total {
                return Err(ProgressError::TotalChanged {
                    expected,
                    reported: items_total,
                });
            }
        }
        if items_loaded > items_total {
            return Err(ProgressError::Overflow {
                loaded: items_loaded,
                total: items_total,
            });
        }
        if items_loaded < self.items_loaded {
            return Err(ProgressError::Regressed {
                previous: self.items_loaded,
                reported: items_loaded,
            });
        }

        self.items_total = Some(items_total);
        self.items_loaded = items_loaded;

        let completed = items_loaded == items_total;
        self.phase = if completed {
            LoadPhase::Complete
        } else {
            LoadPhase::Loading
        };

        Ok(ProgressReport {
            items_loaded,
            items_total,
            percent: items_loaded as f32 / items_total as f32 * 100.0,
            completed,
        })
    }
}

/// Load notifications in the order the asset server produced them.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum LoadEvent {
    ItemStarted {
        identifier: String,
    },
    ItemProgress {
        items_loaded: usize,
        items_total: usize,
    },
}

/// Sent once per session when every declared asset has settled.
#[derive(Event, Debug, Clone, Copy)]
pub struct LoadingComplete;

/// Loading progress shared by the loading systems and the progress display.
#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub tracker: LoadTracker,
}

impl LoadingProgress {
    /// Last accepted progress, in percent.
    pub fn percent(&self) -> f32 {
        self.tracker.ratio() * 100.0
    }
}

pub fn track_loading_progress(
    mut events: EventReader<LoadEvent>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut complete_events: EventWriter<LoadingComplete>,
) {
    for event in events.read() {
        match event {
            LoadEvent::ItemStarted { identifier } => {
                match loading_progress.tracker.item_started(identifier) {
                    Ok(()) => debug!(
                        "Started loading `{}` ({:?})",
                        identifier,
                        loading_progress.tracker.phase()
                    ),
                    Err(err) => warn!("Ignoring start of `{}`: {}", identifier, err),
                }
            }
            LoadEvent::ItemProgress {
                items_loaded,
                items_total,
            } => match loading_progress
                .tracker
                .item_progress(*items_loaded, *items_total)
            {
                Ok(report) => {
                    info!(
                        "Loading {:.0}% ({}/{})",
                        report.percent, report.items_loaded, report.items_total
                    );

                    if report.completed {
                        info!("✓ All scene assets loaded");
                        complete_events.write(LoadingComplete);
                    }
                }
                Err(err) => warn!("Ignoring load progress: {}", err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_session(total: usize) -> (Vec<f32>, usize) {
        let mut tracker = LoadTracker::default();
        let mut percents = Vec::new();
        let mut completions = 0;

        for loaded in 0..=total {
            let report = tracker.item_progress(loaded, total).unwrap();
            percents.push(report.percent);
            completions += usize::from(report.completed);
        }

        (percents, completions)
    }

    #[test]
    fn texture_and_mesh_bundle_report_half_steps() {
        let (percents, completions) = run_session(2);

        assert_eq!(percents, vec![0.0, 50.0, 100.0]);
        assert_eq!(completions, 1);
    }

    #[test]
    fn ratio_is_monotonic_and_ends_at_one_hundred() {
        for total in [1, 2, 3, 5, 7, 13] {
            let (percents, _) = run_session(total);

            assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
            assert_eq!(*percents.last().unwrap(), 100.0);
        }
    }

    #[test]
    fn completes_once_for_any_asset_count() {
        for total in [1, 2, 5] {
            let (_, completions) = run_session(total);
            assert_eq!(completions, 1, "{total} declared assets");
        }
    }

    #[test]
    fn repeated_progress_does_not_complete_twice() {
        let mut tracker = LoadTracker::default();
        tracker.item_progress(0, 1).unwrap();
        tracker.item_progress(0, 1).unwrap();

        assert!(tracker.item_progress(1, 1).unwrap().completed);
        assert_eq!(
            tracker.item_progress(1, 1),
            Err(ProgressError::SessionComplete)
        );
        assert_eq!(tracker.phase(), LoadPhase::Complete);
    }

    #[test]
    fn first_start_moves_to_loading() {
        let mut tracker = LoadTracker::default();
        assert_eq!(tracker.phase(), LoadPhase::NotStarted);

        tracker.item_started("baked").unwrap();
        tracker.item_started("portal").unwrap();

        assert_eq!(tracker.phase(), LoadPhase::Loading);
        assert_eq!(tracker.ratio(), 0.0);
    }

    #[test]
    fn rejects_zero_total_without_mutation() {
        let mut tracker = LoadTracker::default();

        assert_eq!(tracker.item_progress(0, 0), Err(ProgressError::ZeroTotal));
        assert_eq!(tracker.phase(), LoadPhase::NotStarted);
    }

    #[test]
    fn rejects_regression_overflow_and_total_change() {
        let mut tracker = LoadTracker::default();
        tracker.item_progress(2, 4).unwrap();

        assert_eq!(
            tracker.item_progress(1, 4),
            Err(ProgressError::Regressed {
                previous: 2,
                reported: 1
            })
        );
        assert_eq!(
            tracker.item_progress(5, 4),
            Err(ProgressError::Overflow { loaded: 5, total: 4 })
        );
        assert_eq!(
            tracker.item_progress(3, 6),
            Err(ProgressError::TotalChanged {
                expected: 4,
                reported: 6
            })
        );
        assert_eq!(tracker.ratio(), 0.5);
    }

    #[test]
    fn start_after_completion_is_rejected() {
        let mut tracker = LoadTracker::default();
        tracker.item_progress(1, 1).unwrap();

        assert_eq!(
            tracker.item_started("late"),
            Err(ProgressError::SessionComplete)
        );
    }

    #[derive(Resource, Default)]
    struct Completions(usize);

    fn count_completions(mut events: EventReader<LoadingComplete>, mut seen: ResMut<Completions>) {
        seen.0 += events.read().count();
    }

    #[test]
    fn progress_events_drive_percent_and_single_completion() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<LoadingProgress>()
            .init_resource::<Completions>()
            .add_event::<LoadEvent>()
            .add_event::<LoadingComplete>()
            .add_systems(Update, (track_loading_progress, count_completions).chain());

        for identifier in ["baked", "portal"] {
            app.world_mut().send_event(LoadEvent::ItemStarted {
                identifier: identifier.into(),
            });
        }
        app.world_mut().send_event(LoadEvent::ItemProgress {
            items_loaded: 0,
            items_total: 2,
        });
        app.update();
        assert_eq!(app.world().resource::<LoadingProgress>().percent(), 0.0);

        app.world_mut().send_event(LoadEvent::ItemProgress {
            items_loaded: 1,
            items_total: 2,
        });
        app.update();
        assert_eq!(app.world().resource::<LoadingProgress>().percent(), 50.0);

        app.world_mut().send_event(LoadEvent::ItemProgress {
            items_loaded: 2,
            items_total: 2,
        });
        app.world_mut().send_event(LoadEvent::ItemProgress {
            items_loaded: 2,
            items_total: 2,
        });
        app.update();
        app.update();

        let progress = app.world().resource::<LoadingProgress>();
        assert_eq!(progress.percent(), 100.0);
        assert_eq!(progress.tracker.phase(), LoadPhase::Complete);
        assert_eq!(app.world().resource::<Completions>().0, 1);
    }
}
