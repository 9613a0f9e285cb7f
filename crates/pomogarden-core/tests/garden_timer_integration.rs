//! Integration tests for the session clock driving a persisted garden.
//!
//! Runs full work/break cycles against SQLite on disk and checks the garden
//! survives reopening the database.

use pomogarden_core::{
    Config, Database, Event, Garden, GardenProfile, GardenStore, GardenTimer, GrowthPolicy,
    KvStore, LoadOutcome, ManualTickSource, MemoryStore, SessionClock, SessionDurations,
    SessionType, TickSource,
};
use proptest::prelude::*;
use tempfile::TempDir;

fn deliver_n<S: KvStore>(t: &mut GardenTimer<S, ManualTickSource>, n: usize) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..n {
        if let Some(tick) = t.ticks().next_tick() {
            events.extend(t.deliver(tick));
        }
    }
    events
}

fn grew(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::GardenGrew { .. }))
        .count()
}

#[test]
fn five_two_cycle_grows_once_and_persists() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("pomogarden.db");
    let policy = GrowthPolicy::staged();

    {
        let db = Database::open_at(&db_path).unwrap();
        let garden = GardenStore::load(db, "farmData", policy);
        let mut t = GardenTimer::new(
            SessionClock::new(SessionDurations::new(5, 2)),
            garden,
            ManualTickSource::new(),
        );

        t.start();
        let events = deliver_n(&mut t, 5);
        assert!(events.is_empty());
        assert_eq!(t.clock().display(), "00:00");

        let events = deliver_n(&mut t, 1);
        assert_eq!(grew(&events), 1);
        assert_eq!(t.clock().session_type(), SessionType::Break);
        assert_eq!(t.clock().display(), "00:02");
        assert!(!t.clock().is_running());

        // Ticks while stopped do nothing.
        assert!(deliver_n(&mut t, 3).is_empty());

        t.start();
        let events = deliver_n(&mut t, 3);
        assert_eq!(events.len(), 1);
        assert_eq!(grew(&events), 0);
        assert_eq!(t.clock().session_type(), SessionType::Work);
        assert_eq!(t.clock().display(), "00:05");
    }

    let db = Database::open_at(&db_path).unwrap();
    let garden = GardenStore::load(db, "farmData", policy);
    assert_eq!(garden.load_outcome(), &LoadOutcome::Restored);
    let stages: Vec<u32> = garden.garden().plots().iter().map(|p| p.stage).collect();
    assert_eq!(stages, vec![1, 0, 0, 0, 0, 0]);
}

#[test]
fn config_profiles_select_representation() {
    let staged = Config::preset(GardenProfile::Staged);
    let flat = Config::preset(GardenProfile::Flat);

    let mut db = Database::open_memory().unwrap();
    db.set(&flat.storage_key(), "11").unwrap();

    let flat_store = GardenStore::load(db, flat.storage_key(), flat.growth_policy());
    assert_eq!(flat_store.garden(), &Garden::Count(11));

    // Same database, other key: nothing there yet.
    let db = flat_store.into_store();
    let staged_store = GardenStore::load(db, staged.storage_key(), staged.growth_policy());
    assert!(matches!(staged_store.load_outcome(), LoadOutcome::Defaulted(_)));
    assert_eq!(staged_store.garden().plots().len(), 6);
}

#[test]
fn malformed_entry_is_replaced_on_first_growth() {
    let store = MemoryStore::with_entry("plantCount", "\"lots\"");
    let mut t = GardenTimer::new(
        SessionClock::new(SessionDurations::new(0, 0)),
        GardenStore::load(store, "plantCount", GrowthPolicy::Flat),
        ManualTickSource::new(),
    );
    assert_eq!(t.garden().garden(), &Garden::Count(0));

    t.start();
    assert_eq!(grew(&deliver_n(&mut t, 1)), 1);
    assert_eq!(
        t.garden().store().get("plantCount").unwrap().as_deref(),
        Some("1")
    );
}

#[derive(Debug, Clone)]
enum Action {
    Start,
    Pause,
    Reset,
    Ticks(usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Start),
        Just(Action::Pause),
        Just(Action::Reset),
        (0usize..8).prop_map(Action::Ticks),
    ]
}

proptest! {
    #[test]
    fn flat_count_matches_completed_work_sessions(actions in prop::collection::vec(action(), 0..60)) {
        let mut t = GardenTimer::new(
            SessionClock::new(SessionDurations::new(3, 1)),
            GardenStore::load(MemoryStore::new(), "plantCount", GrowthPolicy::Flat),
            ManualTickSource::new(),
        );

        let mut completed_work = 0u64;
        for action in actions {
            match action {
                Action::Start => { t.start(); }
                Action::Pause => { t.pause(); }
                Action::Reset => { t.reset(); }
                Action::Ticks(n) => {
                    for event in deliver_n(&mut t, n) {
                        if let Event::SessionCompleted { completed: SessionType::Work, .. } = event {
                            completed_work += 1;
                        }
                    }
                }
            }
            prop_assert_eq!(t.ticks().is_subscribed(), t.clock().is_running());
        }
        prop_assert_eq!(t.garden().garden(), &Garden::Count(completed_work));
    }
}
