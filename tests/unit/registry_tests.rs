/// Registry queries over the demo data set
use chrono::NaiveDate;
use habit_tracker::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 26).unwrap()
}

fn demo_registry() -> HabitRegistry<SqliteStorage> {
    let storage = SqliteStorage::open_in_memory().expect("Failed to open storage");
    let mut registry = HabitRegistry::load(storage).expect("Failed to load registry");
    registry.import(demo_habits()).expect("Failed to import demo habits");
    registry
}

#[test]
fn test_demo_longest_streaks() {
    let registry = demo_registry();

    let longest: Vec<u32> = registry.longest_streaks().iter().map(|(_, value)| *value).collect();
    assert_eq!(longest, vec![5, 2, 1, 1, 15]);
}

#[test]
fn test_leaders() {
    let registry = demo_registry();

    let longest = registry.longest_streak_overall();
    assert_eq!(longest.habit_name.as_deref(), Some("read"));
    assert_eq!(longest.value, 15);

    let hardest = registry.broken_streak_overall();
    assert_eq!(hardest.habit_name.as_deref(), Some("read"));
}

#[test]
fn test_add_complete_and_query() {
    let mut registry = demo_registry();

    registry.add("walk", Periodicity::Daily, "Walk 10k steps", today()).unwrap();
    let outcome = registry.complete("walk", today()).unwrap();

    assert!(matches!(outcome, CheckOffOutcome::Completed { current_streak: 1, .. }));
    assert_eq!(registry.longest_streak_of("walk").unwrap(), 1);
    assert_eq!(registry.get("walk").unwrap().last_update, Some(today()));
    assert_eq!(registry.by_periodicity("daily").unwrap().len(), 2);
}

#[test]
fn test_duplicate_and_missing_names() {
    let mut registry = demo_registry();

    let duplicate = registry.add("clean", Periodicity::Weekly, "", today());
    assert!(matches!(duplicate, Err(TrackerError::DuplicateHabit(name)) if name == "clean"));

    assert!(matches!(registry.remove("wash"), Err(TrackerError::NotFound(_))));
    assert!(matches!(registry.complete("wash", today()), Err(TrackerError::NotFound(_))));
}

#[test]
fn test_refresh_breaks_stale_streaks() {
    let mut registry = demo_registry();
    let later = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let decayed = registry.refresh(later).unwrap();

    assert_eq!(decayed, 5);
    assert!(registry.all_summaries().iter().all(|habit| habit.current_streak == 0));
    assert_eq!(registry.refresh(later).unwrap(), 0);
}

#[test]
fn test_statistics_from_registry_storage() {
    let registry = demo_registry();
    let engine = StatisticsEngine::new();

    let series = engine.series_for(registry.storage(), "read").unwrap();
    assert!(!series.is_empty());
    assert!(series.windows(2).all(|pair| pair[0].date < pair[1].date));
    assert!(series.iter().all(|point| (0.0..=1.0).contains(&point.rate)));

    let combined = engine.series_for_all(registry.storage()).unwrap();
    assert!(combined.len() >= series.len());
}
