/// Persistence across reopened database files
use chrono::NaiveDate;
use habit_tracker::*;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

#[test]
fn test_habits_survive_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("habits.db");

    {
        let mut app = HabitTrackerApp::new(db_path.clone()).expect("Failed to open app");
        let registry = app.registry_mut();
        registry.add("read", Periodicity::Daily, "Read a chapter", today()).unwrap();
        registry.add("clean", Periodicity::Weekly, "", today()).unwrap();
        registry.complete("read", today()).unwrap();
    }

    let app = HabitTrackerApp::new(db_path).expect("Failed to reopen app");
    let registry = app.registry();

    assert_eq!(registry.names(), vec!["read", "clean"]);
    let read = registry.get("read").unwrap();
    assert_eq!(read.current_streak, 1);
    assert_eq!(read.completed_dates, vec![today()]);
    assert_eq!(read.description, "Read a chapter");
}

#[test]
fn test_delete_removes_history() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("habits.db");

    {
        let mut app = HabitTrackerApp::new(db_path.clone()).unwrap();
        app.seed_demo_data().unwrap();
        app.registry_mut().remove("read").unwrap();
    }

    let storage = SqliteStorage::new(db_path).unwrap();
    assert!(storage.load_records("read").unwrap().is_empty());
    assert_eq!(storage.load_names().unwrap().len(), 4);
}

#[test]
fn test_seed_demo_data_is_idempotent() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("habits.db");

    let mut app = HabitTrackerApp::new(db_path.clone()).unwrap();
    assert_eq!(app.seed_demo_data().unwrap(), 5);
    drop(app);

    let mut app = HabitTrackerApp::new(db_path).unwrap();
    assert_eq!(app.seed_demo_data().unwrap(), 0);
    assert_eq!(app.registry().len(), 5);
}

#[test]
fn test_decay_persists_once() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("habits.db");
    let later = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

    {
        let mut app = HabitTrackerApp::new(db_path.clone()).unwrap();
        app.registry_mut().add("clean", Periodicity::Weekly, "", today()).unwrap();
        app.registry_mut().complete("clean", today()).unwrap();
        assert_eq!(app.registry_mut().refresh(later).unwrap(), 1);
    }

    let mut app = HabitTrackerApp::new(db_path).unwrap();
    assert_eq!(app.registry().get("clean").unwrap().broken_streak, 1);
    // The stored decay marker stops a second count on reload
    assert_eq!(app.registry_mut().refresh(later).unwrap(), 0);
}

#[test]
fn test_statistics_read_from_disk() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut app = HabitTrackerApp::new(dir.path().join("habits.db")).unwrap();
    app.seed_demo_data().unwrap();

    let series = app.statistics().series_for(app.registry().storage(), "clean").unwrap();
    let completed: f64 = series.iter().map(|point| point.rate).sum();

    // clean has no misses, so its rates add up to one
    assert!((completed - 1.0).abs() < 1e-9);
}
