/// End-to-end menu sessions driven by scripted input
use chrono::NaiveDate;
use habit_tracker::*;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

async fn run_session(
    registry: HabitRegistry<SqliteStorage>,
    script: &str,
) -> (HabitRegistry<SqliteStorage>, String) {
    let mut session = MenuSession::new(registry, script.as_bytes(), Vec::new())
        .with_today(today())
        .with_hour(14);
    session.run().await.expect("Session failed");
    let (registry, output) = session.into_parts();
    (registry, String::from_utf8(output).expect("Output is not UTF-8"))
}

#[tokio::test]
async fn test_session_greets_and_exits() {
    let registry = HabitRegistry::load(SqliteStorage::open_in_memory().unwrap()).unwrap();
    let (_, output) = run_session(registry, "16\n").await;

    assert!(output.contains("Good afternoon!"));
    assert!(output.contains(MENU_TEXT));
    assert!(output.ends_with("Exiting the program...\n"));
}

#[test]
fn test_session_changes_reach_disk() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("habits.db");

    let storage = SqliteStorage::new(db_path.clone()).unwrap();
    let registry = HabitRegistry::load(storage).unwrap();

    let script = "2\nstretch\n2\nStretch for ten minutes\n1\nstretch\n3\nstretch\n2\nyoga\n1\n\n1\nyoga\n16\n";
    let (_, output) = tokio_test::block_on(run_session(registry, script));

    assert!(output.contains("Habit 'stretch' added successfully!"));
    assert!(output.contains("Great start! One week down"));
    assert!(output.contains("Habit 'stretch' successfully deleted."));
    assert!(output.contains("Well done. You have completed 'yoga'."));

    let reopened = HabitRegistry::load(SqliteStorage::new(db_path).unwrap()).unwrap();
    assert_eq!(reopened.names(), vec!["yoga"]);
    assert_eq!(reopened.get("yoga").unwrap().current_streak, 1);
}

#[tokio::test]
async fn test_session_listings_on_demo_data() {
    let mut registry = HabitRegistry::load(SqliteStorage::open_in_memory().unwrap()).unwrap();
    registry.import(demo_habits()).unwrap();

    let (_, output) = run_session(registry, "9\n10\n11\nread\n16\n").await;

    assert!(output.contains("clean: 5\nfinance: 2\ngoals: 1\nno phone: 1\nread: 15\n"));
    assert!(output.contains("Here's some information over your skipped periods for each habit:"));
    assert!(output.contains("Habit Name: read\nCreated: 28.01.2024\nPeriodicity: daily\n"));
}

#[tokio::test]
async fn test_invalid_name_is_reported() {
    let registry = HabitRegistry::load(SqliteStorage::open_in_memory().unwrap()).unwrap();
    let (registry, output) = run_session(registry, "2\n   \n1\n\n4\n16\n").await;

    assert!(output.contains("Sorry,"));
    assert!(output.contains("You have no habits yet."));
    assert!(registry.is_empty());
}
