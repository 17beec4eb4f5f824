/// Streak state machine and period rules through the public API
use chrono::{Duration, NaiveDate};
use habit_tracker::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn habit(periodicity: Periodicity, created: NaiveDate) -> Habit {
    Habit::new("read".to_string(), periodicity, "Read a chapter".to_string(), created).unwrap()
}

#[test]
fn test_new_habit_starts_empty() {
    let habit = habit(Periodicity::Daily, date(2024, 2, 1));

    assert!(habit.is_new());
    assert_eq!(habit.current_streak, 0);
    assert_eq!(habit.longest_streak, 0);
    assert_eq!(habit.broken_streak, 0);
    assert!(habit.completed_dates.is_empty());
    assert!(habit.missed_dates.is_empty());
}

#[test]
fn test_consecutive_daily_completions() {
    let start = date(2024, 2, 1);
    let mut habit = habit(Periodicity::Daily, start);

    for offset in 0..5 {
        habit.complete(start + Duration::days(offset));
    }

    assert_eq!(habit.current_streak, 5);
    assert_eq!(habit.longest_streak, 5);
    assert_eq!(habit.completed_dates.len(), 5);
}

#[test]
fn test_gap_resets_streak_but_keeps_longest() {
    let start = date(2024, 2, 1);
    let mut habit = habit(Periodicity::Daily, start);

    habit.complete(start);
    habit.complete(start + Duration::days(1));
    habit.complete(start + Duration::days(2));

    // Two days without a completion
    let outcome = habit.complete(start + Duration::days(5));

    assert_eq!(outcome, CheckOffOutcome::Completed { current_streak: 1, longest_streak: 3 });
    assert_eq!(habit.missed_dates, vec![start + Duration::days(5)]);
    assert_eq!(habit.broken_streak, 0);
}

#[test]
fn test_weekly_same_week_is_already_completed() {
    let start = date(2024, 2, 5);
    let mut habit = habit(Periodicity::Weekly, start);

    habit.complete(start);
    assert_eq!(habit.complete(start + Duration::days(3)), CheckOffOutcome::AlreadyCompleted);
    assert_eq!(habit.current_streak, 1);
}

#[test]
fn test_monthly_uses_calendar_month_for_completion() {
    let mut habit = habit(Periodicity::Monthly, date(2024, 1, 30));

    habit.complete(date(2024, 1, 30));
    // Two days later but a new calendar month
    let outcome = habit.complete(date(2024, 2, 1));

    assert_eq!(outcome, CheckOffOutcome::Completed { current_streak: 2, longest_streak: 2 });
}

#[test]
fn test_evaluate_counts_each_missed_interval_once() {
    let start = date(2024, 2, 1);
    let mut habit = habit(Periodicity::Weekly, start);
    habit.complete(start);

    let later = start + Duration::days(10);
    assert!(habit.evaluate(later));
    assert!(!habit.evaluate(later));
    assert!(!habit.evaluate(later + Duration::days(3)));

    assert_eq!(habit.broken_streak, 1);
    assert_eq!(habit.current_streak, 0);
}

#[test]
fn test_periodicity_parsing() {
    assert_eq!("weekly".parse::<Periodicity>().unwrap(), Periodicity::Weekly);
    assert_eq!(" MONTHLY ".parse::<Periodicity>().unwrap(), Periodicity::Monthly);
    assert!("yearly".parse::<Periodicity>().is_err());
    assert_eq!(Periodicity::from_menu_choice("1"), Some(Periodicity::Daily));
    assert_eq!(Periodicity::from_menu_choice("4"), None);
}

#[test]
fn test_dates_use_day_month_year() {
    assert_eq!(format_date(date(2024, 2, 9)), "09.02.2024");
    assert_eq!(parse_date("09.02.2024").unwrap(), date(2024, 2, 9));
    assert!(parse_date("2024-02-09").is_err());
}

#[test]
fn test_historical_records_from_habit_history() {
    let start = date(2024, 2, 1);
    let mut habit = habit(Periodicity::Daily, start);
    habit.complete(start);
    habit.complete(start + Duration::days(3));

    let records = HistoricalRecord::from_history(&habit.name, &habit.completed_dates, &habit.missed_dates);

    assert_eq!(records.len(), 3);
    assert_eq!(records.iter().filter(|record| record.is_completed()).count(), 2);
    assert!(records.iter().all(|record| record.habit_name == "read"));
}
