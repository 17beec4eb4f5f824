//! Demo data set
//!
//! Four weeks of sample history for five habits, useful for trying out the
//! statistics and streak queries on a fresh database.

use chrono::NaiveDate;

use crate::domain::{Habit, Periodicity};

fn day(d: u32, m: u32) -> NaiveDate {
    // Every demo date is a valid day in early 2024
    NaiveDate::from_ymd_opt(2024, m, d).unwrap_or(NaiveDate::MIN)
}

fn days(dates: &[(u32, u32)]) -> Vec<NaiveDate> {
    dates.iter().map(|&(d, m)| day(d, m)).collect()
}

fn demo_habit(
    name: &str,
    created: NaiveDate,
    periodicity: Periodicity,
    description: &str,
    streaks: (u32, u32, u32),
    completed_dates: Vec<NaiveDate>,
    missed_dates: Vec<NaiveDate>,
) -> Habit {
    let (current_streak, longest_streak, broken_streak) = streaks;
    let last_update = completed_dates.last().copied();
    // Decay was last applied on the latest miss that came after the last completion
    let last_decay = missed_dates
        .last()
        .copied()
        .filter(|missed| last_update.map_or(true, |completed| *missed > completed));

    Habit {
        name: name.to_string(),
        created_date: created,
        periodicity,
        description: description.to_string(),
        current_streak,
        longest_streak,
        broken_streak,
        last_update,
        last_decay,
        completed_dates,
        missed_dates,
    }
}

/// The demo habits: clean, finance, goals, no phone and read
pub fn demo_habits() -> Vec<Habit> {
    let read_completed: Vec<NaiveDate> = std::iter::once(day(30, 1))
        .chain((1..=15).map(|d| day(d, 2)))
        .collect();
    let read_missed = days(&[
        (28, 1), (29, 1), (31, 1), (16, 2), (18, 2), (19, 2), (20, 2),
        (21, 2), (22, 2), (23, 2), (24, 2), (25, 2),
    ]);

    vec![
        demo_habit(
            "clean",
            day(24, 1),
            Periodicity::Weekly,
            "Clean the apartment",
            (5, 5, 0),
            days(&[(24, 1), (31, 1), (7, 2), (14, 2), (21, 2)]),
            Vec::new(),
        ),
        demo_habit(
            "finance",
            day(21, 1),
            Periodicity::Monthly,
            "Review and plan your expenses",
            (2, 2, 0),
            days(&[(21, 1), (22, 2)]),
            Vec::new(),
        ),
        demo_habit(
            "goals",
            day(26, 1),
            Periodicity::Monthly,
            "Write down your current goals",
            (1, 1, 0),
            days(&[(26, 1), (26, 2)]),
            Vec::new(),
        ),
        demo_habit(
            "no phone",
            day(24, 1),
            Periodicity::Weekly,
            "Do not use the phone for the entire day",
            (0, 1, 4),
            days(&[(25, 1)]),
            days(&[(1, 2), (8, 2), (15, 2), (22, 2)]),
        ),
        demo_habit(
            "read",
            day(28, 1),
            Periodicity::Daily,
            "Read at least 30 minutes per day",
            (0, 15, 9),
            read_completed,
            read_missed,
        ),
    ]
}
