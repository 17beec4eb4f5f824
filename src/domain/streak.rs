//! Streak aggregates and messages
//!
//! This module holds the result type of the registry's "which habit leads"
//! queries and the encouragement shown after a successful check-off.

use serde::Serialize;

use crate::domain::{Habit, Periodicity};

/// The habit with the highest value of some streak counter
///
/// `habit_name` is `None` when no habit has a non-zero value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakLeader {
    pub habit_name: Option<String>,
    pub value: u32,
}

impl StreakLeader {
    /// Leader with no habit and a value of zero
    pub fn none() -> Self {
        Self {
            habit_name: None,
            value: 0,
        }
    }

    /// Find the habit with the highest `counter`
    ///
    /// Only a strictly greater value replaces the current leader, so ties go
    /// to the habit encountered first.
    pub fn find<'a, I, F>(habits: I, counter: F) -> Self
    where
        I: IntoIterator<Item = &'a Habit>,
        F: Fn(&Habit) -> u32,
    {
        let mut leader: Option<&Habit> = None;
        let mut best = 0;

        for habit in habits {
            let value = counter(habit);
            if value > best {
                best = value;
                leader = Some(habit);
            }
        }

        Self {
            habit_name: leader.map(|habit| habit.name.clone()),
            value: best,
        }
    }
}

/// Get an encouraging message for a streak that was just extended
pub fn motivational_message(current_streak: u32, periodicity: Periodicity) -> String {
    let noun = periodicity.period_noun(current_streak);
    match current_streak {
        0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
        1 => format!("Great start! One {} down, keep the momentum going.", noun),
        2..=6 => format!("Nice work! {} {} in a row. You're building a strong habit.", current_streak, noun),
        7..=13 => format!("Excellent! {} {} strong. You're in the groove now!", current_streak, noun),
        14..=29 => format!("Amazing! {} {} straight. This is becoming second nature.", current_streak, noun),
        _ => format!("Incredible! {} {} of consistency. You're a habit master!", current_streak, noun),
    }
}
