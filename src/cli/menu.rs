//! Menu commands and fixed texts

/// The list of commands shown at start, on `/help` and on unknown input
pub const MENU_TEXT: &str = "\
1 - Check off a habit.
2 - Create a new habit.
3 - Delete a habit.
4 - Get a list of all current habits.
5 - Get the longest habit streak out of all the existing habits.
6 - Get the longest habit streak of one chosen habit.
7 - Get the most difficult habit to complete overall.
8 - Get the most skipped periods of a chosen habit.
9 - Get the longest streaks of all habits.
10 - Get the skipped periods of all habits.
11 - Get data from a specific habit.
12 - Get all habits of a specific periodicity.
13 - Get certain habit statistics.
14 - Get overall habit statistics.
15 - Get all habits info.
16 - Exit the program.

Type /help if you want to see this list again.
";

/// One entry of the numbered menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    CheckOff,
    Create,
    Delete,
    ListHabits,
    LongestStreakOverall,
    LongestStreakOfHabit,
    BrokenStreakOverall,
    BrokenStreakOfHabit,
    LongestStreaks,
    BrokenStreaks,
    HabitDetails,
    ByPeriodicity,
    HabitChart,
    OverallChart,
    AllHabitDetails,
    Exit,
    Help,
}

impl MenuCommand {
    /// Parse a line of user input; `None` for anything not on the menu
    pub fn parse(input: &str) -> Option<Self> {
        let command = match input.trim() {
            "1" => MenuCommand::CheckOff,
            "2" => MenuCommand::Create,
            "3" => MenuCommand::Delete,
            "4" => MenuCommand::ListHabits,
            "5" => MenuCommand::LongestStreakOverall,
            "6" => MenuCommand::LongestStreakOfHabit,
            "7" => MenuCommand::BrokenStreakOverall,
            "8" => MenuCommand::BrokenStreakOfHabit,
            "9" => MenuCommand::LongestStreaks,
            "10" => MenuCommand::BrokenStreaks,
            "11" => MenuCommand::HabitDetails,
            "12" => MenuCommand::ByPeriodicity,
            "13" => MenuCommand::HabitChart,
            "14" => MenuCommand::OverallChart,
            "15" => MenuCommand::AllHabitDetails,
            "16" => MenuCommand::Exit,
            "/help" => MenuCommand::Help,
            _ => return None,
        };
        Some(command)
    }
}

/// Greeting for the local hour of day
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning!",
        12..=17 => "Good afternoon!",
        18..=21 => "Good evening!",
        _ => "Good night!",
    }
}
