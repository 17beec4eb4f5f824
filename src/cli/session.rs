//! Menu session that handles line-based interaction
//!
//! This module implements the interactive loop that:
//! 1. Reads a menu command from the input
//! 2. Asks follow-up questions (habit name, periodicity, description)
//! 3. Runs the command against the registry and writes the answer

use chrono::{Local, NaiveDate, Timelike};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::analytics::chart::{ChartRenderer, TextChart};
use crate::analytics::StatisticsEngine;
use crate::cli::menu::{greeting, MenuCommand, MENU_TEXT};
use crate::domain::{format_date, motivational_message, CheckOffOutcome, Habit, Periodicity, StreakLeader};
use crate::registry::HabitRegistry;
use crate::storage::HabitRepository;
use crate::TrackerError;

/// Interactive menu over a reader/writer pair
pub struct MenuSession<S: HabitRepository, R, W> {
    registry: HabitRegistry<S>,
    statistics: StatisticsEngine,
    chart: Box<dyn ChartRenderer>,
    reader: R,
    writer: W,
    /// Fixed date instead of the local clock
    today: Option<NaiveDate>,
    /// Fixed hour for the greeting instead of the local clock
    hour: Option<u32>,
}

impl<S, R, W> MenuSession<S, R, W>
where
    S: HabitRepository,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a new session
    pub fn new(registry: HabitRegistry<S>, reader: R, writer: W) -> Self {
        Self {
            registry,
            statistics: StatisticsEngine::new(),
            chart: Box::new(TextChart::default()),
            reader,
            writer,
            today: None,
            hour: None,
        }
    }

    pub fn with_statistics(mut self, statistics: StatisticsEngine) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_chart(mut self, chart: Box<dyn ChartRenderer>) -> Self {
        self.chart = chart;
        self
    }

    /// Pin "today" to a fixed date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Pin the hour of day used for the greeting
    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }

    /// Take the registry and writer back out of a finished session
    pub fn into_parts(self) -> (HabitRegistry<S>, W) {
        (self.registry, self.writer)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Run the menu until the user exits or the input ends
    pub async fn run(&mut self) -> Result<(), TrackerError> {
        let intro = format!(
            "\n{}\n\nDon't wait for opportunity, create it. Let's start.\n\n\
             Here's a list of things you can do. Just type in the command number.\n{}",
            greeting(self.hour.unwrap_or_else(|| Local::now().hour())),
            MENU_TEXT
        );
        self.write(&intro).await?;

        loop {
            let line = match self.read_line().await? {
                Some(line) => line,
                None => {
                    info!("Input closed, ending session");
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            let command = match MenuCommand::parse(&line) {
                Some(command) => command,
                None => {
                    let text = format!("This command is not on the list! Here's what you can do:\n{}", MENU_TEXT);
                    self.write(&text).await?;
                    continue;
                }
            };

            if command == MenuCommand::Exit {
                self.write("Exiting the program...\n").await?;
                break;
            }

            debug!("Running menu command {:?}", command);
            match self.dispatch(command).await {
                Ok(()) => {}
                Err(TrackerError::Io(e)) => return Err(TrackerError::Io(e)),
                Err(e) => {
                    let text = format!("Sorry, {}. Please try again.\n", e);
                    self.write(&text).await?;
                }
            }
        }

        Ok(())
    }

    /// Read one line; `None` at end of input
    async fn read_line(&mut self) -> Result<Option<String>, TrackerError> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn prompt(&mut self, question: &str) -> Result<Option<String>, TrackerError> {
        self.write(question).await?;
        self.read_line().await
    }

    async fn write(&mut self, text: &str) -> Result<(), TrackerError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Run one command; decay is applied first so every streak shown is current
    async fn dispatch(&mut self, command: MenuCommand) -> Result<(), TrackerError> {
        let today = self.today();
        self.registry.refresh(today)?;

        let output = match command {
            MenuCommand::CheckOff => {
                let Some(name) = self.prompt("Write the name of the habit you have completed: ").await? else {
                    return Ok(());
                };
                self.check_off(&name, today)?
            }
            MenuCommand::Create => match self.ask_new_habit().await? {
                Some((name, periodicity, description)) => {
                    let habit = self.registry.add(&name, periodicity, &description, today)?;
                    format!("Habit '{}' added successfully!\n", habit.name)
                }
                None => return Ok(()),
            },
            MenuCommand::Delete => {
                let Some(name) = self.prompt("Which habit would you like to delete?\n").await? else {
                    return Ok(());
                };
                self.registry.remove(&name)?;
                format!("Habit '{}' successfully deleted.\n", name)
            }
            MenuCommand::ListHabits => {
                let names = self.registry.storage().load_names()?;
                if names.is_empty() {
                    "You have no habits yet.\n".to_string()
                } else {
                    format!("Your current habits are:\n{}\n", names.join("\n"))
                }
            }
            MenuCommand::LongestStreakOverall => match self.registry.longest_streak_overall() {
                StreakLeader { habit_name: Some(name), value } => {
                    format!("Your longest streak overall is {} with {} completed periods.\n", name, value)
                }
                StreakLeader { habit_name: None, .. } => "No habit has a streak yet.\n".to_string(),
            },
            MenuCommand::LongestStreakOfHabit => {
                let Some(name) = self.prompt("For which habit would you like to show the longest streak?\n").await? else {
                    return Ok(());
                };
                let value = self.registry.longest_streak_of(&name)?;
                format!("The habit '{}' has the longest streak of {} periods.\n", name, value)
            }
            MenuCommand::BrokenStreakOverall => match self.registry.broken_streak_overall() {
                StreakLeader { habit_name: Some(name), value } => format!(
                    "Your most difficult habit to complete overall is {} with {} skipped periods.\n",
                    name, value
                ),
                StreakLeader { habit_name: None, .. } => "No habit has been skipped yet.\n".to_string(),
            },
            MenuCommand::BrokenStreakOfHabit => {
                let Some(name) = self.prompt("For which habit would you like to show the skipped periods?\n").await? else {
                    return Ok(());
                };
                let value = self.registry.broken_streak_of(&name)?;
                format!("The habit '{}' has been skipped for {} periods.\n", name, value)
            }
            MenuCommand::LongestStreaks => format_listing(
                "Here's some information over your longest streaks for each habit:",
                &self.registry.longest_streaks(),
            ),
            MenuCommand::BrokenStreaks => format_listing(
                "Here's some information over your skipped periods for each habit:",
                &self.registry.broken_streaks(),
            ),
            MenuCommand::HabitDetails => {
                let Some(name) = self
                    .prompt("Please enter the name of the habit you would like to receive data from.\n")
                    .await?
                else {
                    return Ok(());
                };
                let habit = self.registry.get(&name)?;
                format!("Here's the information for the habit: {}\n{}", name, describe(habit))
            }
            MenuCommand::ByPeriodicity => {
                let Some(periodicity) = self
                    .prompt("What is the periodicity of the habits you'd like to view?\nType daily, weekly, or monthly: ")
                    .await?
                else {
                    return Ok(());
                };
                let habits = self.registry.by_periodicity(&periodicity)?;
                if habits.is_empty() {
                    "There are no habits with this periodicity.\n".to_string()
                } else {
                    let names: Vec<&str> = habits.iter().map(|habit| habit.name.as_str()).collect();
                    format!("Here are the habits with the specified periodicity:\n{}\n", names.join("\n"))
                }
            }
            MenuCommand::HabitChart => {
                let Some(name) = self
                    .prompt("Please type in the habit name that you want to see statistics from: ")
                    .await?
                else {
                    return Ok(());
                };
                let series = self.statistics.series_for(self.registry.storage(), &name)?;
                self.chart.render(&name, &series)
            }
            MenuCommand::OverallChart => {
                let series = self.statistics.series_for_all(self.registry.storage())?;
                self.chart.render("Average for All Habits", &series)
            }
            MenuCommand::AllHabitDetails => {
                let habits = self.registry.all_summaries();
                if habits.is_empty() {
                    "No habit data available.\n".to_string()
                } else {
                    let details: Vec<String> = habits.iter().map(describe).collect();
                    format!("Here's the information for all habits:\n{}", details.join("\n"))
                }
            }
            MenuCommand::Help => format!("Here's a list of things you can do:\n{}", MENU_TEXT),
            MenuCommand::Exit => return Ok(()),
        };

        self.write(&output).await
    }

    fn check_off(&mut self, name: &str, today: NaiveDate) -> Result<String, TrackerError> {
        let periodicity = self.registry.get(name)?.periodicity;

        let message = match self.registry.complete(name, today)? {
            CheckOffOutcome::Completed { current_streak, .. } => format!(
                "Well done. You have completed '{}'. {}\n",
                name,
                motivational_message(current_streak, periodicity)
            ),
            CheckOffOutcome::AlreadyCompleted => {
                format!("You have already completed '{}' for this time period.\n", name)
            }
        };
        Ok(message)
    }

    /// Ask for name, periodicity (1/2/3, repeated until valid) and description
    async fn ask_new_habit(&mut self) -> Result<Option<(String, Periodicity, String)>, TrackerError> {
        let Some(name) = self.prompt("Please type the name of your new habit: ").await? else {
            return Ok(None);
        };

        let periodicity = loop {
            let Some(choice) = self
                .prompt("What is this habit's periodicity? Type 1 for daily, 2 for weekly, or 3 for monthly.\n")
                .await?
            else {
                return Ok(None);
            };
            match Periodicity::from_menu_choice(&choice) {
                Some(periodicity) => break periodicity,
                None => self.write("You can only type 1, 2, or 3. Please try again.\n").await?,
            }
        };

        let Some(description) = self.prompt("Please enter a habit description: ").await? else {
            return Ok(None);
        };

        Ok(Some((name, periodicity, description)))
    }
}

/// Multi-line summary of one habit
fn describe(habit: &Habit) -> String {
    let last_completed = habit
        .last_update
        .map(format_date)
        .unwrap_or_else(|| "never".to_string());

    format!(
        "Habit Name: {}\nCreated: {}\nPeriodicity: {}\nDescription: {}\n\
         Current Streak: {}\nLongest Streak: {}\nBroken Streak: {}\nLast Completed: {}\n",
        habit.name,
        format_date(habit.created_date),
        habit.periodicity,
        habit.description,
        habit.current_streak,
        habit.longest_streak,
        habit.broken_streak,
        last_completed
    )
}

fn format_listing(title: &str, rows: &[(&str, u32)]) -> String {
    let mut out = format!("{}\n", title);
    for (name, value) in rows {
        out.push_str(&format!("{}: {}\n", name, value));
    }
    out
}
