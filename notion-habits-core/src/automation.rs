//! Daily habit automation.
//!
//! Creates today's Days page, then one Daily Log page per configured habit
//! linked to it. Day creation is fail-fast: without a day there is nothing
//! to link to. Habit creation is best-effort: a failed habit is recorded and
//! the remaining habits are still attempted, strictly in list order.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::client::NotionApi;
use crate::config::NotionConfig;
use crate::models::{Day, Habit, HabitList};
use crate::services::{DayService, HabitService};

/// Result of creating one habit page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitOutcome {
    Created { habit: Habit, page_id: String },
    Failed { habit: Habit, reason: String },
}

impl HabitOutcome {
    pub fn habit(&self) -> &Habit {
        match self {
            HabitOutcome::Created { habit, .. } | HabitOutcome::Failed { habit, .. } => habit,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, HabitOutcome::Created { .. })
    }
}

/// Outcome of a run that got past day creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    day: Day,
    outcomes: Vec<HabitOutcome>,
}

impl RunSummary {
    pub fn new(day: Day, outcomes: Vec<HabitOutcome>) -> Self {
        Self { day, outcomes }
    }

    /// The created day, carrying its page id.
    pub fn day(&self) -> &Day {
        &self.day
    }

    /// Per-habit outcomes in creation order.
    pub fn outcomes(&self) -> &[HabitOutcome] {
        &self.outcomes
    }

    pub fn created_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_created()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.created_count()
    }

    /// True when every habit was created.
    pub fn is_complete(&self) -> bool {
        self.failed_count() == 0
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Day creation failed; no habit was attempted.
    Aborted { day: Day, reason: String },
    /// Day was created and every habit was attempted.
    Completed(RunSummary),
}

impl RunOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, RunOutcome::Aborted { .. })
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            RunOutcome::Completed(summary) => Some(summary),
            RunOutcome::Aborted { .. } => None,
        }
    }
}

/// Creates a day and its habits in Notion.
pub struct DailyHabitAutomation {
    day_service: DayService,
    habit_service: HabitService,
    habits: HabitList,
}

impl DailyHabitAutomation {
    pub fn new(client: Arc<dyn NotionApi>, config: &NotionConfig, habits: HabitList) -> Self {
        Self {
            day_service: DayService::new(Arc::clone(&client), config),
            habit_service: HabitService::new(client, config),
            habits,
        }
    }

    /// The configured habits, in creation order.
    pub fn habits(&self) -> &HabitList {
        &self.habits
    }

    /// Runs the automation for the local current date.
    pub async fn run(&self) -> RunOutcome {
        self.run_for_day(Day::for_today()).await
    }

    /// Runs the automation for a specific date.
    pub async fn run_for_date(&self, date: NaiveDate) -> RunOutcome {
        self.run_for_day(Day::for_date(date)).await
    }

    async fn run_for_day(&self, day: Day) -> RunOutcome {
        tracing::info!(day = %day.name(), date = %day.date(), "Creating day");

        let day = match self.day_service.create(&day).await {
            Ok(created) => created,
            Err(e) => {
                tracing::error!(day = %day.name(), error = %e, "Failed to create day. Aborting.");
                return RunOutcome::Aborted {
                    day,
                    reason: e.to_string(),
                };
            }
        };
        tracing::info!(day_id = day.id().unwrap_or_default(), "Day created");

        tracing::info!(count = self.habits.len(), "Creating habits");
        let mut outcomes = Vec::with_capacity(self.habits.len());
        for habit in &self.habits {
            let outcome = match self.habit_service.create_for_day(habit, &day).await {
                Ok(page_id) => {
                    tracing::info!(habit = %habit.name, page_id = %page_id, "Habit created");
                    HabitOutcome::Created {
                        habit: habit.clone(),
                        page_id,
                    }
                }
                Err(e) => {
                    tracing::warn!(habit = %habit.name, error = %e, "Habit creation failed");
                    HabitOutcome::Failed {
                        habit: habit.clone(),
                        reason: e.to_string(),
                    }
                }
            };
            outcomes.push(outcome);
        }

        let summary = RunSummary { day, outcomes };
        if summary.is_complete() {
            tracing::info!(created = summary.created_count(), "All habits created");
        } else {
            tracing::warn!(
                created = summary.created_count(),
                failed = summary.failed_count(),
                "Some habits failed"
            );
        }

        RunOutcome::Completed(summary)
    }
}
