use chrono::NaiveDate;
use clap::Args;
use std::sync::Arc;

use notion_habits_core::{Day, DayService, NotionClient};

use crate::config::Config;

/// Check whether the Days database already has an entry for a date
#[derive(Args)]
pub struct CheckCommand {
    /// Date to look up (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl CheckCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let notion = config.notion_config();
        notion.validate()?;

        let day = match self.date {
            Some(date) => Day::for_date(date),
            None => Day::for_today(),
        };

        let client = NotionClient::from_config(&notion)?;
        let service = DayService::new(Arc::new(client), &notion);

        match service.find_by_date(day.date()).await? {
            Some(page_id) => println!("✓ {} exists (page {})", day, page_id),
            None => println!("✗ No entry for {}", day),
        }

        Ok(())
    }
}
