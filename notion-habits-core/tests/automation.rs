//! Services and automation driven by a recording in-memory Notion fake.

use std::collections::HashSet;
use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use notion_habits_core::{
    DailyHabitAutomation, Day, DayService, Error, Habit, HabitGroup, HabitList, HabitOutcome,
    HabitService, NotionApi, NotionConfig, RemoteCallFailure, RunOutcome,
};
use serde_json::Value;

const DAYS_DB: &str = "days-db";
const LOG_DB: &str = "log-db";

/// Records every call and fails the ones it was told to fail.
#[derive(Default)]
struct FakeNotion {
    created: Mutex<Vec<Value>>,
    queries: Mutex<Vec<(String, Value)>>,
    fail_day: bool,
    fail_habits: HashSet<String>,
    query_response: String,
}

impl FakeNotion {
    fn failing_habits(names: &[&str]) -> Self {
        Self {
            fail_habits: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    fn created(&self) -> Vec<Value> {
        self.created.lock().unwrap().clone()
    }

    /// Titles of the Daily Log pages requested, in call order.
    fn habit_titles(&self) -> Vec<String> {
        self.created()
            .iter()
            .filter(|body| body["parent"]["database_id"] == LOG_DB)
            .map(title_of)
            .collect()
    }
}

fn title_of(body: &Value) -> String {
    body["properties"]["Name"]["title"][0]["text"]["content"]
        .as_str()
        .unwrap()
        .to_string()
}

#[async_trait]
impl NotionApi for FakeNotion {
    async fn create_page(&self, body: &Value) -> Result<String, RemoteCallFailure> {
        self.created.lock().unwrap().push(body.clone());

        if body["parent"]["database_id"] == DAYS_DB {
            if self.fail_day {
                return Err(RemoteCallFailure::Transport("connection refused".into()));
            }
            return Ok("D1".to_string());
        }

        let name = title_of(body);
        if self.fail_habits.contains(&name) {
            Err(RemoteCallFailure::Status {
                status: 400,
                body: "{\"code\":\"validation_error\"}".into(),
            })
        } else {
            Ok(format!("H-{}", name))
        }
    }

    async fn query_database(
        &self,
        database_id: &str,
        filter: &Value,
    ) -> Result<String, RemoteCallFailure> {
        self.queries
            .lock()
            .unwrap()
            .push((database_id.to_string(), filter.clone()));
        Ok(self.query_response.clone())
    }
}

fn config() -> NotionConfig {
    NotionConfig::new("secret", DAYS_DB, LOG_DB)
}

fn may_5() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
}

fn automation(fake: &Arc<FakeNotion>, habits: HabitList) -> DailyHabitAutomation {
    DailyHabitAutomation::new(fake.clone(), &config(), habits)
}

// ============================================================================
// DayService
// ============================================================================

#[tokio::test]
async fn test_day_service_create_sets_id() {
    let fake = Arc::new(FakeNotion::default());
    let service = DayService::new(fake.clone(), &config());
    let day = Day::for_date(may_5());

    let created = service.create(&day).await.unwrap();

    assert_eq!(created.id(), Some("D1"));
    assert_eq!(created.name(), "Mon 5 May");
    assert_eq!(created.date(), may_5());
    assert_eq!(day.id(), None);

    let body = &fake.created()[0];
    assert_eq!(body["parent"]["database_id"], DAYS_DB);
    assert_eq!(title_of(body), "Mon 5 May");
    assert_eq!(body["properties"]["Date"]["date"]["start"], "2025-05-05");
}

#[tokio::test]
async fn test_day_service_create_failure() {
    let fake = Arc::new(FakeNotion {
        fail_day: true,
        ..Default::default()
    });
    let service = DayService::new(fake.clone(), &config());

    let err = service.create(&Day::for_date(may_5())).await.unwrap_err();
    assert!(matches!(err, Error::Remote(RemoteCallFailure::Transport(_))));
}

#[tokio::test]
async fn test_day_service_find_by_date() {
    let fake = Arc::new(FakeNotion {
        query_response: r#"{"results":[{"id":"p-1"},{"id":"p-2"}]}"#.to_string(),
        ..Default::default()
    });
    let service = DayService::new(fake.clone(), &config());

    let found = service.find_by_date(may_5()).await.unwrap();
    assert_eq!(found.as_deref(), Some("p-1"));

    let queries = fake.queries.lock().unwrap();
    assert_eq!(queries[0].0, DAYS_DB);
    assert_eq!(queries[0].1["filter"]["date"]["equals"], "2025-05-05");
}

#[tokio::test]
async fn test_day_service_find_by_date_no_match() {
    let fake = Arc::new(FakeNotion {
        query_response: r#"{"results":[]}"#.to_string(),
        ..Default::default()
    });
    let service = DayService::new(fake, &config());

    assert_eq!(service.find_by_date(may_5()).await.unwrap(), None);
}

#[tokio::test]
async fn test_day_service_find_by_date_malformed_response() {
    let fake = Arc::new(FakeNotion {
        query_response: "not json".to_string(),
        ..Default::default()
    });
    let service = DayService::new(fake, &config());

    let err = service.find_by_date(may_5()).await.unwrap_err();
    assert!(matches!(err, Error::Remote(RemoteCallFailure::Parse(_))));
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_day_service_find_by_date_logs_malformed_response() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let fake = Arc::new(FakeNotion {
        query_response: "not json".to_string(),
        ..Default::default()
    });
    let service = DayService::new(fake, &config());
    assert!(service.find_by_date(may_5()).await.is_err());

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("ERROR"));
    assert!(output.contains("find_by_date"));
    assert!(output.contains("Malformed response"));
}

// ============================================================================
// HabitService
// ============================================================================

#[tokio::test]
async fn test_habit_service_links_day() {
    let fake = Arc::new(FakeNotion::default());
    let service = HabitService::new(fake.clone(), &config());
    let day = Day::for_date(may_5()).with_id("D1");

    let page_id = service
        .create_for_day(&Habit::new("Meditate", HabitGroup::Morning), &day)
        .await
        .unwrap();

    assert_eq!(page_id, "H-Meditate");
    let body = &fake.created()[0];
    assert_eq!(body["parent"]["database_id"], LOG_DB);
    assert_eq!(body["properties"]["Day"]["relation"][0]["id"], "D1");
}

#[tokio::test]
async fn test_habit_service_requires_created_day() {
    let fake = Arc::new(FakeNotion::default());
    let service = HabitService::new(fake.clone(), &config());

    let err = service
        .create_for_day(
            &Habit::new("Meditate", HabitGroup::Morning),
            &Day::for_date(may_5()),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DayNotCreated(_)));
    assert!(fake.created().is_empty());
}

// ============================================================================
// DailyHabitAutomation
// ============================================================================

#[tokio::test]
async fn test_day_failure_aborts_before_habits() {
    let fake = Arc::new(FakeNotion {
        fail_day: true,
        ..Default::default()
    });

    let outcome = automation(&fake, HabitList::default())
        .run_for_date(may_5())
        .await;

    assert!(outcome.is_aborted());
    assert!(outcome.summary().is_none());
    assert_eq!(fake.created().len(), 1);
    assert!(fake.habit_titles().is_empty());
}

#[tokio::test]
async fn test_habits_created_in_configured_order() {
    let fake = Arc::new(FakeNotion::default());

    let outcome = automation(&fake, HabitList::default())
        .run_for_date(may_5())
        .await;

    assert_eq!(
        fake.habit_titles(),
        vec![
            "Meditate",
            "Stretching",
            "Work",
            "Morning routine",
            "Exercise",
            "Learn",
            "Night routine"
        ]
    );
    let summary = outcome.summary().unwrap();
    assert!(summary.is_complete());
    assert_eq!(summary.created_count(), 7);
    assert_eq!(summary.day().id(), Some("D1"));
}

#[tokio::test]
async fn test_day_created_before_any_habit() {
    let fake = Arc::new(FakeNotion::default());

    automation(&fake, HabitList::default())
        .run_for_date(may_5())
        .await;

    let created = fake.created();
    assert_eq!(created[0]["parent"]["database_id"], DAYS_DB);
    assert!(created[1..]
        .iter()
        .all(|body| body["parent"]["database_id"] == LOG_DB));
}

#[tokio::test]
async fn test_failed_habits_do_not_stop_the_batch() {
    let fake = Arc::new(FakeNotion::failing_habits(&["Stretching", "Learn"]));

    let outcome = automation(&fake, HabitList::default())
        .run_for_date(may_5())
        .await;

    let summary = outcome.summary().unwrap();
    assert_eq!(summary.created_count() + summary.failed_count(), 7);
    assert_eq!(summary.failed_count(), 2);
    assert_eq!(fake.habit_titles().len(), 7);
    assert!(!summary.is_complete());
}

#[tokio::test]
async fn test_end_to_end_third_habit_fails() {
    let fake = Arc::new(FakeNotion::failing_habits(&["Work"]));

    let outcome = automation(&fake, HabitList::default())
        .run_for_date(may_5())
        .await;

    let RunOutcome::Completed(summary) = outcome else {
        panic!("run should not abort");
    };
    assert_eq!(summary.day().id(), Some("D1"));
    assert_eq!(summary.created_count(), 6);
    assert_eq!(summary.failed_count(), 1);

    let failed = &summary.outcomes()[2];
    assert!(!failed.is_created());
    assert_eq!(failed.habit().name, "Work");
    assert!(matches!(
        &summary.outcomes()[3],
        HabitOutcome::Created { page_id, .. } if page_id == "H-Morning routine"
    ));
}

#[tokio::test]
async fn test_injected_habit_list() {
    let fake = Arc::new(FakeNotion::default());
    let habits = HabitList::new(vec![
        Habit::new("Journal", HabitGroup::Evening),
        Habit::new("Walk", HabitGroup::Morning),
    ])
    .unwrap();

    let automation = automation(&fake, habits.clone());
    assert_eq!(automation.habits(), &habits);

    automation.run_for_date(may_5()).await;
    assert_eq!(fake.habit_titles(), vec!["Journal", "Walk"]);
}
