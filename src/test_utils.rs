//! Shared test utilities for `hrtrack`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{employee, leave},
    entities,
    entities::HalfDayType,
    errors::Result,
};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Initializes tracing for tests, writing through the test harness.
/// Safe to call from every test; only the first call takes effect.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test employee with a 25-day annual allocation.
pub async fn create_test_employee(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> Result<entities::employee::Model> {
    create_custom_employee(db, name, email, 25).await
}

/// Creates a test employee with a custom annual allocation.
pub async fn create_custom_employee(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    annual_leave_days: i32,
) -> Result<entities::employee::Model> {
    employee::create_employee(
        db,
        employee::NewEmployee {
            name: name.to_string(),
            email: email.to_string(),
            annual_leave_days,
        },
    )
    .await
}

/// The next Monday strictly after today. Tests build leave periods from here
/// so weekend-skipping day counts stay predictable.
pub fn next_monday() -> NaiveDate {
    let today = Utc::now().date_naive();
    let offset = (7 - i64::from(today.weekday().num_days_from_monday())) % 7;
    today + Duration::days(if offset == 0 { 7 } else { offset })
}

/// Creates a PENDING leave request worth exactly `total_days` working days,
/// starting next Monday. Fractional totals (x.5) are produced with a
/// half-day marker on the first day.
pub async fn create_test_leave_request(
    db: &DatabaseConnection,
    employee_id: i64,
    total_days: f64,
) -> Result<entities::leave_request::Model> {
    let whole_days = total_days.ceil() as i64;
    let has_half = total_days.fract() != 0.0;

    let start = next_monday();
    let mut end = start;
    let mut counted = 1;
    while counted < whole_days {
        end += Duration::days(1);
        if !leave::is_weekend(end) {
            counted += 1;
        }
    }

    leave::create_leave_request(
        db,
        leave::NewLeaveRequest {
            employee_id,
            start_date: start,
            end_date: end,
            half_day_start: has_half.then_some(HalfDayType::Afternoon),
            half_day_end: None,
            reason: "Test leave request".to_string(),
        },
    )
    .await
}

/// Sets up a complete test environment with one employee.
/// Returns (db, employee) for common test scenarios.
pub async fn setup_with_employee() -> Result<(DatabaseConnection, entities::employee::Model)> {
    let db = setup_test_db().await?;
    let employee = create_test_employee(&db, "Test Employee", "test@example.com").await?;
    Ok((db, employee))
}
