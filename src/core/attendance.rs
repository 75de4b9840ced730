//! Attendance business logic - Daily attendance marking and retrieval.
//!
//! Marking is an upsert keyed on `(employee_id, date)`: one logical record
//! per employee per day, updated in place when re-marked. The stored
//! `days_count` is always derived from the status so the FULL→1 / HALF→0.5 /
//! ABSENT,LEAVE→0 correspondence cannot drift.

use crate::{
    core::validate::{days_for_status, validate_attendance, AttendanceInput},
    entities::{attendance_record, AttendanceRecord, AttendanceStatus, Employee, employee},
    errors::{Error, Result},
};
use chrono::{Duration, Months, NaiveDate, Utc};
use sea_orm::{sea_query::OnConflict, QueryOrder, Set, prelude::*};

/// Marks attendance for one employee on one day, creating or updating the
/// record for that day.
///
/// The date must lie within the last year and not in the future. Raises
/// [`Error::NotFound`] when the employee does not exist.
pub async fn mark_attendance(
    db: &DatabaseConnection,
    employee_id: i64,
    date: NaiveDate,
    status: AttendanceStatus,
) -> Result<attendance_record::Model> {
    let days_count = days_for_status(status);
    validate_attendance(&AttendanceInput {
        date: Some(date),
        days_count: Some(days_count),
    })?;

    Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Employee", employee_id))?;

    let now = Utc::now();
    let existing = AttendanceRecord::find()
        .filter(attendance_record::Column::EmployeeId.eq(employee_id))
        .filter(attendance_record::Column::Date.eq(date))
        .one(db)
        .await?;

    let result = if let Some(record) = existing {
        let mut active: attendance_record::ActiveModel = record.into();
        active.status = Set(status);
        active.days_count = Set(days_count);
        active.updated_at = Set(now);
        active.update(db).await?
    } else {
        let record = attendance_record::ActiveModel {
            employee_id: Set(employee_id),
            date: Set(date),
            status: Set(status),
            days_count: Set(days_count),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        record.insert(db).await?
    };

    Ok(result)
}

/// Marks the same status for many employees on one day in a single insert.
///
/// Employees that already have a record for the day are skipped rather than
/// overwritten. Returns the number of rows actually inserted.
pub async fn bulk_mark_attendance(
    db: &DatabaseConnection,
    employee_ids: &[i64],
    date: NaiveDate,
    status: AttendanceStatus,
) -> Result<u64> {
    let days_count = days_for_status(status);
    validate_attendance(&AttendanceInput {
        date: Some(date),
        days_count: Some(days_count),
    })?;

    if employee_ids.is_empty() {
        return Ok(0);
    }

    let now = Utc::now();
    let records = employee_ids.iter().map(|&employee_id| {
        attendance_record::ActiveModel {
            employee_id: Set(employee_id),
            date: Set(date),
            status: Set(status),
            days_count: Set(days_count),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    });

    let inserted = AttendanceRecord::insert_many(records)
        .on_conflict(
            OnConflict::columns([
                attendance_record::Column::EmployeeId,
                attendance_record::Column::Date,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(inserted)
}

/// Retrieves all attendance records within one calendar month, joined with
/// their employees, ordered by employee name and date.
///
/// # Arguments
/// * `year` / `month` - The calendar month (1-12)
/// * `employee_id` - Restricts the result to one employee when supplied
pub async fn monthly_attendance(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
    employee_id: Option<i64>,
) -> Result<Vec<(attendance_record::Model, Option<employee::Model>)>> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::validation("Invalid year or month", "month"))?;
    // Last day of the month
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| Error::validation("Invalid year or month", "month"))?
        - Duration::days(1);

    let mut query = AttendanceRecord::find()
        .filter(attendance_record::Column::Date.gte(start))
        .filter(attendance_record::Column::Date.lte(end));
    if let Some(employee_id) = employee_id {
        query = query.filter(attendance_record::Column::EmployeeId.eq(employee_id));
    }

    query
        .find_also_related(Employee)
        .order_by_asc(employee::Column::Name)
        .order_by_asc(attendance_record::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an attendance record by id. Raises [`Error::NotFound`] when no
/// such record exists.
pub async fn delete_attendance(db: &DatabaseConnection, record_id: i64) -> Result<()> {
    let result = AttendanceRecord::delete_by_id(record_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("Attendance record", record_id));
    }
    Ok(())
}
