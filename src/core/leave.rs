//! Leave request business logic - Request lifecycle and leave-day arithmetic.
//!
//! Requests are created PENDING and resolve exactly once, to APPROVED or
//! REJECTED. Approval and the ledger increment run in one database
//! transaction: no reader may observe an APPROVED request whose days are not
//! yet reflected in the balance. The requested total is computed from the
//! date range, skipping weekends, with optional half days at the boundaries.

use crate::{
    core::balance,
    core::validate::{validate_leave_request, LeaveRequestInput},
    entities::{leave_request, Employee, HalfDayType, LeaveRequest, LeaveStatus},
    errors::{Error, Result},
};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Payload for submitting a leave request.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    /// Employee requesting leave
    pub employee_id: i64,
    /// First day of the period
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive)
    pub end_date: NaiveDate,
    /// Half-day marker for the first day
    pub half_day_start: Option<HalfDayType>,
    /// Half-day marker for the last day
    pub half_day_end: Option<HalfDayType>,
    /// Free-text reason
    pub reason: String,
}

/// Whether a date falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the working days in an inclusive date range, skipping weekends.
/// Half-day markers at the boundaries each subtract half a day; a marker on
/// a weekend boundary has no effect. Returns 0 for an empty or reversed
/// range.
pub fn leave_days_between(
    start: NaiveDate,
    end: NaiveDate,
    half_day_start: Option<HalfDayType>,
    half_day_end: Option<HalfDayType>,
) -> f64 {
    if start > end {
        return 0.0;
    }

    let mut total: f64 = 0.0;
    let mut day = start;
    while day <= end {
        if !is_weekend(day) {
            total += 1.0;
        }
        day += Duration::days(1);
    }

    if half_day_start.is_some() && !is_weekend(start) {
        total -= 0.5;
    }
    if half_day_end.is_some() && end != start && !is_weekend(end) {
        total -= 0.5;
    }

    total.max(0.0)
}

/// Submits a new leave request in PENDING state.
///
/// The total is computed from the range; an all-weekend range computes to
/// zero days and is rejected. Raises [`Error::NotFound`] when the employee
/// does not exist.
pub async fn create_leave_request(
    db: &DatabaseConnection,
    new: NewLeaveRequest,
) -> Result<leave_request::Model> {
    // The range must be bounded before the day walk below; an unbounded end
    // date would make the walk arbitrarily long.
    validate_leave_request(&LeaveRequestInput {
        start_date: Some(new.start_date),
        end_date: Some(new.end_date),
        total_days: None,
    })?;

    let total_days = leave_days_between(
        new.start_date,
        new.end_date,
        new.half_day_start,
        new.half_day_end,
    );
    validate_leave_request(&LeaveRequestInput {
        start_date: None,
        end_date: None,
        total_days: Some(total_days),
    })?;

    Employee::find_by_id(new.employee_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Employee", new.employee_id))?;

    let now = Utc::now();
    let request = leave_request::ActiveModel {
        employee_id: Set(new.employee_id),
        start_date: Set(new.start_date),
        end_date: Set(new.end_date),
        half_day_start: Set(new.half_day_start),
        half_day_end: Set(new.half_day_end),
        total_days: Set(total_days),
        reason: Set(new.reason),
        status: Set(LeaveStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = request.insert(db).await?;
    Ok(result)
}

/// Approves a pending request and charges its days to the employee's
/// balance, atomically.
///
/// Both writes happen in one transaction; either the request is APPROVED and
/// `used_days` reflects it, or neither changed. A request that is no longer
/// PENDING raises [`Error::Conflict`] - the transition is one-shot, which is
/// also what keeps the ledger increment from ever running twice for the same
/// request.
pub async fn approve_leave_request(
    db: &DatabaseConnection,
    request_id: i64,
) -> Result<leave_request::Model> {
    let txn = db.begin().await?;

    let request = LeaveRequest::find_by_id(request_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("Leave request", request_id))?;

    if request.status != LeaveStatus::Pending {
        return Err(Error::Conflict {
            message: "Leave request has already been resolved".to_string(),
        });
    }

    let mut active: leave_request::ActiveModel = request.into();
    active.status = Set(LeaveStatus::Approved);
    active.updated_at = Set(Utc::now());
    let approved = active.update(&txn).await?;

    balance::apply_approval(&txn, &approved).await?;

    txn.commit().await?;
    Ok(approved)
}

/// Rejects a pending request. The balance is untouched. A request that is no
/// longer PENDING raises [`Error::Conflict`].
pub async fn reject_leave_request(
    db: &DatabaseConnection,
    request_id: i64,
) -> Result<leave_request::Model> {
    let request = LeaveRequest::find_by_id(request_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Leave request", request_id))?;

    if request.status != LeaveStatus::Pending {
        return Err(Error::Conflict {
            message: "Leave request has already been resolved".to_string(),
        });
    }

    let mut active: leave_request::ActiveModel = request.into();
    active.status = Set(LeaveStatus::Rejected);
    active.updated_at = Set(Utc::now());

    let result = active.update(db).await?;
    Ok(result)
}

/// Finds a leave request by id, returning None if absent.
pub async fn get_leave_request_by_id(
    db: &DatabaseConnection,
    request_id: i64,
) -> Result<Option<leave_request::Model>> {
    LeaveRequest::find_by_id(request_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an employee's leave requests, newest first, optionally filtered
/// by status.
pub async fn get_leave_requests_for_employee(
    db: &DatabaseConnection,
    employee_id: i64,
    status: Option<LeaveStatus>,
) -> Result<Vec<leave_request::Model>> {
    let mut query = LeaveRequest::find()
        .filter(leave_request::Column::EmployeeId.eq(employee_id))
        .order_by_desc(leave_request::Column::CreatedAt);
    if let Some(status) = status {
        query = query.filter(leave_request::Column::Status.eq(status));
    }

    query.all(db).await.map_err(Into::into)
}
