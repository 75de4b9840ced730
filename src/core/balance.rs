//! Leave balance ledger - Keeps allocated/used day counters consistent with
//! approved leave requests.
//!
//! The balance row is created lazily on first access, seeded from the
//! employee's current annual allocation. Two concurrent first accesses can
//! both observe "absent"; the unique index on `employee_id` makes the loser's
//! insert fail, which is handled by re-reading the winner's row rather than
//! surfacing an error. `used_days` is only ever incremented by the approval
//! flow, via an atomic SQL-level update so it can join the approval
//! transaction.

use crate::{
    entities::{
        leave_balance, leave_request, Employee, LeaveBalance, LeaveRequest, LeaveStatus,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{sea_query::Expr, Set, SqlErr, prelude::*};

/// Derived view of an employee's leave position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceSummary {
    /// Days allocated for the year (the employee's annual allocation)
    pub allocated: f64,
    /// Days consumed by approved requests
    pub used: f64,
    /// Days still available, floored at zero
    pub remaining: f64,
}

/// Computes an employee's balance from first principles: the employee's
/// annual allocation minus the sum of all APPROVED request totals. Pending
/// and rejected requests do not count.
///
/// Raises [`Error::NotFound`] when the employee does not exist.
pub async fn calculate_balance(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<BalanceSummary> {
    let employee = Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Employee", employee_id))?;

    let approved = LeaveRequest::find()
        .filter(leave_request::Column::EmployeeId.eq(employee_id))
        .filter(leave_request::Column::Status.eq(LeaveStatus::Approved))
        .all(db)
        .await?;

    let allocated = f64::from(employee.annual_leave_days);
    let used: f64 = approved.iter().map(|request| request.total_days).sum();

    Ok(BalanceSummary {
        allocated,
        used,
        remaining: (allocated - used).max(0.0),
    })
}

/// Returns the employee's balance row, creating it on first access.
///
/// The lazy creation is racy by nature: if another task creates the row
/// between our read and insert, the unique index rejects the insert and the
/// existing row is re-read and returned.
pub async fn get_or_create_balance<C>(db: &C, employee_id: i64) -> Result<leave_balance::Model>
where
    C: ConnectionTrait,
{
    let employee = Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Employee", employee_id))?;

    if let Some(balance) = find_balance(db, employee_id).await? {
        return Ok(balance);
    }

    let new_balance = leave_balance::ActiveModel {
        employee_id: Set(employee_id),
        allocated_days: Set(f64::from(employee.annual_leave_days)),
        used_days: Set(0.0),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    match new_balance.insert(db).await {
        Ok(balance) => Ok(balance),
        Err(err) => {
            // Lost the creation race; the winner's row is the balance.
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                if let Some(balance) = find_balance(db, employee_id).await? {
                    return Ok(balance);
                }
            }
            Err(err.into())
        }
    }
}

async fn find_balance<C>(db: &C, employee_id: i64) -> Result<Option<leave_balance::Model>>
where
    C: ConnectionTrait,
{
    LeaveBalance::find()
        .filter(leave_balance::Column::EmployeeId.eq(employee_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Increments the employee's `used_days` by the request's total, atomically
/// at the SQL level.
///
/// Must run inside the same transaction as the PENDING→APPROVED status
/// update; the one-shot transition is what guarantees this increment never
/// runs twice for the same request.
pub async fn apply_approval<C>(db: &C, request: &leave_request::Model) -> Result<()>
where
    C: ConnectionTrait,
{
    // Ensure the row exists before the increment touches it
    get_or_create_balance(db, request.employee_id).await?;

    LeaveBalance::update_many()
        .col_expr(
            leave_balance::Column::UsedDays,
            Expr::col(leave_balance::Column::UsedDays).add(request.total_days),
        )
        .col_expr(leave_balance::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(leave_balance::Column::EmployeeId.eq(request.employee_id))
        .exec(db)
        .await?;

    Ok(())
}

/// Explicitly adjusts the allocated days on an employee's balance row,
/// independently of the employee's annual allocation.
pub async fn set_allocated_days(
    db: &DatabaseConnection,
    employee_id: i64,
    allocated_days: f64,
) -> Result<leave_balance::Model> {
    if !(0.0..=365.0).contains(&allocated_days) {
        return Err(Error::validation(
            "Allocated days must be between 0 and 365",
            "allocated_days",
        ));
    }

    let balance = get_or_create_balance(db, employee_id).await?;

    let mut active: leave_balance::ActiveModel = balance.into();
    active.allocated_days = Set(allocated_days);
    active.updated_at = Set(Utc::now());

    let result = active.update(db).await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::leave;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_calculate_balance_counts_only_approved() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        let approved = create_test_leave_request(&db, employee.id, 3.0).await?;
        leave::approve_leave_request(&db, approved.id).await?;
        // A pending request must not count
        create_test_leave_request(&db, employee.id, 10.0).await?;

        let summary = calculate_balance(&db, employee.id).await?;
        assert_eq!(summary.allocated, 25.0);
        assert_eq!(summary.used, 3.0);
        assert_eq!(summary.remaining, 22.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_calculate_balance_missing_employee() -> Result<()> {
        let db = setup_test_db().await?;

        let result = calculate_balance(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { resource, .. } if resource == "Employee"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_remaining_never_negative() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_custom_employee(&db, "Low Allocation", "low@example.com", 2).await?;

        let request = create_test_leave_request(&db, employee.id, 5.0).await?;
        leave::approve_leave_request(&db, request.id).await?;

        let summary = calculate_balance(&db, employee.id).await?;
        assert_eq!(summary.used, 5.0);
        assert_eq!(summary.remaining, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_create_seeds_from_allocation() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        let balance = get_or_create_balance(&db, employee.id).await?;
        assert_eq!(balance.employee_id, employee.id);
        assert_eq!(balance.allocated_days, 25.0);
        assert_eq!(balance.used_days, 0.0);
        assert_eq!(balance.remaining(), 25.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        let first = get_or_create_balance(&db, employee.id).await?;
        let second = get_or_create_balance(&db, employee.id).await?;

        // The second call is a pure read of the same row
        assert_eq!(first.id, second.id);
        let rows = LeaveBalance::find().all(&db).await?;
        assert_eq!(rows.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_create_missing_employee() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_or_create_balance(&db, 999).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_apply_approval_increments_used_days() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let request = create_test_leave_request(&db, employee.id, 2.5).await?;

        apply_approval(&db, &request).await?;

        let balance = get_or_create_balance(&db, employee.id).await?;
        assert_eq!(balance.used_days, 2.5);
        assert_eq!(balance.remaining(), 22.5);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_allocated_days() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        let balance = set_allocated_days(&db, employee.id, 30.0).await?;
        assert_eq!(balance.allocated_days, 30.0);

        // The employee's own allocation is untouched; only the ledger moves
        let unchanged = Employee::find_by_id(employee.id).one(&db).await?.unwrap();
        assert_eq!(unchanged.annual_leave_days, 25);

        let result = set_allocated_days(&db, employee.id, 400.0).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }
}
