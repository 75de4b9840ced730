//! Store facade - The single entry point external callers use.
//!
//! [`HrStore`] is an explicitly constructed handle owning the database
//! connection and a retry policy; hosts build one at startup and pass it
//! down, there is no global connection state. Every logical operation runs
//! through the bounded-retry executor and any failure is logged with a
//! context label before the translated error propagates.
//!
//! The retry wrapper does not inspect error kinds: a validation failure
//! surfaced inside a wrapped operation is retried just like a transient one.
//! Operations here validate before touching storage precisely to keep that
//! from mattering in practice.

use crate::{
    core::{
        attendance, balance, employee, leave,
        paginate::{PageRequest, Paginated},
        retry::{with_policy, RetryPolicy},
    },
    entities::{
        attendance_record, employee as employee_entity, leave_balance, leave_request,
        AttendanceStatus, EmployeeStatus, LeaveStatus,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::future::Future;
use tracing::error;

/// Handle over the HR database: connection plus retry policy.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HrStore {
    db: DatabaseConnection,
    retry: RetryPolicy,
}

impl HrStore {
    /// Builds a store with the default retry policy.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            retry: RetryPolicy::default(),
        }
    }

    /// Builds a store with an explicit retry policy.
    pub fn with_retry_policy(db: DatabaseConnection, retry: RetryPolicy) -> Self {
        Self { db, retry }
    }

    /// Direct access to the underlying connection, for callers composing
    /// their own queries or transactions.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Runs an operation under the store's retry policy, logging any final
    /// failure with a context label before propagating it.
    async fn run<T, F, Fut>(&self, context: &str, operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        with_policy(self.retry, operation)
            .await
            .inspect_err(|err| error!(context, error = %err, "database operation failed"))
    }

    /// Whether the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        self.db.ping().await.is_ok()
    }

    // ---- Employees ----

    /// Creates an employee. See [`employee::create_employee`].
    pub async fn create_employee(
        &self,
        new: employee::NewEmployee,
    ) -> Result<employee_entity::Model> {
        self.run("create_employee", || {
            employee::create_employee(&self.db, new.clone())
        })
        .await
    }

    /// Fetches an employee by id, raising [`Error::NotFound`] when absent.
    pub async fn employee(&self, employee_id: i64) -> Result<employee_entity::Model> {
        self.run("get_employee", || {
            employee::get_employee_by_id(&self.db, employee_id)
        })
        .await?
        .ok_or_else(|| Error::not_found("Employee", employee_id))
    }

    /// Fetches an employee by email, returning None when absent.
    pub async fn employee_by_email(&self, email: &str) -> Result<Option<employee_entity::Model>> {
        self.run("get_employee_by_email", || {
            employee::get_employee_by_email(&self.db, email)
        })
        .await
    }

    /// Lists employees in a paginated envelope.
    pub async fn list_employees(
        &self,
        status: Option<EmployeeStatus>,
        request: PageRequest,
    ) -> Result<Paginated<employee_entity::Model>> {
        self.run("list_employees", || {
            employee::list_employees(&self.db, status, request)
        })
        .await
    }

    /// Applies a patch to an employee.
    pub async fn update_employee(
        &self,
        employee_id: i64,
        patch: employee::EmployeePatch,
    ) -> Result<employee_entity::Model> {
        self.run("update_employee", || {
            employee::update_employee(&self.db, employee_id, patch.clone())
        })
        .await
    }

    /// Soft-deletes an employee; the record and its history remain.
    pub async fn deactivate_employee(&self, employee_id: i64) -> Result<employee_entity::Model> {
        self.run("deactivate_employee", || {
            employee::deactivate_employee(&self.db, employee_id)
        })
        .await
    }

    // ---- Attendance ----

    /// Marks (or re-marks) attendance for one employee on one day.
    pub async fn mark_attendance(
        &self,
        employee_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<attendance_record::Model> {
        self.run("mark_attendance", || {
            attendance::mark_attendance(&self.db, employee_id, date, status)
        })
        .await
    }

    /// Marks the same status for many employees on one day; existing records
    /// are skipped. Returns the number of rows inserted.
    pub async fn bulk_mark_attendance(
        &self,
        employee_ids: &[i64],
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<u64> {
        self.run("bulk_mark_attendance", || {
            attendance::bulk_mark_attendance(&self.db, employee_ids, date, status)
        })
        .await
    }

    /// Attendance for one calendar month, joined with employees.
    pub async fn monthly_attendance(
        &self,
        year: i32,
        month: u32,
        employee_id: Option<i64>,
    ) -> Result<Vec<(attendance_record::Model, Option<employee_entity::Model>)>> {
        self.run("monthly_attendance", || {
            attendance::monthly_attendance(&self.db, year, month, employee_id)
        })
        .await
    }

    /// Deletes an attendance record by id.
    pub async fn delete_attendance(&self, record_id: i64) -> Result<()> {
        self.run("delete_attendance", || {
            attendance::delete_attendance(&self.db, record_id)
        })
        .await
    }

    // ---- Leave ----

    /// Submits a leave request in PENDING state.
    pub async fn create_leave_request(
        &self,
        new: leave::NewLeaveRequest,
    ) -> Result<leave_request::Model> {
        self.run("create_leave_request", || {
            leave::create_leave_request(&self.db, new.clone())
        })
        .await
    }

    /// Approves a pending request; the status flip and the ledger increment
    /// commit together or not at all.
    pub async fn approve_leave_request(&self, request_id: i64) -> Result<leave_request::Model> {
        self.run("approve_leave_request", || {
            leave::approve_leave_request(&self.db, request_id)
        })
        .await
    }

    /// Rejects a pending request.
    pub async fn reject_leave_request(&self, request_id: i64) -> Result<leave_request::Model> {
        self.run("reject_leave_request", || {
            leave::reject_leave_request(&self.db, request_id)
        })
        .await
    }

    /// Fetches a leave request by id, raising [`Error::NotFound`] when absent.
    pub async fn leave_request(&self, request_id: i64) -> Result<leave_request::Model> {
        self.run("get_leave_request", || {
            leave::get_leave_request_by_id(&self.db, request_id)
        })
        .await?
        .ok_or_else(|| Error::not_found("Leave request", request_id))
    }

    /// An employee's leave requests, newest first.
    pub async fn leave_requests(
        &self,
        employee_id: i64,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<leave_request::Model>> {
        self.run("leave_requests", || {
            leave::get_leave_requests_for_employee(&self.db, employee_id, status)
        })
        .await
    }

    // ---- Balances ----

    /// Derived balance summary for an employee.
    pub async fn calculate_balance(&self, employee_id: i64) -> Result<balance::BalanceSummary> {
        self.run("calculate_balance", || {
            balance::calculate_balance(&self.db, employee_id)
        })
        .await
    }

    /// The employee's balance row, created lazily on first access.
    pub async fn get_or_create_balance(&self, employee_id: i64) -> Result<leave_balance::Model> {
        self.run("get_or_create_balance", || {
            balance::get_or_create_balance(&self.db, employee_id)
        })
        .await
    }

    /// Explicit adjustment of the allocated days on a balance row.
    pub async fn set_allocated_days(
        &self,
        employee_id: i64,
        allocated_days: f64,
    ) -> Result<leave_balance::Model> {
        self.run("set_allocated_days", || {
            balance::set_allocated_days(&self.db, employee_id, allocated_days)
        })
        .await
    }
}
