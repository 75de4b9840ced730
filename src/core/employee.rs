//! Employee business logic - Handles all employee-related operations.
//!
//! Provides functions for creating, retrieving, listing, updating and
//! soft-deleting employees. Inputs are validated before they reach storage
//! and storage failures surface as the crate's error taxonomy. Employees are
//! never physically deleted; deactivation flips the status to INACTIVE so
//! attendance and leave history survives.

use crate::{
    core::paginate::{paginate, PageRequest, Paginated},
    core::validate::{validate_employee, EmployeeInput},
    entities::{employee, Employee, EmployeeStatus},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Select, Set, prelude::*};

/// Payload for creating an employee. All fields required.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Full name, 2-100 characters
    pub name: String,
    /// Contact email, unique across employees
    pub email: String,
    /// Annual leave allocation in days, 0-365
    pub annual_leave_days: i32,
}

/// Patch payload for updating an employee. Only supplied fields change.
#[derive(Debug, Clone, Default)]
pub struct EmployeePatch {
    /// New name, if changing
    pub name: Option<String>,
    /// New email, if changing
    pub email: Option<String>,
    /// New annual allocation, if changing
    pub annual_leave_days: Option<i32>,
    /// New status, if changing
    pub status: Option<EmployeeStatus>,
}

impl EmployeePatch {
    fn as_input(&self) -> EmployeeInput {
        EmployeeInput {
            name: self.name.clone(),
            email: self.email.clone(),
            annual_leave_days: self.annual_leave_days,
        }
    }
}

/// Creates a new employee in ACTIVE status after validating the payload.
///
/// A duplicate email surfaces as [`Error::Conflict`] via the unique
/// constraint on the email column.
pub async fn create_employee(
    db: &DatabaseConnection,
    new: NewEmployee,
) -> Result<employee::Model> {
    validate_employee(&EmployeeInput {
        name: Some(new.name.clone()),
        email: Some(new.email.clone()),
        annual_leave_days: Some(new.annual_leave_days),
    })?;

    let now = Utc::now();
    let model = employee::ActiveModel {
        name: Set(new.name.trim().to_string()),
        email: Set(new.email),
        annual_leave_days: Set(new.annual_leave_days),
        status: Set(EmployeeStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Finds an employee by id, returning None if absent.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(employee_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an employee by email, returning None if absent.
pub async fn get_employee_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<employee::Model>> {
    Employee::find()
        .filter(employee::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

fn employee_query(status: Option<EmployeeStatus>) -> Select<Employee> {
    let mut query = Employee::find().order_by_asc(employee::Column::Name);
    if let Some(status) = status {
        query = query.filter(employee::Column::Status.eq(status));
    }
    query
}

/// Lists employees alphabetically in a paginated envelope, optionally
/// filtered by status. Count and fetch run concurrently over the same
/// filter.
pub async fn list_employees(
    db: &DatabaseConnection,
    status: Option<EmployeeStatus>,
    request: PageRequest,
) -> Result<Paginated<employee::Model>> {
    paginate(
        || async move { employee_query(status).count(db).await.map_err(Into::into) },
        |offset, limit| async move {
            employee_query(status)
                .offset(offset)
                .limit(limit)
                .all(db)
                .await
                .map_err(Into::into)
        },
        request,
    )
    .await
}

/// Applies a patch to an existing employee after validating the supplied
/// fields. Raises [`Error::NotFound`] when the employee does not exist.
pub async fn update_employee(
    db: &DatabaseConnection,
    employee_id: i64,
    patch: EmployeePatch,
) -> Result<employee::Model> {
    validate_employee(&patch.as_input())?;

    let existing = Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Employee", employee_id))?;

    let mut active: employee::ActiveModel = existing.into();
    if let Some(name) = patch.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = patch.email {
        active.email = Set(email);
    }
    if let Some(days) = patch.annual_leave_days {
        active.annual_leave_days = Set(days);
    }
    if let Some(status) = patch.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now());

    let result = active.update(db).await?;
    Ok(result)
}

/// Soft-deletes an employee by setting the status to INACTIVE. The record
/// and everything it owns stays in place.
pub async fn deactivate_employee(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<employee::Model> {
    update_employee(
        db,
        employee_id,
        EmployeePatch {
            status: Some(EmployeeStatus::Inactive),
            ..Default::default()
        },
    )
    .await
}
