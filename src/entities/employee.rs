//! Employee entity - Represents a member of staff.
//!
//! Each employee has a name, a unique email, an annual leave allocation and a
//! status. Employees are never physically removed; deactivation flips the
//! status to `INACTIVE` so attendance and leave history stays intact.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether an employee is currently active or has been soft-deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EmployeeStatus {
    /// Employee is active and appears in default listings
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Employee has been soft-deleted; records are retained
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
}

/// Employee database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name of the employee
    pub name: String,
    /// Contact email, unique across all employees
    #[sea_orm(unique)]
    pub email: String,
    /// Annual leave allocation in whole days (0-365)
    pub annual_leave_days: i32,
    /// Active/inactive status, used for soft deletion
    pub status: EmployeeStatus,
    /// When the employee record was created
    pub created_at: DateTimeUtc,
    /// When the employee record was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee has many attendance records
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
    /// One employee has many leave requests
    #[sea_orm(has_many = "super::leave_request::Entity")]
    LeaveRequests,
    /// One employee owns exactly one leave balance
    #[sea_orm(has_one = "super::leave_balance::Entity")]
    LeaveBalance,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl Related<super::leave_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveRequests.def()
    }
}

impl Related<super::leave_balance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveBalance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
