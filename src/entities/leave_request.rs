//! Leave request entity - A request for time off over a date range.
//!
//! Requests are created in `PENDING` state and transition exactly once, to
//! either `APPROVED` or `REJECTED`. The transition is terminal; resolved
//! requests are never modified again. Half-day markers at the range
//! boundaries allow a request to start or end with a half day.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a leave request
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum LeaveStatus {
    /// Awaiting a decision
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Approved; counted against the employee's leave balance
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    /// Rejected; has no effect on the balance
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

/// Which half of a boundary day is taken as leave
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum HalfDayType {
    /// Morning half
    #[sea_orm(string_value = "MORNING")]
    Morning,
    /// Afternoon half
    #[sea_orm(string_value = "AFTERNOON")]
    Afternoon,
}

/// Leave request database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    /// Unique identifier for the leave request
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the employee requesting leave
    pub employee_id: i64,
    /// First day of the leave period
    pub start_date: Date,
    /// Last day of the leave period (inclusive)
    pub end_date: Date,
    /// Half-day marker for the first day, if any
    pub half_day_start: Option<HalfDayType>,
    /// Half-day marker for the last day, if any
    pub half_day_end: Option<HalfDayType>,
    /// Total working days requested; half days make this fractional
    pub total_days: f64,
    /// Free-text reason given by the employee
    pub reason: String,
    /// Current lifecycle state
    pub status: LeaveStatus,
    /// When the request was submitted
    pub created_at: DateTimeUtc,
    /// When the request was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `LeaveRequest` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each leave request belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
