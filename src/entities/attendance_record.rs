//! Attendance record entity - One row per employee per calendar day.
//!
//! The `(employee_id, date)` pair is unique (enforced by an index created in
//! [`crate::config::database::create_tables`]); marking attendance twice for
//! the same day updates the existing row. `days_count` always corresponds to
//! the status: FULL counts 1, half days count 0.5, ABSENT and LEAVE count 0.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How an employee's day was spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum AttendanceStatus {
    /// Present for the whole day
    #[sea_orm(string_value = "FULL")]
    Full,
    /// Present in the morning only
    #[sea_orm(string_value = "HALF_MORNING")]
    HalfMorning,
    /// Present in the afternoon only
    #[sea_orm(string_value = "HALF_AFTERNOON")]
    HalfAfternoon,
    /// Absent without leave
    #[sea_orm(string_value = "ABSENT")]
    Absent,
    /// Away on approved leave
    #[sea_orm(string_value = "LEAVE")]
    Leave,
}

/// Attendance record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    /// Unique identifier for the attendance record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the employee this record belongs to
    pub employee_id: i64,
    /// Calendar day the record covers
    pub date: Date,
    /// How the day was spent
    pub status: AttendanceStatus,
    /// Working days counted for this record: 0, 0.5 or 1
    pub days_count: f64,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// When the record was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `AttendanceRecord` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each attendance record belongs to one employee
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
