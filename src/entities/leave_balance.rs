//! Leave balance entity - Per-employee allocated/used day counters.
//!
//! Exactly one row per employee, enforced by a unique constraint on
//! `employee_id`. The row is created lazily on first access, seeded from the
//! employee's annual allocation. `used_days` only grows, incremented by the
//! total of each approved leave request. The remaining count is derived, not
//! stored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Leave balance database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_balances")]
pub struct Model {
    /// Unique identifier for the balance row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning employee; one balance per employee
    #[sea_orm(unique)]
    pub employee_id: i64,
    /// Days allocated for the year; mirrors the employee's annual allocation
    /// at creation time but is independently adjustable afterwards
    pub allocated_days: f64,
    /// Days consumed by approved leave requests
    pub used_days: f64,
    /// When the balance was last modified
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Days still available, floored at zero. Derived on demand and never
    /// persisted.
    pub fn remaining(&self) -> f64 {
        (self.allocated_days - self.used_days).max(0.0)
    }
}

/// Defines relationships between `LeaveBalance` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each balance belongs to exactly one employee
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
