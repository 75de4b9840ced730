//! Database configuration module.
//!
//! Handles `SQLite` connection setup and table creation using `SeaORM`. Table
//! schemas are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database always matches the
//! Rust structs; the composite uniqueness of `(employee_id, date)` on
//! attendance records is not expressible on a single column and is created
//! as an explicit index alongside the tables.

use crate::entities::{attendance_record, AttendanceRecord, Employee, LeaveBalance, LeaveRequest};
use crate::errors::Result;
use sea_orm::{
    sea_query::Index, ConnectionTrait, Database, DatabaseConnection, Schema,
};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/hrtrack.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all tables and indexes from the entity definitions.
///
/// Creates tables for employees, attendance records, leave requests and
/// leave balances, plus the unique index that makes one attendance record
/// per employee per day a storage-level guarantee.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let employee_table = schema.create_table_from_entity(Employee);
    let attendance_table = schema.create_table_from_entity(AttendanceRecord);
    let leave_request_table = schema.create_table_from_entity(LeaveRequest);
    let leave_balance_table = schema.create_table_from_entity(LeaveBalance);

    db.execute(builder.build(&employee_table)).await?;
    db.execute(builder.build(&attendance_table)).await?;
    db.execute(builder.build(&leave_request_table)).await?;
    db.execute(builder.build(&leave_balance_table)).await?;

    let attendance_day_index = Index::create()
        .name("idx_attendance_employee_date")
        .table(AttendanceRecord)
        .col(attendance_record::Column::EmployeeId)
        .col(attendance_record::Column::Date)
        .unique()
        .to_owned();
    db.execute(builder.build(&attendance_day_index)).await?;

    Ok(())
}
