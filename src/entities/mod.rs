//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod attendance_record;
pub mod employee;
pub mod leave_balance;
pub mod leave_request;

// Re-export specific types to avoid conflicts
pub use attendance_record::{
    AttendanceStatus, Column as AttendanceRecordColumn, Entity as AttendanceRecord,
    Model as AttendanceRecordModel,
};
pub use employee::{
    Column as EmployeeColumn, EmployeeStatus, Entity as Employee, Model as EmployeeModel,
};
pub use leave_balance::{
    Column as LeaveBalanceColumn, Entity as LeaveBalance, Model as LeaveBalanceModel,
};
pub use leave_request::{
    Column as LeaveRequestColumn, Entity as LeaveRequest, HalfDayType, LeaveStatus,
    Model as LeaveRequestModel,
};
