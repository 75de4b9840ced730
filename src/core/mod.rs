//! Core business logic - framework-agnostic employee, attendance, leave and
//! balance operations, plus the validation, retry and pagination utilities
//! they are built from.

pub mod attendance;
pub mod balance;
pub mod employee;
pub mod leave;
pub mod paginate;
pub mod retry;
pub mod validate;
