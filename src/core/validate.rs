//! Input validation - Pure, synchronous checks on entity payloads.
//!
//! Validators operate on partial payloads: only the fields a caller supplies
//! are checked, which lets the same function serve both create and patch
//! flows. Checks are fail-fast; the first violated rule returns immediately
//! and the check order within each validator is a documented contract:
//!
//! * employee: name, then email, then annual leave days
//! * attendance: date, then days count
//! * leave request: date range, then total days
//!
//! Callers that need every violation at once must call per field themselves.

use crate::{
    entities::AttendanceStatus,
    errors::{Error, Result},
};
use chrono::{Duration, NaiveDate, Utc};

/// Day counts an attendance record may carry. Exact membership, no tolerance.
const VALID_DAY_COUNTS: [f64; 3] = [0.0, 0.5, 1.0];

/// Partial employee payload for validation
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    /// Full name, 2-100 characters after trimming
    pub name: Option<String>,
    /// Contact email in `local@domain.tld` shape
    pub email: Option<String>,
    /// Annual allocation, 0-365 days
    pub annual_leave_days: Option<i32>,
}

/// Partial attendance payload for validation
#[derive(Debug, Clone, Copy, Default)]
pub struct AttendanceInput {
    /// Day being marked; must lie within the past year
    pub date: Option<NaiveDate>,
    /// Working days counted; must be exactly 0, 0.5 or 1
    pub days_count: Option<f64>,
}

/// Partial leave request payload for validation
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveRequestInput {
    /// First day of the requested period
    pub start_date: Option<NaiveDate>,
    /// Last day of the requested period
    pub end_date: Option<NaiveDate>,
    /// Total working days requested, in (0, 365]
    pub total_days: Option<f64>,
}

/// Checks whether a string has the `local@domain.tld` shape: exactly one `@`,
/// no whitespace, and a dot with a non-empty tail in the domain part.
fn email_shape_ok(email: &str) -> bool {
    let part_ok =
        |s: &str| !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '@');

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    part_ok(local) && part_ok(host) && part_ok(tld)
}

/// Validates employee fields. Check order: name, email, annual leave days.
pub fn validate_employee(input: &EmployeeInput) -> Result<()> {
    if let Some(name) = &input.name {
        if name.trim().chars().count() < 2 {
            return Err(Error::validation(
                "Name must be at least 2 characters long",
                "name",
            ));
        }
        if name.chars().count() > 100 {
            return Err(Error::validation(
                "Name must be less than 100 characters",
                "name",
            ));
        }
    }

    if let Some(email) = &input.email {
        if !email_shape_ok(email) {
            return Err(Error::validation("Invalid email format", "email"));
        }
    }

    if let Some(days) = input.annual_leave_days {
        if !(0..=365).contains(&days) {
            return Err(Error::validation(
                "Annual leave days must be between 0 and 365",
                "annual_leave_days",
            ));
        }
    }

    Ok(())
}

/// Validates attendance fields. Check order: date, days count.
///
/// The date must not lie in the future and must not be older than 365 days.
/// Status membership needs no runtime check here; [`AttendanceStatus`] is a
/// closed enum, so an invalid status cannot reach this layer.
pub fn validate_attendance(input: &AttendanceInput) -> Result<()> {
    if let Some(date) = input.date {
        let today = Utc::now().date_naive();
        if date > today {
            return Err(Error::validation(
                "Cannot mark attendance for future dates",
                "date",
            ));
        }
        if date < today - Duration::days(365) {
            return Err(Error::validation(
                "Cannot mark attendance for dates older than 1 year",
                "date",
            ));
        }
    }

    if let Some(days_count) = input.days_count {
        if !VALID_DAY_COUNTS.contains(&days_count) {
            return Err(Error::validation(
                "Days count must be 0, 0.5, or 1",
                "days_count",
            ));
        }
    }

    Ok(())
}

/// Validates leave request fields. Check order: date range, total days.
///
/// The range checks only run when both dates are supplied, matching patch
/// semantics where a single boundary may change.
pub fn validate_leave_request(input: &LeaveRequestInput) -> Result<()> {
    if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
        if start > end {
            return Err(Error::validation(
                "Start date cannot be after end date",
                "start_date",
            ));
        }

        let today = Utc::now().date_naive();
        if end > today + Duration::days(365) {
            return Err(Error::validation(
                "Leave request cannot be more than 1 year in the future",
                "end_date",
            ));
        }
    }

    if let Some(total) = input.total_days {
        if total <= 0.0 || total > 365.0 {
            return Err(Error::validation(
                "Total days must be between 0 and 365",
                "total_days",
            ));
        }
    }

    Ok(())
}

/// Maps an attendance status to the day count it must carry:
/// FULL counts 1, half days count 0.5, ABSENT and LEAVE count 0.
pub fn days_for_status(status: AttendanceStatus) -> f64 {
    match status {
        AttendanceStatus::Full => 1.0,
        AttendanceStatus::HalfMorning | AttendanceStatus::HalfAfternoon => 0.5,
        AttendanceStatus::Absent | AttendanceStatus::Leave => 0.0,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn assert_field(result: Result<()>, expected: &str) {
        match result.unwrap_err() {
            Error::Validation { field, .. } => assert_eq!(field.as_deref(), Some(expected)),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_employee_passes() {
        let input = EmployeeInput {
            name: Some("John Doe".to_string()),
            email: Some("john@example.com".to_string()),
            annual_leave_days: Some(25),
        };
        assert!(validate_employee(&input).is_ok());
    }

    #[test]
    fn test_short_name_rejected() {
        let input = EmployeeInput {
            name: Some("A".to_string()),
            ..Default::default()
        };
        assert_field(validate_employee(&input), "name");
    }

    #[test]
    fn test_whitespace_padded_name_is_trimmed_before_length_check() {
        let input = EmployeeInput {
            name: Some("  A   ".to_string()),
            ..Default::default()
        };
        assert_field(validate_employee(&input), "name");
    }

    #[test]
    fn test_long_name_rejected() {
        let input = EmployeeInput {
            name: Some("A".repeat(101)),
            ..Default::default()
        };
        assert_field(validate_employee(&input), "name");
    }

    #[test]
    fn test_invalid_emails_rejected() {
        for email in ["invalid-email", "no@tld", "two@@example.com", "spaced @example.com", "@example.com", "user@.com"] {
            let input = EmployeeInput {
                email: Some(email.to_string()),
                ..Default::default()
            };
            assert_field(validate_employee(&input), "email");
        }
    }

    #[test]
    fn test_valid_emails_accepted() {
        for email in ["john@example.com", "a@b.c", "first.last@sub.example.org"] {
            let input = EmployeeInput {
                email: Some(email.to_string()),
                ..Default::default()
            };
            assert!(validate_employee(&input).is_ok(), "{email} should pass");
        }
    }

    #[test]
    fn test_annual_leave_days_bounds() {
        for days in [-1, 366, 400] {
            let input = EmployeeInput {
                annual_leave_days: Some(days),
                ..Default::default()
            };
            assert_field(validate_employee(&input), "annual_leave_days");
        }
        for days in [0, 25, 365] {
            let input = EmployeeInput {
                annual_leave_days: Some(days),
                ..Default::default()
            };
            assert!(validate_employee(&input).is_ok());
        }
    }

    #[test]
    fn test_employee_check_order_name_before_email() {
        // Both fields invalid; the name failure must surface first.
        let input = EmployeeInput {
            name: Some("A".to_string()),
            email: Some("invalid".to_string()),
            ..Default::default()
        };
        assert_field(validate_employee(&input), "name");
    }

    #[test]
    fn test_future_attendance_date_rejected() {
        let input = AttendanceInput {
            date: Some(Utc::now().date_naive() + Duration::days(1)),
            days_count: None,
        };
        assert_field(validate_attendance(&input), "date");
    }

    #[test]
    fn test_old_attendance_date_rejected() {
        let input = AttendanceInput {
            date: Some(Utc::now().date_naive() - Duration::days(730)),
            days_count: None,
        };
        assert_field(validate_attendance(&input), "date");
    }

    #[test]
    fn test_recent_attendance_date_accepted() {
        let input = AttendanceInput {
            date: Some(Utc::now().date_naive() - Duration::days(30)),
            days_count: Some(1.0),
        };
        assert!(validate_attendance(&input).is_ok());
    }

    #[test]
    fn test_days_count_exact_membership() {
        for days_count in [0.0, 0.5, 1.0] {
            let input = AttendanceInput {
                date: None,
                days_count: Some(days_count),
            };
            assert!(validate_attendance(&input).is_ok());
        }
        for days_count in [0.3, 0.25, 1.5, -0.5] {
            let input = AttendanceInput {
                date: None,
                days_count: Some(days_count),
            };
            assert_field(validate_attendance(&input), "days_count");
        }
    }

    #[test]
    fn test_leave_request_reversed_dates_rejected_before_total_days() {
        // total_days is also invalid, but the date-order rule fires first.
        let input = LeaveRequestInput {
            start_date: Some(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            total_days: Some(0.0),
        };
        assert_field(validate_leave_request(&input), "start_date");
    }

    #[test]
    fn test_leave_request_too_far_in_future_rejected() {
        let today = Utc::now().date_naive();
        let input = LeaveRequestInput {
            start_date: Some(today),
            end_date: Some(today + Duration::days(730)),
            total_days: None,
        };
        assert_field(validate_leave_request(&input), "end_date");
    }

    #[test]
    fn test_leave_request_total_days_bounds() {
        for total in [0.0, -1.0, 365.5] {
            let input = LeaveRequestInput {
                total_days: Some(total),
                ..Default::default()
            };
            assert_field(validate_leave_request(&input), "total_days");
        }
        for total in [0.5, 5.0, 365.0] {
            let input = LeaveRequestInput {
                total_days: Some(total),
                ..Default::default()
            };
            assert!(validate_leave_request(&input).is_ok());
        }
    }

    #[test]
    fn test_days_for_status_mapping() {
        assert_eq!(days_for_status(AttendanceStatus::Full), 1.0);
        assert_eq!(days_for_status(AttendanceStatus::HalfMorning), 0.5);
        assert_eq!(days_for_status(AttendanceStatus::HalfAfternoon), 0.5);
        assert_eq!(days_for_status(AttendanceStatus::Absent), 0.0);
        assert_eq!(days_for_status(AttendanceStatus::Leave), 0.0);
    }
}
