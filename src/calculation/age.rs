//! Age derivation from date of birth.

use chrono::NaiveDate;

/// Returns the employee's age in whole years on `as_of`.
///
/// A birthday falling on `as_of` counts. A date of birth after `as_of`
/// yields 0.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::age_in_years;
/// use chrono::NaiveDate;
///
/// let dob = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
/// assert_eq!(age_in_years(dob, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()), 33);
/// assert_eq!(age_in_years(dob, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), 34);
/// ```
pub fn age_in_years(date_of_birth: NaiveDate, as_of: NaiveDate) -> u32 {
    as_of.years_since(date_of_birth).unwrap_or(0)
}
