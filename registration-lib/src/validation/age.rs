//! Calendar age

use chrono::Datelike;
use chrono::NaiveDate;

/// Minimum age, in whole years, required to register.
pub const MIN_AGE: i32 = 18;

/// Age in whole years on `today` for someone born on `birth`.
///
/// Calendar based: the year difference, minus one if this year's birthday
/// (by month and day) has not been reached yet.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
