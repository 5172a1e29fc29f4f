//! Copyright year stamp

use chrono::{Datelike, Local, NaiveDate};

/// Text written into the year slots
pub fn year_text(today: NaiveDate) -> String {
    today.year().to_string()
}

/// Today's date in the reader's time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
