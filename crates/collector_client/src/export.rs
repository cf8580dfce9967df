use chrono::NaiveDate;

/// Deterministic download name for the spreadsheet export, derived from the
/// given date: `instagram_comments_{YYYY-MM-DD}.xlsx`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("instagram_comments_{}.xlsx", date.format("%Y-%m-%d"))
}
