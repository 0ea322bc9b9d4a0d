use chrono::{Local, NaiveDate};

/// Format used for every persisted date.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d";
/// Format users type dates in.
pub const ENTRY_FORMAT: &str = "%d/%m/%Y";

/// Parses a date given in either the storage or the entry format.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, STORAGE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, ENTRY_FORMAT))
        .ok()
}

/// Converts an entry-format date to storage format.
///
/// Strings that are not a valid date in either format are returned trimmed but otherwise
/// untouched, so a bad value is never silently replaced by another date.
pub fn to_storage_format(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format(STORAGE_FORMAT).to_string(),
        None => {
            tracing::warn!(date = raw, "unrecognised date kept as entered");
            raw.trim().to_string()
        }
    }
}

pub fn to_entry_format(raw: &str) -> Option<String> {
    parse_date(raw).map(|date| date.format(ENTRY_FORMAT).to_string())
}

pub fn today() -> String {
    Local::now().date_naive().format(STORAGE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_format_converts_to_storage() {
        assert_eq!(to_storage_format("05/03/2024"), "2024-03-05");
        assert_eq!(to_storage_format("2024-03-05"), "2024-03-05");
    }

    #[test]
    fn conversion_round_trips_for_valid_dates() {
        let entry = to_entry_format("2023-12-31").expect("valid date");
        assert_eq!(entry, "31/12/2023");
        assert_eq!(to_storage_format(&entry), "2023-12-31");
    }

    #[test]
    fn invalid_dates_are_left_alone() {
        assert_eq!(to_storage_format(" 31/02/2024 "), "31/02/2024");
        assert_eq!(to_storage_format("yesterday"), "yesterday");
        assert!(to_entry_format("2024-13-01").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn today_uses_storage_format() {
        assert!(parse_date(&today()).is_some());
        assert_eq!(today().len(), 10);
    }
}
