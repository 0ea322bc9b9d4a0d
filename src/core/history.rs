//! Record listings used by the per-category and all-transactions surfaces.

use crate::ledger::LedgerRecord;

/// Records of one category, newest first.
pub fn for_category(records: &[LedgerRecord], category: &str) -> Vec<LedgerRecord> {
    let mut matching: Vec<LedgerRecord> = records
        .iter()
        .filter(|record| record.category == category)
        .cloned()
        .collect();
    sort_newest_first(&mut matching);
    matching
}

/// Sorts on the storage-format date string, which orders lexicographically by day.
pub fn sort_newest_first(records: &mut [LedgerRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Splits records into those dated `today` and everything else, each newest first.
pub fn split_by_day(records: &[LedgerRecord], today: &str) -> (Vec<LedgerRecord>, Vec<LedgerRecord>) {
    let (mut current, mut earlier): (Vec<_>, Vec<_>) = records
        .iter()
        .cloned()
        .partition(|record| record.date == today);
    sort_newest_first(&mut current);
    sort_newest_first(&mut earlier);
    (current, earlier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<LedgerRecord> {
        vec![
            LedgerRecord::new("Food", -1.0, "2024-01-02"),
            LedgerRecord::new("Rent", -2.0, "2024-01-05"),
            LedgerRecord::new("Food", -3.0, "2024-01-09"),
        ]
    }

    #[test]
    fn category_listing_is_newest_first() {
        let food = for_category(&sample(), "Food");
        let dates: Vec<&str> = food.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-09", "2024-01-02"]);
        assert!(for_category(&sample(), "Travel").is_empty());
    }

    #[test]
    fn split_separates_today() {
        let (today, earlier) = split_by_day(&sample(), "2024-01-05");
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].category, "Rent");
        let dates: Vec<&str> = earlier.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-09", "2024-01-02"]);
    }
}
