use crate::errors::{LedgerError, Result};

/// Trims a user-supplied category name, rejecting names that are blank.
pub fn normalize_category_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidInput(
            "category name must not be blank".into(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_category_name("  Food ").unwrap(), "Food");
        assert_eq!(normalize_category_name("Eating out").unwrap(), "Eating out");
    }

    #[test]
    fn rejects_blank_names() {
        assert!(matches!(
            normalize_category_name("   "),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(normalize_category_name("").is_err());
    }
}
