use super::entity::Reader;
use crate::domain::{require_non_empty, require_positive, DomainResult};

/// Validates all Reader invariants
pub fn validate_reader(reader: &Reader) -> DomainResult<()> {
    require_non_empty("reader.given_name", &reader.given_name)?;
    require_non_empty("reader.family_name", &reader.family_name)?;
    require_non_empty("reader.credential", &reader.credential)?;
    require_positive("reader.card_number", reader.card_number)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_reader() {
        let reader = Reader::new("Andrei", "Popescu", 1, "parola123").unwrap();
        assert!(validate_reader(&reader).is_ok());
        assert!(reader.borrowed_books.is_empty());
    }

    #[test]
    fn test_zero_card_number_fails() {
        assert!(Reader::new("Andrei", "Popescu", 0, "parola123").is_err());
    }

    #[test]
    fn test_empty_credential_fails() {
        assert!(Reader::new("Andrei", "Popescu", 1, "").is_err());
    }
}
