use super::entity::Author;
use crate::domain::{require_non_empty, DomainResult};

/// Validates all Author invariants
pub fn validate_author(author: &Author) -> DomainResult<()> {
    require_non_empty("author.given_name", &author.given_name)?;
    require_non_empty("author.family_name", &author.family_name)?;
    require_non_empty("author.nationality", &author.nationality)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_author() {
        let author = Author::new("Mihai", "Eminescu", "Romanian").unwrap();
        assert!(validate_author(&author).is_ok());
    }

    #[test]
    fn test_empty_family_name_fails() {
        assert!(Author::new("Mihai", "   ", "Romanian").is_err());
    }

    #[test]
    fn test_empty_nationality_fails() {
        assert!(Author::new("Mihai", "Eminescu", "").is_err());
    }
}
