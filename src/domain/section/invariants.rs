use super::entity::Section;
use crate::domain::{require_non_empty, DomainResult};

/// Validates all Section invariants
pub fn validate_section(section: &Section) -> DomainResult<()> {
    require_non_empty("section.name", &section.name)?;
    require_non_empty("section.location", &section.location)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_section() {
        let section = Section::new("Poetry", "Floor 1").unwrap();
        assert!(validate_section(&section).is_ok());
    }

    #[test]
    fn test_empty_location_fails() {
        assert!(Section::new("Poetry", "").is_err());
    }

    #[test]
    fn test_identity_ignores_persistence_id() {
        let a = Section::new("Poetry", "Floor 1").unwrap();
        let b = Section::new("Poetry", "Floor 1").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }
}
