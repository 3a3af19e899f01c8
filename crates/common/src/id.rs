//! ID generation utilities.

use ulid::Ulid;
use uuid::Uuid;

/// Generator for entity IDs and access tokens.
///
/// Entity IDs are lowercase ULIDs: sortable by creation time, which keeps
/// log listings in insertion order even when timestamps collide.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator;

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generate a new entity ID.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }

    /// Generate a random access token.
    ///
    /// Tokens are UUID v4: fully random, no time component.
    #[must_use]
    pub fn generate_token(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_lowercase_ulids() {
        let ids = IdGenerator::new();
        let id = ids.generate();

        assert_eq!(id.len(), 26);
        assert_eq!(id, id.to_lowercase());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids = IdGenerator::new();
        assert_ne!(ids.generate(), ids.generate());
    }

    #[test]
    fn test_tokens_are_hyphenless() {
        let ids = IdGenerator::new();
        let token = ids.generate_token();

        assert_eq!(token.len(), 32);
        assert!(!token.contains('-'));
    }
}
