//! Token generator trait.

/// Source of invitation tokens.
///
/// # Implementation Notes
///
/// - Must supply at least 128 bits of cryptographically secure randomness
/// - Stateless: every call is independent
/// - Tests substitute a deterministic generator
pub trait TokenGenerator: Send + Sync {
    /// Produce a fresh token.
    fn generate(&self) -> String;
}
