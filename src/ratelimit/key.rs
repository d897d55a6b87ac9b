//! Limit key construction and handling.

/// A key identifying an independent rate limit budget.
///
/// The limiter itself treats keys as opaque strings; this type captures the
/// `<operation>:<principal>` convention used to isolate budgets per
/// operation type and per authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LimitKey {
    /// The operation being limited (e.g. `process`, `delete`)
    pub operation: String,
    /// The principal the budget belongs to (e.g. a user id)
    pub principal: String,
}

impl LimitKey {
    /// Create a new limit key from an operation and a principal.
    pub fn new(operation: &str, principal: &str) -> Self {
        Self {
            operation: operation.to_string(),
            principal: principal.to_string(),
        }
    }

    /// Convert the key to its canonical string representation.
    ///
    /// This is the form passed to the limiter and used in logging.
    pub fn to_string_key(&self) -> String {
        format!("{}:{}", self.operation, self.principal)
    }
}

impl std::fmt::Display for LimitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_key())
    }
}
