/// Authentication context for a request that passed the auth guard.
///
/// Carries no credential material, only which mechanism admitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    mechanism: String,
}

impl AuthContext {
    pub fn new(mechanism: impl Into<String>) -> Self {
        Self {
            mechanism: mechanism.into(),
        }
    }

    pub fn mechanism(&self) -> &str {
        &self.mechanism
    }
}
