use std::fmt;

/// Identity of the caller, passed explicitly into every mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestContext {
    pub actor_id: String,
}

impl RequestContext {
    pub fn new(actor_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
        }
    }

    /// Context for work the service does on its own behalf (migrations, backfills).
    pub fn system() -> Self {
        Self::new("system")
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.actor_id)
    }
}
