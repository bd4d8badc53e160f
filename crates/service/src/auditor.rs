//! Resolution of the principal recorded in audit columns.
use models::audit::Actor;

/// Supplies the actor for the current unit of work.
pub trait AuditorResolver: Send + Sync {
    fn current_actor(&self) -> Actor;
}

/// Always returns the same configured principal (`SYSTEM` by default).
#[derive(Debug, Clone, Default)]
pub struct SystemAuditor {
    actor: Actor,
}

impl SystemAuditor {
    pub fn new(name: impl Into<String>) -> Self { Self { actor: Actor::new(name) } }
}

impl AuditorResolver for SystemAuditor {
    fn current_actor(&self) -> Actor { self.actor.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolves_system() {
        assert_eq!(SystemAuditor::default().current_actor().as_str(), models::audit::SYSTEM_ACTOR);
        assert_eq!(SystemAuditor::new("importer").current_actor().to_string(), "importer");
    }
}
