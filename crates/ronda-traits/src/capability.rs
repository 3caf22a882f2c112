//! Capability probing for optional strategy engines.
//!
//! Rather than recording engine availability in process-wide state at
//! startup, engines register a [`StrategyProvider`] and callers probe for
//! one by name, receiving a tagged [`Capability`] they can match on.
//! Nothing is global and probes are repeatable, so availability is testable
//! without restarting the process.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Result, RondaError};
use crate::strategy::PairStrategy;

/// Outcome of probing for an optional capability.
#[derive(Debug)]
pub enum Capability<T> {
    /// The capability is present; the handle is ready to use.
    Available(T),
    /// The capability is absent, with a human-readable reason.
    Unavailable {
        /// Why the capability could not be provided.
        reason: String,
    },
}

impl<T> Capability<T> {
    /// Whether the capability is present.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Converts the probe outcome into a `Result`, surfacing the reason as a
    /// [`RondaError::CapabilityUnavailable`].
    ///
    /// # Errors
    ///
    /// Returns `CapabilityUnavailable` when the capability is absent.
    pub fn ok(self) -> Result<T> {
        match self {
            Self::Available(handle) => Ok(handle),
            Self::Unavailable { reason } => Err(RondaError::CapabilityUnavailable(reason)),
        }
    }

    /// The unavailability reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}

/// A factory for a named pair-strategy engine.
pub trait StrategyProvider: Send + Sync {
    /// Registry name of the engine (e.g. `"distance"`).
    fn name(&self) -> &str;

    /// Short description shown when listing providers.
    fn description(&self) -> &str;

    /// Creates a fresh engine instance.
    fn create(&self) -> Box<dyn PairStrategy>;
}

/// Registry of strategy providers, probed by name.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn StrategyProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider, replacing any previous provider with the same
    /// name.
    pub fn register(&mut self, provider: Arc<dyn StrategyProvider>) {
        self.providers
            .insert(provider.name().to_string(), provider);
    }

    /// Probes for a strategy engine by name.
    ///
    /// Returns a fresh engine instance when the provider is registered, or
    /// an [`Capability::Unavailable`] naming the missing provider and the
    /// registered alternatives.
    pub fn probe(&self, name: &str) -> Capability<Box<dyn PairStrategy>> {
        match self.providers.get(name) {
            Some(provider) => Capability::Available(provider.create()),
            None => {
                let known: Vec<&str> = self.providers.keys().map(String::as_str).collect();
                let reason = if known.is_empty() {
                    format!("strategy engine '{name}' is not registered (no providers registered)")
                } else {
                    format!(
                        "strategy engine '{name}' is not registered (available: {})",
                        known.join(", ")
                    )
                };
                Capability::Unavailable { reason }
            }
        }
    }

    /// Names of all registered providers, sorted.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Registered provider by name, for descriptions and listings.
    #[must_use]
    pub fn provider(&self, name: &str) -> Option<&Arc<dyn StrategyProvider>> {
        self.providers.get(name)
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.provider_names())
            .finish()
    }
}
