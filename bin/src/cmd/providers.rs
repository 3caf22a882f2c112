//! Provider listing and capability probing.

use ronda::{Capability, default_registry};

/// Lists registered strategy engines; optionally probes one by name.
pub(crate) fn list_providers(probe: Option<&str>) {
    let registry = default_registry();

    println!("Registered strategy engines:");
    for name in registry.provider_names() {
        let description = registry
            .provider(&name)
            .map_or_else(String::new, |p| p.description().to_string());
        println!("  {name:<14} {description}");
    }

    if let Some(name) = probe {
        println!();
        match registry.probe(name) {
            Capability::Available(strategy) => {
                println!("'{}' is available", strategy.name());
            }
            Capability::Unavailable { reason } => {
                println!("'{name}' is unavailable: {reason}");
            }
        }
    }
}
