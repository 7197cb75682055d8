//! Configuration resolver trait for layered overrides.
//!
//! # Architecture
//!
//! ```text
//! ConfigLoader.load()  →  GateConfig (base)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()
//!                              │
//!                              ▼
//!                     GateConfig (final)
//! ```
//!
//! The CLI implements this for its command-line flags.

use super::GateConfig;

/// Trait for applying configuration overrides.
///
/// Implementors modify an already loaded config with their own overrides,
/// keeping file/env loading separate from invocation-time settings.
pub trait ConfigResolver {
    /// Applies overrides to the given configuration.
    ///
    /// Only values the caller actually set should be applied.
    fn apply(&self, config: &mut GateConfig);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_resolver() {
        struct FallbackOverride(Option<&'static str>);

        impl ConfigResolver for FallbackOverride {
            fn apply(&self, config: &mut GateConfig) {
                if let Some(route) = self.0 {
                    config.routes.fallback = route.into();
                }
            }
        }

        let mut config = GateConfig::default();
        FallbackOverride(None).apply(&mut config);
        assert_eq!(config.routes.fallback, "/dashboard");

        FallbackOverride(Some("/home")).apply(&mut config);
        assert_eq!(config.routes.fallback, "/home");
    }
}
