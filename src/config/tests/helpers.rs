//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::SigndeskConfig;

/// Source a configuration layer stands in for.
#[derive(Debug, Clone, Copy)]
pub enum Layer {
    /// Built-in defaults.
    Defaults,
    /// `.signdesk.toml` discovered on disk.
    File,
    /// `SIGNDESK_*` variables.
    Environment,
    /// Command-line flags.
    Cli,
}

/// Composes a [`SigndeskConfig`] from `(layer, value)` pairs, lowest
/// precedence first.
pub fn build_config_from_layers(layers: &[(Layer, Value)]) -> SigndeskConfig {
    let mut composer = MergeComposer::new();

    for (layer, value) in layers {
        let value = value.clone();
        match layer {
            Layer::Defaults => composer.push_defaults(value),
            Layer::File => composer.push_file(value, None),
            Layer::Environment => composer.push_environment(value),
            Layer::Cli => composer.push_cli(value),
        }
    }

    SigndeskConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}
