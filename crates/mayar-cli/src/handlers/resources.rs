//! Resources command handler

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use mayar_core::ResourceRegistry;

/// List resources registered for the configured API version
///
/// Needs no API token since nothing is sent.
pub fn handle_resources(config: &Config, output: &mut OutputWriter) -> Result<bool> {
    let version = config.provider.version;
    let resources = ResourceRegistry::standard().resources(version);

    tracing::debug!(%version, count = resources.len(), "Listing resources");
    output.resources(version, &resources)?;
    Ok(true)
}
