//! Listing of available containers

use std::collections::BTreeMap;

use crate::config::{ContainerConfig, ContainerMap};
use crate::error::Result;

/// Keep the entries whose group matches; an empty group keeps everything.
fn filter_by_group<'a>(
    containers: &'a ContainerMap,
    group: &str,
) -> BTreeMap<&'a str, &'a ContainerConfig> {
    containers
        .iter()
        .filter(|(_, config)| group.is_empty() || config.group == group)
        .map(|(name, config)| (name.as_str(), config))
        .collect()
}

/// Render the container listing as a human-readable table.
pub fn render_human(containers: &ContainerMap, group: &str) -> String {
    let mut output = String::new();
    output.push_str("*******************************\n");
    output.push_str("Currently available containers:\n");
    output.push_str("*******************************\n");
    output.push_str("Name:   Group:  Description:\n");
    output.push_str("-----------------------------\n");
    for (name, config) in filter_by_group(containers, group) {
        output.push_str(&format!(
            "{name}    {}   {}\n",
            config.group, config.description
        ));
    }
    output
}

/// Render the container listing as a JSON object keyed by model name.
pub fn render_json(containers: &ContainerMap, group: &str) -> Result<String> {
    let filtered = filter_by_group(containers, group);
    serde_json::to_string_pretty(&filtered)
        .map_err(|err| crate::error::ModelboxError::InvalidFormat(err.to_string()))
}
