//! Spacecraft directory
//!
//! Maps spacecraft identifiers from the telemetry feed to their display
//! names, using the `<spacecraftMap>` section of the DSN Now config document:
//!
//! ```xml
//! <config>
//!   <spacecraftMap>
//!     <spacecraft name="vgr1" friendlyName="Voyager 1"/>
//!   </spacecraftMap>
//! </config>
//! ```

use serde::Deserialize;
use std::collections::HashMap;

use super::error::DirectoryError;

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(rename = "spacecraftMap", default)]
    spacecraft_map: SpacecraftMap,
}

#[derive(Debug, Default, Deserialize)]
struct SpacecraftMap {
    #[serde(rename = "spacecraft", default)]
    spacecraft: Vec<SpacecraftEntry>,
}

#[derive(Debug, Deserialize)]
struct SpacecraftEntry {
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "@friendlyName", default)]
    friendly_name: String,
}

/// Case-insensitive spacecraft identifier → display name lookup.
///
/// Keys are always stored uppercased; go through [`SpacecraftDirectory::insert`]
/// and [`SpacecraftDirectory::lookup`] rather than touching the map directly.
#[derive(Debug, Clone, Default)]
pub struct SpacecraftDirectory {
    names: HashMap<String, String>,
}

impl SpacecraftDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the config document. Any XML error is fatal: a partial
    /// directory is never returned.
    pub fn parse(data: &[u8]) -> Result<Self, DirectoryError> {
        let doc: ConfigDocument = quick_xml::de::from_reader(data)?;

        let mut directory = Self::new();
        for entry in doc.spacecraft_map.spacecraft {
            directory.insert(&entry.name, entry.friendly_name);
        }

        tracing::debug!("Loaded {} spacecraft names", directory.len());
        Ok(directory)
    }

    /// Later entries for the same identifier replace earlier ones.
    pub fn insert(&mut self, id: &str, display_name: impl Into<String>) {
        self.names.insert(id.to_uppercase(), display_name.into());
    }

    /// Display name for `id`, ignoring case. Empty names count as missing.
    pub fn lookup(&self, id: &str) -> Option<&str> {
        self.names
            .get(&id.to_uppercase())
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Display name for `id`, or `id` itself (case preserved) when unknown.
    pub fn display_name(&self, id: &str) -> String {
        self.lookup(id).unwrap_or(id).to_string()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<config>
  <sites>
    <site name="gdscc" friendlyName="Goldstone"/>
  </sites>
  <spacecraftMap>
    <spacecraft name="vgr1" explorerName="sc_voyager_1" friendlyName="Voyager 1"/>
    <spacecraft name="mro" explorerName="sc_mro" friendlyName="Mars Reconnaissance Orbiter"/>
    <spacecraft name="dss" friendlyName=""/>
  </spacecraftMap>
</config>"#;

    #[test]
    fn test_parse_config_document() {
        let directory = SpacecraftDirectory::parse(CONFIG_XML.as_bytes()).unwrap();
        assert_eq!(directory.len(), 3);
        assert_eq!(directory.lookup("VGR1"), Some("Voyager 1"));
        assert_eq!(directory.lookup("vgr1"), Some("Voyager 1"));
        assert_eq!(directory.lookup("Mro"), Some("Mars Reconnaissance Orbiter"));
    }

    #[test]
    fn test_unknown_id_falls_back_to_raw_id() {
        let directory = SpacecraftDirectory::parse(CONFIG_XML.as_bytes()).unwrap();
        assert_eq!(directory.lookup("JNO"), None);
        assert_eq!(directory.display_name("JnO"), "JnO");
    }

    #[test]
    fn test_empty_friendly_name_counts_as_missing() {
        let directory = SpacecraftDirectory::parse(CONFIG_XML.as_bytes()).unwrap();
        assert_eq!(directory.lookup("DSS"), None);
        assert_eq!(directory.display_name("dss"), "dss");
    }

    #[test]
    fn test_later_entry_wins() {
        let mut directory = SpacecraftDirectory::new();
        directory.insert("mvn", "MAVEN (old)");
        directory.insert("MVN", "MAVEN");
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.display_name("mvn"), "MAVEN");
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let truncated = r#"<config><spacecraftMap><spacecraft name="vgr1" friendlyName="Voy"#;
        assert!(SpacecraftDirectory::parse(truncated.as_bytes()).is_err());
    }
}
