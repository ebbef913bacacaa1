use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroUsize;
use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::listing::{parse_with_default, ListOptions, DEFAULT_SORT_FIELD};
use crate::tags::EmptyTagPolicy;

pub const ENV_PREFIX: &str = "TAGGED_ASSETS";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub sortable_fields: BTreeSet<String>,
    pub default_sort_field: String,
    pub band_count: NonZeroUsize,
    pub cloud_limit: usize,
    pub thumbnails_per_page: NonZeroUsize,
    pub empty_tag_policy: EmptyTagPolicy,
}

impl Settings {
    /// Defaults, then the JSON file at `path` (if given and present), then `TAGGED_ASSETS__*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, Self::environment())
    }

    /// `TAGGED_ASSETS__BAND_COUNT=3`, `TAGGED_ASSETS__SORTABLE_FIELDS=title,position`, ...
    #[must_use]
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("sortable_fields")
            .try_parsing(true)
    }

    #[tracing::instrument(skip(environment), err(Debug))]
    pub fn load_with(path: Option<&Path>, environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default(
                "sortable_fields",
                vec![
                    "title".to_string(),
                    "created_at".to_string(),
                    "updated_at".to_string(),
                    "position".to_string(),
                ],
            )?
            .set_default("default_sort_field", DEFAULT_SORT_FIELD)?
            .set_default("band_count", 5)?
            .set_default("cloud_limit", 100)?
            .set_default("thumbnails_per_page", 20)?
            .set_default("empty_tag_policy", "no_results")?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Json).required(false));
        }
        let settings: Self = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        tracing::debug!("loaded settings {settings:?}");
        Ok(settings)
    }

    /// [`crate::listing::parse`] against the configured sortable fields and default field.
    pub fn parse_list_options(
        &self,
        raw: &HashMap<String, String>,
    ) -> Result<ListOptions, ValidationError> {
        parse_with_default(raw, &self.sortable_fields, &self.default_sort_field)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sortable_fields: ["title", "created_at", "updated_at", "position"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_sort_field: DEFAULT_SORT_FIELD.to_string(),
            band_count: NonZeroUsize::MIN.saturating_add(4),
            cloud_limit: 100,
            thumbnails_per_page: NonZeroUsize::MIN.saturating_add(19),
            empty_tag_policy: EmptyTagPolicy::NoResults,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::environment().source(Some(vars))
    }

    #[test]
    fn defaults_match_builder_defaults() -> Result<()> {
        let settings = Settings::load_with(None, environment(&[]))?;
        assert_eq!(Settings::default(), settings);
        assert_eq!(5, settings.band_count.get());
        assert_eq!(20, settings.thumbnails_per_page.get());
        Ok(())
    }

    #[test]
    fn file_overrides_defaults() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        write!(
            file,
            r#"{{"band_count": 3, "sortable_fields": ["title", "size"], "empty_tag_policy": "whole_corpus"}}"#
        )?;
        let settings = Settings::load_with(Some(file.path()), environment(&[]))?;
        assert_eq!(3, settings.band_count.get());
        assert_eq!(EmptyTagPolicy::WholeCorpus, settings.empty_tag_policy);
        assert_eq!(100, settings.cloud_limit);
        assert!(settings.sortable_fields.contains("size"));
        Ok(())
    }

    #[test]
    fn missing_file_is_fine() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let settings =
            Settings::load_with(Some(dir.path().join("absent.json").as_path()), environment(&[]))?;
        assert_eq!(Settings::default(), settings);
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        write!(file, r#"{{"band_count": 7, "cloud_limit": 40}}"#)?;
        let settings = Settings::load_with(
            Some(file.path()),
            environment(&[
                ("TAGGED_ASSETS__BAND_COUNT", "3"),
                ("TAGGED_ASSETS__SORTABLE_FIELDS", "title,size"),
                ("TAGGED_ASSETS__EMPTY_TAG_POLICY", "whole_corpus"),
                ("OTHER_APP__BAND_COUNT", "9"),
            ]),
        )?;
        assert_eq!(3, settings.band_count.get());
        assert_eq!(40, settings.cloud_limit);
        assert_eq!(
            ["size", "title"].into_iter().map(String::from).collect::<BTreeSet<_>>(),
            settings.sortable_fields
        );
        assert_eq!(EmptyTagPolicy::WholeCorpus, settings.empty_tag_policy);
        Ok(())
    }

    #[test]
    fn zero_band_count_is_rejected() {
        let loaded = Settings::load_with(None, environment(&[("TAGGED_ASSETS__BAND_COUNT", "0")]));
        assert_eq!(None, loaded.ok());
    }

    #[test]
    fn list_options_use_configured_fields() -> Result<()> {
        let settings = Settings {
            sortable_fields: ["position".to_string()].into_iter().collect(),
            default_sort_field: "position".to_string(),
            ..Settings::default()
        };
        let options = settings.parse_list_options(&HashMap::new())?;
        assert_eq!("position", options.by);

        let raw: HashMap<String, String> = [("by".to_string(), "title".to_string())].into_iter().collect();
        assert_eq!("by", settings.parse_list_options(&raw).unwrap_err().option());
        Ok(())
    }
}
