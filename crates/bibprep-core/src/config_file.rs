use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::venues::{VenueTable, YearAlias};
use crate::{Policy, UrlPreference};

/// Name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = ".bibprep.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] toml::de::Error),
}

/// On-disk TOML configuration structure.
///
/// All fields are optional; absent fields leave the defaults untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub policy: Option<PolicyConfig>,
    pub venues: Option<VenuesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub url_preference: Option<UrlPreference>,
    pub shorten_authors: Option<bool>,
    pub proceedings_prefix: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenuesConfig {
    /// Extra abbreviation -> full name pairs, merged over the built-in table.
    pub extra: Option<BTreeMap<String, String>>,
    /// Replaces the built-in year alias rules when present.
    pub year_aliases: Option<Vec<YearAliasConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearAliasConfig {
    pub code: String,
    pub since: i32,
    pub replacement: String,
}

/// Loads a config file. A file that cannot be read or parsed is an error;
/// a clean run with a half-applied config would be worse than no run.
pub fn load_from_path(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Applies a loaded config on top of the given policy and venue table.
pub fn apply(config: &ConfigFile, policy: &mut Policy, venues: &mut VenueTable) {
    if let Some(p) = &config.policy {
        if let Some(pref) = p.url_preference {
            policy.url_preference = pref;
        }
        if let Some(shorten) = p.shorten_authors {
            policy.shorten_authors = shorten;
        }
        if let Some(prefix) = p.proceedings_prefix {
            policy.proceedings_prefix = prefix;
        }
    }
    if let Some(v) = &config.venues {
        if let Some(extra) = &v.extra {
            for (code, name) in extra {
                venues.insert(code.clone(), name.clone());
            }
        }
        if let Some(aliases) = &v.year_aliases {
            venues.set_year_aliases(
                aliases
                    .iter()
                    .map(|a| YearAlias {
                        code: a.code.clone(),
                        since: a.since,
                        replacement: a.replacement.clone(),
                    })
                    .collect(),
            );
        }
    }
}
