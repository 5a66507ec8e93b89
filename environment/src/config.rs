use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::environment::Environment;
use crate::error::{DetectError, DetectResult};
use crate::reader::validate_variable_name;

pub const DEFAULT_VARIABLE: &str = "APP_ENV";

/// Which variable to read and what each logical environment expects it to hold.
///
/// In TOML form both keys are optional:
///
/// ```toml
/// variable = "APP_ENV"
///
/// [environments]
/// development = "dev"
/// production = "prod"
/// ```
///
/// An `[environments]` table replaces the standard mapping rather than
/// extending it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub variable: String,
    /// Lower-cased on insert; the last of two case-variant names wins.
    #[serde(deserialize_with = "deserialize_environments")]
    pub environments: BTreeMap<String, String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            variable: DEFAULT_VARIABLE.to_string(),
            environments: Environment::default_mapping(),
        }
    }
}

impl MatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(s: &str) -> DetectResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    pub fn with_environment(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.environments
            .insert(name.into().to_lowercase(), value.into().to_lowercase());
        self
    }

    pub fn without_defaults(mut self) -> Self {
        self.environments.clear();
        self
    }

    pub fn validate(&self) -> DetectResult<()> {
        validate_variable_name(&self.variable)?;

        if self.environments.keys().any(|name| name.trim().is_empty()) {
            return Err(DetectError::InvalidConfig {
                message: "Environment names cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Reads the `[environments]` table in document order, so later
/// case-variant keys overwrite earlier ones.
fn deserialize_environments<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EnvironmentsVisitor;

    impl<'de> Visitor<'de> for EnvironmentsVisitor {
        type Value = BTreeMap<String, String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of environment names to expected values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut environments = BTreeMap::new();
            while let Some((name, value)) = map.next_entry::<String, String>()? {
                environments.insert(name.to_lowercase(), value.to_lowercase());
            }
            Ok(environments)
        }
    }

    deserializer.deserialize_map(EnvironmentsVisitor)
}
