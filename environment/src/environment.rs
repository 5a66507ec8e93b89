//! The closed set of standard deployment environments.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{quoted_list, DetectError, DetectResult};

/// A validated application environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Environment {
    Development,
    Production,
    Staging,
    Testing,
}

impl Environment {
    pub const DEVELOPMENT: &'static str = "development";
    pub const PRODUCTION: &'static str = "production";
    pub const STAGING: &'static str = "staging";
    pub const TESTING: &'static str = "testing";

    pub const ALL: [Environment; 4] = [
        Environment::Development,
        Environment::Production,
        Environment::Staging,
        Environment::Testing,
    ];

    /// Builds an environment from its exact, lower-case name.
    pub fn new(name: &str) -> DetectResult<Self> {
        Self::ALL
            .into_iter()
            .find(|environment| environment.name() == name)
            .ok_or_else(|| DetectError::InvalidEnvironment {
                given: name.to_string(),
                allowed: quoted_list(Self::ALL.iter().map(Environment::name)),
            })
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Environment::Development => Self::DEVELOPMENT,
            Environment::Production => Self::PRODUCTION,
            Environment::Staging => Self::STAGING,
            Environment::Testing => Self::TESTING,
        }
    }

    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    pub fn is_staging(&self) -> bool {
        *self == Environment::Staging
    }

    pub fn is_testing(&self) -> bool {
        *self == Environment::Testing
    }

    /// Each standard name mapped to itself, the mapping used when a host
    /// does not configure its own.
    pub fn default_mapping() -> BTreeMap<String, String> {
        Self::ALL
            .iter()
            .map(|environment| (environment.name().to_string(), environment.name().to_string()))
            .collect()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Environment {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Environment {
    type Error = DetectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Environment {
    type Error = DetectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Environment> for &'static str {
    fn from(environment: Environment) -> Self {
        environment.name()
    }
}
