use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::config::MatcherConfig;
use crate::environment::Environment;
use crate::error::{quoted_list, DetectError, DetectResult};
use crate::reader::EnvironmentReader;
use crate::source::{ReadEnv, SystemEnv};

/// Matches the captured value of a variable against caller-defined
/// logical environments.
///
/// The value is read once at construction. All names and values are
/// lower-cased, so every comparison is case-insensitive.
///
/// ```
/// # use std::env::VarError;
/// use detect_environment::{EnvironmentMatcher, ReadEnv};
///
/// struct Deployed;
///
/// impl ReadEnv for Deployed {
///     fn var(&self, _key: &str) -> Result<String, VarError> {
///         Ok("prod".to_string())
///     }
/// }
///
/// let matcher = EnvironmentMatcher::with_source(
///     Deployed,
///     "APP_ENV",
///     [("production", "PROD"), ("development", "dev")],
/// )?;
///
/// assert!(matcher.matches("Production")?);
/// assert!(!matcher.is("isDevelopment")?);
/// # Ok::<(), detect_environment::DetectError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentMatcher {
    variable: String,
    actual_value: String,
    possible_values: BTreeMap<String, String>,
}

impl EnvironmentMatcher {
    /// Reads `variable` from the process environment.
    pub fn new<I, K, V>(variable: &str, possible_values: I) -> DetectResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::with_source(SystemEnv, variable, possible_values)
    }

    pub fn with_source<E, I, K, V>(source: E, variable: &str, possible_values: I) -> DetectResult<Self>
    where
        E: ReadEnv,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let actual_value = EnvironmentReader::new(source).read(variable)?.to_lowercase();

        // Later keys win when two differ only by case.
        let possible_values: BTreeMap<String, String> = possible_values
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_lowercase(), value.as_ref().to_lowercase()))
            .collect();

        debug!(
            variable,
            environments = possible_values.len(),
            "built environment matcher"
        );

        Ok(Self {
            variable: variable.to_string(),
            actual_value,
            possible_values,
        })
    }

    /// Uses the four standard environments, each expecting its own name.
    pub fn standard<E: ReadEnv>(source: E, variable: &str) -> DetectResult<Self> {
        Self::with_source(source, variable, Environment::default_mapping())
    }

    pub fn from_config<E: ReadEnv>(config: &MatcherConfig, source: E) -> DetectResult<Self> {
        config.validate()?;
        Self::with_source(source, &config.variable, &config.environments)
    }

    /// Returns true if the logical environment `name` expects the captured value.
    ///
    /// Fails with [`DetectError::UnknownEnvironment`] rather than returning
    /// false when `name` is not configured.
    pub fn matches(&self, name: &str) -> DetectResult<bool> {
        let key = name.to_lowercase();
        let expected =
            self.possible_values
                .get(&key)
                .ok_or_else(|| DetectError::UnknownEnvironment {
                    name: name.to_string(),
                    known: quoted_list(self.possible_values.keys().map(String::as_str)),
                })?;

        let matched = *expected == self.actual_value;
        trace!(environment = %key, matched, "matched environment");
        Ok(matched)
    }

    /// Predicate-style query: `"isProduction"`, `"is_production"` and
    /// `"isproduction"` all ask [`matches`](Self::matches) about `production`.
    pub fn is(&self, predicate: &str) -> DetectResult<bool> {
        let name = predicate_name(predicate).ok_or_else(|| DetectError::UnsupportedQuery {
            query: predicate.to_string(),
        })?;
        self.matches(name)
    }

    /// The captured value, lower-cased.
    pub fn value(&self) -> &str {
        &self.actual_value
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn environments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.possible_values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// First logical environment, in name order, whose expected value is
    /// the captured one.
    pub fn current(&self) -> Option<&str> {
        self.environments()
            .find(|(_, value)| *value == self.actual_value)
            .map(|(name, _)| name)
    }
}

fn predicate_name(predicate: &str) -> Option<&str> {
    let rest = predicate.strip_prefix("is")?;
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    (!rest.is_empty()).then_some(rest)
}
