use crate::environment::Environment;
use crate::error::DetectResult;
use crate::reader::EnvironmentReader;
use crate::source::{ReadEnv, SystemEnv};

/// Detects the application's [`Environment`] from a named variable.
///
/// The value must be one of the four standard names, spelled exactly.
/// Use [`EnvironmentMatcher`](crate::EnvironmentMatcher) for custom or
/// case-insensitive mappings.
#[derive(Debug, Clone)]
pub struct Detect<E = SystemEnv> {
    variable: String,
    reader: EnvironmentReader<E>,
}

impl Detect<SystemEnv> {
    pub fn new(variable: impl Into<String>) -> Self {
        Self::with_source(SystemEnv, variable)
    }
}

impl<E: ReadEnv> Detect<E> {
    pub fn with_source(source: E, variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            reader: EnvironmentReader::new(source),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn detect(&self) -> DetectResult<Environment> {
        let value = self.reader.read(&self.variable)?;
        Environment::new(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectError;
    use crate::source::InMemoryEnv;

    #[test]
    fn test_new_keeps_variable_name() {
        assert_eq!(Detect::new("foo").variable(), "foo");
    }

    #[test]
    fn test_detect_defined_variable() {
        let env = InMemoryEnv::new().with_var("APP_ENV", "staging");
        let environment = Detect::with_source(env, "APP_ENV").detect().unwrap();

        assert!(environment.is_staging());
        assert!(!environment.is_development());
        assert_eq!(environment.name(), "staging");
    }

    #[test]
    fn test_detect_undefined_variable() {
        let detect = Detect::with_source(InMemoryEnv::new(), "APP_ENV");
        assert!(matches!(
            detect.detect(),
            Err(DetectError::VariableNotFound { .. })
        ));
    }

    #[test]
    fn test_detect_value_outside_closed_set() {
        let env = InMemoryEnv::new().with_var("APP_ENV", "Staging");
        let err = Detect::with_source(env, "APP_ENV").detect().unwrap_err();
        assert!(matches!(err, DetectError::InvalidEnvironment { ref given, .. } if given == "Staging"));
    }
}
