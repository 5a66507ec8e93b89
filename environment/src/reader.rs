use std::env::VarError;

use tracing::debug;

use crate::error::{DetectError, DetectResult};
use crate::source::{ReadEnv, SystemEnv};

/// Reads a single named variable from an environment source.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentReader<E = SystemEnv> {
    source: E,
}

impl EnvironmentReader<SystemEnv> {
    pub fn system() -> Self {
        Self { source: SystemEnv }
    }
}

impl<E: ReadEnv> EnvironmentReader<E> {
    pub fn new(source: E) -> Self {
        Self { source }
    }

    /// Returns the raw value of `name`.
    ///
    /// Fails with [`DetectError::VariableNotFound`] when the variable is
    /// undefined. The value is returned exactly as stored.
    pub fn read(&self, name: &str) -> DetectResult<String> {
        validate_variable_name(name)?;

        match self.source.var(name) {
            Ok(value) => {
                debug!(variable = name, "captured environment variable");
                Ok(value)
            }
            Err(VarError::NotPresent) => Err(DetectError::VariableNotFound {
                name: name.to_string(),
            }),
            Err(VarError::NotUnicode(_)) => Err(DetectError::VariableNotUnicode {
                name: name.to_string(),
            }),
        }
    }
}

pub(crate) fn validate_variable_name(name: &str) -> DetectResult<()> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(DetectError::InvalidVariableName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryEnv;

    #[test]
    fn test_read_returns_raw_value() {
        let reader = EnvironmentReader::new(InMemoryEnv::new().with_var("APP_ENV", "Staging"));
        assert_eq!(reader.read("APP_ENV").unwrap(), "Staging");
    }

    #[test]
    fn test_read_missing_variable() {
        let reader = EnvironmentReader::new(InMemoryEnv::new());
        let err = reader.read("APP_ENV").unwrap_err();
        assert!(matches!(err, DetectError::VariableNotFound { ref name } if name == "APP_ENV"));
        assert!(err.to_string().contains("APP_ENV"));
    }

    #[test]
    fn test_read_empty_value_is_defined() {
        let reader = EnvironmentReader::new(InMemoryEnv::new().with_var("APP_ENV", ""));
        assert_eq!(reader.read("APP_ENV").unwrap(), "");
    }

    #[test]
    fn test_read_rejects_malformed_names() {
        let reader = EnvironmentReader::new(InMemoryEnv::new());
        for name in ["", "A=B", "A\0B"] {
            assert!(matches!(
                reader.read(name),
                Err(DetectError::InvalidVariableName { .. })
            ));
        }
    }

    #[test]
    fn test_not_unicode_is_reported() {
        struct BrokenEnv;

        impl ReadEnv for BrokenEnv {
            fn var(&self, _key: &str) -> Result<String, VarError> {
                Err(VarError::NotUnicode(std::ffi::OsString::from("x")))
            }
        }

        let reader = EnvironmentReader::new(BrokenEnv);
        assert!(matches!(
            reader.read("APP_ENV"),
            Err(DetectError::VariableNotUnicode { .. })
        ));
    }
}
