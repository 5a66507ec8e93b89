use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Environment variable '{name}' is not defined")]
    VariableNotFound { name: String },

    #[error("Environment variable '{name}' is not valid unicode")]
    VariableNotUnicode { name: String },

    #[error("Invalid environment variable name '{name}'")]
    InvalidVariableName { name: String },

    #[error("Expected the environment name to be one of the following values: {allowed}; given '{given}'")]
    InvalidEnvironment { given: String, allowed: String },

    #[error("Unknown environment '{name}' (known: {known})")]
    UnknownEnvironment { name: String, known: String },

    #[error("Unsupported query '{query}': predicates must start with 'is' followed by an environment name")]
    UnsupportedQuery { query: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Configuration parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type DetectResult<T> = Result<T, DetectError>;

/// Renders names as `'a', 'b', 'c'` for error messages.
pub(crate) fn quoted_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_variable() {
        let err = DetectError::VariableNotFound {
            name: "APP_ENV".to_string(),
        };
        assert!(err.to_string().contains("'APP_ENV'"));
    }

    #[test]
    fn test_messages_are_capitalized() {
        let errors = [
            DetectError::VariableNotFound {
                name: "A".to_string(),
            },
            DetectError::UnknownEnvironment {
                name: "qa".to_string(),
                known: "'dev'".to_string(),
            },
            DetectError::UnsupportedQuery {
                query: "foo".to_string(),
            },
            DetectError::InvalidConfig {
                message: "x".to_string(),
            },
        ];

        for err in errors {
            let message = err.to_string();
            assert!(message.starts_with(char::is_uppercase), "{message}");
        }
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(quoted_list(["a", "b"]), "'a', 'b'");
        assert_eq!(quoted_list(Vec::<&str>::new()), "");
    }
}
