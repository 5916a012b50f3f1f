use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("persona must have either a name or a role for gift recommendations")]
    InvalidPersona,
    #[error("batch size {size} is outside 1..={max}")]
    InvalidBatchSize { size: usize, max: usize },
}

/// A completion response that held text but no recognizable list items.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("completion response contained no list items ({non_empty_lines} non-empty lines)")]
pub struct ParseAmbiguity {
    pub non_empty_lines: usize,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("configuration issue: {message}")]
    Misconfigured { message: String, correlation_id: String },
}

impl InterfaceError {
    /// Stable machine-readable class for CLI and log output.
    pub fn class(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "bad_request",
            Self::Misconfigured { .. } => "config_validation",
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::Misconfigured { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(error) => Self::BadRequest {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::InvalidInput(message) => {
                Self::BadRequest { message, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Configuration(message) => {
                Self::Misconfigured { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, DomainError, InterfaceError};

    #[test]
    fn invalid_persona_maps_to_bad_request_with_correlation_id() {
        let interface = ApplicationError::from(DomainError::InvalidPersona).into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest {
                ref correlation_id,
                ref message,
            } if correlation_id == "req-1" && message.contains("name or a role")
        ));
        assert_eq!(interface.class(), "bad_request");
    }

    #[test]
    fn batch_size_error_names_the_bound() {
        let error = DomainError::InvalidBatchSize { size: 11, max: 10 };
        assert_eq!(error.to_string(), "batch size 11 is outside 1..=10");
    }

    #[test]
    fn configuration_error_maps_to_config_class() {
        let interface =
            ApplicationError::Configuration("invalid timeout".to_owned()).into_interface("config");

        assert!(matches!(
            interface,
            InterfaceError::Misconfigured { ref correlation_id, .. } if correlation_id == "config"
        ));
        assert_eq!(interface.class(), "config_validation");
        assert_eq!(interface.to_string(), "configuration issue: invalid timeout");
    }
}
