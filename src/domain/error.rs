use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unknown label '{label}' for encoder '{encoder}'")]
    UnknownLabel { encoder: String, label: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Artifact error: {artifact} - {message}")]
    Artifact { artifact: String, message: String },

    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("Inference error: {message}")]
    Inference { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unknown_label(encoder: impl Into<String>, label: impl Into<String>) -> Self {
        Self::UnknownLabel {
            encoder: encoder.into(),
            label: label.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn artifact(artifact: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Artifact {
            artifact: artifact.into(),
            message: message.into(),
        }
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("ram_gb must be greater than 0");
        assert_eq!(
            error.to_string(),
            "Validation error: ram_gb must be greater than 0"
        );
    }

    #[test]
    fn test_unknown_label_error() {
        let error = DomainError::unknown_label("cpu", "Intel Core i9");
        assert_eq!(
            error.to_string(),
            "Unknown label 'Intel Core i9' for encoder 'cpu'"
        );
    }

    #[test]
    fn test_artifact_error() {
        let error = DomainError::artifact("model.json", "missing field `kind`");
        assert_eq!(
            error.to_string(),
            "Artifact error: model.json - missing field `kind`"
        );
    }
}
