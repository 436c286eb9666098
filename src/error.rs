use serde::Serialize;
use std::fmt;

/// Command-level error, tagged with its kind so the frontend can match on
/// the taxonomy instead of parsing messages.
///
/// "Not found" as an expected outcome (no thumbnail, folder not located)
/// is modeled as `Option<T>` in the command signatures; the `NotFound`
/// variant here is for inputs that are required to exist.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum AppError {
    InvalidInput(String),
    NotFound(String),
    Io(String),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        AppError::Io(message.into())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(err.to_string()),
            _ => AppError::Io(err.to_string()),
        }
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_serialize_with_kind_tag() {
        let err = AppError::invalid_input("bad date");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["kind"], "invalid_input");
        assert_eq!(value["message"], "bad date");
    }

    #[test]
    fn io_not_found_maps_onto_not_found() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, AppError::NotFound(_)));

        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "locked",
        ));
        assert!(matches!(err, AppError::Io(_)));
    }
}
