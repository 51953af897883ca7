use crate::select::SelectError;

/// Usage, configuration, I/O or input-schema problem.
pub const EXIT_INPUT: u8 = 2;
/// A well's data could not be evaluated.
pub const EXIT_DATA: u8 = 3;
/// Output could not be produced.
pub const EXIT_OUTPUT: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<SelectError> for AppError {
    fn from(err: SelectError) -> Self {
        // Errors tied to a well are data problems; the rest are bad settings.
        match err.well() {
            Some(well) => {
                tracing::debug!(well, error = %err, "well could not be evaluated");
                AppError::new(EXIT_DATA, err.to_string())
            }
            None => AppError::new(EXIT_INPUT, err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_errors_map_to_exit_codes() {
        let err: AppError = SelectError::StartNotInSeries {
            well: "A1".to_string(),
            start: 7.5,
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_DATA);
        assert!(err.message().contains("A1"));

        let err: AppError = SelectError::InvalidConfig {
            field: "max_slope",
            value: f64::NAN,
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }

    #[test]
    fn duplicate_and_length_errors_are_data_errors() {
        let err: AppError = SelectError::DuplicateWell {
            well: "C7".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_DATA);

        let err: AppError = SelectError::SeriesLengthMismatch {
            well: "C8".to_string(),
            times: 3,
            values: 2,
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_DATA);
        assert!(err.message().contains("C8"));
    }
}
