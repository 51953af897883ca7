use thiserror::Error;

/// Errors raised while selecting phases for a plate.
///
/// Any of these aborts the whole call: a malformed well must not degrade into a
/// silent `growth = false` record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectError {
    #[error("well `{well}`: phase start {start} is not a sample time of the series")]
    StartNotInSeries { well: String, start: f64 },
    #[error("well `{well}`: series length mismatch (times={times}, values={values})")]
    SeriesLengthMismatch {
        well: String,
        times: usize,
        values: usize,
    },
    #[error("well `{well}` appears more than once on the plate")]
    DuplicateWell { well: String },
    #[error("well `{well}`: empty baseline window at start {start}")]
    EmptyBaselineWindow { well: String, start: f64 },
    #[error("invalid setting `{field}`: {value}")]
    InvalidConfig { field: &'static str, value: f64 },
}

impl SelectError {
    /// Name of the offending well, if the error is about a well.
    pub fn well(&self) -> Option<&str> {
        match self {
            SelectError::StartNotInSeries { well, .. }
            | SelectError::SeriesLengthMismatch { well, .. }
            | SelectError::DuplicateWell { well }
            | SelectError::EmptyBaselineWindow { well, .. } => Some(well),
            SelectError::InvalidConfig { .. } => None,
        }
    }
}
