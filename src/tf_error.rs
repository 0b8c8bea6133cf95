use thiserror::Error;

/// Enumerates the different types of errors
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TfError {
    /// Averaging was requested over a range without samples. The payload names what was averaged.
    #[error("tf_nalgebra: cannot average {0} over an empty range")]
    EmptyInput(&'static str),
}
