use crate::user::ActivityField;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("`{field}` can be {expected}, got {got}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    #[error("`{field}` length can be in range [0:{max}], got {len}")]
    OutOfRange {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("`{field}` is not a valid url: {url:?}")]
    InvalidUrl { field: &'static str, url: String },

    #[error("Unused or unsettable fields: {}", format_fields(.0))]
    UnknownFields(Vec<ActivityField>),

    #[error("Unknown keyword parameters: {0:?}")]
    UnknownKeywords(Vec<String>),
}

impl<T> From<ModelError> for Result<T> {
    fn from(e: ModelError) -> Self {
        Err(e)
    }
}

fn format_fields(fields: &[ActivityField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
