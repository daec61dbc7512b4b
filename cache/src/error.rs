use activity_model::ModelError;

pub type Result<T> = std::result::Result<T, CacheError>;

#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    #[error("Error occurred while building an activity: {0}")]
    ModelError(#[from] ModelError),

    #[error("Error occurred while reading config from the environment: {0}")]
    ConfigError(#[from] envy::Error),

    #[error("Embedded activity store is disabled")]
    StoreDisabled,
}

impl<T> From<CacheError> for Result<T> {
    fn from(e: CacheError) -> Self {
        Err(e)
    }
}
