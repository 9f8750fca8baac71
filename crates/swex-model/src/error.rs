use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("empty service id")]
    EmptyServiceId,
}

pub type ModelResult<T> = Result<T, ModelError>;
