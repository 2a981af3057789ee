pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("User directory lookup failed: {0}")]
    Directory(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid user list JSON: {0}")]
    Json(#[from] serde_json::Error),
}
