pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown font weight: {weight:?}")]
    UnknownWeight { weight: String },

    #[error("Text measurement backend is not available")]
    MeasurementUnavailable,

    #[error("Font not found: {family}")]
    FontNotFound { family: String },

    #[error("Failed to parse font: {0}")]
    FontParse(#[from] ttf_parser::FaceParsingError),

    #[error("Font does not declare a family name")]
    MissingFamilyName,

    #[error("Missing font setting: {name}")]
    MissingSetting { name: &'static str },

    #[error("Invalid font settings JSON: {0}")]
    Settings(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
