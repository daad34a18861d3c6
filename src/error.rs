use thiserror::Error;

/// Everything that can stop a dataset from reaching the globe.
#[derive(Debug, Error)]
pub enum GlobeError {
    /// Top-level `type` is not Feature, FeatureCollection or GeometryCollection.
    #[error("The geoJSON is not valid: unsupported document type `{0}`")]
    InvalidDocumentShape(String),

    /// Geometry `type` is not one of the six drawable kinds.
    #[error("The geoJSON is not valid: unsupported geometry type `{0}`")]
    InvalidGeometryType(String),

    #[error("malformed GeoJSON: {0}")]
    Parse(#[from] geojson::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch dataset: {0}")]
    Http(#[from] ureq::Error),

    #[error("invalid settings: {0}")]
    Settings(String),
}

pub type GlobeResult<T> = Result<T, GlobeError>;
