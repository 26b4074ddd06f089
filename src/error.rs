use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Directions provider error: {0}")]
    Provider(String),
    #[error("Directions provider returned no routes")]
    NoRoutes,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GeoJSON error: {0}")]
    GeoJson(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
