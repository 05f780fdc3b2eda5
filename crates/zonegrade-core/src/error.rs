use crate::zones::ZoneId;

#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    #[error("pixel buffer holds {actual} samples, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),
    #[error("zone set needs exactly {expected} zones, got {0}", expected = ZoneId::COUNT)]
    ZoneCount(usize),
    #[error("zone {0} appears more than once")]
    DuplicateZone(ZoneId),
    #[error("invalid zone preset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("preset I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ZoneError>;
