use std::path::PathBuf;
use thiserror::Error;

/// Rejections of the query string. Every variant is a client error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Character '{0}' is not supported by this API")]
    UnsupportedCharacter(String),

    #[error("parameter '{key}' should be an integer, got '{value}'")]
    NotAnInteger { key: &'static str, value: String },

    #[error("The gear_level must be between 1 and {max}", max = crate::MAX_GEAR_LEVEL)]
    GearLevelOutOfRange,

    #[error("The relic_level should not be provided if gear_level is not {max}", max = crate::MAX_GEAR_LEVEL)]
    UnexpectedRelicLevel,

    #[error("The relic_level must be between 1 and {max}", max = crate::MAX_RELIC_LEVEL)]
    RelicLevelOutOfRange,

    #[error("The zeta level must be between 0 and {max} for {name}")]
    ZetasOutOfRange { max: u32, name: &'static str },

    #[error("The omicron level must be between 0 and {max} for {name}")]
    OmicronsOutOfRange { max: u32, name: &'static str },

    #[error("The level must be between 1 and {max}", max = crate::MAX_LEVEL)]
    LevelOutOfRange,
}

/// Failures while building or encoding a portrait.
#[derive(Debug, Error)]
pub enum PortraitError {
    #[error("open {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("read {}: {source}", .path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse font {}: {source}", .path.display())]
    FontParse {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },

    #[error("font {} has no units-per-em", .path.display())]
    FontMetrics { path: PathBuf },

    #[error("png encode failed: {0}")]
    Encode(#[source] image::ImageError),
}
