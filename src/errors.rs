// src/errors.rs
//
// Error types for font loading, geometry building and configuration

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font data: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),
    #[error("font reports zero units per em")]
    InvalidUnitsPerEm,
    #[error("font loader stopped before delivering a result")]
    Disconnected,
}

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("cannot build geometry for empty text")]
    EmptyText,
    #[error("text {0:?} has no visible glyph outlines")]
    NoOutlines(String),
    #[error("outline tessellation failed: {0}")]
    Tessellation(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
