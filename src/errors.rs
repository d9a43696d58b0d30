//! Custom error types for sprite extraction

use std::fmt;
use std::io;

/// Pipeline stage in which an error occurred
///
/// Errors that escape the extractor are wrapped with the stage that
/// produced them so the top-level run can say where it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading and decoding the sprite sheet
    Load,
    /// Determining the background color
    DetectBackground,
    /// Finding sprite regions
    Segment,
    /// Cropping regions and rewriting their background
    Crop,
    /// Writing sprites, CSS and preview files
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::DetectBackground => "detect-background",
            Stage::Segment => "segment",
            Stage::Crop => "crop",
            Stage::Write => "write",
        };
        write!(f, "{}", name)
    }
}

/// Sprite extraction error types
#[derive(Debug)]
pub enum SpriteError {
    /// I/O error
    IoError(io::Error),
    /// Image decoding or encoding error
    ImageError(image::ImageError),
    /// Unusable input (unreadable file, empty sample, zero-sized crop, ...)
    InvalidInput(String),
    /// Segmentation produced no regions after filtering
    NoRegionsFound,
    /// Invalid configuration file or option
    ConfigError(String),
    /// Error tagged with the pipeline stage that produced it
    StageFailed {
        stage: Stage,
        source: Box<SpriteError>,
    },
}

impl SpriteError {
    /// Wrap this error with the stage it occurred in
    ///
    /// Errors that already carry a stage are returned unchanged, so the
    /// innermost stage wins.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            SpriteError::StageFailed { .. } => self,
            other => SpriteError::StageFailed {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage this error was tagged with, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SpriteError::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Error with any stage wrapper removed
    pub fn root(&self) -> &SpriteError {
        match self {
            SpriteError::StageFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteError::IoError(e) => write!(f, "I/O error: {}", e),
            SpriteError::ImageError(e) => write!(f, "Image error: {}", e),
            SpriteError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            SpriteError::NoRegionsFound => write!(f, "No sprite regions found"),
            SpriteError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SpriteError::StageFailed { stage, source } => write!(f, "[{}] {}", stage, source),
        }
    }
}

impl std::error::Error for SpriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpriteError::IoError(e) => Some(e),
            SpriteError::ImageError(e) => Some(e),
            SpriteError::StageFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for SpriteError {
    fn from(error: io::Error) -> Self {
        SpriteError::IoError(error)
    }
}

impl From<image::ImageError> for SpriteError {
    fn from(error: image::ImageError) -> Self {
        SpriteError::ImageError(error)
    }
}

/// Result type for sprite operations
pub type SpriteResult<T> = Result<T, SpriteError>;
