use core::fmt;

use crate::assets::AssetId;

/// Invalid game configuration
#[derive(Clone, Debug, PartialEq)]
pub enum TuningError {
    Parse(String),
    NonPositive { field: &'static str, value: f32 },
    Negative { field: &'static str, value: f32 },
    NonFinite { field: &'static str },
    ZeroSpawnInterval,
    ProbabilityOutOfRange { value: f32 },
    SingleGapDoesNotFit { screen_height: f32, required: f32 },
    DoesNotFit { what: &'static str, height: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid tuning json: {msg}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::ZeroSpawnInterval => write!(f, "spawn_interval must be at least 1"),
            Self::ProbabilityOutOfRange { value } => {
                write!(f, "double_gap_probability must be in [0, 1], got {value}")
            }
            Self::SingleGapDoesNotFit {
                screen_height,
                required,
            } => write!(
                f,
                "single-gap pipe needs {required} units but the screen is {screen_height} tall"
            ),
            Self::DoesNotFit { what, height } => {
                write!(f, "{what} of height {height} does not fit on screen")
            }
        }
    }
}

impl std::error::Error for TuningError {}

/// Asset loading failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    /// A single fetch failed
    Fetch { asset: AssetId, reason: String },
    /// An asset the game cannot start without failed to load
    RequiredAssetMissing { asset: AssetId, reason: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch { asset, reason } => {
                write!(f, "failed to load {}: {reason}", asset.path())
            }
            Self::RequiredAssetMissing { asset, reason } => {
                write!(f, "required asset {} is missing: {reason}", asset.path())
            }
        }
    }
}

impl std::error::Error for AssetError {}

/// Rejected game command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameError {
    /// The asset phase has not signalled ready yet
    AssetsNotReady,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetsNotReady => write!(f, "assets are not loaded yet"),
        }
    }
}

impl std::error::Error for GameError {}
