//! Error types for plate loading, configuration and sharing.
//!
//! The resolution engine itself never fails: unresolvable slots and
//! missing dyes degrade to skip-and-continue. Everything that *can* fail
//! around it is represented by the `PlateError` enum.

use thiserror::Error;

/// Errors that can occur around plate resolution.
///
/// # Examples
///
/// ```rust
/// use glamplate::PlateError;
///
/// let err = PlateError::UnknownSlot("12".to_string());
/// println!("{}", err); // "Unknown plate slot: 12"
/// ```
#[derive(Debug, Error)]
pub enum PlateError {
    /// The live plate editor is not open, so there is nothing to write to.
    ///
    /// Callers are expected to check availability before loading a plate;
    /// this is returned instead of touching the surface.
    #[error("The glamour plate editor is not open")]
    SurfaceUnavailable,

    /// A slot key or ordinal that is not one of the twelve plate slots.
    #[error("Unknown plate slot: {0}")]
    UnknownSlot(String),

    /// The configuration file was written by a newer version.
    #[error("Configuration version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: i64, supported: i64 },

    /// A plate index outside the plate library.
    #[error("No plate at index {0}")]
    PlateIndex(usize),

    /// An import finished without producing a single usable item.
    #[error("Import produced no items")]
    EmptyImport,

    /// Every import sender was dropped while the queue was still waiting.
    #[error("Import queue disconnected")]
    ImportDisconnected,

    /// Reading or writing the configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or shared plate JSON was malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
