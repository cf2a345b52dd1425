use thiserror::Error;

/// Errors raised while loading the report data snapshot.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sheet '{sheet}' has a zero tile size ({w}x{h})")]
    ZeroTileSize { sheet: String, w: u32, h: u32 },

    #[error("sheet '{0}' is declared as both a static and an animated sheet")]
    DuplicateSheet(String),

    #[error("file '{file}' lists unknown sheet '{sheet}'")]
    UnknownSheet { file: String, sheet: String },

    #[error("display scale must be positive, got {0}")]
    InvalidScale(f32),
}

/// Why a `sheet:index` string did not resolve to an atom.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtomParseError {
    #[error("missing ':' separator")]
    MissingSeparator,

    #[error("empty sheet name")]
    EmptySheet,

    #[error("unknown sheet '{0}'")]
    UnknownSheet(String),

    #[error("index '{0}' is not an integer")]
    InvalidIndex(String),

    #[error("index 0 is not accepted as a link target")]
    ZeroIndex,
}
