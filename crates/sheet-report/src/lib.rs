pub mod api;
pub mod assets;
pub mod core;
pub mod error;
pub mod input;
pub mod navigation;

// Re-export key types at crate root for convenience
pub use crate::api::config::InspectorConfig;
pub use crate::api::page::Page;
pub use crate::api::types::SheetKind;
pub use crate::assets::manifest::{AssetDescriptor, AssetTables, SheetManifest, UsageRecord};
pub use crate::assets::registry::{SheetInfo, SheetRegistry};
pub use crate::core::atom::{parse_index, Atom};
pub use crate::core::duplicates::DuplicateIndex;
pub use crate::core::geometry::{HighlightRect, ImageRect, SheetGeometry, TileHit};
pub use crate::core::lookup::{describe_atom, describe_file, Description, SheetBlock};
pub use crate::error::{AtomParseError, ManifestError};
pub use crate::input::event::{InspectorEvent, Key, PointerSample, PointerTarget};
pub use crate::navigation::{Effect, Focus, Inspector, Selection, ViewportState};
