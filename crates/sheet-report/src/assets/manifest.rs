use std::collections::HashMap;
use serde::Deserialize;

use crate::api::config::InspectorConfig;

/// Data snapshot produced by the atlas build step.
/// Embedded in the report page and loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetManifest {
    /// Tile descriptors for every sheet, split by sheet kind.
    pub assets: AssetTables,
    /// Sheet name → sparse list of usages, indexed by sprite index.
    #[serde(default)]
    pub indexes: HashMap<String, Vec<Option<Vec<UsageRecord>>>>,
    /// Atlas filename → sheets packed into it, in declared order.
    pub file_to_sheets: HashMap<String, Vec<String>>,
    /// Groups of pixel-identical atoms.
    #[serde(default)]
    pub dup_groups: Vec<Vec<String>>,
    /// Display scale of the atlas images on the page (CSS px per sheet px).
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Atlas filenames in document order. Empty means "measure from the page".
    #[serde(default)]
    pub files: Vec<String>,
    /// Optional inspector settings.
    #[serde(default)]
    pub config: InspectorConfig,
}

/// The two asset tables. A sheet appears in exactly one of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetTables {
    /// Static sheets: hex-indexed tile grids.
    #[serde(default)]
    pub images: HashMap<String, AssetDescriptor>,
    /// Animated sheets: decimal frame numbers.
    #[serde(default)]
    pub animatedchars: HashMap<String, AssetDescriptor>,
}

/// Tile size of one sheet and the atlas image that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetDescriptor {
    pub file: String,
    /// Tile width in sheet pixels.
    pub w: u32,
    /// Tile height in sheet pixels.
    pub h: u32,
}

/// One reference from an object/animation definition to a sprite.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UsageRecord {
    pub id: String,
    /// Source XML file of the referencing definition.
    pub xml: String,
}

fn default_scale() -> f32 {
    1.0
}

impl SheetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
