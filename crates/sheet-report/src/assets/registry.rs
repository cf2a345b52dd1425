use std::collections::HashMap;
use glam::UVec2;

use crate::api::types::SheetKind;
use crate::assets::manifest::{AssetDescriptor, SheetManifest, UsageRecord};
use crate::core::atom::Atom;
use crate::core::duplicates::DuplicateIndex;
use crate::error::{AtomParseError, ManifestError};

/// A sheet with its kind resolved at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    pub name: String,
    pub kind: SheetKind,
    /// Atlas image holding the sheet.
    pub file: String,
    /// Tile size in sheet pixels.
    pub tile_size: UVec2,
}

/// Read-only view over the manifest, built once at startup.
/// Answers every "which sheet / which usages / which duplicates" question.
#[derive(Debug, Clone)]
pub struct SheetRegistry {
    sheets: HashMap<String, SheetInfo>,
    file_sheets: HashMap<String, Vec<String>>,
    file_order: Vec<String>,
    usages: HashMap<String, Vec<Option<Vec<UsageRecord>>>>,
    duplicates: DuplicateIndex,
    scale: f32,
}

impl SheetRegistry {
    /// Build a registry from a parsed manifest, validating its structure.
    pub fn from_manifest(manifest: &SheetManifest) -> Result<Self, ManifestError> {
        if !(manifest.scale.is_finite() && manifest.scale > 0.0) {
            return Err(ManifestError::InvalidScale(manifest.scale));
        }

        let tables = [
            (SheetKind::Static, &manifest.assets.images),
            (SheetKind::Animated, &manifest.assets.animatedchars),
        ];
        let mut sheets = HashMap::new();
        for (kind, table) in tables {
            for (name, desc) in table {
                let info = sheet_info(name, kind, desc)?;
                if sheets.insert(name.clone(), info).is_some() {
                    return Err(ManifestError::DuplicateSheet(name.clone()));
                }
            }
        }

        for (file, names) in &manifest.file_to_sheets {
            if let Some(unknown) = names.iter().find(|n| !sheets.contains_key(*n)) {
                return Err(ManifestError::UnknownSheet {
                    file: file.clone(),
                    sheet: unknown.clone(),
                });
            }
        }

        let duplicates = DuplicateIndex::new(&manifest.dup_groups, |name| {
            sheets.get(name).map(|s: &SheetInfo| s.kind)
        });

        let registry = Self {
            sheets,
            file_sheets: manifest.file_to_sheets.clone(),
            file_order: Vec::new(),
            usages: manifest.indexes.clone(),
            duplicates,
            scale: manifest.scale,
        };
        let order = if manifest.files.is_empty() {
            let mut files: Vec<String> = manifest.file_to_sheets.keys().cloned().collect();
            files.sort();
            files
        } else {
            manifest.files.clone()
        };
        Ok(registry.with_file_order(order))
    }

    /// Replace the document order of atlas files, e.g. with the order measured
    /// from the page. Files without sheets are skipped.
    pub fn with_file_order(mut self, files: Vec<String>) -> Self {
        let (known, unknown): (Vec<String>, Vec<String>) = files
            .into_iter()
            .partition(|f| self.file_sheets.get(f).is_some_and(|s| !s.is_empty()));
        for file in unknown {
            log::warn!("ignoring file '{}' with no sheets", file);
        }
        self.file_order = known;
        self
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetInfo> {
        self.sheets.get(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<SheetKind> {
        self.sheets.get(name).map(|s| s.kind)
    }

    /// Parse `sheet:index` against the known sheets.
    pub fn parse_atom(&self, text: &str) -> Result<Atom, AtomParseError> {
        Atom::parse(text, |name| self.kind_of(name))
    }

    /// The atom for a sprite on a known sheet.
    pub fn atom(&self, sheet: &str, index: u32) -> Option<Atom> {
        self.kind_of(sheet).map(|kind| Atom::new(sheet, kind, index))
    }

    /// Sheets packed into an atlas file, in declared order.
    pub fn sheets_in_file(&self, file: &str) -> &[String] {
        self.file_sheets.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Atlas files in document order.
    pub fn file_order(&self) -> &[String] {
        &self.file_order
    }

    pub fn file_position(&self, file: &str) -> Option<usize> {
        self.file_order.iter().position(|f| f == file)
    }

    /// Usages of a sprite. Missing sheets, holes and indices past the end are empty.
    pub fn usages(&self, sheet: &str, index: u32) -> &[UsageRecord] {
        self.usages
            .get(sheet)
            .and_then(|list| list.get(index as usize))
            .and_then(Option::as_deref)
            .unwrap_or(&[])
    }

    pub fn duplicates(&self) -> &DuplicateIndex {
        &self.duplicates
    }

    /// Display scale of the atlas images (CSS px per sheet px).
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

fn sheet_info(name: &str, kind: SheetKind, desc: &AssetDescriptor) -> Result<SheetInfo, ManifestError> {
    if desc.w == 0 || desc.h == 0 {
        return Err(ManifestError::ZeroTileSize {
            sheet: name.to_string(),
            w: desc.w,
            h: desc.h,
        });
    }
    Ok(SheetInfo {
        name: name.to_string(),
        kind,
        file: desc.file.clone(),
        tile_size: UVec2::new(desc.w, desc.h),
    })
}
