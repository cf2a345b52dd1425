//! Usage and duplicate lookup for the sprite under the pointer, and the HTML
//! summary shown in the info panel.

use std::fmt::Write;

use glam::UVec2;

use crate::assets::manifest::UsageRecord;
use crate::assets::registry::SheetRegistry;
use crate::core::atom::Atom;
use crate::core::geometry::SheetGeometry;

/// What is known about one sprite on one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetBlock<'a> {
    pub atom: Atom,
    pub usages: &'a [UsageRecord],
    pub duplicates: Vec<&'a Atom>,
}

impl SheetBlock<'_> {
    fn write_html(&self, out: &mut String) {
        if !self.usages.is_empty() {
            out.push_str("<table>");
            for usage in self.usages {
                let _ = write!(
                    out,
                    "<tr><td>{}<td>{}</tr>",
                    escape_html(&usage.id),
                    escape_html(&usage.xml)
                );
            }
            out.push_str("</table>");
        }
        if !self.duplicates.is_empty() {
            out.push_str("Duplicates: ");
            for (i, dup) in self.duplicates.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let label = escape_html(&dup.to_string());
                let _ = write!(out, "<a href=\"#{label}\">{label}</a>");
            }
        }
        let _ = write!(out, "<h3>{}</h3>", escape_html(&self.atom.to_string()));
    }
}

/// Panel content: one block per sheet claiming the pixel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Description<'a> {
    pub blocks: Vec<SheetBlock<'a>>,
}

impl Description<'_> {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render the panel HTML; blocks are separated by `<hr>`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push_str("<hr>");
            }
            block.write_html(&mut out);
        }
        out
    }
}

/// Usages and duplicates of one atom.
pub fn describe_atom<'a>(registry: &'a SheetRegistry, atom: &Atom) -> SheetBlock<'a> {
    SheetBlock {
        atom: atom.clone(),
        usages: registry.usages(atom.sheet(), atom.index()),
        duplicates: registry.duplicates().duplicates_of(atom),
    }
}

/// Describe a sheet pixel of an atlas file in every sheet packed into it.
///
/// Sheets stacked in the same image overlap, so one pixel may belong to
/// several sheets at once. Blocks follow the file's declared sheet order;
/// sheets whose grid does not reach the pixel are skipped.
pub fn describe_file<'a>(
    registry: &'a SheetRegistry,
    file: &str,
    pixel: UVec2,
    sheet_size: UVec2,
) -> Description<'a> {
    let blocks = registry
        .sheets_in_file(file)
        .iter()
        .filter_map(|name| {
            let info = registry.sheet(name)?;
            let hit = SheetGeometry::new(info.tile_size, sheet_size).resolve_tile(pixel)?;
            let atom = Atom::new(name.as_str(), info.kind, hit.index);
            Some(describe_atom(registry, &atom))
        })
        .collect();
    Description { blocks }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::SheetManifest;

    fn registry(dup_groups: &str) -> SheetRegistry {
        let json = format!(
            r#"{{
                "assets": {{
                    "images": {{ "hero": {{ "file": "hero.png", "w": 32, "h": 32 }} }},
                    "animatedchars": {{ "walk": {{ "file": "hero.png", "w": 16, "h": 16 }} }}
                }},
                "indexes": {{
                    "hero": [null, null, null, null, null, [{{ "id": "enemy1", "xml": "a.xml" }}]],
                    "walk": [[{{ "id": "<b>", "xml": "x&y.xml" }}]]
                }},
                "fileToSheets": {{ "hero.png": ["hero", "walk"] }},
                "dupGroups": {dup_groups}
            }}"#
        );
        SheetRegistry::from_manifest(&SheetManifest::from_json(&json).unwrap()).unwrap()
    }

    #[test]
    fn single_usage_without_duplicates() {
        let reg = registry("[]");
        let atom = reg.parse_atom("hero:0x5").unwrap();
        let block = describe_atom(&reg, &atom);
        assert_eq!(block.usages.len(), 1);
        assert!(block.duplicates.is_empty());

        let html = Description { blocks: vec![block] }.to_html();
        assert_eq!(html, "<table><tr><td>enemy1<td>a.xml</tr></table><h3>hero:0x5</h3>");
        assert!(!html.contains("Duplicates"));
    }

    #[test]
    fn duplicates_line_links_other_members() {
        let reg = registry(r#"[["hero:0x5", "hero:0x9"]]"#);
        let atom = reg.parse_atom("hero:0x5").unwrap();
        let html = Description { blocks: vec![describe_atom(&reg, &atom)] }.to_html();
        assert!(html.contains("Duplicates: <a href=\"#hero:0x9\">hero:0x9</a>"));
        assert!(!html.contains("href=\"#hero:0x5\""));
    }

    #[test]
    fn missing_usages_render_no_table() {
        let reg = registry("[]");
        let atom = reg.parse_atom("hero:0x2").unwrap();
        let html = Description { blocks: vec![describe_atom(&reg, &atom)] }.to_html();
        assert_eq!(html, "<h3>hero:0x2</h3>");
    }

    #[test]
    fn stacked_sheets_render_one_block_each() {
        let reg = registry("[]");
        // 128x96 sheet: hero has 4 columns, walk has 8
        let desc = describe_file(&reg, "hero.png", UVec2::new(40, 40), UVec2::new(128, 96));
        assert_eq!(desc.blocks.len(), 2);
        assert_eq!(desc.blocks[0].atom.to_string(), "hero:0x5");
        assert_eq!(desc.blocks[1].atom.to_string(), "walk:18");

        let html = desc.to_html();
        assert_eq!(html.matches("<hr>").count(), 1);
    }

    #[test]
    fn usage_text_is_escaped() {
        let reg = registry("[]");
        let desc = describe_file(&reg, "hero.png", UVec2::new(0, 0), UVec2::new(128, 96));
        let html = desc.to_html();
        assert!(html.contains("<td>&lt;b&gt;<td>x&amp;y.xml"));
    }

    #[test]
    fn pixel_outside_every_grid_is_empty() {
        let reg = registry("[]");
        let desc = describe_file(&reg, "hero.png", UVec2::new(500, 0), UVec2::new(128, 96));
        assert!(desc.is_empty());
        assert_eq!(desc.to_html(), "");
    }
}
