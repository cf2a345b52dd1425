//! The inspector: dispatches page events through the coordinate mapper and the
//! lookup engine and returns the effects the page has to apply.
//!
//! Every handler runs synchronously and only touches `ViewportState`; a later
//! event fully supersedes the effects of an earlier one.

use glam::{IVec2, UVec2, Vec2};

use crate::api::config::InspectorConfig;
use crate::api::page::Page;
use crate::assets::manifest::SheetManifest;
use crate::assets::registry::{SheetInfo, SheetRegistry};
use crate::core::atom::{strip_hash, Atom};
use crate::core::geometry::{
    centered_scroll_y, remap_tile, sheet_pixel, HighlightRect, SheetGeometry,
};
use crate::core::lookup::describe_file;
use crate::error::{AtomParseError, ManifestError};
use crate::input::event::{InspectorEvent, Key, PointerSample, PointerTarget};
use crate::navigation::effects::Effect;
use crate::navigation::state::{Focus, Selection, ViewportState};

/// Pointer position resolved against one atlas image.
struct ImagePoint {
    pixel: UVec2,
    sheet_size: UVec2,
}

pub struct Inspector {
    registry: SheetRegistry,
    config: InspectorConfig,
    state: ViewportState,
}

impl Inspector {
    pub fn new(registry: SheetRegistry, config: InspectorConfig) -> Self {
        Self {
            registry,
            config,
            state: ViewportState::new(),
        }
    }

    /// Build the registry from a manifest and take its config.
    pub fn from_manifest(manifest: &SheetManifest) -> Result<Self, ManifestError> {
        let registry = SheetRegistry::from_manifest(manifest)?;
        Ok(Self::new(registry, manifest.config.clone()))
    }

    pub fn registry(&self) -> &SheetRegistry {
        &self.registry
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// The focused sprite, if any.
    pub fn focused_atom(&self) -> Option<&Atom> {
        self.state.selection().map(|s| &s.atom)
    }

    /// Apply the page's initial URL fragment. Same rules as a hash change.
    pub fn start(&mut self, initial_hash: &str, page: &dyn Page) -> Vec<Effect> {
        self.on_hash_change(initial_hash, page)
    }

    /// Dispatch one page event.
    pub fn handle(&mut self, event: InspectorEvent, page: &dyn Page) -> Vec<Effect> {
        match event {
            InspectorEvent::PointerMove(sample) => self.on_pointer_move(sample, page),
            InspectorEvent::PointerDown(sample) => self.on_pointer_down(sample, page),
            InspectorEvent::Scroll => self.on_scroll(page),
            InspectorEvent::KeyDown {
                key_code,
                shift,
                ctrl,
                alt,
            } => self.on_key_down(key_code, shift, ctrl, alt, page),
            InspectorEvent::HashChange { hash } => self.on_hash_change(&hash, page),
        }
    }

    fn on_pointer_move(&mut self, sample: PointerSample, page: &dyn Page) -> Vec<Effect> {
        let effects = if self.state.is_focused() {
            Vec::new()
        } else {
            self.hover(&sample, page)
        };
        self.state.last_pointer = Some(sample);
        effects
    }

    fn on_pointer_down(&mut self, sample: PointerSample, page: &dyn Page) -> Vec<Effect> {
        let clicked_away = sample.target == PointerTarget::Elsewhere;
        let effects = match &sample.target {
            PointerTarget::Image { file } => self.click_image(file, sample.client, page),
            PointerTarget::Panel | PointerTarget::Highlight { .. } | PointerTarget::Elsewhere => {
                Vec::new()
            }
        };
        self.state.last_pointer = Some(sample);
        if clicked_away {
            self.unfocus(page)
        } else {
            effects
        }
    }

    fn on_scroll(&mut self, page: &dyn Page) -> Vec<Effect> {
        if self.state.is_focused() {
            return Vec::new();
        }
        match &self.state.last_pointer {
            Some(sample) => self.hover(sample, page),
            None => Vec::new(),
        }
    }

    fn on_key_down(
        &mut self,
        key_code: u32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        page: &dyn Page,
    ) -> Vec<Effect> {
        if ctrl || alt {
            return Vec::new();
        }
        let Some(key) = Key::from_key_code(key_code) else {
            return Vec::new();
        };

        match key {
            Key::Tab => {
                if !self.state.is_focused() {
                    return Vec::new();
                }
                let mut effects = vec![Effect::PreventDefault];
                effects.extend(self.move_tab(if shift { -1 } else { 1 }, page));
                effects
            }
            _ if shift => Vec::new(),
            Key::Escape => self.unfocus(page),
            _ => {
                let Some(delta) = key.direction() else {
                    return Vec::new();
                };
                if !self.state.is_focused() {
                    return Vec::new();
                }
                let mut effects = vec![Effect::PreventDefault];
                effects.extend(self.move_focus(delta, page));
                effects
            }
        }
    }

    fn on_hash_change(&mut self, hash: &str, page: &dyn Page) -> Vec<Effect> {
        // Echo suppression is one-shot so a later link back to the same atom still works
        if self.state.last_written_hash.take().as_deref() == Some(hash) {
            log::trace!("ignoring echo of own hash {}", hash);
            return Vec::new();
        }
        let Some(body) = strip_hash(hash) else {
            return Vec::new();
        };
        let atom = match self.resolve_link(body) {
            Ok(atom) => atom,
            Err(err) => {
                log::debug!("ignoring hash {}: {}", hash, err);
                return Vec::new();
            }
        };
        match self.go_to_sprite(&atom, page) {
            Some(effects) => {
                log::debug!("focused {} from hash", atom);
                effects
            }
            None => {
                log::debug!("ignoring hash {}: sprite out of range", hash);
                Vec::new()
            }
        }
    }

    fn resolve_link(&self, body: &str) -> Result<Atom, AtomParseError> {
        let atom = self.registry.parse_atom(body)?;
        if atom.index() == 0 && !self.config.accept_zero_index {
            return Err(AtomParseError::ZeroIndex);
        }
        Ok(atom)
    }

    /// Panel content for the live pointer position. The highlight covers
    /// part of its image, so it resolves against that image.
    fn hover(&self, sample: &PointerSample, page: &dyn Page) -> Vec<Effect> {
        let file = match &sample.target {
            PointerTarget::Image { file } | PointerTarget::Highlight { file } => file,
            PointerTarget::Panel | PointerTarget::Elsewhere => {
                return vec![Effect::ShowInfo(String::new())];
            }
        };
        let html = match self.image_point(file, sample.client, page) {
            Some(point) => describe_file(&self.registry, file, point.pixel, point.sheet_size).to_html(),
            None => String::new(),
        };
        vec![Effect::ShowInfo(html)]
    }

    fn click_image(&mut self, file: &str, client: Vec2, page: &dyn Page) -> Vec<Effect> {
        let Some(point) = self.image_point(file, client, page) else {
            return vec![Effect::ShowInfo(String::new())];
        };
        let Some(info) = self
            .registry
            .sheets_in_file(file)
            .first()
            .and_then(|name| self.registry.sheet(name))
        else {
            return vec![Effect::ShowInfo(String::new())];
        };
        let geometry = SheetGeometry::new(info.tile_size, point.sheet_size);
        let Some(hit) = geometry.resolve_tile(point.pixel) else {
            return vec![Effect::ShowInfo(String::new())];
        };

        let atom = Atom::new(info.name.as_str(), info.kind, hit.index);
        let rect = HighlightRect::for_tile(hit.tile, info.tile_size, self.registry.scale());
        let html = describe_file(&self.registry, file, point.pixel, point.sheet_size).to_html();
        log::debug!("focused {} by click", atom);

        let hash = self.write_hash(&atom);
        self.state.focus = Focus::Focused(Selection {
            file: file.to_string(),
            tile: hit.tile,
            atom,
        });
        vec![
            hash,
            Effect::Highlight {
                file: file.to_string(),
                rect,
            },
            Effect::ShowInfo(html),
        ]
    }

    fn unfocus(&mut self, page: &dyn Page) -> Vec<Effect> {
        if self.state.is_focused() {
            log::debug!("unfocused");
        }
        self.state.focus = Focus::Idle;
        let mut effects = vec![Effect::ClearHighlight];
        if let Some(sample) = &self.state.last_pointer {
            effects.extend(self.hover(sample, page));
        }
        effects
    }

    /// Step the focused tile within its sheet. Rejected at the grid edge.
    fn move_focus(&mut self, delta: IVec2, page: &dyn Page) -> Vec<Effect> {
        let Some(selection) = self.state.selection() else {
            return Vec::new();
        };
        let Some((info, geometry)) = self.sheet_geometry(selection.atom.sheet(), page) else {
            return Vec::new();
        };
        let Some(index) = geometry
            .offset_tile(selection.tile, delta)
            .and_then(|tile| geometry.index_of(tile))
        else {
            log::trace!("move {:?} from {} leaves the sheet", delta, selection.atom);
            return Vec::new();
        };

        let atom = Atom::new(info.name.as_str(), info.kind, index);
        self.focus_with_hash(atom, page)
    }

    /// Step to the next (`step` = 1) or previous (`step` = -1) sheet packed in
    /// the focused file, then on to the neighbouring file in document order.
    fn move_tab(&mut self, step: isize, page: &dyn Page) -> Vec<Effect> {
        let Some(selection) = self.state.selection() else {
            return Vec::new();
        };
        let sheets = self.registry.sheets_in_file(&selection.file);
        let sibling = sheets
            .iter()
            .position(|s| s == selection.atom.sheet())
            .and_then(|pos| pos.checked_add_signed(step))
            .and_then(|pos| sheets.get(pos));

        let target = match sibling {
            Some(next_sheet) => self.remap_selection(selection, next_sheet, page),
            None => self.neighbour_file_atom(&selection.file, step),
        };
        match target {
            Some(atom) => self.focus_with_hash(atom, page),
            None => {
                log::trace!("tab from {} has no target", selection.atom);
                Vec::new()
            }
        }
    }

    /// The selected tile, carried over into another sheet of the same image.
    fn remap_selection(&self, selection: &Selection, sheet: &str, page: &dyn Page) -> Option<Atom> {
        let from = self.registry.sheet(selection.atom.sheet())?;
        let (to, geometry) = self.sheet_geometry(sheet, page)?;
        if geometry.tile_count() == 0 {
            return None;
        }
        let last = UVec2::new(geometry.stride() - 1, geometry.rows() - 1);
        let tile = remap_tile(selection.tile, from.tile_size, to.tile_size).min(last);
        let index = geometry.index_of(tile)?;
        Some(Atom::new(to.name.as_str(), to.kind, index))
    }

    /// First sprite of the first (or last, going backwards) sheet of the
    /// neighbouring file.
    fn neighbour_file_atom(&self, file: &str, step: isize) -> Option<Atom> {
        let order = self.registry.file_order();
        let pos = self.registry.file_position(file)?.checked_add_signed(step)?;
        let sheets = self.registry.sheets_in_file(order.get(pos)?);
        let sheet = if step > 0 { sheets.first() } else { sheets.last() }?;
        self.registry.atom(sheet, 0)
    }

    fn focus_with_hash(&mut self, atom: Atom, page: &dyn Page) -> Vec<Effect> {
        let Some(effects) = self.go_to_sprite(&atom, page) else {
            return Vec::new();
        };
        let mut all = vec![self.write_hash(&atom)];
        all.extend(effects);
        all
    }

    /// Focus a sprite by atom: scroll it into the middle of the viewport,
    /// highlight it and describe it. None when the sprite is not on the page
    /// or its index is past the sheet's last tile.
    fn go_to_sprite(&mut self, atom: &Atom, page: &dyn Page) -> Option<Vec<Effect>> {
        let (info, geometry) = self.sheet_geometry(atom.sheet(), page)?;
        let rect = page.image_rect(&info.file)?;
        let tile = geometry.tile_of_index(atom.index())?;
        let pixel = tile * info.tile_size;
        let scale = self.registry.scale();

        let scroll = centered_scroll_y(
            page.scroll_y(),
            rect.min.y,
            pixel.y,
            info.tile_size.y,
            page.viewport_height(),
            scale,
        );
        let highlight = HighlightRect::for_tile(tile, info.tile_size, scale);
        let html = describe_file(&self.registry, &info.file, pixel, geometry.sheet_size()).to_html();
        let file = info.file.clone();

        self.state.focus = Focus::Focused(Selection {
            file: file.clone(),
            tile,
            atom: atom.clone(),
        });
        Some(vec![
            Effect::ScrollTo(scroll),
            Effect::Highlight {
                file,
                rect: highlight,
            },
            Effect::ShowInfo(html),
        ])
    }

    fn write_hash(&mut self, atom: &Atom) -> Effect {
        let hash = atom.to_hash();
        self.state.last_written_hash = Some(hash.clone());
        Effect::ReplaceHash(hash)
    }

    /// A sheet's grid as currently laid out on the page.
    fn sheet_geometry(&self, sheet: &str, page: &dyn Page) -> Option<(&SheetInfo, SheetGeometry)> {
        let info = self.registry.sheet(sheet)?;
        let rect = page.image_rect(&info.file)?;
        let sheet_size = rect.sheet_size(self.registry.scale());
        Some((info, SheetGeometry::new(info.tile_size, sheet_size)))
    }

    fn image_point(&self, file: &str, client: Vec2, page: &dyn Page) -> Option<ImagePoint> {
        let rect = page.image_rect(file)?;
        let local = rect.local_point(client)?;
        let scale = self.registry.scale();
        Some(ImagePoint {
            pixel: sheet_pixel(local, scale),
            sheet_size: rect.sheet_size(scale),
        })
    }
}
