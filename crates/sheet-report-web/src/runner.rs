use glam::Vec2;
use sheet_report::{
    Effect, ImageRect, Inspector, InspectorEvent, Page, PointerSample, PointerTarget,
    SheetManifest, SheetRegistry,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node, Window};

/// Live page geometry, read from the DOM on every query.
struct DomPage<'a> {
    window: &'a Window,
    document: &'a Document,
}

impl Page for DomPage<'_> {
    fn image_rect(&self, file: &str) -> Option<ImageRect> {
        let rect = self.document.get_element_by_id(file)?.get_bounding_client_rect();
        Some(ImageRect::new(
            rect.x() as f32,
            rect.y() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }

    fn scroll_y(&self) -> f32 {
        self.window.scroll_y().unwrap_or(0.0) as f32
    }

    fn viewport_height(&self) -> f32 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0) as f32
    }
}

/// Owns the inspector and the DOM handles it renders into.
///
/// The page keeps one runner in a `thread_local!` and forwards its DOM events
/// through the `report_*` exports, because wasm-bindgen cannot hand a
/// borrowed runner to JS callbacks directly.
pub struct ReportRunner {
    inspector: Inspector,
    window: Window,
    document: Document,
    panel: Element,
    highlight: Element,
    /// Image the highlight is currently attached to.
    highlight_file: Option<String>,
}

impl ReportRunner {
    /// Resolve the panel, create the highlight element and build the
    /// inspector. When the manifest carries no file order, it is measured
    /// from the atlas images in document order.
    pub fn new(manifest: &SheetManifest) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let config = manifest.config.clone();

        let panel = document.get_element_by_id(&config.panel_id).ok_or_else(|| {
            JsValue::from_str(&format!("info panel #{} not found", config.panel_id))
        })?;
        let highlight = document.create_element("div")?;
        highlight.set_class_name(&config.highlight_class);

        let mut registry = SheetRegistry::from_manifest(manifest)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        if manifest.files.is_empty() {
            let files = image_ids(&document, &config.image_selector)?;
            log::debug!("measured file order: {:?}", files);
            registry = registry.with_file_order(files);
        }

        Ok(Self {
            inspector: Inspector::new(registry, config),
            window,
            document,
            panel,
            highlight,
            highlight_file: None,
        })
    }

    /// Apply the URL fragment the page was opened with.
    pub fn start(&mut self) {
        let hash = self.window.location().hash().unwrap_or_default();
        let hash = decode_fragment(&hash);
        let page = DomPage {
            window: &self.window,
            document: &self.document,
        };
        let effects = self.inspector.start(&hash, &page);
        self.apply(effects);
    }

    /// Run one event through the inspector and render its effects.
    /// Returns true when the page should call `preventDefault()`.
    pub fn dispatch(&mut self, event: InspectorEvent) -> bool {
        let page = DomPage {
            window: &self.window,
            document: &self.document,
        };
        let effects = self.inspector.handle(event, &page);
        self.apply(effects)
    }

    /// Resolve what a pointer event landed on from its DOM target.
    pub fn pointer_sample(
        &self,
        client_x: f32,
        client_y: f32,
        target: Option<&Node>,
    ) -> PointerSample {
        PointerSample {
            client: Vec2::new(client_x, client_y),
            target: self.classify(target),
        }
    }

    fn classify(&self, target: Option<&Node>) -> PointerTarget {
        let Some(node) = target else {
            return PointerTarget::Elsewhere;
        };
        if self.panel.contains(Some(node)) {
            return PointerTarget::Panel;
        }
        if self.highlight.contains(Some(node)) {
            if let Some(file) = &self.highlight_file {
                return PointerTarget::Highlight { file: file.clone() };
            }
        }
        match node.dyn_ref::<Element>() {
            Some(element)
                if element.tag_name().eq_ignore_ascii_case("img")
                    && !self.inspector.registry().sheets_in_file(&element.id()).is_empty() =>
            {
                PointerTarget::Image { file: element.id() }
            }
            _ => PointerTarget::Elsewhere,
        }
    }

    pub fn focused_atom(&self) -> Option<String> {
        self.inspector.focused_atom().map(|atom| atom.to_string())
    }

    pub fn sheet_count(&self) -> usize {
        self.inspector.registry().len()
    }

    fn apply(&mut self, effects: Vec<Effect>) -> bool {
        let mut prevent_default = false;
        for effect in effects {
            let result = match effect {
                Effect::ShowInfo(html) => {
                    self.panel.set_inner_html(&html);
                    Ok(())
                }
                Effect::Highlight { file, rect } => self.place_highlight(&file, &rect.to_css()),
                Effect::ClearHighlight => {
                    self.highlight.remove();
                    self.highlight_file = None;
                    Ok(())
                }
                Effect::ReplaceHash(hash) => self.replace_hash(&hash),
                Effect::ScrollTo(y) => {
                    self.window.scroll_to_with_x_and_y(0.0, y as f64);
                    Ok(())
                }
                Effect::PreventDefault => {
                    prevent_default = true;
                    Ok(())
                }
            };
            if let Err(err) = result {
                log::warn!("failed to apply effect: {:?}", err);
            }
        }
        prevent_default
    }

    /// Move the highlight into the image's wrapper so it is positioned
    /// relative to the image.
    fn place_highlight(&mut self, file: &str, style: &str) -> Result<(), JsValue> {
        let parent = self
            .document
            .get_element_by_id(file)
            .and_then(|image| image.parent_node())
            .ok_or_else(|| JsValue::from_str(&format!("no wrapper for image {}", file)))?;
        parent.append_child(&self.highlight)?;
        self.highlight_file = Some(file.to_string());
        self.highlight.set_attribute("style", style)
    }

    /// Rewrite the fragment in place; no history entry, no hashchange event.
    fn replace_hash(&self, hash: &str) -> Result<(), JsValue> {
        let href = self.window.location().href()?;
        let base = href.split('#').next().unwrap_or(&href);
        let url = format!("{}{}", base, hash);
        self.window
            .history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
    }
}

/// Ids of the atlas images in document order.
fn image_ids(document: &Document, selector: &str) -> Result<Vec<String>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    let ids = (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(|element| element.id())
        .filter(|id| !id.is_empty())
        .collect();
    Ok(ids)
}

/// Percent-decode a URL fragment; falls back to the raw text when it is not
/// valid percent-encoding.
pub fn decode_fragment(hash: &str) -> String {
    js_sys::decode_uri_component(hash)
        .map(String::from)
        .unwrap_or_else(|_| hash.to_string())
}
