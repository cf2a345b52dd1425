//! Browser bindings for the sprite sheet inspector.
//!
//! The page loads the manifest, calls `report_init`, then forwards its DOM
//! events:
//!
//! ```js
//! report_init(manifestJson);
//! document.addEventListener("mousemove", e =>
//!     report_pointer_move(e.clientX, e.clientY, e.target));
//! document.addEventListener("mousedown", e =>
//!     report_pointer_down(e.clientX, e.clientY, e.target));
//! document.addEventListener("scroll", () => report_scroll());
//! document.addEventListener("keydown", e => {
//!     if (report_key_down(e.keyCode, e.shiftKey, e.ctrlKey, e.altKey)) e.preventDefault();
//! });
//! window.addEventListener("hashchange", () => report_hash_change(location.hash));
//! ```

pub mod runner;

pub use runner::ReportRunner;

use std::cell::RefCell;

use sheet_report::{InspectorEvent, SheetManifest};
use wasm_bindgen::prelude::*;
use web_sys::Node;

thread_local! {
    static RUNNER: RefCell<Option<ReportRunner>> = RefCell::new(None);
}

/// Run `f` against the installed runner. Events that arrive before
/// `report_init` are dropped.
fn with_runner<R>(f: impl FnOnce(&mut ReportRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::debug!("event before report_init(), ignored");
                None
            }
        }
    })
}

/// Parse the manifest, set up logging and apply the page's initial fragment.
#[wasm_bindgen]
pub fn report_init(manifest_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let manifest = match SheetManifest::from_json(manifest_json) {
        Ok(manifest) => manifest,
        Err(err) => {
            let _ = console_log::init_with_level(log::Level::Error);
            log::error!("sheet-report: bad manifest: {}", err);
            return Err(JsValue::from_str(&err.to_string()));
        }
    };
    if let Some(level) = manifest.config.log_level.to_level() {
        let _ = console_log::init_with_level(level);
    }

    let runner = ReportRunner::new(&manifest).map_err(|err| {
        log::error!("sheet-report: init failed: {:?}", err);
        err
    })?;
    let sheets = runner.sheet_count();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    with_runner(|r| r.start());
    log::info!("sheet-report: initialized with {} sheets", sheets);
    Ok(())
}

/// Same as `report_init`, for a manifest already parsed on the JS side.
#[wasm_bindgen]
pub fn report_init_from_value(data: &JsValue) -> Result<(), JsValue> {
    let json: String = js_sys::JSON::stringify(data)?.into();
    report_init(&json)
}

/// `target` is the event's DOM target; the runner classifies it.
#[wasm_bindgen]
pub fn report_pointer_move(client_x: f32, client_y: f32, target: Option<Node>) {
    with_runner(|r| {
        let sample = r.pointer_sample(client_x, client_y, target.as_ref());
        r.dispatch(InspectorEvent::PointerMove(sample))
    });
}

#[wasm_bindgen]
pub fn report_pointer_down(client_x: f32, client_y: f32, target: Option<Node>) {
    with_runner(|r| {
        let sample = r.pointer_sample(client_x, client_y, target.as_ref());
        r.dispatch(InspectorEvent::PointerDown(sample))
    });
}

#[wasm_bindgen]
pub fn report_scroll() {
    with_runner(|r| r.dispatch(InspectorEvent::Scroll));
}

/// Returns true when the key was consumed and the page should call
/// `preventDefault()`.
#[wasm_bindgen]
pub fn report_key_down(key_code: u32, shift: bool, ctrl: bool, alt: bool) -> bool {
    let event = InspectorEvent::KeyDown {
        key_code,
        shift,
        ctrl,
        alt,
    };
    with_runner(|r| r.dispatch(event)).unwrap_or(false)
}

/// `hash` is `location.hash` as the browser reports it; it is
/// percent-decoded here.
#[wasm_bindgen]
pub fn report_hash_change(hash: &str) {
    let hash = runner::decode_fragment(hash);
    with_runner(|r| r.dispatch(InspectorEvent::HashChange { hash }));
}

/// The locked sprite as `sheet:index`, if any.
#[wasm_bindgen]
pub fn report_focused_atom() -> Option<String> {
    with_runner(|r| r.focused_atom()).flatten()
}
