use crate::core::geometry::HighlightRect;

/// A side effect the page must apply after an event was handled.
/// The core never touches the DOM; the web bridge executes these in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace the info panel's HTML. An empty string clears it.
    ShowInfo(String),
    /// Place the highlight rectangle over the image of `file`.
    Highlight { file: String, rect: HighlightRect },
    /// Remove the highlight rectangle.
    ClearHighlight,
    /// Replace the URL fragment without adding a history entry.
    ReplaceHash(String),
    /// Scroll the page vertically to this offset.
    ScrollTo(f32),
    /// The key event was consumed; suppress the browser default.
    PreventDefault,
}
