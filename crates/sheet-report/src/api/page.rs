//! Page trait: what the inspector needs to know about the rendered report.
//!
//! The web bridge implements it over the live DOM (`getBoundingClientRect`,
//! `window.scrollY`, `window.innerHeight`). Tests implement it with fixed
//! rectangles so the state machine runs without a browser.

use crate::core::geometry::ImageRect;

pub trait Page {
    /// Client-space box of the atlas image for `file`, or None when the page
    /// has no such image.
    fn image_rect(&self, file: &str) -> Option<ImageRect>;

    /// Current vertical scroll offset of the page.
    fn scroll_y(&self) -> f32;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f32;
}
