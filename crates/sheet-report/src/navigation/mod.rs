// navigation/mod.rs
//
// Selection state machine: hover preview vs. click/hash focus, keyboard
// stepping and URL fragment sync. Emits effects; never touches the page.

pub mod effects;
pub mod inspector;
pub mod state;

pub use effects::Effect;
pub use inspector::Inspector;
pub use state::{Focus, Selection, ViewportState};
