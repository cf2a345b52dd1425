use glam::{IVec2, Vec2};

/// What the pointer is over when a pointer event fires.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// An atlas image, identified by its filename.
    Image { file: String },
    /// The info panel (its links must stay clickable while focused).
    Panel,
    /// The highlight rectangle drawn over a locked sprite of `file`.
    Highlight { file: String },
    /// Anything else on the page.
    Elsewhere,
}

/// A pointer position in client coordinates plus what it landed on.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerSample {
    pub client: Vec2,
    pub target: PointerTarget,
}

/// Input events the inspector understands.
/// The page forwards these from its DOM handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorEvent {
    PointerMove(PointerSample),
    PointerDown(PointerSample),
    Scroll,
    KeyDown {
        key_code: u32,
        shift: bool,
        ctrl: bool,
        alt: bool,
    },
    /// The URL fragment changed, e.g. `#hero:0x5`.
    HashChange { hash: String },
}

/// Keys with a meaning to the inspector, decoded from DOM key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Left,
    Up,
    Right,
    Down,
}

impl Key {
    /// Arrow keys and their WASD twins map to the same direction.
    pub fn from_key_code(key_code: u32) -> Option<Self> {
        match key_code {
            9 => Some(Key::Tab),
            27 => Some(Key::Escape),
            37 | 65 => Some(Key::Left),
            38 | 87 => Some(Key::Up),
            39 | 68 => Some(Key::Right),
            40 | 83 => Some(Key::Down),
            _ => None,
        }
    }

    /// Tile step for direction keys.
    pub fn direction(self) -> Option<IVec2> {
        match self {
            Key::Left => Some(IVec2::new(-1, 0)),
            Key::Up => Some(IVec2::new(0, -1)),
            Key::Right => Some(IVec2::new(1, 0)),
            Key::Down => Some(IVec2::new(0, 1)),
            Key::Tab | Key::Escape => None,
        }
    }
}
