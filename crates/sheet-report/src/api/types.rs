/// Which asset table a sheet came from.
/// Decides how sprite indices are written in atoms: hex for static, decimal for animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SheetKind {
    #[default]
    Static,
    Animated,
}

impl SheetKind {
    /// Write a sprite index the way atoms of this kind spell it.
    pub fn format_index(self, index: u32) -> String {
        match self {
            SheetKind::Static => format!("{:#x}", index),
            SheetKind::Animated => index.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_indices_are_hex() {
        assert_eq!(SheetKind::Static.format_index(26), "0x1a");
        assert_eq!(SheetKind::Static.format_index(0), "0x0");
    }

    #[test]
    fn animated_indices_are_decimal() {
        assert_eq!(SheetKind::Animated.format_index(26), "26");
    }
}
