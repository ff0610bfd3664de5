// Transient indicators that follow the pointer: the live preview window and the cursor ring.

use crate::types::Point;

/// The live preview, exposed as `--x`, `--y` and `--size` custom properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LivePreview {
    pub x_pct: f32,
    pub y_pct: f32,
    pub size: f32,
}

impl Default for LivePreview {
    /// Centred and invisible until the pointer arrives.
    fn default() -> Self {
        Self { x_pct: 50.0, y_pct: 50.0, size: 0.0 }
    }
}

impl LivePreview {
    /// `[("--x", "12.5%"), ("--y", "80%"), ("--size", "96px")]`
    pub fn custom_properties(&self) -> [(&'static str, String); 3] {
        [
            ("--x", format!("{}%", self.x_pct)),
            ("--y", format!("{}%", self.y_pct)),
            ("--size", format!("{}px", self.size)),
        ]
    }

    pub fn is_visible(&self) -> bool {
        self.size > 0.0
    }
}

/// Ring drawn at the pointer while hovering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorIndicator {
    pub visible: bool,
    pub position: Point, // client coordinates
}

impl Default for CursorIndicator {
    fn default() -> Self {
        Self { visible: false, position: Point::new(0.0, 0.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_properties() {
        let props = LivePreview::default().custom_properties();
        assert_eq!(props[0], ("--x", "50%".to_string()));
        assert_eq!(props[1], ("--y", "50%".to_string()));
        assert_eq!(props[2], ("--size", "0px".to_string()));
    }

    #[test]
    fn fractional_values_keep_precision() {
        let p = LivePreview { x_pct: 12.5, y_pct: 80.0, size: 96.0 };
        let props = p.custom_properties();
        assert_eq!(props[0].1, "12.5%");
        assert_eq!(props[2].1, "96px");
        assert!(p.is_visible());
    }
}
