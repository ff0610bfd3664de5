// Core types shared by the reveal effect and the window host.

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// A position in pixels. Client space or canvas space depending on context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where the container sits in client coordinates.
/// For the desktop host the container is the whole window, so `left`/`top` are 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Client point -> canvas pixel point (origin at the container's top-left).
    pub fn to_canvas(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Client point -> percentage of the container (0..100 when inside).
    /// A zero-sized container yields NaN/inf; callers don't guard it.
    pub fn to_percent(&self, client: Point) -> (f32, f32) {
        let local = self.to_canvas(client);
        (local.x / self.width * 100.0, local.y / self.height * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_relative_to_container_origin() {
        let rect = ContainerRect::new(10.0, 20.0, 200.0, 100.0);
        let (x, y) = rect.to_percent(Point::new(110.0, 45.0));
        assert!((x - 50.0).abs() < 1e-4);
        assert!((y - 25.0).abs() < 1e-4);
        assert_eq!(rect.to_canvas(Point::new(110.0, 45.0)), Point::new(100.0, 25.0));
    }

    #[test]
    fn zero_sized_container_degenerates() {
        let rect = ContainerRect::new(0.0, 0.0, 0.0, 0.0);
        let (x, y) = rect.to_percent(Point::new(0.0, 0.0));
        assert!(x.is_nan() && y.is_nan());
    }
}
