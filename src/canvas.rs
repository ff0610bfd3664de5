// The persistent reveal layer.
// Visual: wherever coverage > 0 the hidden image shows through the cover;
// coverage only ever grows until the next resize wipes it.

use crate::mask::RadialGradient;
use crate::types::Point;
use image::{Rgba, RgbaImage};

/// Per-pixel reveal opacity in [0,1]; 0 = cover visible, 1 = hidden image fully shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevealCanvas {
    width: usize,
    height: usize,
    coverage: Vec<f32>, // length = width * height
}

impl RevealCanvas {
    /// A blank (fully covered) canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, coverage: vec![0.0; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Coverage at pixel (x,y); 0 outside the canvas.
    pub fn coverage_at(&self, x: usize, y: usize) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage[y * self.width + x]
    }

    pub fn coverage(&self) -> &[f32] {
        &self.coverage
    }

    /// True once anything has been painted (lets the compositor skip the blend).
    pub fn has_any(&self) -> bool {
        self.coverage.iter().any(|&a| a > 0.0)
    }

    /// Dab the gradient circle at `center` with `radius`, in place.
    /// Source-over accumulation: a' = g + a·(1-g), written as a + g·(1-a) so a' >= a
    /// holds in floating point too.
    pub fn stamp(&mut self, gradient: &RadialGradient, center: Point, radius: f32) {
        if radius.is_nan() || radius <= 0.0 || !radius.is_finite() {
            return;
        }
        if !center.x.is_finite() || !center.y.is_finite() {
            return;
        }
        if self.width == 0 || self.height == 0 {
            return;
        }

        // Scan the circle's bounding box, clipped to the canvas.
        let x0 = (center.x - radius).floor().max(0.0) as usize;
        let y0 = (center.y - radius).floor().max(0.0) as usize;
        let x1 = ((center.x + radius).ceil().max(0.0) as usize).min(self.width - 1);
        let y1 = ((center.y + radius).ceil().max(0.0) as usize).min(self.height - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        for y in y0..=y1 {
            for x in x0..=x1 {
                // Sample at the pixel centre, like a canvas fill does.
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let t = (dx * dx + dy * dy).sqrt() / radius;
                let g = gradient.alpha_at(t);
                if g <= 0.0 {
                    continue;
                }
                let idx = y * self.width + x;
                let a = self.coverage[idx];
                self.coverage[idx] = (a + g * (1.0 - a)).min(1.0);
            }
        }
    }

    /// Materialize the layer: hidden-image colour with alpha = coverage × image alpha.
    /// `stencil` must already be fitted to the canvas size; mismatches give an empty layer.
    pub fn to_rgba(&self, stencil: &RgbaImage) -> RgbaImage {
        let (w, h) = (self.width as u32, self.height as u32);
        if stencil.dimensions() != (w, h) {
            return RgbaImage::new(w, h);
        }
        RgbaImage::from_fn(w, h, |x, y| {
            let Rgba([r, g, b, a]) = *stencil.get_pixel(x, y);
            let cov = self.coverage_at(x as usize, y as usize);
            let alpha = (cov * a as f32).round().clamp(0.0, 255.0) as u8;
            Rgba([r, g, b, alpha])
        })
    }
}

/// Pure form of a permanent reveal: takes the destination, returns it with the dab applied.
pub fn paint_reveal(
    mut dest: RevealCanvas,
    gradient: &RadialGradient,
    center: Point,
    radius: f32,
) -> RevealCanvas {
    dest.stamp(gradient, center, radius);
    dest
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Painting never lowers coverage anywhere, including repeating the same dab.
        #[test]
        fn paint_is_monotonic(
            dabs in prop::collection::vec((0.0f32..64.0, 0.0f32..48.0, 1.0f32..40.0), 1..6),
        ) {
            let g = RadialGradient::default();
            let mut canvas = RevealCanvas::new(64, 48);
            for (x, y, r) in dabs {
                let before = canvas.clone();
                canvas = paint_reveal(canvas, &g, Point::new(x, y), r);
                let again = paint_reveal(canvas.clone(), &g, Point::new(x, y), r);
                for ((b, a), a2) in before.coverage().iter().zip(canvas.coverage()).zip(again.coverage()) {
                    prop_assert!(a >= b);
                    prop_assert!(a2 >= a);
                    prop_assert!(*a2 <= 1.0);
                }
            }
        }
    }
}
