// "Cover" fitting: scale an image to fill the canvas, keep aspect ratio, crop the overflow
// equally on both sides. Both the cover and the hidden image go through this.

use image::{RgbaImage, imageops};

/// Where the scaled image lands in canvas space (may extend past the canvas edges).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CoverRect {
    /// Fit an `img_w`×`img_h` image over a `canvas_w`×`canvas_h` canvas.
    pub fn fit(img_w: u32, img_h: u32, canvas_w: u32, canvas_h: u32) -> Self {
        let img_aspect = img_w as f32 / img_h as f32;
        let canvas_aspect = canvas_w as f32 / canvas_h as f32;
        let (cw, ch) = (canvas_w as f32, canvas_h as f32);

        if img_aspect > canvas_aspect {
            // Wider than the canvas: match height, overflow left/right.
            let width = ch * img_aspect;
            Self { x: (cw - width) / 2.0, y: 0.0, width, height: ch }
        } else {
            // Taller (or equal): match width, overflow top/bottom.
            let height = cw / img_aspect;
            Self { x: 0.0, y: (ch - height) / 2.0, width: cw, height }
        }
    }
}

/// Render `src` covering a `canvas_w`×`canvas_h` canvas.
/// Crops the visible part of the source first, then resizes it once.
pub fn fit_cover(src: &RgbaImage, canvas_w: u32, canvas_h: u32) -> RgbaImage {
    let (src_w, src_h) = src.dimensions();
    if canvas_w == 0 || canvas_h == 0 {
        return RgbaImage::new(canvas_w, canvas_h);
    }
    if src_w == 0 || src_h == 0 {
        return RgbaImage::new(canvas_w, canvas_h);
    }

    let rect = CoverRect::fit(src_w, src_h, canvas_w, canvas_h);
    let scale_x = rect.width / src_w as f32;
    let scale_y = rect.height / src_h as f32;

    // The canvas window expressed in source pixels.
    let crop_w = ((canvas_w as f32 / scale_x).round() as u32).clamp(1, src_w);
    let crop_h = ((canvas_h as f32 / scale_y).round() as u32).clamp(1, src_h);
    let crop_x = ((-rect.x / scale_x).round().max(0.0) as u32).min(src_w - crop_w);
    let crop_y = ((-rect.y / scale_y).round().max(0.0) as u32).min(src_h - crop_h);

    let crop = imageops::crop_imm(src, crop_x, crop_y, crop_w, crop_h).to_image();
    if crop.dimensions() == (canvas_w, canvas_h) {
        return crop;
    }
    imageops::resize(&crop, canvas_w, canvas_h, imageops::FilterType::Triangle)
}

/// A source image plus its cover-fitted copy for the current canvas size.
#[derive(Default)]
pub struct CoverLayer {
    source: Option<RgbaImage>,
    fitted: Option<RgbaImage>,
}

impl CoverLayer {
    /// Install the decoded image and fit it to the canvas right away.
    pub fn set_source(&mut self, image: RgbaImage, canvas_w: u32, canvas_h: u32) {
        self.fitted = Some(fit_cover(&image, canvas_w, canvas_h));
        self.source = Some(image);
    }

    /// Rebuild the fitted copy after a resize. No-op until a source exists.
    pub fn refit(&mut self, canvas_w: u32, canvas_h: u32) {
        if let Some(src) = &self.source {
            self.fitted = Some(fit_cover(src, canvas_w, canvas_h));
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn fitted(&self) -> Option<&RgbaImage> {
        self.fitted.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn wide_image_overflows_horizontally() {
        let r = CoverRect::fit(400, 100, 200, 100);
        assert_eq!(r, CoverRect { x: -100.0, y: 0.0, width: 400.0, height: 100.0 });
    }

    #[test]
    fn tall_image_overflows_vertically() {
        let r = CoverRect::fit(100, 400, 100, 100);
        assert_eq!(r, CoverRect { x: 0.0, y: -150.0, width: 100.0, height: 400.0 });
    }

    #[test]
    fn fitted_image_matches_canvas_and_is_centred() {
        // Left half red, right half blue; a square canvas keeps the middle, so both colours remain.
        let src = RgbaImage::from_fn(400, 100, |x, _| {
            if x < 200 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 255]) }
        });
        let out = fit_cover(&src, 50, 50);
        assert_eq!(out.dimensions(), (50, 50));
        let left = out.get_pixel(0, 25);
        let right = out.get_pixel(49, 25);
        assert!(left[0] > 200 && left[2] < 50, "left {left:?}");
        assert!(right[2] > 200 && right[0] < 50, "right {right:?}");
    }

    #[test]
    fn zero_sized_inputs_give_blank_output() {
        assert_eq!(fit_cover(&RgbaImage::new(10, 10), 0, 0).dimensions(), (0, 0));
        assert_eq!(fit_cover(&RgbaImage::new(0, 0), 5, 4).dimensions(), (5, 4));
    }

    #[test]
    fn layer_refits_on_resize() {
        let mut layer = CoverLayer::default();
        layer.refit(10, 10);
        assert!(!layer.is_loaded());

        layer.set_source(RgbaImage::new(64, 32), 16, 16);
        assert_eq!(layer.fitted().unwrap().dimensions(), (16, 16));
        layer.refit(30, 20);
        assert_eq!(layer.fitted().unwrap().dimensions(), (30, 20));
    }
}
