// Window + software drawing utilities.
// Visual layers, bottom to top:
// 1) The cover image filling the window.
// 2) Everything revealed so far (hidden image through the accumulated mask).
// 3) The live preview circle following the pointer.
// 4) A thin ring marking the cursor.

use crate::color::GammaLut;
use crate::controller::RevealController;
use crate::error::Error;
use crate::types::{FrameBuffer, Point};
use image::RgbaImage;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

const BACKDROP: u32 = 0x00_20_20_20; // shown until the cover image decodes
const CURSOR_RING_RADIUS: f32 = 14.0;
const CURSOR_RING_COLOR: u32 = 0x00_FF_FF_FF;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window; resizing it resets the reveal canvas.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Cap the loop at `fps` frames per second (0 = uncapped).
    pub fn set_target_fps(&mut self, fps: usize) {
        self.window.set_target_fps(fps);
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, or None while it is outside the window.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window.get_mouse_pos(MouseMode::Discard).map(|(x, y)| Point::new(x, y))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Current client-area size; changes when the user resizes the window.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }
}

/* ---------- Software composition ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Copy the fitted cover into the screen, or a flat backdrop while it is missing.
fn draw_cover(fb: &mut FrameBuffer, cover: Option<&RgbaImage>) {
    match cover {
        Some(img) if img.dimensions() == (fb.width as u32, fb.height as u32) => {
            for (dst, px) in fb.pixels.iter_mut().zip(img.pixels()) {
                *dst = crate::color::pack_rgb(px[0], px[1], px[2]);
            }
        }
        _ => fb.pixels.fill(BACKDROP),
    }
}

/// Blend the hidden image wherever the permanent canvas has coverage.
fn draw_reveals(fb: &mut FrameBuffer, controller: &RevealController, lut: &GammaLut) {
    let Some(stencil) = controller.hidden_stencil() else { return };
    let canvas = controller.canvas();
    if stencil.dimensions() != (fb.width as u32, fb.height as u32)
        || canvas.width() != fb.width
        || canvas.height() != fb.height
    {
        return;
    }
    for ((dst, &cov), px) in fb.pixels.iter_mut().zip(canvas.coverage()).zip(stencil.pixels()) {
        if cov <= 0.0 {
            continue;
        }
        *dst = lut.mix(*dst, *px, cov * px[3] as f32 / 255.0);
    }
}

/// The transient preview: hidden image inside a soft circle of radius `--size`.
fn draw_preview(fb: &mut FrameBuffer, controller: &RevealController, lut: &GammaLut) {
    let preview = controller.preview();
    if !preview.is_visible() {
        return;
    }
    let Some(stencil) = controller.hidden_stencil() else { return };
    if stencil.dimensions() != (fb.width as u32, fb.height as u32) {
        return;
    }

    let cx = preview.x_pct / 100.0 * fb.width as f32;
    let cy = preview.y_pct / 100.0 * fb.height as f32;
    let r = preview.size;
    if !cx.is_finite() || !cy.is_finite() {
        return;
    }

    let gradient = controller.gradient();
    let x0 = (cx - r).floor().max(0.0) as usize;
    let y0 = (cy - r).floor().max(0.0) as usize;
    let x1 = ((cx + r).ceil().max(0.0) as usize).min(fb.width.saturating_sub(1));
    let y1 = ((cy + r).ceil().max(0.0) as usize).min(fb.height.saturating_sub(1));
    if fb.width == 0 || fb.height == 0 || x0 > x1 || y0 > y1 {
        return;
    }

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let a = gradient.alpha_at((dx * dx + dy * dy).sqrt() / r);
            if a <= 0.0 {
                continue;
            }
            let px = *stencil.get_pixel(x as u32, y as u32);
            let idx = y * fb.width + x;
            fb.pixels[idx] = lut.mix(fb.pixels[idx], px, a * px[3] as f32 / 255.0);
        }
    }
}

/// A 1-pixel ring centred on the cursor.
fn draw_cursor_ring(fb: &mut FrameBuffer, center: Point, radius: f32, color: u32) {
    let r = radius.ceil() as i32 + 1;
    let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);
    for y in (cy - r)..=(cy + r) {
        for x in (cx - r)..=(cx + r) {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            if ((dx * dx + dy * dy).sqrt() - radius).abs() < 0.5 {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

/// Build this frame's image from the cover, the reveal canvas, the preview and the cursor.
pub fn compose_frame(
    fb: &mut FrameBuffer,
    cover: Option<&RgbaImage>,
    controller: &RevealController,
    lut: &GammaLut,
) {
    draw_cover(fb, cover);
    draw_reveals(fb, controller, lut);
    draw_preview(fb, controller, lut);

    let cursor = controller.cursor();
    if cursor.visible {
        draw_cursor_ring(fb, cursor.position, CURSOR_RING_RADIUS, CURSOR_RING_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RevealSettings;
    use image::Rgba;

    const COVER: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const HIDDEN: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn setup(w: u32, h: u32) -> (FrameBuffer, RgbaImage, RevealController, GammaLut) {
        let mut c = RevealController::new(RevealSettings::default(), w, h);
        c.set_hidden_image(RgbaImage::from_pixel(w, h, HIDDEN));
        (FrameBuffer::new(w as usize, h as usize), RgbaImage::from_pixel(w, h, COVER), c, GammaLut::new())
    }

    #[test]
    fn cover_only_until_something_is_revealed() {
        let (mut fb, cover, c, lut) = setup(40, 30);
        compose_frame(&mut fb, Some(&cover), &c, &lut);
        assert!(fb.pixels.iter().all(|&p| p == 0x00_00_00_FF));

        compose_frame(&mut fb, None, &c, &lut);
        assert!(fb.pixels.iter().all(|&p| p == BACKDROP));
    }

    #[test]
    fn permanent_reveal_shows_hidden_image() {
        let (mut fb, cover, mut c, lut) = setup(200, 200);
        c.on_touch_start(Point::new(50.0, 50.0));
        c.on_touch_end();
        compose_frame(&mut fb, Some(&cover), &c, &lut);
        assert_eq!(fb.pixels[50 * 200 + 50], 0x00_FF_00_00);
        assert_eq!(fb.pixels[199 * 200 + 199], 0x00_00_00_FF);
    }

    #[test]
    fn preview_follows_pointer_without_committing() {
        let (mut fb, cover, mut c, lut) = setup(200, 200);
        c.on_pointer_enter(Point::new(100.0, 100.0), 0.0);
        c.tick(300.0);
        c.on_pointer_leave(300.0); // no tick afterwards, so the preview keeps size 120
        assert_eq!(c.paint_count(), 0);

        compose_frame(&mut fb, Some(&cover), &c, &lut);
        assert_eq!(fb.pixels[100 * 200 + 100], 0x00_FF_00_00, "preview centre shows hidden");
        assert!(!c.canvas().has_any());
    }

    #[test]
    fn cursor_ring_is_drawn_only_when_hovering() {
        let (mut fb, cover, mut c, lut) = setup(60, 60);
        c.on_pointer_enter(Point::new(30.0, 30.0), 0.0);
        compose_frame(&mut fb, Some(&cover), &c, &lut);
        assert_eq!(fb.pixels[30 * 60 + 30 + 14], CURSOR_RING_COLOR);

        c.on_pointer_leave(0.0);
        compose_frame(&mut fb, Some(&cover), &c, &lut);
        assert!(fb.pixels.iter().all(|&p| p != CURSOR_RING_COLOR));
    }
}
