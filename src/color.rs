// Pixel packing and gamma-correct mixing for the software compositor.
// Mixing in linear light keeps the soft reveal edge from going muddy/dark.

use image::Rgba;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub fn unpack_rgb(px: u32) -> [u8; 3] {
    [((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8]
}

/// sRGB <-> linear lookup tables, built once at startup.
pub struct GammaLut {
    to_linear: [f32; 256], // sRGB byte -> linear 0..1
    to_srgb: [u8; 4096],   // linear quantized to 4096 steps -> sRGB byte
}

impl GammaLut {
    pub fn new() -> Self {
        let mut to_linear = [0.0f32; 256];
        for (v, slot) in to_linear.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut to_srgb = [0u8; 4096];
        for (i, slot) in to_srgb.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { to_linear, to_srgb }
    }

    #[inline]
    fn linear(&self, v: u8) -> f32 {
        self.to_linear[v as usize]
    }

    #[inline]
    fn srgb(&self, l: f32) -> u8 {
        self.to_srgb[(l.clamp(0.0, 1.0) * 4095.0).round() as usize]
    }

    /// Blend `over` onto the 0x00RRGGBB pixel `under` with opacity `alpha` (0..1).
    pub fn mix(&self, under: u32, over: Rgba<u8>, alpha: f32) -> u32 {
        if alpha <= 0.0 {
            return under;
        }
        if alpha >= 1.0 {
            return pack_rgb(over[0], over[1], over[2]);
        }
        let u = unpack_rgb(under);
        let inv = 1.0 - alpha;
        let ch = |i: usize| self.srgb(alpha * self.linear(over[i]) + inv * self.linear(u[i]));
        pack_rgb(ch(0), ch(1), ch(2))
    }
}
