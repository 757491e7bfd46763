use crate::field::NoiseField;
use crate::types::Rgba8;

/// Opacity of a fully-lit noise tile.
const TILE_MAX_OPACITY: f32 = 0.15;

/// A CPU raster that paints the flowing tile-noise background.
///
/// The renderer owns a row-major RGBA8 pixel buffer (straight alpha,
/// always fully opaque after a paint). Each [`TileRenderer::paint`]
/// overwrites the whole buffer: first a two-stop vertical gradient,
/// then one semi-transparent white square per grid cell, sized and
/// faded by the noise sample at that cell. No tile state persists
/// between frames.
#[derive(Debug)]
pub struct TileRenderer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    tile: u32,
    top: Rgba8,
    bottom: Rgba8,
}

impl TileRenderer {
    /// Creates a renderer with a zero-sized raster.
    ///
    /// The raster stays empty until the first [`TileRenderer::resize`];
    /// painting a zero-sized raster is a no-op.
    pub fn new(tile: u32, colors: [Rgba8; 2]) -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            tile,
            top: colors[0],
            bottom: colors[1],
        }
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel buffer, `width · height · 4` bytes, row-major RGBA8.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Resizes the raster, discarding all previous pixel content.
    ///
    /// The noise seed and the clock are untouched; the next paint
    /// fills the new dimensions completely, so no stale pixels from
    /// the old size can survive.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width as usize) * (height as usize) * 4];
    }

    /// Paints one full frame at the given clock value.
    ///
    /// For each tile anchored at `(gx, gy)` (stepping by the tile edge
    /// length), the noise field is sampled at
    /// `(gx / (width/4), gy / (height/4), time)` and normalized to
    /// `n ∈ [0, 1]`; the tile is drawn as a white square of side
    /// `ceil(tile · n)` at opacity `n · 0.15`, clipped to the raster.
    /// Every grid cell is visited exactly once per call.
    pub fn paint(&mut self, noise: &NoiseField, time: f32) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        self.fill_gradient();

        let sx = self.width as f32 / 4.0;
        let sy = self.height as f32 / 4.0;

        let mut gy = 0;
        while gy < self.height {
            let mut gx = 0;
            while gx < self.width {
                let n = noise.sample01(gx as f32 / sx, gy as f32 / sy, time);
                let side = (self.tile as f32 * n).ceil() as u32;
                self.blend_square(gx, gy, side, n * TILE_MAX_OPACITY);
                gx += self.tile;
            }
            gy += self.tile;
        }
    }

    /// Fills the raster with the vertical top-to-bottom gradient.
    fn fill_gradient(&mut self) {
        for y in 0..self.height {
            let t = if self.height > 1 {
                y as f32 / (self.height - 1) as f32
            } else {
                0.0
            };
            let c = self.top.lerp(self.bottom, t);
            let row = (y as usize) * (self.width as usize) * 4;
            for x in 0..self.width as usize {
                let i = row + x * 4;
                self.pixels[i] = c.r;
                self.pixels[i + 1] = c.g;
                self.pixels[i + 2] = c.b;
                self.pixels[i + 3] = 255;
            }
        }
    }

    /// Blends an opaque-white square of the given side and opacity over
    /// the raster, anchored at `(x0, y0)` and clipped to the bounds.
    ///
    /// Tiles are anchored on a stride of `tile` and `side <= tile`, so
    /// no pixel is blended twice within one paint.
    fn blend_square(&mut self, x0: u32, y0: u32, side: u32, alpha: f32) {
        let x1 = (x0 + side).min(self.width);
        let y1 = (y0 + side).min(self.height);

        for y in y0..y1 {
            let row = (y as usize) * (self.width as usize) * 4;
            for x in x0..x1 {
                let i = row + (x as usize) * 4;
                for c in 0..3 {
                    let d = self.pixels[i + c] as f32;
                    self.pixels[i + c] = (d + (255.0 - d) * alpha).round() as u8;
                }
            }
        }
    }
}
