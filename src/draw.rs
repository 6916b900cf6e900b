use crate::buffer::PixelBuffer;
use crate::color;
use crate::error::{PixelblitError, PixelblitResult};
use crate::sink::CanvasSink;

/// Composition policy for [`DrawCommand::execute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColorMode {
    /// RGB passes through unchanged; only alpha is scaled by opacity.
    #[serde(rename = "RGBA")]
    TrueColor,
    /// Every sampled pixel becomes one of two flat colors: background when
    /// alpha is below opaque or RGB is all zero, foreground otherwise.
    #[serde(rename = "MONO")]
    Duotone,
}

/// An immutable parameter bundle plus the transform/compose pass. Holds a
/// non-owning borrow of the source buffer; build one per draw, execute it,
/// let it go.
#[derive(Clone, Debug)]
pub struct DrawCommand<'a> {
    image: &'a PixelBuffer,
    src_x: i32,
    src_y: i32,
    src_w: i32,
    src_h: i32,
    dest_x: f64,
    dest_y: f64,
    scale_x: f64,
    scale_y: f64,
    angle: f64,
    opacity: f64,
    mode: ColorMode,
    background: u32,
    foreground: u32,
    tint: u32,
}

impl<'a> DrawCommand<'a> {
    /// Identity command: full source extent, no transform, opacity 1,
    /// true-color, tint disabled.
    pub fn new(image: &'a PixelBuffer) -> Self {
        Self {
            image,
            src_x: 0,
            src_y: 0,
            src_w: image.width(),
            src_h: image.height(),
            dest_x: 0.0,
            dest_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            opacity: 1.0,
            mode: ColorMode::TrueColor,
            background: color::OPAQUE_BLACK,
            foreground: color::OPAQUE_WHITE,
            tint: color::TRANSPARENT,
        }
    }

    /// Source sub-rectangle. The extent sizes the iteration space only; the
    /// sampling clip in `execute` always uses the full image bounds.
    pub fn src_rect(mut self, x: i32, y: i32, w: i32, h: i32) -> PixelblitResult<Self> {
        if w < 0 || h < 0 {
            return Err(PixelblitError::invalid_parameter(format!(
                "source extent must be non-negative, got {w}x{h}"
            )));
        }
        self.src_x = x;
        self.src_y = y;
        self.src_w = w;
        self.src_h = h;
        Ok(self)
    }

    /// Top-left anchor of the output in destination space.
    pub fn dest(mut self, x: f64, y: f64) -> Self {
        self.dest_x = x;
        self.dest_y = y;
        self
    }

    /// Per-axis scale; a negative component flips that axis. Zero would make
    /// the resample step undefined and is rejected up front.
    pub fn scale(mut self, x: f64, y: f64) -> PixelblitResult<Self> {
        if x == 0.0 || y == 0.0 {
            return Err(PixelblitError::invalid_parameter(
                "scale components must be non-zero",
            ));
        }
        self.scale_x = x;
        self.scale_y = y;
        Ok(self)
    }

    /// Clockwise rotation in degrees, applied after flip.
    pub fn angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    /// Source-alpha multiplier for [`ColorMode::TrueColor`].
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Duotone palette: background and foreground replacement colors.
    pub fn colors(mut self, background: u32, foreground: u32) -> Self {
        self.background = background;
        self.foreground = foreground;
        self
    }

    /// Flat overlay written over every non-transparent composed pixel;
    /// zero disables it.
    pub fn tint(mut self, color: u32) -> Self {
        self.tint = color;
        self
    }

    /// Run the transform/compose pass. The command is never mutated; the
    /// only observable effect is the sequence of writes issued to `sink`,
    /// which owns destination-side bounds handling.
    #[tracing::instrument(
        skip_all,
        fields(src_w = self.src_w, src_h = self.src_h, angle = self.angle)
    )]
    pub fn execute(&self, sink: &mut dyn CanvasSink) -> PixelblitResult<()> {
        let pixels = self.image.pixels().ok_or_else(|| {
            PixelblitError::invalid_parameter("source image has no pixel storage")
        })?;
        let img_w = self.image.width();
        let img_h = self.image.height();

        let rad = self.angle.to_radians();
        let (sin, cos) = rad.sin_cos();

        // Inverse-scale sampling steps for nearest-neighbor resampling.
        let sx = (1.0 / self.scale_x).abs();
        let sy = (1.0 / self.scale_y).abs();

        // Walk a 3x oversampled grid and shrink with truncating division at
        // placement time. Rotation lands on a grid finer than the output, so
        // rotated edges do not alias into ragged blocks.
        let w = (f64::from(self.src_w) * self.scale_x.abs() * 3.0) as i32;
        let h = (f64::from(self.src_h) * self.scale_y.abs() * 3.0) as i32;

        for j in 0..h {
            for i in 0..w {
                // Negative scale mirrors its axis; rotation handles the rest.
                let x = if self.scale_x < 0.0 { (w - 1) - i } else { i };
                let y = if self.scale_y < 0.0 { (h - 1) - j } else { j };

                // Truncation toward zero is a pixel-exact contract here;
                // rounding or floor division changes output.
                let rx = (f64::from(x) * cos - f64::from(y) * sin) as i32;
                let ry = (f64::from(x) * sin + f64::from(y) * cos) as i32;

                let dx = (self.dest_x + f64::from(rx / 3)) as i32;
                let dy = (self.dest_y + f64::from(ry / 3)) as i32;

                let u = (f64::from(i) * sx / 3.0) as i32;
                let v = (f64::from(j) * sy / 3.0) as i32;

                // Clip against the full source image, not the declared
                // sub-rectangle; transform overshoot is dropped, never an
                // error.
                if self.src_x + u < 0
                    || self.src_x + u >= img_w
                    || self.src_y + v < 0
                    || self.src_y + v >= img_h
                {
                    continue;
                }

                let pre = pixels[((self.src_y + v) * img_w + (self.src_x + u)) as usize];
                let alpha = color::alpha(pre);

                let out = match self.mode {
                    ColorMode::Duotone => {
                        if alpha < 0xFF || color::rgb(pre) == 0 {
                            self.background
                        } else {
                            self.foreground
                        }
                    }
                    ColorMode::TrueColor => {
                        color::with_alpha(pre, (f64::from(alpha) * self.opacity) as u8)
                    }
                };
                sink.write_pixel(dx, dy, out);

                // Tint replaces, it never blends; skipped when the composed
                // pixel is transparent or zero.
                if self.tint != 0 && out != 0 && f64::from(alpha) * self.opacity != 0.0 {
                    sink.write_pixel(dx, dy, self.tint);
                }
            }
        }
        Ok(())
    }
}
