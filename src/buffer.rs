use crate::codec;
use crate::draw::DrawCommand;
use crate::error::{PixelblitError, PixelblitResult};
use crate::sink::CanvasSink;

/// Row-major buffer of packed `0xAARRGGBB` words; the unit of image storage.
///
/// `channels` records the source layout (1/3 = no dedicated alpha channel,
/// 2/4 = alpha-bearing) and selects the blit path taken by [`draw`].
/// `pixels` is `None` when no storage has been allocated.
///
/// [`draw`]: PixelBuffer::draw
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    channels: u8,
    pixels: Option<Vec<u32>>,
}

impl PixelBuffer {
    /// Allocate zero-filled (fully transparent) storage.
    pub fn allocate(width: i32, height: i32) -> Self {
        let len = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            channels: 4,
            pixels: Some(vec![0; len]),
        }
    }

    /// A buffer with no pixel storage and zero dimensions.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            channels: 0,
            pixels: None,
        }
    }

    /// Wrap existing packed words.
    pub fn from_raw(width: i32, height: i32, channels: u8, pixels: Vec<u32>) -> PixelblitResult<Self> {
        if pixels.len() != width.max(0) as usize * height.max(0) as usize {
            return Err(PixelblitError::invalid_parameter(format!(
                "pixel data length {} does not match {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels: Some(pixels),
        })
    }

    /// Decode compressed image bytes through the codec.
    pub fn decode(bytes: &[u8]) -> PixelblitResult<Self> {
        let decoded = codec::decode(bytes)?;
        Ok(Self {
            width: decoded.width,
            height: decoded.height,
            channels: decoded.channels,
            pixels: Some(decoded.pixels),
        })
    }

    /// Serialize to PNG bytes; `None` when no pixel storage exists.
    pub fn encode(&self) -> PixelblitResult<Option<Vec<u8>>> {
        match self.pixels.as_ref() {
            Some(pixels) => Ok(Some(codec::encode(pixels, self.width, self.height)?)),
            None => Ok(None),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// True for layouts carrying a dedicated alpha channel (2 or 4).
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 2 || self.channels == 4
    }

    #[inline]
    pub fn pixels(&self) -> Option<&[u32]> {
        self.pixels.as_deref()
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> PixelblitError {
        PixelblitError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Read one pixel. Out-of-range co-ordinates are a caller error, unlike
    /// the compose pass's silent clip.
    pub fn get(&self, x: i32, y: i32) -> PixelblitResult<u32> {
        match self.pixels.as_ref() {
            Some(pixels) if self.in_bounds(x, y) => Ok(pixels[(y * self.width + x) as usize]),
            _ => Err(self.out_of_bounds(x, y)),
        }
    }

    /// Write one pixel, bounds-checked.
    pub fn set(&mut self, x: i32, y: i32, color: u32) -> PixelblitResult<()> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        let idx = (y * self.width + x) as usize;
        let (width, height) = (self.width, self.height);
        match self.pixels.as_mut() {
            Some(pixels) => {
                pixels[idx] = color;
                Ok(())
            }
            None => Err(PixelblitError::OutOfBounds {
                x,
                y,
                width,
                height,
            }),
        }
    }

    /// Draw the whole image at `(x, y)`. Images without a dedicated alpha
    /// channel take the fast row-blit path (identity placement only);
    /// alpha-bearing images go through a default [`DrawCommand`] so
    /// per-pixel alpha is honored.
    pub fn draw(&self, sink: &mut dyn CanvasSink, x: i32, y: i32) -> PixelblitResult<()> {
        let pixels = self
            .pixels
            .as_ref()
            .ok_or_else(|| PixelblitError::invalid_parameter("image has no pixel storage"))?;

        if self.has_alpha() {
            return DrawCommand::new(self)
                .dest(f64::from(x), f64::from(y))
                .execute(sink);
        }

        if self.width <= 0 {
            return Ok(());
        }
        for (j, row) in pixels.chunks_exact(self.width as usize).enumerate() {
            sink.write_row(x, y + j as i32, row);
        }
        Ok(())
    }
}

/// Sink-side writes clip silently, per the sink contract. This is distinct
/// from [`PixelBuffer::set`], which reports out-of-range co-ordinates.
impl CanvasSink for PixelBuffer {
    fn write_pixel(&mut self, x: i32, y: i32, color: u32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = (y * self.width + x) as usize;
        if let Some(pixels) = self.pixels.as_mut() {
            pixels[idx] = color;
        }
    }

    fn write_row(&mut self, x: i32, y: i32, colors: &[u32]) {
        if y < 0 || y >= self.height {
            return;
        }
        let width = self.width;
        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };
        let start = x.max(0);
        let end = x.saturating_add(colors.len() as i32).min(width);
        if start >= end {
            return;
        }
        let count = (end - start) as usize;
        let src_off = (start - x) as usize;
        let dst_off = (y * width + start) as usize;
        pixels[dst_off..dst_off + count].copy_from_slice(&colors[src_off..src_off + count]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PixelblitError;

    #[test]
    fn allocate_is_zero_filled_rgba() {
        let buf = PixelBuffer::allocate(3, 2);
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.channels(), 4);
        assert!(buf.has_alpha());
        assert_eq!(buf.pixels().unwrap(), &[0u32; 6]);
    }

    #[test]
    fn empty_has_no_storage() {
        let buf = PixelBuffer::empty();
        assert!(buf.pixels().is_none());
        assert!(!buf.has_alpha());
        assert!(buf.encode().unwrap().is_none());
    }

    #[test]
    fn from_raw_validates_length() {
        assert!(PixelBuffer::from_raw(2, 2, 4, vec![0; 4]).is_ok());
        assert!(PixelBuffer::from_raw(2, 2, 4, vec![0; 3]).is_err());
    }

    #[test]
    fn get_set_round_trip_and_bounds() {
        let mut buf = PixelBuffer::allocate(2, 2);
        buf.set(1, 0, 0xFF123456).unwrap();
        assert_eq!(buf.get(1, 0).unwrap(), 0xFF123456);
        assert_eq!(buf.get(0, 1).unwrap(), 0);

        for (x, y) in [(-1, 0), (0, -1), (2, 0), (0, 2)] {
            assert!(matches!(
                buf.get(x, y),
                Err(PixelblitError::OutOfBounds { .. })
            ));
            assert!(matches!(
                buf.set(x, y, 0),
                Err(PixelblitError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn sink_writes_clip_silently() {
        let mut buf = PixelBuffer::allocate(2, 2);
        buf.write_pixel(-1, 0, 0xFFFFFFFF);
        buf.write_pixel(5, 5, 0xFFFFFFFF);
        buf.write_pixel(1, 1, 0xFF0000FF);
        assert_eq!(buf.pixels().unwrap(), &[0, 0, 0, 0xFF0000FF]);
    }

    #[test]
    fn sink_row_write_clips_both_ends() {
        let mut buf = PixelBuffer::allocate(4, 1);
        buf.write_row(-1, 0, &[1, 2, 3]);
        assert_eq!(buf.pixels().unwrap(), &[2, 3, 0, 0]);

        buf.write_row(2, 0, &[7, 8, 9]);
        assert_eq!(buf.pixels().unwrap(), &[2, 3, 7, 8]);

        buf.write_row(0, 1, &[5, 5, 5, 5]);
        assert_eq!(buf.pixels().unwrap(), &[2, 3, 7, 8]);
    }

    #[test]
    fn draw_without_alpha_takes_the_row_blit_path() {
        let src = PixelBuffer::from_raw(2, 2, 3, vec![1, 2, 3, 4]).unwrap();
        let mut dst = PixelBuffer::allocate(3, 3);
        src.draw(&mut dst, 1, 1).unwrap();
        assert_eq!(dst.pixels().unwrap(), &[0, 0, 0, 0, 1, 2, 0, 3, 4]);
    }

    #[test]
    fn draw_with_alpha_runs_the_compose_path() {
        // Alpha 0x80 survives the compose path untouched at opacity 1; the
        // fast blit would have copied it too, so also check placement.
        let src = PixelBuffer::from_raw(1, 1, 4, vec![0x80ABCDEF]).unwrap();
        let mut dst = PixelBuffer::allocate(3, 3);
        src.draw(&mut dst, 2, 2).unwrap();
        assert_eq!(dst.get(2, 2).unwrap(), 0x80ABCDEF);
        assert_eq!(dst.get(0, 0).unwrap(), 0);
    }

    #[test]
    fn draw_without_storage_is_an_error() {
        let src = PixelBuffer::empty();
        let mut dst = PixelBuffer::allocate(1, 1);
        assert!(matches!(
            src.draw(&mut dst, 0, 0),
            Err(PixelblitError::InvalidParameter(_))
        ));
    }
}
