/// Destination write target for composition. Implementations own their
/// bounds handling: writes outside the destination clip silently, they never
/// fail.
pub trait CanvasSink {
    fn write_pixel(&mut self, x: i32, y: i32, color: u32);

    /// Copy a run of pixels into one destination row. Used by the fast blit
    /// path for alpha-less images; the default falls back to per-pixel
    /// writes.
    fn write_row(&mut self, x: i32, y: i32, colors: &[u32]) {
        for (i, &color) in colors.iter().enumerate() {
            self.write_pixel(x + i as i32, y, color);
        }
    }
}
