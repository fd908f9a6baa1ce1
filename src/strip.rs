//! Buffered strip over any `smart-leds` writer
//!
//! Pixels are written into a frame buffer; `schedule_show` only marks it
//! dirty and the next `flush` pushes the whole frame once.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use smart_leds::SmartLedsWrite;

use crate::PixelDriver;
use crate::color::{BLACK, Rgb};
use crate::filter::Filter;

/// Frame-buffered strip of `N` LEDs
pub struct SmartLedsStrip<W, const N: usize> {
    writer: W,
    frame: [Rgb; N],
    dirty: bool,
}

impl<W, const N: usize> SmartLedsStrip<W, N>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            frame: [BLACK; N],
            dirty: false,
        }
    }

    /// Current frame buffer
    pub const fn frame(&self) -> &[Rgb; N] {
        &self.frame
    }

    /// Whether a refresh is pending
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Run a filter over the buffered frame and schedule a refresh
    pub fn apply_filter<F: Filter>(&mut self, filter: &mut F) {
        filter.apply(&mut self.frame);
        self.dirty = true;
    }

    /// Push the frame if a refresh was scheduled
    ///
    /// Returns `Ok(true)` when the frame was written.
    pub fn try_flush(&mut self) -> Result<bool, W::Error> {
        if !self.dirty {
            return Ok(false);
        }
        self.dirty = false;
        self.writer.write(self.frame.iter().copied())?;
        Ok(true)
    }
}

impl<W, const N: usize> PixelDriver for SmartLedsStrip<W, N>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    fn size(&self) -> usize {
        N
    }

    fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.frame.get_mut(index) {
            *pixel = color;
        }
    }

    fn schedule_show(&mut self) {
        self.dirty = true;
    }

    fn flush(&mut self) {
        if self.try_flush().is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[SmartLedsStrip.flush] strip write failed, frame dropped");
        }
    }
}
