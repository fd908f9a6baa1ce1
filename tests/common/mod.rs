#![allow(dead_code)]

use myrtio_pixel_aggregator::{Connectivity, PixelDriver, Rgb};

/// Color the mock strip starts with, so the one-time clear is visible
pub const SENTINEL: Rgb = Rgb { r: 1, g: 2, b: 3 };

pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Strip that records every call
#[derive(Debug)]
pub struct MockStrip {
    pub pixels: Vec<Rgb>,
    pub sets: usize,
    pub shows: usize,
    pub flushes: usize,
}

impl MockStrip {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![SENTINEL; len],
            sets: 0,
            shows: 0,
            flushes: 0,
        }
    }
}

impl PixelDriver for MockStrip {
    fn size(&self) -> usize {
        self.pixels.len()
    }

    fn set(&mut self, index: usize, color: Rgb) {
        self.sets += 1;
        self.pixels[index] = color;
    }

    fn schedule_show(&mut self) {
        self.shows += 1;
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

/// Fixed connectivity state
#[derive(Debug, Clone, Copy)]
pub struct Probes {
    pub network: bool,
    pub api: bool,
}

impl Probes {
    pub const CONNECTED: Self = Self {
        network: true,
        api: true,
    };
    pub const NO_NETWORK: Self = Self {
        network: false,
        api: false,
    };
    pub const NO_API: Self = Self {
        network: true,
        api: false,
    };
}

impl Connectivity for Probes {
    fn network_connected(&self) -> bool {
        self.network
    }

    fn api_connected(&self) -> bool {
        self.api
    }
}
