//! Heartbeat status LED
//!
//! A slowly rotating, mostly white hue while everything is connected.
//! Pure red when the network is down, pure blue when the network is up but
//! the upstream API session is not. Connectivity is re-read every tick.

use embassy_time::{Duration, Instant};

use crate::color::{BLUE, RED, Rgb, hsv_to_rgb};
use crate::compositor::Compositor;
use crate::{Connectivity, PixelDriver};

/// Default hue rotation shift (one hue step every 2^14 us)
pub const DEFAULT_SPEED_SHIFT: u8 = 14;

/// Default tick interval
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

const SATURATION: u8 = 40;
const VALUE: u8 = 255;

/// Heartbeat generator bound to a single LED
#[derive(Debug, Clone)]
pub struct Heartbeat {
    led: usize,
    speed_shift: u8,
    interval: Duration,
    next_due: Option<Instant>,
}

impl Heartbeat {
    pub const fn new(led: usize) -> Self {
        Self {
            led,
            speed_shift: DEFAULT_SPEED_SHIFT,
            interval: DEFAULT_INTERVAL,
            next_due: None,
        }
    }

    /// Set the hue rotation shift (larger is slower, capped at 63)
    #[must_use]
    pub fn with_speed_shift(mut self, speed_shift: u8) -> Self {
        self.speed_shift = speed_shift.min(63);
        self
    }

    /// Set the tick interval
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub const fn led(&self) -> usize {
        self.led
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time of the next tick, `None` before the first one
    pub const fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Rotating hue for a point in time
    #[allow(clippy::cast_possible_truncation)]
    pub const fn hue(&self, now: Instant) -> u8 {
        ((now.as_micros() >> self.speed_shift) & 0xFF) as u8
    }

    /// Color to show at `now`
    pub fn color<P: Connectivity>(&self, now: Instant, probes: &P) -> Rgb {
        if !probes.network_connected() {
            RED
        } else if !probes.api_connected() {
            BLUE
        } else {
            hsv_to_rgb(self.hue(now), SATURATION, VALUE)
        }
    }

    /// Whether a tick should run at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_none_or(|due| now >= due)
    }

    /// Write the heartbeat color if the interval elapsed
    ///
    /// Returns `true` when the LED was written.
    pub fn tick<D, P, const LEDS: usize, const BINDINGS: usize>(
        &mut self,
        now: Instant,
        probes: &P,
        compositor: &mut Compositor<D, LEDS, BINDINGS>,
    ) -> bool
    where
        D: PixelDriver,
        P: Connectivity,
    {
        if !self.is_due(now) {
            return false;
        }
        compositor.write_pixel(self.led, self.color(now, probes));
        self.next_due = Some(now + self.interval);
        true
    }
}
