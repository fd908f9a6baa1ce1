//! Aggregator configuration
//!
//! [`AggregatorConfig`] holds the process-wide settings. A
//! [`ConfigDocument`] is the JSON form loaded at startup; it borrows its
//! strings from the input buffer.

use embassy_time::Duration;
use heapless::Vec;
use serde::Deserialize;

use crate::color::{BLACK, Rgb, WHITE, parse_hex_color};
use crate::compositor::CompositorSettings;
use crate::error::ConfigError;
use crate::filter::BrightnessFilter;
use crate::heartbeat::{DEFAULT_INTERVAL, DEFAULT_SPEED_SHIFT};

/// Settings of the aggregator
#[derive(Debug, Clone, Copy)]
pub struct AggregatorConfig {
    /// Number of LEDs on the strip; mappings must stay below it
    pub led_count: usize,
    /// Global brightness (0.0-1.0)
    pub brightness: f32,
    /// Color for mappings declared without one
    pub on_color: Rgb,
    /// Color of LEDs with no active binding
    pub off_color: Rgb,
    /// Show every binding's color regardless of state
    pub force_all_on: bool,
    /// Heartbeat LED, `None` when disabled
    pub heartbeat: Option<usize>,
    /// Heartbeat hue rotation shift
    pub heartbeat_speed: u8,
    /// Heartbeat tick interval
    pub heartbeat_interval: Duration,
}

impl AggregatorConfig {
    /// Defaults for a strip of `led_count` LEDs
    pub const fn new(led_count: usize) -> Self {
        Self {
            led_count,
            brightness: 1.0,
            on_color: WHITE,
            off_color: BLACK,
            force_all_on: false,
            heartbeat: None,
            heartbeat_speed: DEFAULT_SPEED_SHIFT,
            heartbeat_interval: DEFAULT_INTERVAL,
        }
    }

    /// Output settings for the compositor
    pub fn compositor_settings(&self) -> CompositorSettings {
        CompositorSettings {
            brightness: BrightnessFilter::new(self.brightness),
            off_color: self.off_color,
            force_all_on: self.force_all_on,
        }
    }
}

/// One LED to signal mapping in a [`ConfigDocument`]
#[derive(Debug, Clone, Deserialize)]
pub struct MappingDocument<'a> {
    pub led: u16,
    pub signal: &'a str,
    #[serde(default, borrow)]
    pub color: Option<&'a str>,
}

/// JSON configuration document
///
/// ```json
/// {
///   "led_count": 8,
///   "brightness": 0.5,
///   "off_color": "#000000",
///   "heartbeat": 7,
///   "leds": [{ "led": 0, "signal": "light.kitchen", "color": "#FF0000" }]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigDocument<'a, const MAPPINGS: usize> {
    pub led_count: u16,
    #[serde(default = "default_brightness")]
    pub brightness: f32,
    #[serde(default, borrow)]
    pub on_color: Option<&'a str>,
    #[serde(default, borrow)]
    pub off_color: Option<&'a str>,
    #[serde(default)]
    pub force: bool,
    /// Negative disables the heartbeat
    #[serde(default = "disabled_heartbeat")]
    pub heartbeat: i32,
    #[serde(default)]
    pub heartbeat_speed: Option<u8>,
    #[serde(borrow)]
    pub leds: Vec<MappingDocument<'a>, MAPPINGS>,
}

const fn default_brightness() -> f32 {
    1.0
}

const fn disabled_heartbeat() -> i32 {
    -1
}

impl<'a, const MAPPINGS: usize> ConfigDocument<'a, MAPPINGS> {
    /// Parse a JSON document
    pub fn from_json(json: &'a str) -> Result<Self, ConfigError> {
        let (document, _) = serde_json_core::from_str(json)?;
        Ok(document)
    }

    /// Settings described by the document
    pub fn settings(&self) -> AggregatorConfig {
        let mut config = AggregatorConfig::new(usize::from(self.led_count));
        config.brightness = self.brightness;
        config.force_all_on = self.force;
        config.heartbeat = usize::try_from(self.heartbeat).ok();
        if let Some(color) = self.on_color {
            config.on_color = parse_hex_color(color);
        }
        if let Some(color) = self.off_color {
            config.off_color = parse_hex_color(color);
        }
        if let Some(speed) = self.heartbeat_speed {
            config.heartbeat_speed = speed;
        }
        config
    }

    /// Mappings as `(led, signal id, color)`, unset colors resolved to
    /// `on_color`
    pub fn mappings(&self) -> impl Iterator<Item = (usize, &'a str, Rgb)> + '_ {
        let on_color = self.on_color.map_or(WHITE, parse_hex_color);
        self.leds.iter().map(move |mapping| {
            let color = mapping.color.map_or(on_color, parse_hex_color);
            (usize::from(mapping.led), mapping.signal, color)
        })
    }
}
