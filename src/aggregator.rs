//! Aggregator - the main orchestrator
//!
//! Ties together the compositor, the heartbeat and the connectivity probes,
//! and exposes the configuration surface and the signal entry points used
//! by transports.

use core::fmt;

use embassy_time::Instant;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{Rgb, format_hex_color, parse_hex_color};
use crate::compositor::Compositor;
use crate::config::{AggregatorConfig, ConfigDocument};
use crate::error::{ConfigError, StoreError};
use crate::heartbeat::Heartbeat;
use crate::intent::{AggregatorIntent, is_active_state};
use crate::{Connectivity, PixelDriver};

/// One diagnostics line per binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpLine<'a> {
    pub led: usize,
    pub signal_id: &'a str,
    pub color: Rgb,
    pub active: bool,
}

impl fmt::Display for DumpLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LED {} -> Entity: {} Color: {} Current state: {}",
            self.led,
            self.signal_id,
            format_hex_color(self.color),
            if self.active { "on" } else { "off" }
        )
    }
}

/// Signal to LED aggregator
pub struct Aggregator<D, P, const LEDS: usize, const BINDINGS: usize> {
    config: AggregatorConfig,
    compositor: Compositor<D, LEDS, BINDINGS>,
    heartbeat: Option<Heartbeat>,
    probes: P,
}

impl<D, P, const LEDS: usize, const BINDINGS: usize> Aggregator<D, P, LEDS, BINDINGS>
where
    D: PixelDriver,
    P: Connectivity,
{
    /// Create an aggregator without a driver
    pub fn new(config: &AggregatorConfig, probes: P) -> Result<Self, ConfigError> {
        let compositor = Compositor::new(config.compositor_settings());
        let mut aggregator = Self {
            config: AggregatorConfig {
                brightness: compositor.settings().brightness.brightness(),
                ..*config
            },
            compositor,
            heartbeat: None,
            probes,
        };
        if let Some(led) = config.heartbeat {
            aggregator.enable_heartbeat(led)?;
        }
        Ok(aggregator)
    }

    /// Create an aggregator from a parsed configuration document
    pub fn from_document<const MAPPINGS: usize>(
        document: &ConfigDocument<'_, MAPPINGS>,
        probes: P,
    ) -> Result<Self, ConfigError> {
        let mut aggregator = Self::new(&document.settings(), probes)?;
        for (led, signal_id, color) in document.mappings() {
            aggregator.bind(led, signal_id, color)?;
        }
        Ok(aggregator)
    }

    /// Attach the strip driver
    pub fn attach_driver(&mut self, driver: D) {
        #[cfg(feature = "esp32-log")]
        {
            if driver.size() < self.config.led_count {
                println!(
                    "[Aggregator.attach_driver] strip has {} LEDs, configured for {}",
                    driver.size(),
                    self.config.led_count
                );
            }
        }
        self.compositor.attach_driver(driver);
    }

    pub const fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub const fn compositor(&self) -> &Compositor<D, LEDS, BINDINGS> {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut Compositor<D, LEDS, BINDINGS> {
        &mut self.compositor
    }

    pub const fn heartbeat(&self) -> Option<&Heartbeat> {
        self.heartbeat.as_ref()
    }

    pub const fn probes(&self) -> &P {
        &self.probes
    }

    pub fn probes_mut(&mut self) -> &mut P {
        &mut self.probes
    }

    /// Bind a signal to an LED, color given as `#RRGGBB`
    ///
    /// Malformed color codes bind black.
    pub fn add_led_mapping(
        &mut self,
        led: usize,
        signal_id: &str,
        color: &str,
    ) -> Result<(), ConfigError> {
        self.bind(led, signal_id, parse_hex_color(color))
    }

    /// Bind a signal to an LED using the configured on color
    pub fn add_default_mapping(&mut self, led: usize, signal_id: &str) -> Result<(), ConfigError> {
        self.bind(led, signal_id, self.config.on_color)
    }

    /// Bind a signal to an LED
    ///
    /// Binding the same signal again replaces the color.
    pub fn bind(&mut self, led: usize, signal_id: &str, color: Rgb) -> Result<(), ConfigError> {
        self.check_led(led)?;
        self.compositor.register(led, signal_id, color)?;
        Ok(())
    }

    /// Set the global brightness (0.0-1.0)
    pub fn set_brightness(&mut self, brightness: f32) {
        self.compositor.set_brightness(brightness);
        self.config.brightness = self.compositor.settings().brightness.brightness();
    }

    /// Set the color of unlit LEDs from a `#RRGGBB` code
    pub fn set_off_color(&mut self, color: &str) {
        let color = parse_hex_color(color);
        self.config.off_color = color;
        self.compositor.set_off_color(color);
    }

    pub fn set_force(&mut self, force_all_on: bool) {
        self.config.force_all_on = force_all_on;
        self.compositor.set_force(force_all_on);
    }

    /// Enable the heartbeat on `led`
    ///
    /// Negative values register nothing. A running heartbeat is never
    /// switched off, only moved by a later non-negative index.
    pub fn register_heartbeat(&mut self, led: i32) -> Result<(), ConfigError> {
        match usize::try_from(led) {
            Ok(led) => self.enable_heartbeat(led),
            Err(_) => Ok(()),
        }
    }

    fn enable_heartbeat(&mut self, led: usize) -> Result<(), ConfigError> {
        self.check_led(led)?;
        #[cfg(feature = "esp32-log")]
        println!("[Aggregator.register_heartbeat] heartbeat on LED {}", led);
        self.heartbeat = Some(
            Heartbeat::new(led)
                .with_speed_shift(self.config.heartbeat_speed)
                .with_interval(self.config.heartbeat_interval),
        );
        self.config.heartbeat = Some(led);
        Ok(())
    }

    fn check_led(&self, led: usize) -> Result<(), ConfigError> {
        if led >= self.config.led_count {
            return Err(ConfigError::LedOutOfRange {
                led,
                led_count: self.config.led_count,
            });
        }
        Ok(())
    }

    /// Distinct signal ids a transport must subscribe to
    pub fn subscriptions(&self) -> impl Iterator<Item = &str> {
        self.compositor.store().signal_ids()
    }

    /// Deliver a raw transport state string for a signal
    ///
    /// Returns the number of bindings updated.
    pub fn on_signal_state(&mut self, signal_id: &str, state: &str) -> Result<usize, StoreError> {
        self.set_signal(signal_id, is_active_state(state))
    }

    /// Deliver a normalised state to every binding of a signal
    ///
    /// Each binding keeps the color it was registered with. Unknown signals
    /// are ignored.
    pub fn set_signal(&mut self, signal_id: &str, active: bool) -> Result<usize, StoreError> {
        let targets: Vec<(usize, Rgb), LEDS> = self
            .compositor
            .store()
            .bindings_for(signal_id)
            .map(|(led, binding)| (led, binding.color))
            .collect();

        for &(led, color) in &targets {
            self.compositor.on_state_change(signal_id, led, color, active)?;
        }
        Ok(targets.len())
    }

    /// Apply an intent taken from the queue
    pub fn apply_intent(&mut self, intent: AggregatorIntent) -> Result<(), StoreError> {
        match intent {
            AggregatorIntent::SignalState { signal_id, active } => {
                self.set_signal(&signal_id, active)?;
            }
            AggregatorIntent::Brightness(brightness) => self.set_brightness(brightness),
            AggregatorIntent::OffColor(color) => {
                self.config.off_color = color;
                self.compositor.set_off_color(color);
            }
            AggregatorIntent::Force(force_all_on) => self.set_force(force_all_on),
        }
        Ok(())
    }

    /// Run the heartbeat if it is enabled and due
    ///
    /// Returns `true` when the heartbeat LED was written.
    pub fn heartbeat_tick(&mut self, now: Instant) -> bool {
        let Self {
            compositor,
            heartbeat,
            probes,
            ..
        } = self;
        heartbeat
            .as_mut()
            .is_some_and(|heartbeat| heartbeat.tick(now, &*probes, compositor))
    }

    /// Diagnostics: every binding with its color and current state
    pub fn dump(&self) -> impl Iterator<Item = DumpLine<'_>> {
        self.compositor.store().iter().flat_map(|(led, entry)| {
            entry.bindings().iter().map(move |binding| DumpLine {
                led,
                signal_id: binding.signal_id.as_str(),
                color: binding.color,
                active: binding.active,
            })
        })
    }

    /// Print the mapping table
    #[cfg(feature = "esp32-log")]
    pub fn dump_config(&self) {
        println!("[Aggregator] LED mappings:");
        for line in self.dump() {
            println!("[Aggregator] {}", line);
        }
    }
}
