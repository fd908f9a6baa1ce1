//! Compositor
//!
//! Owns the LED state store, the global output settings and the (optional)
//! strip driver. Every write goes through the brightness filter; the first
//! resolved write blanks the whole strip once.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PixelDriver;
use crate::color::{BLACK, Rgb};
use crate::error::StoreError;
use crate::filter::BrightnessFilter;
use crate::store::LedStateStore;

/// Process-wide output settings
#[derive(Debug, Clone, Copy)]
pub struct CompositorSettings {
    /// Global brightness
    pub brightness: BrightnessFilter,
    /// Color of LEDs without an active binding
    pub off_color: Rgb,
    /// Treat every binding as active
    pub force_all_on: bool,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            brightness: BrightnessFilter::default(),
            off_color: BLACK,
            force_all_on: false,
        }
    }
}

/// Resolves LED colors and pushes them to the strip
pub struct Compositor<D, const LEDS: usize, const BINDINGS: usize> {
    driver: Option<D>,
    store: LedStateStore<LEDS, BINDINGS>,
    settings: CompositorSettings,
    /// Set after the one-time strip blank-out
    strip_cleared: bool,
}

impl<D: PixelDriver, const LEDS: usize, const BINDINGS: usize> Compositor<D, LEDS, BINDINGS> {
    /// Create a compositor without a driver
    ///
    /// State changes are recorded but nothing is written until
    /// [`Compositor::attach_driver`] is called.
    pub const fn new(settings: CompositorSettings) -> Self {
        Self {
            driver: None,
            store: LedStateStore::new(),
            settings,
            strip_cleared: false,
        }
    }

    /// Attach the strip driver
    pub fn attach_driver(&mut self, driver: D) {
        self.driver = Some(driver);
    }

    pub fn driver(&self) -> Option<&D> {
        self.driver.as_ref()
    }

    pub fn driver_mut(&mut self) -> Option<&mut D> {
        self.driver.as_mut()
    }

    pub fn store(&self) -> &LedStateStore<LEDS, BINDINGS> {
        &self.store
    }

    pub const fn settings(&self) -> &CompositorSettings {
        &self.settings
    }

    /// Bind a signal to an LED with its state reset to inactive
    pub fn register(&mut self, led: usize, signal_id: &str, color: Rgb) -> Result<(), StoreError> {
        self.store.upsert(led, signal_id, color, false)
    }

    /// Record a signal state and redraw its LED
    pub fn on_state_change(
        &mut self,
        signal_id: &str,
        led: usize,
        color: Rgb,
        active: bool,
    ) -> Result<(), StoreError> {
        self.store.upsert(led, signal_id, color, active)?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[Compositor.on_state_change] LED {} <- {} ({})",
            led,
            signal_id,
            if active { "on" } else { "off" }
        );

        let color = self.store.resolve(
            led,
            self.settings.off_color,
            self.settings.force_all_on,
        );
        let Self {
            driver,
            settings,
            strip_cleared,
            ..
        } = self;
        if let Some(driver) = driver {
            write_led(driver, strip_cleared, settings, led, color);
            driver.schedule_show();
        }
        Ok(())
    }

    /// Apply the global brightness to a color
    pub const fn apply_brightness(&self, color: Rgb) -> Rgb {
        self.settings.brightness.scale(color)
    }

    /// Rewrite every configured LED from its first binding
    ///
    /// Only the first binding's last state is looked at: it shows its color
    /// when active (or forced) and the off color otherwise. LEDs without
    /// bindings are left untouched.
    pub fn redraw_all(&mut self) {
        let Self {
            driver,
            store,
            settings,
            strip_cleared,
        } = self;
        let Some(driver) = driver else {
            return;
        };

        let mut written = false;
        for (led, entry) in store.iter() {
            if let Some(color) = entry.resolve_first(settings.off_color, settings.force_all_on) {
                write_led(driver, strip_cleared, settings, led, color);
                written = true;
            }
        }
        if written {
            driver.schedule_show();
        }
    }

    /// Write a color straight to an LED, bypassing the store
    ///
    /// Used by the heartbeat. Still scaled by brightness.
    pub fn write_pixel(&mut self, led: usize, color: Rgb) {
        let color = self.apply_brightness(color);
        if let Some(driver) = &mut self.driver {
            set_checked(driver, led, color);
            driver.schedule_show();
        }
    }

    /// Set the global brightness (0.0-1.0) and redraw
    pub fn set_brightness(&mut self, brightness: f32) {
        self.settings.brightness = BrightnessFilter::new(brightness);
        self.redraw_all();
    }

    /// Set the color of unlit LEDs and redraw
    pub fn set_off_color(&mut self, color: Rgb) {
        self.settings.off_color = color;
        self.redraw_all();
    }

    /// Force every binding on (or back to its state) and redraw
    pub fn set_force(&mut self, force_all_on: bool) {
        self.settings.force_all_on = force_all_on;
        self.redraw_all();
    }
}

/// Blank the strip on first use, then write a brightness-scaled color
fn write_led<D: PixelDriver>(
    driver: &mut D,
    strip_cleared: &mut bool,
    settings: &CompositorSettings,
    led: usize,
    color: Rgb,
) {
    if !*strip_cleared {
        for index in 0..driver.size() {
            driver.set(index, BLACK);
        }
        *strip_cleared = true;
    }
    set_checked(driver, led, settings.brightness.scale(color));
}

fn set_checked<D: PixelDriver>(driver: &mut D, led: usize, color: Rgb) {
    if led < driver.size() {
        driver.set(led, color);
    } else {
        #[cfg(feature = "esp32-log")]
        println!(
            "[Compositor] LED {} is beyond the strip ({}), skipping",
            led,
            driver.size()
        );
    }
}
