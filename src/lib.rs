#![no_std]

pub mod aggregator;
pub mod color;
pub mod compositor;
pub mod config;
pub mod error;
pub mod filter;
pub mod heartbeat;
pub mod intent;
pub mod math8;
pub mod scheduler;
pub mod store;
pub mod strip;

pub use aggregator::{Aggregator, DumpLine};
pub use compositor::{Compositor, CompositorSettings};
pub use config::{AggregatorConfig, ConfigDocument, MappingDocument};
pub use error::{ConfigError, StoreError};
pub use filter::{BrightnessFilter, Filter};
pub use heartbeat::Heartbeat;
pub use intent::{AggregatorIntent, IntentQueue, IntentReceiver, IntentSender, QueueFull};
pub use scheduler::{Scheduler, TickResult};
pub use store::{LedEntry, LedStateStore, SignalBinding, SignalId};
pub use strip::SmartLedsStrip;

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// The aggregator is generic over this trait.
pub trait PixelDriver {
    /// Number of LEDs on the strip
    fn size(&self) -> usize;

    /// Set one LED; indices beyond [`PixelDriver::size`] are ignored
    fn set(&mut self, index: usize, color: Rgb);

    /// Request a refresh of the physical strip
    ///
    /// Requests may be coalesced until the next [`PixelDriver::flush`].
    fn schedule_show(&mut self);

    /// Perform a pending refresh
    fn flush(&mut self) {}
}

/// Connectivity probes read by the heartbeat
pub trait Connectivity {
    /// Network link is up
    fn network_connected(&self) -> bool;

    /// Upstream API session is up
    fn api_connected(&self) -> bool;
}
