use core::fmt;

/// Capacity and key errors from the LED state store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// No room for another LED index
    LedTableFull,
    /// No room for another binding on this LED
    BindingsFull(usize),
    /// Signal id longer than [`crate::store::SIGNAL_ID_LEN`]
    SignalIdTooLong,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LedTableFull => write!(f, "LED table is full"),
            Self::BindingsFull(led) => write!(f, "LED {} has no free binding slots", led),
            Self::SignalIdTooLong => write!(f, "signal id is too long"),
        }
    }
}

/// Errors raised while applying configuration
#[derive(Debug)]
pub enum ConfigError {
    /// LED index beyond the strip
    LedOutOfRange { led: usize, led_count: usize },
    /// Store rejected the mapping
    Store(StoreError),
    /// Configuration document is not valid JSON for the expected shape
    Parse(serde_json_core::de::Error),
}

impl From<StoreError> for ConfigError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<serde_json_core::de::Error> for ConfigError {
    fn from(err: serde_json_core::de::Error) -> Self {
        Self::Parse(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LedOutOfRange { led, led_count } => {
                write!(f, "LED {} is out of range (strip has {} LEDs)", led, led_count)
            }
            Self::Store(err) => write!(f, "{}", err),
            Self::Parse(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}
