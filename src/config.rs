//! Store configuration
//!
//! Nothing here is persisted; the CLI builds a config from its flags and
//! library users construct one directly.

/// Highest zlib compression level
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// zlib's own default level
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Tunables for an [`ObjectStore`](crate::ObjectStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// zlib level, 0 (store) to 9 (best)
    pub compression_level: u32,

    /// fsync each object before it is published
    pub fsync: bool,

    /// Re-hash the frame on read when a full-length id was supplied
    pub verify_on_read: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            fsync: false,
            verify_on_read: true,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Levels above 9 are clamped
    pub fn compression_level(mut self, level: u32) -> Self {
        self.config.compression_level = level.min(MAX_COMPRESSION_LEVEL);
        self
    }

    pub fn fsync(mut self, fsync: bool) -> Self {
        self.config.fsync = fsync;
        self
    }

    pub fn verify_on_read(mut self, verify: bool) -> Self {
        self.config.verify_on_read = verify;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}
