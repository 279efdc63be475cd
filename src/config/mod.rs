//! Configuration and settings for Cycledash.

mod settings;

pub use settings::{resolve_data_path, DATA_PATH_ENV, EVENT_POLL_MS};
