//! MCQ view: activates the answer view against a platform bridge and keeps
//! its state in sync with lifecycle events, the screenshot list and the
//! result cache.
mod platform;

pub use platform::config::{load_config, read_config, ConfigError, ViewConfig};
pub use platform::logging::{initialize as initialize_logging, LogDestination};
pub use platform::shell::{ContentSurface, ManualSurface, RecordingShell, ResizeCallback, ViewShell};
pub use platform::{activate, ActiveView, ViewDeps};
