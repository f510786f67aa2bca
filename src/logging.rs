//! Logging utilities for ai-stats
//!
//! Re-exports tracing macros with log_* naming convention for consistency.
//! The library never installs a subscriber; applications choose their own.

pub use tracing::{debug as log_debug, error as log_error, warn as log_warn};
