//! Core logic for filterable chip lists.
//! Owns filtering, the displayed/selected collections and change propagation;
//! rendering stays with the presentation layer.

pub mod config;
pub mod controller;
pub mod filter;
pub mod logging;
pub mod model;
pub mod observer;
pub mod store;

pub use config::CoreConfig;
pub use controller::list_controller::ListController;
pub use filter::chip_filter::{chip_matches, filter_chips, normalize_constraint, strip_whitespace};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::chip::{Chip, ChipAvatar, ChipId, ChipValidationError};
pub use observer::{ChipChangeObserver, ChipSelectionListener, ObserverId};
pub use store::chip_store::{ChipStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
