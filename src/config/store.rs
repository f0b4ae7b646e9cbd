//! The configuration store.

use super::record::{Config, ConfigPatch};
use crate::stream::{Feed, ReplayStream};
use std::sync::Arc;

/// Owns the process-wide configuration record.
///
/// One store is created by the process root and handed to every consumer.
pub struct ConfigStore {
    records: ReplayStream<Arc<Config>>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ConfigStore {
    pub fn new(initial: Config) -> Self {
        Self {
            records: ReplayStream::new(Arc::new(initial)),
        }
    }

    /// The latest record. Earlier snapshots stay valid and unchanged.
    pub fn current(&self) -> Arc<Config> {
        self.records.latest()
    }

    /// Every record from now on, starting with the current one.
    pub fn stream(&self) -> Feed<Arc<Config>> {
        self.records.feed()
    }

    /// Merge `patch` over the current record and publish the result.
    ///
    /// Contradictory combinations are stored as given.
    pub fn update(&self, patch: ConfigPatch) {
        tracing::debug!(fields = ?patch.changed_fields(), "config update");
        self.records
            .update(|current| Arc::new(current.merged(&patch)));
    }

    /// Run `f` after every queued record has reached every subscriber.
    pub fn after_dispatch(&self, f: impl FnOnce() + Send + 'static) {
        self.records.after_dispatch(f);
    }

    /// Replace the whole record and publish it.
    pub fn replace(&self, config: Config) {
        tracing::debug!("config replaced");
        self.records.publish(Arc::new(config));
    }
}
