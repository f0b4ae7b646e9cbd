//! Turning raw file content into the current document and back.

use super::{DocumentHolder, FileFormat, NetCodec, NetShape};
use crate::config::{ConfigPatch, ConfigStore};
use crate::constants::{UNKNOWN_FORMAT_LINES, UNKNOWN_FORMAT_TITLE};
use crate::notifications::NotificationRouter;
use std::sync::Arc;

/// Dispatches file content to the codec and publishes what it produces.
pub struct DocumentLoader<N> {
    holder: Arc<DocumentHolder<N>>,
    config: Arc<ConfigStore>,
    notifier: Arc<NotificationRouter>,
    codec: Arc<dyn NetCodec<N>>,
}

impl<N: NetShape + Send + Sync + 'static> DocumentLoader<N> {
    pub fn new(
        holder: Arc<DocumentHolder<N>>,
        config: Arc<ConfigStore>,
        notifier: Arc<NotificationRouter>,
        codec: Arc<dyn NetCodec<N>>,
    ) -> Self {
        Self {
            holder,
            config,
            notifier,
            codec,
        }
    }

    /// Parse `content` by the extension of `file_name` and make it current.
    ///
    /// Returns the new document revision, or `None` when nothing was loaded.
    pub fn load(&self, file_name: &str, content: &str) -> Option<u64> {
        let Some(format) = FileFormat::from_file_name(file_name) else {
            tracing::warn!("Unsupported file extension: {}", file_name);
            self.notifier
                .info(UNKNOWN_FORMAT_LINES.join("\n"), Some(UNKNOWN_FORMAT_TITLE));
            return None;
        };

        let Some(net) = self.codec.parse(format, content) else {
            tracing::debug!("Codec produced no net for {}", file_name);
            return None;
        };

        // a blank net publishes the empty sentinel, so it does not count as loaded
        self.config
            .update(ConfigPatch::new().data_loaded(!net.is_blank()).dirty(false));
        let revision = self.holder.replace(net);
        tracing::info!(revision, %format, "Loaded {}", file_name);
        Some(revision)
    }

    /// Serialize the current net; `None` for the empty document.
    pub fn export(&self, format: FileFormat) -> Option<String> {
        let document = self.holder.current();
        let net = document.net()?;
        let pretty = self.config.current().export_pretty;
        let output = self.codec.write(format, net, pretty);
        if output.is_some() {
            self.config.update(ConfigPatch::new().dirty(false));
        }
        output
    }

    /// Serialize the current net in the configured default format.
    pub fn export_default(&self) -> Option<String> {
        self.export(self.config.current().default_export_format)
    }
}
