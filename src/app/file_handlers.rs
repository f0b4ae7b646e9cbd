//! File handling - opening, exporting and deleting the current net.

use super::Petriboard;
use crate::document::{FileFormat, NetShape};
use crate::ingest::FileHandle;
use futures::StreamExt;

impl<N: NetShape + Send + Sync + 'static> Petriboard<N> {
    /// Read `handle` and make its net current.
    ///
    /// Returns the new revision, or `None` if nothing was loaded. Read and
    /// format errors have already been routed to the user.
    pub async fn open_file(&self, handle: impl FileHandle) -> Option<u64> {
        let mut ingest = self.ingest.read_file(handle);
        let content = ingest.next().await?;
        let revision = self.loader.load(ingest.name(), &content)?;
        self.after_load();
        Some(revision)
    }

    /// Load content the host already has in memory.
    pub fn open_content(&self, file_name: &str, content: &str) -> Option<u64> {
        let revision = self.loader.load(file_name, content)?;
        self.after_load();
        Some(revision)
    }

    fn after_load(&self) {
        let Some(canvas) = self.canvas() else {
            return;
        };
        let config = self.config.current();
        if config.force_layout_on_load {
            canvas.force_layout();
        }
        if config.focus_on_load {
            canvas.focus_view_box();
        }
    }

    /// Clear the current net, asking first when `confirm_delete` is set.
    pub async fn delete_document(&self) -> bool {
        if self.document.current().is_empty() {
            return false;
        }
        if self.config.current().confirm_delete {
            let confirmed = self
                .notifier
                .confirm("Delete the current net?", Some("Delete net"))
                .await;
            if !confirmed {
                tracing::debug!("delete cancelled");
                return false;
            }
        }
        self.document.clear();
        true
    }

    pub fn export(&self, format: FileFormat) -> Option<String> {
        self.loader.export(format)
    }
}
