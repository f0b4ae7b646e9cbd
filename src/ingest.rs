//! One-shot asynchronous file reading.
//!
//! [`IngestChannel::read_file`] reads on a background thread and hands back
//! an [`Ingest`] stream that yields the file content once, or nothing if the
//! read failed. Failures are routed through the [`NotificationRouter`] with
//! the fixed [`FILE_READ_ERROR_CODE`] from the thread polling the stream;
//! they never reach the consumer.

use crate::constants::FILE_READ_ERROR_CODE;
use crate::notifications::NotificationRouter;
use futures::Stream;
use futures::channel::oneshot;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;

/// A readable file handed over by the host.
pub trait FileHandle: Send + 'static {
    /// Name shown to the user and used to pick the file format.
    fn name(&self) -> String;

    fn read_to_string(&self) -> std::io::Result<String>;
}

impl FileHandle for PathBuf {
    fn name(&self) -> String {
        self.file_name()
            .and_then(|n| n.to_str())
            .map_or_else(|| self.display().to_string(), str::to_string)
    }

    fn read_to_string(&self) -> std::io::Result<String> {
        std::fs::read_to_string(self)
    }
}

/// Why a read produced nothing
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("could not read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not start reader for {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    fn advice(&self) -> &'static str {
        match self {
            IngestError::Read { .. } => "Check that the file exists and is readable.",
            IngestError::Spawn { .. } => "Try opening the file again.",
        }
    }
}

/// Reads files for the document loader.
#[derive(Clone)]
pub struct IngestChannel {
    notifier: Arc<NotificationRouter>,
}

impl IngestChannel {
    pub fn new(notifier: Arc<NotificationRouter>) -> Self {
        Self { notifier }
    }

    /// Start reading `handle`. No retry is attempted.
    pub fn read_file(&self, handle: impl FileHandle) -> Ingest {
        let name = handle.name();
        let (tx, rx) = oneshot::channel();
        let worker_name = name.clone();

        let spawned = std::thread::Builder::new()
            .name("petriboard-ingest".into())
            .spawn(move || {
                let result = handle.read_to_string().map_err(|source| IngestError::Read {
                    name: worker_name.clone(),
                    source,
                });
                if let Ok(content) = &result {
                    tracing::debug!(bytes = content.len(), "read {}", worker_name);
                }
                // receiver gone means the consumer lost interest
                let _ = tx.send(result);
            });

        if let Err(source) = spawned {
            let error = IngestError::Spawn {
                name: name.clone(),
                source,
            };
            tracing::error!("{}", error);
            report(&self.notifier, &error);
        }

        Ingest {
            name,
            notifier: Arc::clone(&self.notifier),
            rx: Some(rx),
        }
    }
}

fn report(notifier: &NotificationRouter, error: &IngestError) {
    notifier.error(FILE_READ_ERROR_CODE, error.to_string(), Some(error.advice()));
}

/// Single-shot stream of one file's content.
///
/// Dropping it before the content arrives discards the content, and a read
/// error along with it.
#[must_use = "an Ingest yields nothing unless polled"]
pub struct Ingest {
    name: String,
    notifier: Arc<NotificationRouter>,
    rx: Option<oneshot::Receiver<Result<String, IngestError>>>,
}

impl Ingest {
    /// Name of the file being read.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Stream for Ingest {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        let Some(rx) = self.rx.as_mut() else {
            return Poll::Ready(None);
        };
        match Pin::new(rx).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(Ok(content))) => {
                self.rx = None;
                Poll::Ready(Some(content))
            }
            Poll::Ready(Ok(Err(error))) => {
                self.rx = None;
                tracing::error!("{}", error);
                report(&self.notifier, &error);
                Poll::Ready(None)
            }
            // reader never started; already reported by read_file
            Poll::Ready(Err(oneshot::Canceled)) => {
                self.rx = None;
                Poll::Ready(None)
            }
        }
    }
}
