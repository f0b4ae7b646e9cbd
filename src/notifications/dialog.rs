//! Dialog requests, their one-shot replies, and the presentation seams.

use futures::channel::oneshot;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Confirm,
    Error,
    Info,
    Note,
    Question,
}

/// Everything a modal needs to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: Option<String>,
    pub message: String,
    /// Error code, for [`DialogKind::Error`]
    pub code: Option<String>,
    /// What the user can do about an error
    pub advice: Option<String>,
}

impl Dialog {
    pub fn new(kind: DialogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            message: message.into(),
            code: None,
            advice: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = title.map(str::to_string);
        self
    }
}

/// Modal dialog surface.
///
/// The host shows `dialog` and settles `responder` exactly once when the
/// dialog closes. Dropping the responder counts as a dismissal.
pub trait DialogHost: Send + Sync {
    fn open(&self, dialog: Dialog, responder: Responder);
}

/// Blocking browser-style popups.
pub trait NativePopup: Send + Sync {
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);
}

/// Settles the [`Reply`] of one dialog invocation.
#[derive(Debug)]
pub struct Responder {
    tx: oneshot::Sender<bool>,
}

impl Responder {
    /// A responder and the reply it settles.
    pub fn pair() -> (Responder, Reply) {
        let (tx, rx) = oneshot::channel();
        (Responder { tx }, Reply::waiting(rx))
    }

    pub fn resolve(self, choice: bool) {
        // the caller may have dropped the reply; nobody is left to tell
        let _ = self.tx.send(choice);
    }

    /// Closed without an explicit choice.
    pub fn dismiss(self) {
        drop(self);
    }
}

#[derive(Debug)]
enum ReplyState {
    Ready(bool),
    Waiting(oneshot::Receiver<bool>),
}

/// Outcome of a confirmation or question, whatever channel served it.
///
/// Resolves to `false` when the dialog is dismissed without a choice.
#[derive(Debug)]
#[must_use = "a Reply carries the user's choice"]
pub struct Reply {
    state: ReplyState,
}

impl Reply {
    /// Already settled; no suspension needed.
    pub fn ready(choice: bool) -> Self {
        Self {
            state: ReplyState::Ready(choice),
        }
    }

    fn waiting(rx: oneshot::Receiver<bool>) -> Self {
        Self {
            state: ReplyState::Waiting(rx),
        }
    }

    /// The choice, if it has been made.
    pub fn try_result(&mut self) -> Option<bool> {
        match &mut self.state {
            ReplyState::Ready(choice) => Some(*choice),
            ReplyState::Waiting(rx) => {
                let choice = match rx.try_recv() {
                    Ok(Some(choice)) => choice,
                    Ok(None) => return None,
                    Err(oneshot::Canceled) => false,
                };
                self.state = ReplyState::Ready(choice);
                Some(choice)
            }
        }
    }

    pub fn is_ready(&mut self) -> bool {
        self.try_result().is_some()
    }
}

impl Future for Reply {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        let choice = match &mut self.state {
            ReplyState::Ready(choice) => return Poll::Ready(*choice),
            ReplyState::Waiting(rx) => match Pin::new(rx).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(result) => result.unwrap_or(false),
            },
        };
        self.state = ReplyState::Ready(choice);
        Poll::Ready(choice)
    }
}
