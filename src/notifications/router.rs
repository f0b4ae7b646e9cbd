//! Channel-routed notifications.

use super::dialog::{Dialog, DialogHost, DialogKind, NativePopup, Reply, Responder};
use super::toast::{Severity, ToastEntry, ToastQueue};
use crate::config::{ConfigStore, ConfirmChannel, ErrorChannel, InfoChannel};
use std::sync::Arc;
use std::time::Duration;

/// Sends each logical event to exactly one presentation channel.
///
/// The channel is read from the configuration on every call, so a
/// configuration change applies to the very next notification.
pub struct NotificationRouter {
    config: Arc<ConfigStore>,
    toasts: Arc<ToastQueue>,
    dialogs: Arc<dyn DialogHost>,
    popups: Arc<dyn NativePopup>,
}

impl NotificationRouter {
    pub fn new(
        config: Arc<ConfigStore>,
        toasts: Arc<ToastQueue>,
        dialogs: Arc<dyn DialogHost>,
        popups: Arc<dyn NativePopup>,
    ) -> Self {
        Self {
            config,
            toasts,
            dialogs,
            popups,
        }
    }

    /// Ask the user to confirm. Every channel yields the same [`Reply`] shape.
    pub fn confirm(&self, message: impl Into<String>, title: Option<&str>) -> Reply {
        let message = message.into();
        match self.config.current().notify_confirm {
            ConfirmChannel::Dialog => {
                self.open(Dialog::new(DialogKind::Confirm, message).with_title(title))
            }
            ConfirmChannel::Popup => Reply::ready(self.popups.confirm(&message)),
            ConfirmChannel::None => {
                tracing::debug!("auto-confirmed: {}", message);
                Reply::ready(true)
            }
        }
    }

    pub fn error(&self, code: &str, message: impl Into<String>, advice: Option<&str>) {
        let message = message.into();
        tracing::warn!(code, "{}", message);
        let config = self.config.current();
        match config.notify_error {
            ErrorChannel::Dialog => {
                let mut dialog = Dialog::new(DialogKind::Error, message);
                dialog.code = Some(code.to_string());
                dialog.advice = advice.map(str::to_string);
                self.present(dialog);
            }
            ErrorChannel::Popup => {
                let mut text = format!("Error {code}: {message}");
                if let Some(advice) = advice {
                    text.push_str("\n\n");
                    text.push_str(advice);
                }
                self.popups.alert(&text);
            }
            ErrorChannel::Toast => {
                let mut entry = ToastEntry::new(
                    Severity::Error,
                    vec![format!("Error {code}"), message],
                )
                .on(config.toast_target)
                .with_duration(millis(config.error_toast_duration_ms));
                if let Some(advice) = advice {
                    entry = entry.with_line(advice);
                }
                self.toasts.push(entry);
            }
        }
    }

    /// Routed like errors and confirmations; `none` drops the message.
    pub fn info(&self, message: impl Into<String>, title: Option<&str>) {
        let message = message.into();
        let config = self.config.current();
        match config.notify_info {
            InfoChannel::Dialog => {
                self.present(Dialog::new(DialogKind::Info, message).with_title(title));
            }
            InfoChannel::Popup => {
                let text = match title {
                    Some(title) => format!("{title}\n\n{message}"),
                    None => message,
                };
                self.popups.alert(&text);
            }
            InfoChannel::Toast => {
                let lines = title
                    .map(str::to_string)
                    .into_iter()
                    .chain(message.lines().map(str::to_string))
                    .collect();
                let entry = ToastEntry::new(Severity::Info, lines)
                    .on(config.toast_target)
                    .with_duration(millis(config.toast_duration_ms));
                self.toasts.push(entry);
            }
            InfoChannel::None => {
                tracing::debug!("info suppressed: {}", message);
            }
        }
    }

    /// Show a note; always a dialog.
    pub fn note(&self, message: impl Into<String>, title: Option<&str>) {
        self.present(Dialog::new(DialogKind::Note, message).with_title(title));
    }

    /// Ask a yes/no question; always a dialog.
    pub fn question(&self, message: impl Into<String>, title: Option<&str>) -> Reply {
        self.open(Dialog::new(DialogKind::Question, message).with_title(title))
    }

    fn open(&self, dialog: Dialog) -> Reply {
        let (responder, reply) = Responder::pair();
        self.dialogs.open(dialog, responder);
        reply
    }

    /// Open a dialog whose choice nobody waits for.
    fn present(&self, dialog: Dialog) {
        let _ = self.open(dialog);
    }
}

fn millis(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}
