//! Notifications: routed dialogs, popups and toasts.
//!
//! Collaborators never pick a presentation themselves. They call the
//! [`NotificationRouter`], which reads the configured channel for the event
//! type and hands the message to exactly one of:
//!
//! - a modal dialog via [`DialogHost`],
//! - a blocking popup via [`NativePopup`],
//! - the [`ToastQueue`], rendered by an external view.
//!
//! Toasts leave the queue through [`ToastQueue::expire_due`] on a host tick,
//! or on their own while an [`Expirations`] stream is polled.

mod dialog;
mod expiry;
mod router;
mod toast;

pub use dialog::*;
pub use expiry::Expirations;
pub use router::*;
pub use toast::*;
