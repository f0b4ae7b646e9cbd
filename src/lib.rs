//! Petriboard - state distribution core of a Petri-net editor/simulator.
//!
//! The crate owns the process-wide shared state and the notification routing
//! that every view of the editor depends on:
//!
//! - [`config::ConfigStore`] - the configuration record as a replay-latest stream
//! - [`document::DocumentHolder`] - the current net with a revision counter
//! - [`notifications::NotificationRouter`] - errors, infos and confirmations
//!   routed to a dialog, popup or toast by live configuration
//! - [`notifications::ToastQueue`] - transient messages with per-entry expiry
//! - [`ingest::IngestChannel`] - one-shot file reads
//!
//! [`app::Petriboard`] constructs one instance of each and wires them
//! together. The net model, codecs, canvas and views are supplied by the host
//! through the traits in [`document`], [`notifications`] and [`app`].

pub mod app;
pub mod config;
pub mod constants;
pub mod document;
pub mod ingest;
pub mod notifications;
pub mod onboarding;
pub mod stream;
pub mod telemetry;

pub use app::Petriboard;
