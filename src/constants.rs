//! Application-wide constants.
//!
//! Centralizes default values and fixed strings so the stores, the router
//! and the tests agree on them.

// ============================================================================
// Document
// ============================================================================

/// Revision of a freshly created document holder
pub const INITIAL_REVISION: u64 = 1;

// ============================================================================
// Simulation Defaults
// ============================================================================

/// Delay between automatic firing steps in milliseconds
pub const DEFAULT_AUTORUN_DELAY_MS: u32 = 500;

/// Maximum number of firings kept in the trace
pub const DEFAULT_MAX_TRACE_LEN: u32 = 1000;

/// Firing steps that can be undone
pub const DEFAULT_UNDO_STEPS: u16 = 50;

// ============================================================================
// Editor & Display Defaults
// ============================================================================

/// Grid spacing in canvas units
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Default zoom level in percent
pub const DEFAULT_ZOOM_PERCENT: u16 = 100;

/// Default animation speed in percent
pub const DEFAULT_ANIMATION_SPEED_PERCENT: u16 = 100;

// ============================================================================
// Notifications
// ============================================================================

/// How long an info/success toast stays visible
pub const DEFAULT_TOAST_DURATION_MS: u32 = 3000;

/// How long a warning toast stays visible
pub const WARNING_TOAST_DURATION_MS: u32 = 4000;

/// How long an error toast stays visible
pub const DEFAULT_ERROR_TOAST_DURATION_MS: u32 = 5000;

/// Error code routed when a file cannot be read
pub const FILE_READ_ERROR_CODE: &str = "FILE_READ";

/// Shown when a file has an extension no codec understands
pub const UNKNOWN_FORMAT_LINES: [&str; 4] = [
    "This file type is not supported.",
    "Valid extensions are:",
    ".json, .pnml (net description)",
    ".sav, .txt (saved session, plain text)",
];

/// Title of the unknown-format info dialog
pub const UNKNOWN_FORMAT_TITLE: &str = "Unsupported file";

// ============================================================================
// Onboarding
// ============================================================================

/// Expiry marker meaning the tutorial log lasts for this session only
pub const SESSION_EXPIRY_MARKER: &str = "expires=session";

/// Tag recorded once the introductory tutorial has been shown
pub const INTRO_TUTORIAL_TAG: &str = "intro";

// ============================================================================
// Settings
// ============================================================================

/// Directory under the platform config dir holding the settings file
pub const SETTINGS_DIR_NAME: &str = "petriboard";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";
