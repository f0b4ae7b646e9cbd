//! The configuration record and its partial update type.

use super::error::{ConfigError, ConfigResult};
use crate::constants::*;
use crate::document::FileFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Channel & Mode Enums
// ============================================================================

/// Where confirmation requests are shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmChannel {
    #[default]
    Dialog,
    Popup,
    /// Confirm everything without asking
    None,
}

/// Where errors are shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorChannel {
    #[default]
    Dialog,
    Popup,
    Toast,
}

/// Where informational messages are shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoChannel {
    #[default]
    Dialog,
    Popup,
    Toast,
    None,
}

/// Which transient surface toasts are rendered on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastTarget {
    #[default]
    Toast,
    Panel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FiringMode {
    /// One enabled transition per step
    #[default]
    Step,
    /// A maximal set of concurrently enabled transitions per step
    Maximal,
    Random,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Select,
    Place,
    Transition,
    Arc,
    Erase,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Free,
    Force,
    Grid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

// ============================================================================
// Record Definition
// ============================================================================

/// Declares [`Config`], its partial counterpart [`ConfigPatch`] and the merge
/// between them from one field list. Every field type must be `Copy`.
macro_rules! config_record {
    ($( $(#[$meta:meta])* $field:ident : $ty:ty = $default:expr ),+ $(,)?) => {
        /// Snapshot of every configuration field.
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct Config {
            $( $(#[$meta])* pub $field: $ty, )+
        }

        impl Default for Config {
            fn default() -> Self {
                Self { $( $field: $default, )+ }
            }
        }

        /// A partial record; `None` fields keep their current value on merge.
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct ConfigPatch {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )+
        }

        impl ConfigPatch {
            $(
                #[must_use]
                pub fn $field(mut self, value: $ty) -> Self {
                    self.$field = Some(value);
                    self
                }
            )+

            /// Names of the fields this patch sets, in declaration order.
            pub fn changed_fields(&self) -> Vec<&'static str> {
                let mut fields = Vec::new();
                $( if self.$field.is_some() { fields.push(stringify!($field)); } )+
                fields
            }

            pub fn is_empty(&self) -> bool {
                $( self.$field.is_none() )&&+
            }
        }

        impl Config {
            /// Every field name, in declaration order.
            pub const FIELDS: &'static [&'static str] = &[ $( stringify!($field) ),+ ];

            /// A new record with `patch` applied over `self`.
            pub fn merged(&self, patch: &ConfigPatch) -> Self {
                Self { $( $field: patch.$field.unwrap_or(self.$field), )+ }
            }
        }
    };
}

config_record! {
    // session
    /// A net is loaded in the document holder
    data_loaded: bool = false,
    /// The loaded net has unexported edits
    dirty: bool = false,
    tutorial_on_start: bool = true,

    // simulation
    /// Fire enabled transitions automatically
    autorun_exec: bool = false,
    autorun_delay_ms: u32 = DEFAULT_AUTORUN_DELAY_MS,
    firing_mode: FiringMode = FiringMode::Step,
    record_trace: bool = true,
    max_trace_len: u32 = DEFAULT_MAX_TRACE_LEN,
    /// Highlight enabled transitions
    highlight_enabled: bool = true,
    show_reachability: bool = false,
    undo_steps: u16 = DEFAULT_UNDO_STEPS,

    // editor
    edit_mode: EditMode = EditMode::Select,
    /// Ask before deleting the loaded net
    confirm_delete: bool = true,
    snap_to_grid: bool = true,
    grid_size: u16 = DEFAULT_GRID_SIZE,
    layout_mode: LayoutMode = LayoutMode::Free,
    force_layout_on_load: bool = true,
    focus_on_load: bool = true,

    // display
    theme: Theme = Theme::System,
    show_place_labels: bool = true,
    show_transition_labels: bool = true,
    show_arc_weights: bool = true,
    show_ids: bool = false,
    /// Draw tokens as dots; exclusive with `token_numbers` by convention only
    token_dots: bool = true,
    token_numbers: bool = false,
    show_grid: bool = true,
    show_legend: bool = false,
    show_status_bar: bool = true,
    side_panel_open: bool = true,
    menu_compact: bool = false,
    zoom_percent: u16 = DEFAULT_ZOOM_PERCENT,
    animation_speed_percent: u16 = DEFAULT_ANIMATION_SPEED_PERCENT,

    // notifications
    notify_confirm: ConfirmChannel = ConfirmChannel::Dialog,
    notify_error: ErrorChannel = ErrorChannel::Dialog,
    notify_info: InfoChannel = InfoChannel::Dialog,
    toast_target: ToastTarget = ToastTarget::Toast,
    toast_duration_ms: u32 = DEFAULT_TOAST_DURATION_MS,
    error_toast_duration_ms: u32 = DEFAULT_ERROR_TOAST_DURATION_MS,
    warn_on_unsaved: bool = true,

    // files
    default_export_format: FileFormat = FileFormat::Json,
    export_pretty: bool = true,
}

// ============================================================================
// Seeding
// ============================================================================

impl Config {
    /// Parse a record from camelCase JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a record from a settings file.
    ///
    /// Seeding only: the file is read once and never written or watched.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.filter(|p| p.exists()) else {
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(config) => {
                tracing::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Falling back to default settings: {}", e);
                Self::default()
            }
        }
    }
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a partial record from camelCase JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Default location of the settings file, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}
