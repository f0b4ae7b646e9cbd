//! File formats understood by the external net codecs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Format tag handed to the codec together with raw file content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Json,
    Pnml,
    /// Saved simulator session
    Sav,
    Txt,
}

impl FileFormat {
    pub const ALL: [FileFormat; 4] = [
        FileFormat::Json,
        FileFormat::Pnml,
        FileFormat::Sav,
        FileFormat::Txt,
    ];

    /// Match a bare extension, case-insensitively and with or without a dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Pnml => "pnml",
            FileFormat::Sav => "sav",
            FileFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The parser/writer collaborator.
///
/// Parse and write failures are reported by the codec itself; the core only
/// sees that nothing was produced.
pub trait NetCodec<N>: Send + Sync {
    fn parse(&self, format: FileFormat, content: &str) -> Option<N>;

    fn write(&self, format: FileFormat, net: &N, pretty: bool) -> Option<String>;
}
