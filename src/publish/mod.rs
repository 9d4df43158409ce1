//! Optional conversion and upload of an exported report
//!
//! pandoc turns the Markdown into DOCX or PDF, rclone copies the result (and
//! any template documents) into a Google Drive folder.

mod pandoc;
mod rclone;
mod tools;

pub use pandoc::convert;
pub use rclone::{create_drive_remote, remote_exists, run_config_wizard, Drive};
pub use tools::tool_available;

/// Document format sent to Drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadFormat {
    /// Imported by Drive as a native document
    #[default]
    Docx,
    Pdf,
}

impl UploadFormat {
    /// Case-insensitive; anything unrecognized means DOCX
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pdf" => UploadFormat::Pdf,
            _ => UploadFormat::Docx,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            UploadFormat::Docx => "docx",
            UploadFormat::Pdf => "pdf",
        }
    }

    /// Name of the uploaded file for a document titled `title`
    pub fn destination(self, title: &str) -> String {
        match self {
            UploadFormat::Docx => title.to_string(),
            UploadFormat::Pdf => format!("{}.pdf", title),
        }
    }

    /// Value for rclone's `--drive-import-formats`
    pub fn import_format(self) -> Option<&'static str> {
        match self {
            UploadFormat::Docx => Some("docx"),
            UploadFormat::Pdf => None,
        }
    }
}

/// A template document to copy next to the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub file_id: String,
}

/// Templates with a non-blank id, in hub, cover, review order
pub fn templates(hub: Option<&str>, cover: Option<&str>, review: Option<&str>) -> Vec<Template> {
    [("Hub", hub), ("Cover", cover), ("Review", review)]
        .into_iter()
        .filter_map(|(name, id)| {
            id.map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| Template {
                    name,
                    file_id: id.to_string(),
                })
        })
        .collect()
}
