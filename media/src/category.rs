use serde::{Deserialize, Serialize};
use std::fmt;

/// Content category a declared file type resolves to.
///
/// Uploads are only accepted when the declared type maps onto one of these
/// categories; everything else is rejected before any network call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Document,
    Spreadsheet,
    Archive,
    Image,
    Video,
}

impl MediaCategory {
    /// Resolves a declared type to its category.
    ///
    /// Accepts a bare extension (`pdf`), a filename (`week1.pdf`), or a MIME
    /// style token (`application/pdf`); only the final segment is matched,
    /// case-insensitively. Returns `None` for anything off the allow-list.
    pub fn from_declared(declared: &str) -> Option<Self> {
        let token = declared
            .rsplit(['/', '.'])
            .next()
            .unwrap_or(declared)
            .trim()
            .to_ascii_lowercase();

        match token.as_str() {
            "pdf" | "docx" | "txt" | "sql" => Some(Self::Document),
            "csv" | "xlsx" => Some(Self::Spreadsheet),
            "zip" => Some(Self::Archive),
            "jpg" | "jpeg" | "png" => Some(Self::Image),
            "mp4" => Some(Self::Video),
            _ => None,
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Archive => "archive",
            Self::Image => "image",
            Self::Video => "video",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::MediaCategory;

    #[test]
    fn resolves_bare_extensions() {
        assert_eq!(
            MediaCategory::from_declared("pdf"),
            Some(MediaCategory::Document)
        );
        assert_eq!(
            MediaCategory::from_declared("xlsx"),
            Some(MediaCategory::Spreadsheet)
        );
        assert_eq!(
            MediaCategory::from_declared("zip"),
            Some(MediaCategory::Archive)
        );
        assert_eq!(
            MediaCategory::from_declared("mp4"),
            Some(MediaCategory::Video)
        );
    }

    #[test]
    fn resolves_filenames_and_mime_tokens() {
        assert_eq!(
            MediaCategory::from_declared("week1.notes.PDF"),
            Some(MediaCategory::Document)
        );
        assert_eq!(
            MediaCategory::from_declared("image/png"),
            Some(MediaCategory::Image)
        );
    }

    #[test]
    fn rejects_types_off_the_allow_list() {
        assert_eq!(MediaCategory::from_declared("exe"), None);
        assert_eq!(MediaCategory::from_declared("payload.sh"), None);
        assert_eq!(MediaCategory::from_declared(""), None);
    }
}
