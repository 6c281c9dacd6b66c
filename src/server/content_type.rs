//! Content type lookup by file name suffix.

use std::path::Path;

/// Content type for anything not in the table.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Map a file path to the MIME type sent in `Content-Type`.
///
/// Only the file name's suffix is looked at, case-insensitively, so a file
/// named `.html` is still HTML. File contents are never inspected.
pub fn content_type_for(path: &Path) -> &'static str {
    let name = match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.to_ascii_lowercase(),
        None => return DEFAULT_CONTENT_TYPE,
    };

    if name.ends_with(".htm") || name.ends_with(".html") {
        "text/html"
    } else if name.ends_with(".gif") {
        "image/gif"
    } else if name.ends_with(".jpg") {
        "image/jpeg"
    } else {
        DEFAULT_CONTENT_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type_for(Path::new("/www/index.html")), "text/html");
        assert_eq!(content_type_for(Path::new("/www/old.htm")), "text/html");
        assert_eq!(content_type_for(Path::new("/www/a.gif")), "image/gif");
        assert_eq!(content_type_for(Path::new("/www/photo.jpg")), "image/jpeg");
    }

    #[test]
    fn test_extension_case_is_ignored() {
        assert_eq!(content_type_for(Path::new("INDEX.HTML")), "text/html");
        assert_eq!(content_type_for(Path::new("Photo.JpG")), "image/jpeg");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(content_type_for(Path::new("notes.txt")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("photo.jpeg")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("Makefile")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("archive.html.gz")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("/www/html")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("/")), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_dot_file_names() {
        assert_eq!(content_type_for(Path::new("/www/.html")), "text/html");
        assert_eq!(content_type_for(Path::new(".GIF")), "image/gif");
    }
}
