/// 上传文件的大类，决定能否作为 Image 条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFamily {
    Image,
    Document,
    Media,
    Archive,
    Text,
}

/// 根据扩展名（含点号）判断文件大类，未知扩展名返回 `None`
pub fn file_family(extension: &str) -> Option<FileFamily> {
    match extension.to_ascii_lowercase().as_str() {
        ".png" | ".jpg" | ".jpeg" | ".gif" | ".webp" | ".bmp" => Some(FileFamily::Image),
        ".pdf" | ".doc" | ".xls" | ".ppt" | ".docx" | ".xlsx" | ".pptx" | ".odt" | ".odp" => {
            Some(FileFamily::Document)
        }
        ".mp4" | ".m4v" | ".webm" | ".mp3" | ".ogg" => Some(FileFamily::Media),
        ".zip" | ".gz" | ".tgz" | ".7z" => Some(FileFamily::Archive),
        ".txt" | ".md" | ".csv" | ".json" | ".py" | ".rs" | ".html" => Some(FileFamily::Text),
        _ => None,
    }
}

/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// `data` 为文件开头若干字节，`extension` 含点号（如 ".png"）。
/// 文本类不检查内容，未知扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    let zip = [0x50, 0x4B, 0x03, 0x04];
    let ole = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

    match extension.to_ascii_lowercase().as_str() {
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        ".bmp" => data.starts_with(b"BM"),

        ".pdf" => data.starts_with(b"%PDF"),
        ".doc" | ".xls" | ".ppt" => data.starts_with(&ole),
        // OOXML 与 ODF 都是 ZIP 容器
        ".docx" | ".xlsx" | ".pptx" | ".odt" | ".odp" | ".zip" => data.starts_with(&zip),

        // ISO 媒体文件在偏移 4 处为 "ftyp"
        ".mp4" | ".m4v" => data.len() >= 8 && &data[4..8] == b"ftyp",
        ".webm" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),
        ".mp3" => data.starts_with(b"ID3") || data.starts_with(&[0xFF, 0xFB]),
        ".ogg" => data.starts_with(b"OggS"),

        ".gz" | ".tgz" => data.starts_with(&[0x1F, 0x8B]),
        ".7z" => data.starts_with(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]),

        _ => file_family(extension) == Some(FileFamily::Text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_mp4_magic() {
        let header = [0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(validate_magic_bytes(&header, ".mp4"));
        assert!(!validate_magic_bytes(b"ftyp", ".mp4"));
    }

    #[test]
    fn test_slides_are_zip_containers() {
        let data = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00];
        assert!(validate_magic_bytes(&data, ".pptx"));
        assert!(validate_magic_bytes(&data, ".odp"));
        assert!(!validate_magic_bytes(&data, ".pdf"));
    }

    #[test]
    fn test_text_files_skip_content_check() {
        assert!(validate_magic_bytes(b"print('hi')", ".py"));
        assert!(validate_magic_bytes(b"# Notes", ".md"));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".txt"));
        assert!(!validate_magic_bytes(&[0x4D, 0x5A], ".exe"));
    }

    #[test]
    fn test_families() {
        assert_eq!(file_family(".JPG"), Some(FileFamily::Image));
        assert_eq!(file_family(".webm"), Some(FileFamily::Media));
        assert_eq!(file_family(".exe"), None);
    }
}
