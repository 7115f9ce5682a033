//! Format listing via a metadata-only probe

use serde::{Deserialize, Serialize};

/// One selectable quality option reported by the downloader.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormatOption {
    pub format_id: String,
    pub format_note: String,
    pub extension: String,
}

/// Extract the ordered `formats` list from the tool's info JSON.
///
/// Entries without a `format_id` are skipped; missing notes and
/// extensions degrade to empty strings rather than dropping the entry.
pub fn parse_format_list(info: &serde_json::Value) -> Vec<FormatOption> {
    let Some(formats) = info.get("formats").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    formats
        .iter()
        .filter_map(|entry| {
            let format_id = entry.get("format_id")?.as_str()?.to_string();
            let format_note = entry
                .get("format_note")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let extension = entry
                .get("ext")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            Some(FormatOption {
                format_id,
                format_note,
                extension,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_format_list_preserves_order() {
        let info = json!({
            "title": "My Video",
            "formats": [
                {"format_id": "18", "format_note": "360p", "ext": "mp4"},
                {"format_id": "22", "format_note": "720p", "ext": "mp4"},
                {"format_id": "137", "format_note": "1080p", "ext": "mp4"},
            ]
        });

        let formats = parse_format_list(&info);
        assert_eq!(formats.len(), 3);
        assert_eq!(formats[0].format_id, "18");
        assert_eq!(formats[2].format_note, "1080p");
    }

    #[test]
    fn test_parse_format_list_tolerates_sparse_entries() {
        let info = json!({
            "formats": [
                {"format_id": "sb0"},
                {"ext": "mp4"},
                {"format_id": "251", "ext": "webm"},
            ]
        });

        let formats = parse_format_list(&info);
        assert_eq!(formats.len(), 2);
        assert_eq!(formats[0].format_id, "sb0");
        assert_eq!(formats[0].format_note, "");
        assert_eq!(formats[1].extension, "webm");
    }

    #[test]
    fn test_parse_format_list_missing_formats_key() {
        let info = json!({"title": "no formats here"});
        assert!(parse_format_list(&info).is_empty());
    }

    #[test]
    fn test_format_option_serializes_camel_case() {
        let option = FormatOption {
            format_id: "22".to_string(),
            format_note: "720p".to_string(),
            extension: "mp4".to_string(),
        };
        let value = serde_json::to_value(&option).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "formatId": "22",
                "formatNote": "720p",
                "extension": "mp4"
            })
        );
    }
}
