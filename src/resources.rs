use serde::Serialize;

pub const API_VERSION: &str = "1.0.0";
pub const API_VERSION_URI: &str = "info://api_version";

/// Version of the SimpleAPI server. No I/O.
pub fn get_api_version() -> &'static str {
    API_VERSION
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMeta {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: &'static str,
    pub mime_type: &'static str,
    pub text: String,
}

pub fn list() -> Vec<ResourceMeta> {
    vec![ResourceMeta {
        uri: API_VERSION_URI,
        name: "api_version",
        description: "Return the version of the SimpleAPI server.",
        mime_type: "text/plain",
    }]
}

pub fn read(uri: &str) -> Option<ResourceContents> {
    match uri {
        API_VERSION_URI => Some(ResourceContents {
            uri: API_VERSION_URI,
            mime_type: "text/plain",
            text: get_api_version().to_string(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_version_is_fixed() {
        assert_eq!(get_api_version(), "1.0.0");
        assert_eq!(read(API_VERSION_URI).map(|c| c.text).as_deref(), Some("1.0.0"));
    }

    #[test]
    fn unknown_uri_reads_nothing() {
        assert!(read("info://nope").is_none());
    }

    #[test]
    fn listing_serializes_camel_case() {
        let v = serde_json::to_value(list()).unwrap();
        assert_eq!(v[0]["uri"], "info://api_version");
        assert_eq!(v[0]["mimeType"], "text/plain");
    }
}
