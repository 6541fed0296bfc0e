//! `data:` URIs carrying base64 payloads.

use base64::{Engine as _, engine::general_purpose};

use crate::domain::common::entities::app_errors::CoreError;

const SCHEME: &str = "data:";
const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri<'a> {
    media_type: &'a str,
    payload: &'a str,
}

impl<'a> DataUri<'a> {
    /// Splits a data URI into its header and payload.
    ///
    /// Fails when the scheme prefix is missing or there is no non-empty
    /// segment after the first comma.
    pub fn parse(input: &'a str) -> Result<Self, CoreError> {
        let rest = input
            .strip_prefix(SCHEME)
            .ok_or_else(|| CoreError::InvalidDataUri("missing data: prefix".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CoreError::InvalidDataUri("missing payload".to_string()))?;

        if payload.is_empty() {
            return Err(CoreError::InvalidDataUri("missing payload".to_string()));
        }

        let media_type = header.split(';').next().unwrap_or_default().trim();

        Ok(Self {
            media_type,
            payload,
        })
    }

    pub fn media_type(&self) -> &'a str {
        if self.media_type.is_empty() {
            DEFAULT_MEDIA_TYPE
        } else {
            self.media_type
        }
    }

    /// Declared media type, if the header carries one.
    pub fn declared_media_type(&self) -> Option<&'a str> {
        (!self.media_type.is_empty()).then_some(self.media_type)
    }

    pub fn decode(&self) -> Result<Vec<u8>, CoreError> {
        // Query strings turn an unescaped `+` into a space.
        let payload = self.payload.replace(' ', "+");
        let payload = payload.trim();
        general_purpose::STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| CoreError::InvalidDataUri(format!("invalid base64 payload: {e}")))
    }
}

pub fn encode(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "{SCHEME}{media_type};base64,{}",
        general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_decode() {
        let uri = DataUri::parse("data:text/plain;base64,aGVsbG8=").unwrap();
        assert_eq!(uri.media_type(), "text/plain");
        assert_eq!(uri.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_missing_prefix() {
        assert!(matches!(
            DataUri::parse("image/png;base64,aGVsbG8="),
            Err(CoreError::InvalidDataUri(_))
        ));
    }

    #[test]
    fn test_missing_payload() {
        assert!(DataUri::parse("data:image/png;base64").is_err());
        assert!(DataUri::parse("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_invalid_base64() {
        let uri = DataUri::parse("data:image/png;base64,@@@").unwrap();
        assert!(matches!(uri.decode(), Err(CoreError::InvalidDataUri(_))));
    }

    #[test]
    fn test_default_media_type() {
        let uri = DataUri::parse("data:;base64,AA==").unwrap();
        assert_eq!(uri.media_type(), "application/octet-stream");
        assert_eq!(uri.declared_media_type(), None);
    }

    #[test]
    fn test_spaces_from_query_strings_are_restored() {
        // "+/8=" is [0xfb, 0xff]
        let uri = DataUri::parse("data:application/octet-stream;base64, /8=").unwrap();
        assert_eq!(uri.decode().unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_encode_decodes_back() {
        let bytes = [0u8, 1, 2, 250, 255];
        let encoded = encode("image/png", &bytes);
        assert!(encoded.starts_with("data:image/png;base64,"));
        assert_eq!(DataUri::parse(&encoded).unwrap().decode().unwrap(), bytes);
    }
}
