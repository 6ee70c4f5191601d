use serde::Serialize;
use serde_json::{Map, Value};
use strum_macros::EnumString;

/// A normalized nominee, tagged by its `type` field in the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Nominee {
    Discord(DiscordNominee),
    Custom(CustomNominee),
    Video(VideoNominee),
    /// Unrecognized object, mirrored as-is (its own `type` key included).
    #[serde(untagged)]
    Unknown(Map<String, Value>),
}

impl Nominee {
    /// The value of the `type` field this nominee serializes with.
    pub fn kind(&self) -> &str {
        match self {
            Nominee::Discord(_) => "discord",
            Nominee::Custom(_) => "custom",
            Nominee::Video(_) => "video",
            Nominee::Unknown(map) => map
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown"),
        }
    }
}

/// A Discord member resolved into a display profile.
///
/// `name`, `tag` and `avatarUrl` start out as the resolved strings but take
/// whatever value the source entry gave explicitly, `null` included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordNominee {
    pub id: String,
    pub name: Value,
    pub tag: Value,
    pub avatar_url: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image-backed nominee. A title-only entry has no `imageUrl`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomNominee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A video-backed nominee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoNominee {
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Recognized values of a raw nominee's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NomineeKind {
    Discord,
    Member,
    Custom,
    Video,
}

impl NomineeKind {
    /// Whether nominees of this kind are looked up through the identity provider.
    pub fn is_identity(self) -> bool {
        matches!(self, NomineeKind::Discord | NomineeKind::Member)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(NomineeKind::from_str("Discord").unwrap(), NomineeKind::Discord);
        assert_eq!(NomineeKind::from_str("MEMBER").unwrap(), NomineeKind::Member);
        assert!(NomineeKind::from_str("sticker").is_err());
    }

    #[test]
    fn tagged_variants_serialize_with_type() {
        let nominee = Nominee::Custom(CustomNominee {
            image_url: None,
            title: "Best Meme".into(),
            extra: Map::new(),
        });
        assert_eq!(
            serde_json::to_value(&nominee).unwrap(),
            json!({ "type": "custom", "title": "Best Meme" })
        );
    }

    #[test]
    fn unknown_variant_is_mirrored() {
        let mut map = Map::new();
        map.insert("type".into(), json!("sticker"));
        map.insert("emoji".into(), json!(":)"));
        let nominee = Nominee::Unknown(map);
        assert_eq!(nominee.kind(), "sticker");
        assert_eq!(
            serde_json::to_value(&nominee).unwrap(),
            json!({ "type": "sticker", "emoji": ":)" })
        );
    }
}
