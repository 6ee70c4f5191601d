use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::nominee::Nominee;

/// The human-authored source document, as read from disk.
///
/// Text fields may be given flat (`prefaceTitle`) or through the nested
/// `preface` / `afterword` shorthand objects. Keys this crate does not know
/// about are kept in `extra` and mirrored into the output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub preface_title: Option<String>,
    pub preface_text: Option<String>,
    pub afterword_title: Option<String>,
    pub afterword_text: Option<String>,
    pub preface: Option<TextSection>,
    pub afterword: Option<TextSection>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nominations: Vec<SourceNomination>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Nested `{ "title": ..., "text": ... }` shorthand.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextSection {
    pub title: Option<String>,
    pub text: Option<String>,
}

/// A nomination as authored: a label and heterogeneous raw nominee entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceNomination {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nominees: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lists given as `null` read the same as missing ones.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The finalized site configuration written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,
    pub subtitle: String,
    pub preface_title: String,
    pub preface_text: String,
    pub afterword_title: String,
    pub afterword_text: String,
    pub nominations: Vec<Nomination>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A nomination with every nominee normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nomination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nominees: Vec<Nominee>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
