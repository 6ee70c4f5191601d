//! Classification of raw nominee entries into their normalized shapes.
//!
//! Everything here is pure; the only step that needs I/O (the identity
//! lookup) is expressed as [`Plan::Lookup`] and carried out by the builder.

use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{BuildError, Result};
use crate::model::{
    CustomNominee, DiscordNominee, MemberProfile, Nominee, NomineeKind, VideoNominee,
};

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "gif", "svg"];
const IMAGE_SOURCE_KEYS: [&str; 4] = ["imageUrl", "path", "src", "url"];
const IDENTITY_KEYS: [&str; 4] = ["id", "name", "tag", "avatarUrl"];

/// What to do with one raw nominee entry.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Plan {
    /// Nothing to emit.
    Drop,
    /// Look up `id` and merge `overrides` on top of the resolved profile.
    Lookup {
        id: String,
        overrides: Map<String, Value>,
    },
    /// Already normalized.
    Ready(Nominee),
}

pub(crate) fn classify(raw: &Value) -> Result<Plan> {
    match raw {
        Value::Null => Ok(Plan::Drop),
        Value::String(s) => Ok(classify_shorthand(s)),
        Value::Object(map) => classify_object(map),
        other => Err(BuildError::MalformedNominee {
            reason: format!("expected an object or a string, got {other}"),
        }),
    }
}

fn classify_shorthand(raw: &str) -> Plan {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Plan::Drop
    } else if is_image_path(trimmed) {
        Plan::Ready(Nominee::Custom(CustomNominee {
            image_url: Some(trimmed.to_owned()),
            title: title_from_filename(trimmed),
            extra: Map::new(),
        }))
    } else {
        Plan::Lookup {
            id: trimmed.to_owned(),
            overrides: Map::new(),
        }
    }
}

fn classify_object(map: &Map<String, Value>) -> Result<Plan> {
    if map.is_empty() {
        return Ok(Plan::Drop);
    }

    let type_value = map.get("type").filter(|v| !v.is_null());
    let untyped = match type_value {
        None => true,
        Some(Value::String(t)) => t.trim().is_empty(),
        Some(_) => false,
    };
    let kind = type_value
        .and_then(Value::as_str)
        .and_then(|t| NomineeKind::from_str(t.trim()).ok());

    match kind {
        Some(NomineeKind::Custom) => Ok(resolve_custom(map).map_or(Plan::Drop, Plan::Ready)),
        Some(NomineeKind::Video) => resolve_video(map).map(Plan::Ready),
        Some(k) if k.is_identity() => Ok(lookup_or_passthrough(map)),
        _ if untyped => Ok(lookup_or_passthrough(map)),
        _ => Ok(Plan::Ready(passthrough(map))),
    }
}

fn lookup_or_passthrough(map: &Map<String, Value>) -> Plan {
    match map.get("id").and_then(user_id) {
        Some(id) => {
            let mut overrides = map.clone();
            overrides.remove("type");
            overrides.remove("id");
            Plan::Lookup { id, overrides }
        }
        None => {
            warn!("identity nominee without a usable id, passing through");
            Plan::Ready(passthrough(map))
        }
    }
}

fn user_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => n.as_u64().map(|n| n.to_string()),
        _ => None,
    }
}

/// Build the discord nominee for `profile` with the input keys laid over it.
/// Input wins per key; `type` and `id` always come from the lookup.
pub(crate) fn merge_profile(profile: MemberProfile, overrides: Map<String, Value>) -> Nominee {
    let mut name = Value::String(profile.name);
    let mut tag = Value::String(profile.tag);
    let mut avatar_url = Value::String(profile.avatar_url);

    let mut extra = Map::new();
    for (key, value) in overrides {
        match key.as_str() {
            "name" => name = value,
            "tag" => tag = value,
            "avatarUrl" => avatar_url = value,
            _ => {
                extra.insert(key, value);
            }
        }
    }

    Nominee::Discord(DiscordNominee {
        id: profile.id,
        name,
        tag,
        avatar_url,
        extra,
    })
}

/// Normalize a `custom` nominee.
///
/// A missing image is fine as long as there is a title; with neither the
/// entry is dropped. Identity fields never survive.
pub(crate) fn resolve_custom(map: &Map<String, Value>) -> Option<Nominee> {
    let image_url = IMAGE_SOURCE_KEYS
        .iter()
        .find_map(|key| non_empty_str(map, key))
        .map(str::to_owned);
    let title = non_empty_str(map, "title").map(str::to_owned);

    let title = match (&image_url, title) {
        (_, Some(title)) => title,
        (Some(image), None) => title_from_filename(image),
        (None, None) => {
            warn!("custom nominee without image or title, dropping");
            return None;
        }
    };

    Some(Nominee::Custom(CustomNominee {
        image_url,
        title,
        extra: without(map, &[&["type", "title"], &IMAGE_SOURCE_KEYS, &IDENTITY_KEYS]),
    }))
}

/// Normalize a `video` nominee. `videoUrl` is mandatory.
pub(crate) fn resolve_video(map: &Map<String, Value>) -> Result<Nominee> {
    let video_url = non_empty_str(map, "videoUrl")
        .ok_or(BuildError::MissingField {
            kind: "video",
            field: "videoUrl",
        })?
        .to_owned();
    let poster_url = non_empty_str(map, "posterUrl").map(str::to_owned);
    let title = non_empty_str(map, "title")
        .map(str::to_owned)
        .unwrap_or_else(|| title_from_filename(&video_url));

    Ok(Nominee::Video(VideoNominee {
        video_url,
        poster_url,
        title,
        extra: without(map, &[&["type", "title", "videoUrl", "posterUrl"], &IDENTITY_KEYS]),
    }))
}

/// Mirror an unrecognized object, lowercasing its `type` (or `unknown`).
pub(crate) fn passthrough(map: &Map<String, Value>) -> Nominee {
    let kind = map
        .get("type")
        .and_then(Value::as_str)
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "unknown".to_owned());

    let mut map = map.clone();
    map.insert("type".to_owned(), Value::String(kind));
    Nominee::Unknown(map)
}

/// Whether `s` names an image file by its extension (case-insensitive).
pub(crate) fn is_image_path(s: &str) -> bool {
    extension(s).is_some_and(|ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// Human title from a path or URL: last segment, no extension, `_`/`-` as spaces.
pub(crate) fn title_from_filename(path: &str) -> String {
    let file = file_name(path);
    let stem = match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    };
    stem.replace(['_', '-'], " ").trim().to_owned()
}

fn file_name(path: &str) -> &str {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or(path);
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn extension(path: &str) -> Option<&str> {
    let file = file_name(path);
    file.rfind('.').map(|dot| &file[dot + 1..])
}

fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Copy of `map` minus every key in `groups`.
fn without(map: &Map<String, Value>, groups: &[&[&str]]) -> Map<String, Value> {
    map.iter()
        .filter(|(k, _)| !groups.iter().flat_map(|g| g.iter()).any(|drop| drop == k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
