use serde::Serialize;

/// A user identity resolved into the fields a nominee card displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub id: String,
    pub name: String,
    pub tag: String,
    pub avatar_url: String,
}
