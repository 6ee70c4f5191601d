use serde::Deserialize;

use super::CDN_BASE;
use crate::model::MemberProfile;

pub(crate) const DEFAULT_AVATAR_URL: &str = "https://cdn.discordapp.com/embed/avatars/0.png";
const AVATAR_SIZE: u32 = 256;
const ANIMATED_PREFIX: &str = "a_";

/// The subset of a guild member object we read.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GuildMember {
    pub nick: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct User {
    pub id: Option<String>,
    pub username: Option<String>,
    pub global_name: Option<String>,
    pub avatar: Option<String>,
}

pub(crate) fn member_url(api_base: &str, guild_id: &str, user_id: &str) -> String {
    format!(
        "{}/guilds/{guild_id}/members/{user_id}",
        api_base.trim_end_matches('/')
    )
}

/// Turn a guild member into the profile shown on a nominee card.
pub(crate) fn profile_from_member(requested_id: &str, member: GuildMember) -> MemberProfile {
    let GuildMember { nick, user } = member;
    let user = user.unwrap_or_default();

    let id = non_empty(user.id).unwrap_or_else(|| requested_id.to_owned());
    let username = non_empty(user.username);
    let name = non_empty(nick)
        .or_else(|| non_empty(user.global_name))
        .or_else(|| username.clone())
        .unwrap_or_else(|| id.clone());
    let tag = username.map(|u| format!("@{u}")).unwrap_or_default();
    let avatar_url = avatar_url(&id, non_empty(user.avatar).as_deref());

    MemberProfile {
        id,
        name,
        tag,
        avatar_url,
    }
}

/// CDN URL for a user's avatar, or the default placeholder without a hash.
pub(crate) fn avatar_url(user_id: &str, hash: Option<&str>) -> String {
    match hash {
        None => DEFAULT_AVATAR_URL.to_owned(),
        Some(hash) => {
            let ext = if hash.starts_with(ANIMATED_PREFIX) {
                "gif"
            } else {
                "png"
            };
            format!("{CDN_BASE}/avatars/{user_id}/{hash}.{ext}?size={AVATAR_SIZE}")
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
