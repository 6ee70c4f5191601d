use async_trait::async_trait;

use crate::error::Result;
use crate::model::MemberProfile;

/// Something that can turn a user id into a display profile.
///
/// [`DiscordClient`](crate::DiscordClient) is the real implementation; tests
/// substitute scripted fakes.
#[async_trait]
pub trait IdentityProvider: Send {
    async fn fetch_member(&mut self, user_id: &str) -> Result<MemberProfile>;
}
