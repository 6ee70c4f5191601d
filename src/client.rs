use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::config::Settings;
use crate::discord::member::{self, GuildMember};
use crate::discord::pacing::Pacer;
use crate::discord::retry::{self, Action, Failure, RetryPolicy};
use crate::discord::{ReqwestTransport, Transport, API_BASE};
use crate::error::{BuildError, Result};
use crate::model::MemberProfile;
use crate::provider::IdentityProvider;

/// Client for the few Discord endpoints the builder needs.
///
/// Every request goes through one path that paces calls to a minimum
/// interval and retries rate-limited (429) and server-error (5xx)
/// responses according to a [`RetryPolicy`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> awards_config::Result<()> {
/// use awards_config::{DiscordClient, Settings};
///
/// let settings = Settings::from_env()?;
/// let mut client = DiscordClient::new(&settings);
/// let profile = client.get_member("80351110224678912").await?;
/// println!("{} ({})", profile.name, profile.tag);
/// # Ok(())
/// # }
/// ```
pub struct DiscordClient<T = ReqwestTransport> {
    transport: T,
    api_base: String,
    guild_id: String,
    pacer: Pacer,
    policy: RetryPolicy,
}

impl DiscordClient<ReqwestTransport> {
    /// Create a client authenticated with the bot token from `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self::with_transport(
            ReqwestTransport::new(&settings.token),
            &settings.guild_id,
            settings.request_interval,
        )
    }
}

impl<T: Transport> DiscordClient<T> {
    /// Create a client on top of an arbitrary [`Transport`].
    pub fn with_transport(transport: T, guild_id: &str, request_interval: Duration) -> Self {
        Self {
            transport,
            api_base: API_BASE.to_owned(),
            guild_id: guild_id.to_owned(),
            pacer: Pacer::new(request_interval),
            policy: RetryPolicy::default(),
        }
    }

    /// Point the client at a different API root.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Replace the default retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch a guild member and derive their display profile.
    #[instrument(skip(self))]
    pub async fn get_member(&mut self, user_id: &str) -> Result<MemberProfile> {
        let url = member::member_url(&self.api_base, &self.guild_id, user_id);
        let member: GuildMember = self.get_json(&url).await?;
        let profile = member::profile_from_member(user_id, member);
        debug!(user_id, name = %profile.name, "resolved member");
        Ok(profile)
    }

    /// GET `url` with pacing and retries, decoding the JSON body on success.
    #[instrument(skip(self))]
    pub async fn get_json<R: DeserializeOwned>(&mut self, url: &str) -> Result<R> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            self.pacer.wait().await;

            let response = self.transport.get(url).await;
            let (status, server_wait) = match &response {
                Ok(raw) if raw.status == StatusCode::TOO_MANY_REQUESTS => (
                    Some(raw.status),
                    retry::parse_retry_after(&raw.body, raw.retry_after.as_deref()),
                ),
                Ok(raw) => (Some(raw.status), None),
                Err(e) => {
                    debug!(url, attempt, error = %e, "request failed");
                    (None, None)
                }
            };

            let jitter = self.policy.sample_jitter();
            match self.policy.next_action(attempt, status, server_wait, jitter) {
                Action::Succeed => {
                    let raw = response?;
                    return serde_json::from_str(&raw.body).map_err(|source| BuildError::Decode {
                        url: url.to_owned(),
                        source,
                    });
                }
                Action::Retry { delay, reason } => {
                    warn!(
                        url,
                        attempt,
                        %reason,
                        delay_ms = delay.as_millis() as u64,
                        "retrying request"
                    );
                    sleep(delay).await;
                }
                Action::Fail(Failure::Rejected) => {
                    let raw = response?;
                    return Err(BuildError::UnexpectedStatus {
                        url: url.to_owned(),
                        status: raw.status,
                        body: raw.body,
                    });
                }
                Action::Fail(Failure::Exhausted) => {
                    // Surface the transport error itself when there was no response at all.
                    response?;
                    return Err(BuildError::RetriesExhausted {
                        url: url.to_owned(),
                        attempts: attempt,
                    });
                }
            }
        }
    }
}

#[async_trait]
impl<T: Transport> IdentityProvider for DiscordClient<T> {
    async fn fetch_member(&mut self, user_id: &str) -> Result<MemberProfile> {
        self.get_member(user_id).await
    }
}
