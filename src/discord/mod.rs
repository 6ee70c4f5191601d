//! Plumbing for the Discord REST API: transport, request pacing, retry
//! decisions and the member endpoint.

pub(crate) mod member;
pub(crate) mod pacing;
pub mod retry;
mod transport;

pub use transport::{RawResponse, ReqwestTransport, Transport};

pub(crate) const API_BASE: &str = "https://discord.com/api/v10";
pub(crate) const CDN_BASE: &str = "https://cdn.discordapp.com";

/// Client identifier sent with every request, in the form Discord asks bots to use.
pub(crate) const USER_AGENT: &str = concat!(
    "DiscordBot (",
    env!("CARGO_PKG_NAME"),
    ", ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_names_the_package() {
        assert_eq!(
            USER_AGENT,
            format!("DiscordBot (awards-config, {})", env!("CARGO_PKG_VERSION"))
        );
    }
}
