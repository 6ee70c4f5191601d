//! Runtime settings read from the process environment.

use std::fmt;
use std::time::Duration;

use crate::error::{BuildError, Result};

pub const TOKEN_VAR: &str = "DISCORD_TOKEN";
pub const GUILD_VAR: &str = "DISCORD_GUILD_ID";
pub const INTERVAL_VAR: &str = "DISCORD_REQUEST_INTERVAL_MS";

pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(120);

/// Credentials and pacing for talking to Discord.
#[derive(Clone)]
pub struct Settings {
    pub token: String,
    pub guild_id: String,
    pub request_interval: Duration,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or(BuildError::MissingEnv { name })
        };

        let token = required(TOKEN_VAR)?;
        let guild_id = required(GUILD_VAR)?;
        let request_interval = match lookup(INTERVAL_VAR).filter(|v| !v.trim().is_empty()) {
            None => DEFAULT_REQUEST_INTERVAL,
            Some(raw) => parse_interval(&raw)?,
        };

        Ok(Self {
            token,
            guild_id,
            request_interval,
        })
    }
}

fn parse_interval(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        Ok(_) => Err(BuildError::InvalidEnv {
            name: INTERVAL_VAR,
            reason: "must be a positive number of milliseconds".into(),
        }),
        Err(e) => Err(BuildError::InvalidEnv {
            name: INTERVAL_VAR,
            reason: e.to_string(),
        }),
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("token", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .field("request_interval", &self.request_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_required_and_defaults_interval() {
        let settings =
            Settings::from_lookup(lookup(&[(TOKEN_VAR, "secret"), (GUILD_VAR, "99")])).unwrap();
        assert_eq!(settings.token, "secret");
        assert_eq!(settings.guild_id, "99");
        assert_eq!(settings.request_interval, DEFAULT_REQUEST_INTERVAL);
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = Settings::from_lookup(lookup(&[(GUILD_VAR, "99")])).unwrap_err();
        assert!(matches!(err, BuildError::MissingEnv { name: TOKEN_VAR }));
    }

    #[test]
    fn empty_guild_counts_as_missing() {
        let err =
            Settings::from_lookup(lookup(&[(TOKEN_VAR, "secret"), (GUILD_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, BuildError::MissingEnv { name: GUILD_VAR }));
    }

    #[test]
    fn interval_override() {
        let settings = Settings::from_lookup(lookup(&[
            (TOKEN_VAR, "secret"),
            (GUILD_VAR, "99"),
            (INTERVAL_VAR, "250"),
        ]))
        .unwrap();
        assert_eq!(settings.request_interval, Duration::from_millis(250));
    }

    #[test]
    fn interval_must_be_positive_integer() {
        for bad in ["0", "-5", "fast"] {
            let err = Settings::from_lookup(lookup(&[
                (TOKEN_VAR, "secret"),
                (GUILD_VAR, "99"),
                (INTERVAL_VAR, bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, BuildError::InvalidEnv { name: INTERVAL_VAR, .. }));
        }
    }

    #[test]
    fn debug_redacts_token() {
        let settings =
            Settings::from_lookup(lookup(&[(TOKEN_VAR, "secret"), (GUILD_VAR, "99")])).unwrap();
        assert!(!format!("{settings:?}").contains("secret"));
    }
}
