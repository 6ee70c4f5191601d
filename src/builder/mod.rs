//! The read → normalize → resolve → write pipeline.

mod nominee;
mod text;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, info, instrument};

pub use text::{
    DEFAULT_AFTERWORD_TEXT, DEFAULT_AFTERWORD_TITLE, DEFAULT_PREFACE_TEXT, DEFAULT_PREFACE_TITLE,
    DEFAULT_SUBTITLE, DEFAULT_TITLE,
};

use crate::error::{BuildError, Result};
use crate::model::{MemberProfile, Nomination, Nominee, SiteConfig, SourceDocument};
use crate::provider::IdentityProvider;
use nominee::Plan;

pub const DEFAULT_INPUT: &str = "awards.source.json";
pub const DEFAULT_OUTPUT: &str = "awards.json";

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub nominations: usize,
    pub nominees: usize,
    pub lookups: usize,
}

/// Holds the identity provider and the per-run resolution cache.
///
/// Nominees are resolved one at a time in document order. A lookup for an
/// id already in the cache does not reach the provider; failed lookups are
/// never cached.
pub struct ConfigBuilder<P> {
    provider: P,
    cache: HashMap<String, MemberProfile>,
    lookups: usize,
}

impl<P: IdentityProvider> ConfigBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: HashMap::new(),
            lookups: 0,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Normalize a whole source document.
    #[instrument(skip_all, fields(nominations = source.nominations.len()))]
    pub async fn build(&mut self, source: SourceDocument) -> Result<SiteConfig> {
        let (mut config, nominations) = text::normalize_text(source);

        for nomination in nominations {
            let mut nominees = Vec::with_capacity(nomination.nominees.len());
            for raw in &nomination.nominees {
                if let Some(nominee) = self.resolve_nominee(raw).await? {
                    nominees.push(nominee);
                }
            }
            debug!(
                name = nomination.name.as_deref().unwrap_or_default(),
                kept = nominees.len(),
                total = nomination.nominees.len(),
                "resolved nomination"
            );
            config.nominations.push(Nomination {
                name: nomination.name,
                nominees,
                extra: nomination.extra,
            });
        }
        Ok(config)
    }

    /// Normalize a single raw nominee entry. `None` means the entry is dropped.
    pub async fn resolve_nominee(&mut self, raw: &Value) -> Result<Option<Nominee>> {
        match nominee::classify(raw)? {
            Plan::Drop => Ok(None),
            Plan::Ready(nominee) => Ok(Some(nominee)),
            Plan::Lookup { id, overrides } => {
                let profile = self.lookup(&id).await?;
                Ok(Some(nominee::merge_profile(profile, overrides)))
            }
        }
    }

    /// Resolve `user_id` through the cache, falling back to the provider.
    #[instrument(skip(self))]
    pub async fn lookup(&mut self, user_id: &str) -> Result<MemberProfile> {
        if let Some(profile) = self.cache.get(user_id) {
            debug!("cache hit");
            return Ok(profile.clone());
        }
        self.lookups += 1;
        let profile = self.provider.fetch_member(user_id).await?;
        self.cache.insert(user_id.to_owned(), profile.clone());
        Ok(profile)
    }

    /// Read `input`, build it, and write the result to `output`.
    ///
    /// Nothing is written unless every nominee resolves.
    #[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
    pub async fn run(&mut self, input: &Path, output: &Path) -> Result<BuildSummary> {
        let source = load_source(input).await?;
        let config = self.build(source).await?;
        write_config(output, &config).await?;

        let summary = BuildSummary {
            nominations: config.nominations.len(),
            nominees: config.nominations.iter().map(|n| n.nominees.len()).sum(),
            lookups: self.lookups,
        };
        info!(
            nominations = summary.nominations,
            nominees = summary.nominees,
            lookups = summary.lookups,
            kinds = %kind_counts(&config),
            "wrote site config"
        );
        Ok(summary)
    }
}

/// Read and parse the source document at `path`.
pub async fn load_source(path: &Path) -> Result<SourceDocument> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BuildError::Read {
            path: path.to_owned(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| BuildError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Pretty-print `config` to `path`, replacing any previous file atomically.
pub async fn write_config(path: &Path, config: &SiteConfig) -> Result<()> {
    let mut body = serde_json::to_string_pretty(config)?;
    body.push('\n');

    let tmp = temp_path(path);
    let write_err = |source: std::io::Error| BuildError::Write {
        path: path.to_owned(),
        source,
    };
    tokio::fs::write(&tmp, body).await.map_err(write_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(write_err)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn kind_counts(config: &SiteConfig) -> String {
    config
        .nominations
        .iter()
        .flat_map(|n| &n.nominees)
        .counts_by(|n| n.kind().to_owned())
        .into_iter()
        .sorted()
        .map(|(kind, count)| format!("{kind}={count}"))
        .join(",")
}
