#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use awards_config::discord::{RawResponse, Transport};
use awards_config::model::MemberProfile;
use awards_config::{BuildError, IdentityProvider, Result};

/// Identity provider answering from a fixed table and recording every call.
#[derive(Default)]
pub struct FakeProvider {
    profiles: HashMap<String, MemberProfile>,
    fail_once: HashSet<String>,
    pub calls: Vec<String>,
}

impl FakeProvider {
    pub fn with(mut self, id: &str, name: &str, username: &str) -> Self {
        self.profiles.insert(id.to_owned(), profile(id, name, username));
        self
    }

    /// Make the first lookup of `id` fail.
    pub fn failing_once(mut self, id: &str) -> Self {
        self.fail_once.insert(id.to_owned());
        self
    }

    pub fn calls_for(&self, id: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == id).count()
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn fetch_member(&mut self, user_id: &str) -> Result<MemberProfile> {
        self.calls.push(user_id.to_owned());
        if self.fail_once.remove(user_id) {
            return Err(BuildError::RetriesExhausted {
                url: format!("fake://members/{user_id}"),
                attempts: 6,
            });
        }
        self.profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| BuildError::UnexpectedStatus {
                url: format!("fake://members/{user_id}"),
                status: reqwest::StatusCode::NOT_FOUND,
                body: r#"{"message":"Unknown Member","code":10007}"#.to_owned(),
            })
    }
}

pub fn profile(id: &str, name: &str, username: &str) -> MemberProfile {
    MemberProfile {
        id: id.to_owned(),
        name: name.to_owned(),
        tag: format!("@{username}"),
        avatar_url: format!("https://cdn.discordapp.com/avatars/{id}/hash.png?size=256"),
    }
}

/// Transport replaying canned responses in order and recording requested URLs.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<RawResponse>>>,
    pub urls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = RawResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().collect())),
            urls: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        self.urls.lock().unwrap().push(url.to_owned());
        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.expect("scripted transport ran out of responses"))
    }
}

pub fn member_json(id: &str, nick: Option<&str>, username: &str, avatar: Option<&str>) -> String {
    serde_json::json!({
        "nick": nick,
        "user": {
            "id": id,
            "username": username,
            "global_name": null,
            "avatar": avatar,
        }
    })
    .to_string()
}
