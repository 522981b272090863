// In-memory stand-ins for the Discord traits, shared by unit tests

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use super::discord::{ChannelResolver, FetchedMessage, Responder, RosterChannel, RosterPost};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelCall {
    Fetch { returned: usize },
    BulkDelete { count: usize },
    Delete { id: serenity::MessageId },
    Send,
}

/// Channel holding a message history, newest first
#[derive(Default)]
pub struct FakeChannel {
    history: Mutex<Vec<FetchedMessage>>,
    calls: Mutex<Vec<(ChannelCall, Instant)>>,
    sent: Mutex<Vec<RosterPost>>,
    next_id: Mutex<u64>,
    fail_fetch: AtomicBool,
    fail_delete_once: AtomicBool,
    fail_bulk: AtomicBool,
    fail_send: AtomicBool,
}

impl FakeChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Add `count` messages created `age` ago
    pub fn seed(&self, count: usize, age: Duration) {
        let created_at = Utc::now() - age;
        let mut next_id = self.next_id.lock().unwrap();
        let mut history = self.history.lock().unwrap();
        for _ in 0..count {
            *next_id += 1;
            history.push(FetchedMessage {
                id: serenity::MessageId::new(*next_id),
                created_at,
            });
        }
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    pub fn fail_fetches(&self) {
        self.fail_fetch.store(true, Ordering::SeqCst);
    }

    /// Next single delete errors and leaves the message in place
    pub fn fail_next_delete(&self) {
        self.fail_delete_once.store(true, Ordering::SeqCst);
    }

    pub fn fail_bulk_deletes(&self) {
        self.fail_bulk.store(true, Ordering::SeqCst);
    }

    pub fn fail_sends(&self) {
        self.fail_send.store(true, Ordering::SeqCst);
    }

    pub fn remaining(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<ChannelCall> {
        self.calls.lock().unwrap().iter().map(|(c, _)| *c).collect()
    }

    pub fn delete_times(&self) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| matches!(c, ChannelCall::Delete { .. }))
            .map(|(_, at)| *at)
            .collect()
    }

    pub fn sent(&self) -> Vec<RosterPost> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, call: ChannelCall) {
        self.calls.lock().unwrap().push((call, Instant::now()));
    }

    fn forget(&self, ids: &[serenity::MessageId]) {
        self.history.lock().unwrap().retain(|m| !ids.contains(&m.id));
    }
}

#[async_trait]
impl RosterChannel for FakeChannel {
    fn name(&self) -> &str {
        "roster"
    }

    async fn fetch_messages(&self, limit: u8) -> anyhow::Result<Vec<FetchedMessage>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            anyhow::bail!("Missing Access");
        }
        let batch: Vec<FetchedMessage> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .take(limit as usize)
            .copied()
            .collect();
        self.record(ChannelCall::Fetch { returned: batch.len() });
        Ok(batch)
    }

    async fn bulk_delete(&self, ids: &[serenity::MessageId]) -> anyhow::Result<()> {
        if self.fail_bulk.load(Ordering::SeqCst) {
            anyhow::bail!("Missing Permissions");
        }
        let cutoff: DateTime<Utc> = Utc::now() - Duration::days(14);
        let too_old = self
            .history
            .lock()
            .unwrap()
            .iter()
            .any(|m| ids.contains(&m.id) && m.created_at <= cutoff);
        if too_old {
            anyhow::bail!("You can only bulk delete messages that are under 14 days old.");
        }
        self.record(ChannelCall::BulkDelete { count: ids.len() });
        self.forget(ids);
        Ok(())
    }

    async fn delete_message(&self, id: serenity::MessageId) -> anyhow::Result<()> {
        self.record(ChannelCall::Delete { id });
        if self.fail_delete_once.swap(false, Ordering::SeqCst) {
            anyhow::bail!("Unknown Message");
        }
        self.forget(&[id]);
        Ok(())
    }

    async fn send(&self, post: RosterPost) -> anyhow::Result<()> {
        if self.fail_send.load(Ordering::SeqCst) {
            anyhow::bail!("Missing Access");
        }
        self.record(ChannelCall::Send);
        self.sent.lock().unwrap().push(post);
        Ok(())
    }
}

/// Resolves only the channels it was given
#[derive(Default)]
pub struct FakeResolver {
    channels: HashMap<serenity::ChannelId, Arc<FakeChannel>>,
}

impl FakeResolver {
    pub fn with(mut self, channel_id: u64, channel: Arc<FakeChannel>) -> Self {
        self.channels.insert(serenity::ChannelId::new(channel_id), channel);
        self
    }
}

#[async_trait]
impl ChannelResolver for FakeResolver {
    async fn resolve(&self, channel_id: serenity::ChannelId) -> Option<Arc<dyn RosterChannel>> {
        self.channels
            .get(&channel_id)
            .map(|c| c.clone() as Arc<dyn RosterChannel>)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Reply(String),
    FollowUp(String),
}

/// Records what a command said back to the invoker
#[derive(Default)]
pub struct FakeResponder {
    responses: Mutex<Vec<(Response, bool)>>,
    watched: Option<PathBuf>,
    file_seen: Mutex<Vec<bool>>,
}

impl FakeResponder {
    /// Also note whether `path` existed each time a response went out
    pub fn watching(path: impl Into<PathBuf>) -> Self {
        Self {
            watched: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn file_seen(&self) -> Vec<bool> {
        self.file_seen.lock().unwrap().clone()
    }

    fn push(&self, response: Response, ephemeral: bool) {
        if let Some(path) = &self.watched {
            self.file_seen.lock().unwrap().push(path.exists());
        }
        self.responses.lock().unwrap().push((response, ephemeral));
    }

    pub fn responses(&self) -> Vec<Response> {
        self.responses.lock().unwrap().iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn all_ephemeral(&self) -> bool {
        self.responses.lock().unwrap().iter().all(|(_, e)| *e)
    }
}

#[async_trait]
impl Responder for FakeResponder {
    async fn reply(&self, content: String, ephemeral: bool) -> Result<(), Error> {
        self.push(Response::Reply(content), ephemeral);
        Ok(())
    }

    async fn follow_up(&self, content: String, ephemeral: bool) -> Result<(), Error> {
        self.push(Response::FollowUp(content), ephemeral);
        Ok(())
    }
}

/// JSON view of an embed post, None for plain text
pub fn embed_json(post: &RosterPost) -> Option<serde_json::Value> {
    match post {
        RosterPost::Embed(embed) => serde_json::to_value(embed).ok(),
        RosterPost::Text(_) => None,
    }
}
