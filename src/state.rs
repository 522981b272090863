// Application state shared by every command invocation

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::discord::ChannelResolver;
use crate::api::storage::JsonStore;
use crate::features::roster_display::RenderQueue;
use crate::models::config::BotConfig;
use crate::models::member::Roster;

pub struct AppState {
    pub roster: RwLock<Roster>,
    pub config: RwLock<BotConfig>,
    pub store: JsonStore,
    pub channels: Arc<dyn ChannelResolver>,
    pub render_queue: RenderQueue,
}

impl AppState {
    /// Build state from whatever is on disk
    pub fn load(store: JsonStore, channels: Arc<dyn ChannelResolver>) -> Self {
        let roster = store.load_roster();
        let config = store.load_config();
        Self {
            roster: RwLock::new(roster),
            config: RwLock::new(config),
            store,
            channels,
            render_queue: RenderQueue::default(),
        }
    }
}

// Manual Debug impl since the resolver is a trait object
impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("channels", &"ChannelResolver")
            .finish()
    }
}
