//! Display surface the poller renders into

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

pub const STATUS: &str = "status";
pub const ABNORMAL_DETECTIONS: &str = "abnormal-detections";
pub const ALERTS_COUNT: &str = "alerts-count";
pub const LAST_BEHAVIOR: &str = "last-behavior";
pub const DATETIME: &str = "datetime";
pub const GEO_TAG: &str = "geo-tag";
pub const GEO_TAG_LIVE: &str = "geo-tag-live";

/// Text targets written by the status cycle, in page order
pub const STATUS_TARGETS: [&str; 7] = [
    STATUS,
    ABNORMAL_DETECTIONS,
    ALERTS_COUNT,
    LAST_BEHAVIOR,
    DATETIME,
    GEO_TAG,
    GEO_TAG_LIVE,
];

/// List target written by the contacts cycle
pub const CONTACTS_LIST: &str = "contacts-list";

/// A set of named targets that accept text or a list of items
#[async_trait]
pub trait DisplaySurface: Send + Sync {
    /// Whether a text or list target with this id exists
    async fn has_target(&self, target: &str) -> bool;

    /// Replace the text content of a text target
    async fn set_text(&self, target: &str, text: &str) -> crate::Result<()>;

    /// Remove every item of a list target and append `items` in order
    async fn replace_items(&self, target: &str, items: &[String]) -> crate::Result<()>;
}

/// Current content of every target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceContents {
    pub texts: BTreeMap<String, String>,
    pub lists: BTreeMap<String, Vec<String>>,
}

/// In-memory surface, shared between the cycles and the page host
#[derive(Debug, Default)]
pub struct MemorySurface {
    contents: RwLock<SurfaceContents>,
}

impl MemorySurface {
    /// A surface with no targets at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// A surface holding every status target and the contacts list, all blank
    pub fn with_default_targets() -> Self {
        let mut contents = SurfaceContents::default();
        for target in STATUS_TARGETS {
            contents.texts.insert(target.to_string(), String::new());
        }
        contents
            .lists
            .insert(CONTACTS_LIST.to_string(), Vec::new());
        Self {
            contents: RwLock::new(contents),
        }
    }

    pub async fn remove_target(&self, target: &str) {
        let mut contents = self.contents.write().await;
        contents.texts.remove(target);
        contents.lists.remove(target);
    }

    pub async fn text(&self, target: &str) -> Option<String> {
        self.contents.read().await.texts.get(target).cloned()
    }

    pub async fn items(&self, target: &str) -> Option<Vec<String>> {
        self.contents.read().await.lists.get(target).cloned()
    }

    pub async fn contents(&self) -> SurfaceContents {
        self.contents.read().await.clone()
    }
}

#[async_trait]
impl DisplaySurface for MemorySurface {
    async fn has_target(&self, target: &str) -> bool {
        let contents = self.contents.read().await;
        contents.texts.contains_key(target) || contents.lists.contains_key(target)
    }

    async fn set_text(&self, target: &str, text: &str) -> crate::Result<()> {
        let mut contents = self.contents.write().await;
        match contents.texts.get_mut(target) {
            Some(slot) => {
                slot.clear();
                slot.push_str(text);
                Ok(())
            }
            None => Err(crate::PollerError::MissingTarget(target.to_string())),
        }
    }

    async fn replace_items(&self, target: &str, items: &[String]) -> crate::Result<()> {
        let mut contents = self.contents.write().await;
        match contents.lists.get_mut(target) {
            Some(list) => {
                list.clear();
                list.extend_from_slice(items);
                Ok(())
            }
            None => Err(crate::PollerError::MissingTarget(target.to_string())),
        }
    }
}
