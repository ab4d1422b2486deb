//! Hand-off of a parsed import to profile storage.
//!
//! The parser never writes anywhere. This module turns a [`ParseResult`]
//! into an [`ImportPlan`] (ordered, clamped, titled block records plus a
//! profile update) and drives a [`BlockStore`] with it.
//!
//! # Example
//!
//! ```rust
//! use bento_import::persist::{apply_import, MemoryStore};
//! use bento_import::extract::parse_json_text;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let result = parse_json_text(r#"{"blocks": [{"type": "link"}]}"#)?;
//! let store = MemoryStore::new();
//! let summary = apply_import(&store, "user-1", &result, 4).await?;
//! assert_eq!(summary.imported, 1);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::block::{BlockType, NormalizedProfile, ParseResult};

/// A block ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlock {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub grid_x: i64,
    pub grid_y: i64,
    pub grid_width: i64,
    pub grid_height: i64,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<Number>,
}

/// A stored block, with the id the store assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBlock {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub block: NewBlock,
    pub created_at: DateTime<Utc>,
}

/// Profile fields that already exist for the importing user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExistingProfile {
    pub name: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

/// Fields an import will overwrite. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ProfileUpdate {
    /// Merge imported fields into an existing profile.
    ///
    /// Name and avatar only fill gaps; bio and location replace. Empty
    /// imported values are ignored. Returns `None` when nothing changes.
    pub fn merge(imported: &NormalizedProfile, existing: &ExistingProfile) -> Option<Self> {
        let provided = |field: &Option<String>| field.clone().filter(|v| !v.is_empty());

        let update = Self {
            name: provided(&imported.name).filter(|_| existing.name.is_none()),
            bio: provided(&imported.bio),
            image: provided(&imported.avatar).filter(|_| existing.image.is_none()),
            location: provided(&imported.location),
        };

        (update != Self::default()).then_some(update)
    }
}

/// Everything one import will write.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPlan {
    pub blocks: Vec<NewBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileUpdate>,
}

impl ImportPlan {
    /// Build the plan for `result`.
    ///
    /// Blocks are ordered after `start_order`, untitled blocks are named
    /// `Imported Block N`, and spans are clamped into `1..=max_span`.
    pub fn build(
        result: &ParseResult,
        existing: &ExistingProfile,
        start_order: i64,
        max_span: i64,
    ) -> Self {
        let max_span = max_span.max(1);

        let blocks = result
            .blocks
            .iter()
            .enumerate()
            .map(|(index, block)| NewBlock {
                block_type: block.block_type,
                title: block
                    .title
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| format!("Imported Block {}", index + 1)),
                content: block.content.clone(),
                url: block.url.clone(),
                image_url: block.image_url.clone(),
                grid_x: block.grid_x,
                grid_y: block.grid_y,
                grid_width: block.grid_width.clamp(1, max_span),
                grid_height: block.grid_height.clamp(1, max_span),
                order: start_order + index as i64,
                background_color: block.background_color.clone(),
                text_color: block.text_color.clone(),
                border_radius: block.border_radius.clone(),
            })
            .collect();

        Self {
            blocks,
            profile: ProfileUpdate::merge(&result.profile, existing),
        }
    }
}

/// Outcome of [`apply_import`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub profile_updated: bool,
    pub imported_at: DateTime<Utc>,
}

/// Storage collaborator for imported blocks and profile fields.
#[async_trait]
pub trait BlockStore: Send + Sync {
    /// Highest block order for the user, if they have any blocks.
    async fn max_order(&self, user_id: &str) -> Result<Option<i64>>;

    async fn existing_profile(&self, user_id: &str) -> Result<ExistingProfile>;

    /// Insert all blocks atomically; ids are assigned by the store.
    async fn insert_blocks(&self, user_id: &str, blocks: Vec<NewBlock>) -> Result<Vec<StoredBlock>>;

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<()>;
}

/// Persist `result` for `user_id`, appending after existing blocks.
pub async fn apply_import(
    store: &dyn BlockStore,
    user_id: &str,
    result: &ParseResult,
    max_span: i64,
) -> Result<ImportSummary> {
    let start_order = store.max_order(user_id).await?.map_or(0, |max| max + 1);
    let existing = store.existing_profile(user_id).await?;
    let plan = ImportPlan::build(result, &existing, start_order, max_span);

    let stored = store.insert_blocks(user_id, plan.blocks).await?;

    let profile_updated = match plan.profile {
        Some(update) => {
            store.update_profile(user_id, update).await?;
            true
        }
        None => false,
    };

    tracing::info!(
        "Imported {} blocks for {} (profile updated: {})",
        stored.len(),
        user_id,
        profile_updated
    );

    Ok(ImportSummary {
        imported: stored.len(),
        profile_updated,
        imported_at: Utc::now(),
    })
}

/// In-process [`BlockStore`].
#[derive(Default)]
pub struct MemoryStore {
    blocks: RwLock<HashMap<String, Vec<StoredBlock>>>,
    profiles: RwLock<HashMap<String, ExistingProfile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user's profile.
    pub async fn set_profile(&self, user_id: &str, profile: ExistingProfile) {
        self.profiles.write().await.insert(user_id.to_string(), profile);
    }

    /// A user's blocks in insertion order.
    pub async fn blocks(&self, user_id: &str) -> Vec<StoredBlock> {
        self.blocks
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl BlockStore for MemoryStore {
    async fn max_order(&self, user_id: &str) -> Result<Option<i64>> {
        let blocks = self.blocks.read().await;
        Ok(blocks
            .get(user_id)
            .and_then(|list| list.iter().map(|b| b.block.order).max()))
    }

    async fn existing_profile(&self, user_id: &str) -> Result<ExistingProfile> {
        Ok(self
            .profiles
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert_blocks(&self, user_id: &str, blocks: Vec<NewBlock>) -> Result<Vec<StoredBlock>> {
        let now = Utc::now();
        let stored: Vec<StoredBlock> = blocks
            .into_iter()
            .map(|block| StoredBlock {
                id: Uuid::new_v4(),
                user_id: user_id.to_string(),
                block,
                created_at: now,
            })
            .collect();

        self.blocks
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .extend(stored.iter().cloned());

        Ok(stored)
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles.entry(user_id.to_string()).or_default();

        if let Some(name) = update.name {
            profile.name = Some(name);
        }
        if let Some(bio) = update.bio {
            profile.bio = Some(bio);
        }
        if let Some(image) = update.image {
            profile.image = Some(image);
        }
        if let Some(location) = update.location {
            profile.location = Some(location);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::NormalizedBlock;

    fn result_with(blocks: Vec<NormalizedBlock>) -> ParseResult {
        ParseResult {
            blocks,
            ..ParseResult::default()
        }
    }

    #[test]
    fn plan_clamps_spans_and_names_untitled_blocks() {
        let mut wide = NormalizedBlock::at_index(BlockType::Image, 0);
        wide.grid_width = 9;
        wide.grid_height = 0;
        let mut titled = NormalizedBlock::at_index(BlockType::Link, 1);
        titled.title = Some("Home".into());
        let mut blank = NormalizedBlock::at_index(BlockType::Link, 2);
        blank.title = Some(String::new());

        let plan = ImportPlan::build(
            &result_with(vec![wide, titled, blank]),
            &ExistingProfile::default(),
            10,
            4,
        );

        assert_eq!((plan.blocks[0].grid_width, plan.blocks[0].grid_height), (4, 1));
        assert_eq!(plan.blocks[0].title, "Imported Block 1");
        assert_eq!(plan.blocks[1].title, "Home");
        assert_eq!(plan.blocks[2].title, "Imported Block 3");
        let orders: Vec<i64> = plan.blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![10, 11, 12]);
        assert!(plan.profile.is_none());
    }

    #[test]
    fn profile_merge_fills_gaps_and_replaces_bio() {
        let imported = NormalizedProfile {
            name: Some("Alice".into()),
            bio: Some("Hi".into()),
            avatar: Some("data:image/png;base64,AA".into()),
            location: Some(String::new()),
            ..Default::default()
        };

        let existing = ExistingProfile {
            name: Some("Al".into()),
            bio: Some("Old".into()),
            ..Default::default()
        };
        let update = ProfileUpdate::merge(&imported, &existing).unwrap();
        assert_eq!(update.name, None);
        assert_eq!(update.bio.as_deref(), Some("Hi"));
        assert_eq!(update.image.as_deref(), Some("data:image/png;base64,AA"));
        assert_eq!(update.location, None);

        let existing = ExistingProfile {
            image: Some("https://cdn/me.png".into()),
            ..Default::default()
        };
        let update = ProfileUpdate::merge(&imported, &existing).unwrap();
        assert_eq!(update.name.as_deref(), Some("Alice"));
        assert_eq!(update.image, None);
    }

    #[test]
    fn empty_profile_produces_no_update() {
        assert!(ProfileUpdate::merge(&NormalizedProfile::default(), &ExistingProfile::default()).is_none());
    }

    #[tokio::test]
    async fn apply_import_appends_after_existing_blocks() {
        let store = MemoryStore::new();
        let first = result_with(vec![
            NormalizedBlock::at_index(BlockType::Link, 0),
            NormalizedBlock::at_index(BlockType::Text, 1),
        ]);

        let summary = apply_import(&store, "u1", &first, 4).await.unwrap();
        assert_eq!(summary.imported, 2);
        assert!(!summary.profile_updated);

        apply_import(&store, "u1", &result_with(vec![NormalizedBlock::at_index(BlockType::Map, 0)]), 4)
            .await
            .unwrap();

        let blocks = store.blocks("u1").await;
        let orders: Vec<i64> = blocks.iter().map(|b| b.block.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_ne!(blocks[0].id, blocks[1].id);
        assert!(store.blocks("someone-else").await.is_empty());
    }

    #[tokio::test]
    async fn apply_import_updates_profile() {
        let store = MemoryStore::new();
        store
            .set_profile(
                "u1",
                ExistingProfile {
                    name: Some("Existing".into()),
                    ..Default::default()
                },
            )
            .await;

        let mut result = result_with(vec![]);
        result.profile.name = Some("Imported".into());
        result.profile.location = Some("Oslo".into());

        let summary = apply_import(&store, "u1", &result, 4).await.unwrap();
        assert!(summary.profile_updated);

        let profile = store.existing_profile("u1").await.unwrap();
        assert_eq!(profile.name.as_deref(), Some("Existing"));
        assert_eq!(profile.location.as_deref(), Some("Oslo"));
    }

    #[test]
    fn stored_block_serializes_flat() {
        let plan = ImportPlan::build(
            &result_with(vec![NormalizedBlock::at_index(BlockType::Github, 0)]),
            &ExistingProfile::default(),
            0,
            4,
        );
        let stored = StoredBlock {
            id: Uuid::nil(),
            user_id: "u1".into(),
            block: plan.blocks[0].clone(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["type"], "GITHUB");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["order"], 0);
    }
}
