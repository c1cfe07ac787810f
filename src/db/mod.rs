//! Durable local store for plans and chats.
//!
//! SQLite is used as a plain document store: each collection lives under one
//! key in the `documents` table and is rewritten as a whole JSON document on
//! every mutation. That keeps writes trivially atomic for a single-writer,
//! low-volume store (tens of plans, at most a few hundred sessions each).
//! There is no optimistic concurrency token; the last writer wins.
//!
//! Reads fail soft: a missing, unreadable, or corrupted document is treated
//! as an empty collection and logged, never surfaced to the caller.

mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::*;

const PLANS_KEY: &str = "study-plans";
const CHATS_KEY: &str = "chats";

/// Chats beyond the most recently updated 50 are dropped on write.
const MAX_CHATS: usize = 50;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> anyhow::Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "studyplan")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("studyplan.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> anyhow::Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Document access
    // ============================================================

    fn read_document(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.query_row(
            "SELECT value FROM documents WHERE key = ?",
            [key],
            |row| row.get(0),
        )
        .optional()
        .map_err(Error::StorageRead)
    }

    fn write_document(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO documents (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, Utc::now().to_rfc3339()),
        )
        .map_err(Error::StorageWrite)?;
        Ok(())
    }

    /// Read a whole collection, falling back to empty on any read or
    /// deserialization failure. Corruption must never crash the caller.
    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.read_document(key) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!("Error reading {key} collection: {err}");
                return Vec::new();
            }
        };
        let Some(raw) = raw else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::error!("Error decoding {key} collection: {err}");
                Vec::new()
            }
        }
    }

    fn store_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let encoded = serde_json::to_string(items).map_err(Error::Encode)?;
        self.write_document(key, &encoded)
    }

    // ============================================================
    // Plan operations
    // ============================================================

    /// Upsert a plan by id. A full replace of the stored record; plans carry
    /// no field that survives an overwrite the way chat pins do.
    pub fn save_plan(&self, plan: &Plan) -> Result<()> {
        let mut plans = self.load_collection::<Plan>(PLANS_KEY);
        match plans.iter_mut().find(|p| p.id == plan.id) {
            Some(existing) => *existing = plan.clone(),
            None => plans.push(plan.clone()),
        }
        self.store_collection(PLANS_KEY, &plans)
    }

    pub fn get_all_plans(&self) -> Vec<Plan> {
        self.load_collection(PLANS_KEY)
    }

    pub fn get_plan(&self, id: Uuid) -> Option<Plan> {
        self.get_all_plans().into_iter().find(|p| p.id == id)
    }

    /// Remove a plan by id. Returns whether it existed; deleting an absent
    /// plan is a no-op.
    pub fn delete_plan(&self, id: Uuid) -> Result<bool> {
        let mut plans = self.load_collection::<Plan>(PLANS_KEY);
        let before = plans.len();
        plans.retain(|p| p.id != id);
        let removed = plans.len() < before;
        self.store_collection(PLANS_KEY, &plans)?;
        Ok(removed)
    }

    /// Merge a partial update into one schedule item and refresh the plan's
    /// `updated_at`.
    ///
    /// Best effort: a missing plan or item is logged and ignored, and a
    /// failing write is swallowed — local cache-only consistency is
    /// acceptable for session toggles.
    pub fn update_schedule_item(
        &self,
        plan_id: Uuid,
        item_id: Uuid,
        updates: UpdateScheduleItemInput,
    ) {
        let mut plans = self.load_collection::<Plan>(PLANS_KEY);
        let Some(plan) = plans.iter_mut().find(|p| p.id == plan_id) else {
            tracing::warn!(%plan_id, "schedule item update for unknown plan");
            return;
        };
        let Some(item) = plan.schedule.iter_mut().find(|i| i.id == item_id) else {
            tracing::warn!(%plan_id, %item_id, "schedule item update for unknown item");
            return;
        };

        if let Some(completed) = updates.completed {
            item.completed = completed;
        }
        if let Some(notes) = updates.notes {
            item.notes = Some(notes);
        }
        plan.updated_at = Utc::now();

        if let Err(err) = self.store_collection(PLANS_KEY, &plans) {
            tracing::error!("Error updating schedule item: {err}");
        }
    }

    // ============================================================
    // Chat operations
    // ============================================================

    /// Upsert a chat by id. When the incoming record leaves `pinned` unset,
    /// the stored pin state survives the overwrite.
    pub fn save_chat(&self, chat: &StoredChat) -> Result<()> {
        let mut chats = self.load_collection::<StoredChat>(CHATS_KEY);
        match chats.iter_mut().find(|c| c.id == chat.id) {
            Some(existing) => {
                let pinned = chat.pinned.or(existing.pinned);
                *existing = StoredChat {
                    pinned,
                    ..chat.clone()
                };
            }
            None => chats.push(chat.clone()),
        }
        self.store_chats(chats)
    }

    pub fn load_chat(&self, id: Uuid) -> Option<StoredChat> {
        self.load_collection::<StoredChat>(CHATS_KEY)
            .into_iter()
            .find(|c| c.id == id)
    }

    pub fn get_all_chats(&self) -> Vec<StoredChat> {
        let mut chats = self.load_collection::<StoredChat>(CHATS_KEY);
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        chats
    }

    pub fn delete_chat(&self, id: Uuid) -> Result<bool> {
        let mut chats = self.load_collection::<StoredChat>(CHATS_KEY);
        let before = chats.len();
        chats.retain(|c| c.id != id);
        let removed = chats.len() < before;
        self.store_chats(chats)?;
        Ok(removed)
    }

    /// Best effort, like [`Self::update_schedule_item`].
    pub fn update_chat_title(&self, id: Uuid, title: &str) {
        self.update_chat(id, |chat| chat.title = title.to_string());
    }

    /// Best effort, like [`Self::update_schedule_item`].
    pub fn update_chat_pinned(&self, id: Uuid, pinned: bool) {
        self.update_chat(id, |chat| chat.pinned = Some(pinned));
    }

    fn update_chat(&self, id: Uuid, apply: impl FnOnce(&mut StoredChat)) {
        let mut chats = self.load_collection::<StoredChat>(CHATS_KEY);
        let Some(chat) = chats.iter_mut().find(|c| c.id == id) else {
            tracing::warn!(chat_id = %id, "update for unknown chat");
            return;
        };
        apply(chat);
        chat.updated_at = Utc::now();
        if let Err(err) = self.store_chats(chats) {
            tracing::error!("Error updating chat: {err}");
        }
    }

    /// Persist chats newest-first, keeping only the most recent [`MAX_CHATS`].
    fn store_chats(&self, mut chats: Vec<StoredChat>) -> Result<()> {
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        chats.truncate(MAX_CHATS);
        self.store_collection(CHATS_KEY, &chats)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}
