use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::core::procedure::{swipe_and_check_match, Procedure, ProcedureScope, SWIPE_AND_CHECK_MATCH};
use crate::error::{Result, SwipeError};
use crate::services::store::SwipeStore;

/// Data held by the in-process store
#[derive(Debug, Default)]
struct MemoryData {
    strings: HashMap<String, String>,
    maps: HashMap<String, HashMap<String, String>>,
    sets: HashMap<String, HashSet<String>>,
}

impl ProcedureScope for MemoryData {
    fn map_set(&mut self, key: &str, field: &str, value: &str) {
        self.maps
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
    }

    fn map_get(&self, key: &str, field: &str) -> Option<String> {
        self.maps.get(key).and_then(|fields| fields.get(field)).cloned()
    }

    fn set_add(&mut self, key: &str, member: &str) -> bool {
        self.sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string())
    }
}

#[derive(Default)]
struct MemoryState {
    data: MemoryData,
    procedures: HashMap<String, Procedure>,
}

/// In-process swipe store
///
/// A single lock guards all data, so every operation and every procedure
/// invocation is serialized. Procedures must be registered before use,
/// mirroring how the Redis library has to be loaded.
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the store going down or coming back
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
        tracing::debug!("Memory store availability set to {}", available);
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SwipeError::Connection("memory store is unavailable".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SwipeStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        self.check_available()
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        let state = self.state.lock().await;
        Ok(state.data.strings.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        let mut state = self.state.lock().await;
        state.data.strings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn add_to_set(&self, key: &str, member: &str) -> Result<()> {
        self.check_available()?;
        let mut state = self.state.lock().await;
        state.data.set_add(key, member);
        Ok(())
    }

    async fn members_of(&self, key: &str) -> Result<BTreeSet<String>> {
        self.check_available()?;
        let state = self.state.lock().await;
        Ok(state
            .data
            .sets
            .get(key)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn run_atomic_procedure(
        &self,
        name: &str,
        keys: &[String],
        args: &[String],
    ) -> Result<i64> {
        self.check_available()?;
        let mut state = self.state.lock().await;
        let procedure = *state
            .procedures
            .get(name)
            .ok_or_else(|| SwipeError::Procedure(format!("Function not found: {}", name)))?;
        procedure(&mut state.data, keys, args)
    }

    async fn register_procedures(&self) -> Result<()> {
        self.check_available()?;
        let mut state = self.state.lock().await;
        state
            .procedures
            .insert(SWIPE_AND_CHECK_MATCH.to_string(), swipe_and_check_match as Procedure);
        tracing::info!("Registered procedure {} in memory store", SWIPE_AND_CHECK_MATCH);
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        self.check_available()?;
        let mut state = self.state.lock().await;
        state.data = MemoryData::default();
        Ok(())
    }
}
