use super::codec;
use super::model::{Garden, GrowthPolicy};
use crate::error::Result;
use crate::events::Growth;
use crate::storage::KvStore;

/// Why `load` produced a default garden instead of the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Nothing stored under the key yet (first run).
    Missing,
    /// The store itself could not be read.
    Unreadable(String),
    /// A value exists but does not decode as the configured representation.
    Undecodable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Restored,
    Defaulted(FallbackReason),
}

/// Owns the loaded garden and writes it back after every growth event.
pub struct GardenStore<S: KvStore> {
    store: S,
    key: String,
    policy: GrowthPolicy,
    garden: Garden,
    outcome: LoadOutcome,
}

impl<S: KvStore> GardenStore<S> {
    /// Read the garden stored under `key`, or start from the policy's default.
    ///
    /// Never fails: missing, unreadable and malformed data all fall back to the
    /// default garden. The reason is kept in [`Self::load_outcome`].
    pub fn load(store: S, key: impl Into<String>, policy: GrowthPolicy) -> Self {
        let key = key.into();
        let (garden, outcome) = match store.get(&key) {
            Ok(Some(raw)) => match codec::decode(&raw, &policy) {
                Ok(garden) => (garden, LoadOutcome::Restored),
                Err(e) => (
                    policy.default_garden(),
                    LoadOutcome::Defaulted(FallbackReason::Undecodable(e.to_string())),
                ),
            },
            Ok(None) => (
                policy.default_garden(),
                LoadOutcome::Defaulted(FallbackReason::Missing),
            ),
            Err(e) => (
                policy.default_garden(),
                LoadOutcome::Defaulted(FallbackReason::Unreadable(e.to_string())),
            ),
        };

        match &outcome {
            LoadOutcome::Restored => tracing::debug!(%key, "garden restored"),
            LoadOutcome::Defaulted(FallbackReason::Missing) => {
                tracing::debug!(%key, "no stored garden, starting fresh")
            }
            LoadOutcome::Defaulted(reason) => {
                tracing::warn!(%key, ?reason, "stored garden unusable, starting fresh")
            }
        }

        Self {
            store,
            key,
            policy,
            garden,
            outcome,
        }
    }

    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn max_stage(&self) -> u32 {
        match self.policy {
            GrowthPolicy::Staged { max_stage, .. } => max_stage,
            GrowthPolicy::Flat => 0,
        }
    }

    pub fn is_full(&self) -> bool {
        self.garden.is_full(self.max_stage())
    }

    /// Apply one growth event and persist it.
    ///
    /// Returns `None` (and writes nothing) when every plot is already mature.
    /// A failed write is logged; the growth stays applied in memory.
    pub fn record_growth(&mut self) -> Option<Growth> {
        let growth = self.garden.grow(self.max_stage());
        match &growth {
            Some(growth) => {
                tracing::info!(?growth, "garden grew");
                if let Err(e) = self.persist() {
                    tracing::warn!(key = %self.key, error = %e, "failed to persist garden");
                }
            }
            None => tracing::info!("garden is fully grown, growth ignored"),
        }
        growth
    }

    /// Write the current garden under the configured key.
    pub fn persist(&mut self) -> Result<()> {
        let encoded = codec::encode(&self.garden)?;
        self.store.set(&self.key, &encoded)?;
        Ok(())
    }

    /// Replace the garden with a fresh default and persist it.
    pub fn clear(&mut self) -> Result<()> {
        self.garden = self.policy.default_garden();
        self.persist()
    }
}
