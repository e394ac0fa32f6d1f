//! Consultation counters

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Running counts of consultations, emergencies, and matched conditions.
///
/// Only the response engine records into this. One instance per chat
/// session, plus one community-wide instance owned by the engine.
#[derive(Debug, Default)]
pub struct ConsultationStats {
    consultations: AtomicU64,
    emergencies: AtomicU64,
    conditions: Mutex<HashMap<&'static str, u64>>,
}

/// Point-in-time copy of [`ConsultationStats`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub consultations_provided: u64,
    pub emergency_preventions: u64,
    pub common_conditions: BTreeMap<String, u64>,
}

impl StatsSnapshot {
    /// Two-line summary shown beside the chat
    pub fn summary(&self) -> String {
        format!(
            "**Consultations:** {}\n**Emergencies Detected:** {}",
            self.consultations_provided, self.emergency_preventions
        )
    }
}

impl ConsultationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn record_consultation(&self) {
        self.consultations.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_emergency(&self) {
        self.emergencies.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_condition(&self, name: &'static str) {
        let mut conditions = self.conditions.lock().unwrap_or_else(PoisonError::into_inner);
        *conditions.entry(name).or_insert(0) += 1;
    }

    pub fn consultations(&self) -> u64 {
        self.consultations.load(Ordering::Relaxed)
    }

    pub fn emergencies(&self) -> u64 {
        self.emergencies.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let conditions = self.conditions.lock().unwrap_or_else(PoisonError::into_inner);
        StatsSnapshot {
            consultations_provided: self.consultations(),
            emergency_preventions: self.emergencies(),
            common_conditions: conditions
                .iter()
                .map(|(name, count)| ((*name).to_string(), *count))
                .collect(),
        }
    }

    pub fn reset(&self) {
        self.consultations.store(0, Ordering::Relaxed);
        self.emergencies.store(0, Ordering::Relaxed);
        self.conditions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
