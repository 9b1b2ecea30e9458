//! Fact Repository: the single current résumé record plus built-in fallbacks.
//!
//! The record is swapped as a whole behind a lock; readers take a
//! `FactSnapshot` and never observe a half-installed record.

pub mod defaults;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeRecord};

#[derive(Debug, Default)]
pub struct FactRepository {
    current: RwLock<Option<Arc<ResumeRecord>>>,
}

impl FactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current record, returning the one it displaced.
    pub fn install(&self, record: ResumeRecord) -> Option<Arc<ResumeRecord>> {
        self.current.write().replace(Arc::new(record))
    }

    pub fn current(&self) -> Option<Arc<ResumeRecord>> {
        self.current.read().clone()
    }

    /// A consistent view of the repository as of now.
    pub fn snapshot(&self) -> FactSnapshot {
        FactSnapshot {
            record: self.current(),
        }
    }

    pub fn skills_or_fallback(&self) -> Vec<String> {
        self.snapshot().skills_or_fallback()
    }

    pub fn experience_or_fallback(&self) -> Vec<ExperienceEntry> {
        self.snapshot().experience_or_fallback()
    }

    pub fn education_or_fallback(&self) -> Vec<EducationEntry> {
        self.snapshot().education_or_fallback()
    }
}

/// Immutable view of the record a single answer is built from.
#[derive(Debug, Clone, Default)]
pub struct FactSnapshot {
    record: Option<Arc<ResumeRecord>>,
}

impl FactSnapshot {
    pub fn from_record(record: ResumeRecord) -> Self {
        Self {
            record: Some(Arc::new(record)),
        }
    }

    pub fn record(&self) -> Option<&ResumeRecord> {
        self.record.as_deref()
    }

    /// Raw résumé text, empty before any upload.
    pub fn raw_text(&self) -> &str {
        self.record().map_or("", |r| r.raw_text.as_str())
    }

    pub fn skills_or_fallback(&self) -> Vec<String> {
        match self.record() {
            Some(r) if !r.skills.is_empty() => r.skills.clone(),
            _ => defaults::DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn experience_or_fallback(&self) -> Vec<ExperienceEntry> {
        match self.record() {
            Some(r) if !r.experience.is_empty() => r.experience.clone(),
            _ => defaults::default_experience(),
        }
    }

    pub fn education_or_fallback(&self) -> Vec<EducationEntry> {
        match self.record() {
            Some(r) if !r.education.is_empty() => r.education.clone(),
            _ => defaults::default_education(),
        }
    }
}
