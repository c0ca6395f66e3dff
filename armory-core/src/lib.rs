//! Armory Tracker Core
//!
//! Platform-agnostic progression engine for armor upgrade chains.
//! This crate provides the catalog model, per-character progression state and
//! persistence contract without UI or platform-specific dependencies.

pub mod catalog;
pub mod character;
pub mod progress;
pub mod progression;
pub mod registry;
pub mod storage;
pub mod tracker;
pub mod view;

// Re-export commonly used types
pub use catalog::{
    ArmorCategory, ArmorPiece, Catalog, CatalogBuilder, CatalogDiagnostic, CatalogError,
    CatalogLoad, CatalogLookup, JOBS, Requirement, SkipReason, Slot, UpgradeStep, is_known_job,
    job_code,
};
pub use character::{Character, CharacterId};
pub use progress::{
    CompletionTree, JobTree, ProgressionTree, RequirementState, StepProgress, TierPointerTree,
    TierPointers,
};
pub use progression::{CompletionOutcome, ProgressState, progress_percent};
pub use registry::{CharacterRegistry, LEGACY_CHARACTER_NAME};
pub use storage::{KeyValueStore, LoadedRecords, MemoryStore, StorageError};
pub use tracker::{Action, StepTarget, StorageKeys, Tracker, TrackerConfig};
pub use view::{
    CharacterSummary, RequirementView, SlotView, StepView, character_list, job_views, slot_view,
};
