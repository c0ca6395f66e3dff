//! Static armor catalog: jobs, slots, categories and upgrade paths.
//!
//! Catalog documents are JSON arrays, one per [`ArmorCategory`]. Records are
//! validated one at a time so a single bad entry never aborts the load; each
//! rejected record leaves a [`CatalogDiagnostic`] behind instead.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Every job the tracker knows about, in in-game menu order.
pub const JOBS: [&str; 22] = [
    "Warrior",
    "Monk",
    "White Mage",
    "Black Mage",
    "Red Mage",
    "Thief",
    "Paladin",
    "Dark Knight",
    "Beastmaster",
    "Bard",
    "Ranger",
    "Samurai",
    "Ninja",
    "Dragoon",
    "Summoner",
    "Blue Mage",
    "Corsair",
    "Puppetmaster",
    "Dancer",
    "Scholar",
    "Geomancer",
    "Rune Fencer",
];

/// Three-letter menu codes, index-aligned with [`JOBS`].
const JOB_CODES: [&str; 22] = [
    "WAR", "MNK", "WHM", "BLM", "RDM", "THF", "PLD", "DRK", "BST", "BRD", "RNG", "SAM", "NIN",
    "DRG", "SMN", "BLU", "COR", "PUP", "DNC", "SCH", "GEO", "RUN",
];

#[must_use]
pub fn is_known_job(job: &str) -> bool {
    JOBS.contains(&job)
}

/// Short code shown on job buttons, e.g. `"WAR"` for `"Warrior"`.
#[must_use]
pub fn job_code(job: &str) -> Option<&'static str> {
    JOBS.iter()
        .position(|known| *known == job)
        .map(|index| JOB_CODES[index])
}

/// One of the three independent armor progression families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArmorCategory {
    Artifact,
    Relic,
    Empyrean,
}

impl ArmorCategory {
    pub const ALL: [Self; 3] = [Self::Artifact, Self::Relic, Self::Empyrean];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Artifact => "Artifact",
            Self::Relic => "Relic",
            Self::Empyrean => "Empyrean",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

impl fmt::Display for ArmorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment slot, ordered the way slots are listed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    Head,
    Body,
    Hands,
    Legs,
    Feet,
}

impl Slot {
    pub const ALL: [Self; 5] = [Self::Head, Self::Body, Self::Hands, Self::Legs, Self::Feet];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::Body => "Body",
            Self::Hands => "Hands",
            Self::Legs => "Legs",
            Self::Feet => "Feet",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A material or condition needed to complete an upgrade step.
///
/// Catalog JSON spells these either as a bare string or as
/// `{ "item": ..., "quantity": ... }`. Both are normalized here, so callers
/// never inspect the raw shape again. A quantity of one (or less) is binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRequirement", into = "RawRequirement")]
pub enum Requirement {
    Binary { name: String },
    Quantified { name: String, target: u32 },
}

impl Requirement {
    #[must_use]
    pub fn binary(name: impl Into<String>) -> Self {
        Self::Binary { name: name.into() }
    }

    #[must_use]
    pub fn quantified(name: impl Into<String>, target: u32) -> Self {
        let name = name.into();
        if target <= 1 {
            Self::Binary { name }
        } else {
            Self::Quantified { name, target }
        }
    }

    /// Key under which progress for this requirement is stored.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Binary { name } | Self::Quantified { name, .. } => name,
        }
    }

    #[must_use]
    pub const fn target(&self) -> u32 {
        match self {
            Self::Binary { .. } => 1,
            Self::Quantified { target, .. } => *target,
        }
    }

    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::Binary { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawRequirement {
    Bare(String),
    Counted {
        item: String,
        #[serde(default = "default_quantity")]
        quantity: u32,
    },
}

const fn default_quantity() -> u32 {
    1
}

impl From<RawRequirement> for Requirement {
    fn from(raw: RawRequirement) -> Self {
        match raw {
            RawRequirement::Bare(name) => Self::Binary { name },
            RawRequirement::Counted { item, quantity } => Self::quantified(item, quantity),
        }
    }
}

impl From<Requirement> for RawRequirement {
    fn from(req: Requirement) -> Self {
        match req {
            Requirement::Binary { name } => Self::Bare(name),
            Requirement::Quantified { name, target } => Self::Counted {
                item: name,
                quantity: target,
            },
        }
    }
}

/// One upgrade transition, identified by its destination item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeStep {
    pub name: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "LinkURL", default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// A validated catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorPiece {
    pub job: String,
    pub category: ArmorCategory,
    pub slot: Slot,
    pub name: String,
    /// Zero for the base item.
    pub tier: u32,
    pub description: Option<String>,
    pub url: Option<String>,
    pub icon_url: Option<String>,
    pub upgrade_path: Vec<UpgradeStep>,
}

impl ArmorPiece {
    #[must_use]
    pub const fn is_base(&self) -> bool {
        self.tier == 0
    }

    #[must_use]
    pub fn step(&self, name: &str) -> Option<&UpgradeStep> {
        self.upgrade_path.iter().find(|step| step.name == name)
    }
}

/// Record shape as it appears in the catalog JSON, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Job", default)]
    job: Option<String>,
    #[serde(rename = "Slot", default)]
    slot: Option<String>,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Tier", default)]
    tier: u32,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "URL", default)]
    url: Option<String>,
    #[serde(rename = "LinkURL", default)]
    icon_url: Option<String>,
    #[serde(rename = "upgradePaths", default)]
    upgrade_paths: Vec<UpgradeStep>,
}

/// Why a catalog record was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingField(&'static str),
    UnknownJob(String),
    UnknownSlot(String),
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing {field}"),
            Self::UnknownJob(job) => write!(f, "unknown job '{job}'"),
            Self::UnknownSlot(slot) => write!(f, "unknown slot '{slot}'"),
            Self::Malformed(detail) => write!(f, "malformed record: {detail}"),
        }
    }
}

/// Non-fatal findings collected while loading the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogDiagnostic {
    SkippedRecord {
        category: ArmorCategory,
        index: usize,
        reason: SkipReason,
    },
    /// Step identity is the destination name, so a repeated name inside one
    /// job+category makes two steps share progress.
    DuplicateTierName {
        category: ArmorCategory,
        job: String,
        name: String,
    },
    CategoryFailed {
        category: ArmorCategory,
        message: String,
    },
}

impl fmt::Display for CatalogDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedRecord {
                category,
                index,
                reason,
            } => write!(f, "{category}[{index}] skipped: {reason}"),
            Self::DuplicateTierName {
                category,
                job,
                name,
            } => write!(f, "{category}/{job}: tier name '{name}' is used more than once"),
            Self::CategoryFailed { category, message } => {
                write!(f, "{category} failed to load: {message}")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{category} catalog is not valid JSON: {source}")]
    Parse {
        category: ArmorCategory,
        #[source]
        source: serde_json::Error,
    },
    #[error("{category} catalog is not an array")]
    NotAnArray { category: ArmorCategory },
    #[error("No armor data was loaded successfully")]
    NothingLoaded,
}

/// Read-only view of the catalog the progression and view layers depend on.
pub trait CatalogLookup {
    /// The tier-0 item for a slot.
    fn base_piece(&self, job: &str, category: ArmorCategory, slot: Slot) -> Option<&ArmorPiece>;

    /// Any record in the slot with exactly this name, regardless of tier.
    fn find_piece(
        &self,
        job: &str,
        category: ArmorCategory,
        slot: Slot,
        name: &str,
    ) -> Option<&ArmorPiece>;

    /// The record in the slot whose upgrade path contains a step with this name.
    fn find_step_owner(
        &self,
        job: &str,
        category: ArmorCategory,
        slot: Slot,
        step: &str,
    ) -> Option<(&ArmorPiece, &UpgradeStep)>;
}

/// Loaded, validated catalog grouped by job and category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pieces: BTreeMap<String, BTreeMap<ArmorCategory, Vec<ArmorPiece>>>,
}

impl Catalog {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Total number of records across jobs and categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Jobs with at least one record, sorted alphabetically.
    #[must_use]
    pub fn jobs(&self) -> Vec<&str> {
        self.pieces.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn pieces(&self, job: &str, category: ArmorCategory) -> &[ArmorPiece] {
        self.pieces
            .get(job)
            .and_then(|by_category| by_category.get(&category))
            .map_or(&[], Vec::as_slice)
    }

    fn in_slot(
        &self,
        job: &str,
        category: ArmorCategory,
        slot: Slot,
    ) -> impl Iterator<Item = &ArmorPiece> {
        self.pieces(job, category)
            .iter()
            .filter(move |piece| piece.slot == slot)
    }

    fn insert(&mut self, piece: ArmorPiece) {
        self.pieces
            .entry(piece.job.clone())
            .or_default()
            .entry(piece.category)
            .or_default()
            .push(piece);
    }
}

impl CatalogLookup for Catalog {
    fn base_piece(&self, job: &str, category: ArmorCategory, slot: Slot) -> Option<&ArmorPiece> {
        self.in_slot(job, category, slot).find(|piece| piece.is_base())
    }

    fn find_piece(
        &self,
        job: &str,
        category: ArmorCategory,
        slot: Slot,
        name: &str,
    ) -> Option<&ArmorPiece> {
        self.in_slot(job, category, slot)
            .find(|piece| piece.name == name)
    }

    fn find_step_owner(
        &self,
        job: &str,
        category: ArmorCategory,
        slot: Slot,
        step: &str,
    ) -> Option<(&ArmorPiece, &UpgradeStep)> {
        self.in_slot(job, category, slot)
            .find_map(|piece| piece.step(step).map(|found| (piece, found)))
    }
}

/// Result of a catalog load that produced at least some data.
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub diagnostics: Vec<CatalogDiagnostic>,
    pub failed_categories: Vec<ArmorCategory>,
}

impl CatalogLoad {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failed_categories.is_empty()
    }

    /// User-facing warning for a partial load.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        if self.is_partial() {
            let names: Vec<&str> = self
                .failed_categories
                .iter()
                .map(|c| c.as_str())
                .collect();
            Some(format!("Some data failed to load ({})", names.join(", ")))
        } else {
            None
        }
    }
}

/// Accumulates category documents into a [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
    diagnostics: Vec<CatalogDiagnostic>,
    failed: Vec<ArmorCategory>,
    tier_names: BTreeMap<(String, ArmorCategory), BTreeSet<String>>,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every document, recording failures instead of stopping at the first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NothingLoaded`] if no document produced a record.
    pub fn from_documents<'a, I>(documents: I) -> Result<CatalogLoad, CatalogError>
    where
        I: IntoIterator<Item = (ArmorCategory, &'a str)>,
    {
        let mut builder = Self::new();
        for (category, json) in documents {
            if let Err(err) = builder.add_category_json(category, json) {
                log::warn!("{category} catalog not loaded: {err}");
            }
        }
        builder.finish()
    }

    /// Parse one category document and add its valid records.
    ///
    /// Returns the number of records accepted. Individual bad records are
    /// skipped with a diagnostic.
    ///
    /// # Errors
    ///
    /// Returns an error (and records the category as failed) if the document
    /// is not JSON or not an array.
    pub fn add_category_json(
        &mut self,
        category: ArmorCategory,
        json: &str,
    ) -> Result<usize, CatalogError> {
        let parsed: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(source) => {
                let err = CatalogError::Parse { category, source };
                self.record_failure(category, err.to_string());
                return Err(err);
            }
        };
        let Value::Array(records) = parsed else {
            let err = CatalogError::NotAnArray { category };
            self.record_failure(category, err.to_string());
            return Err(err);
        };

        let mut accepted = 0;
        for (index, raw) in records.into_iter().enumerate() {
            match validate_record(category, raw) {
                Ok(piece) => {
                    self.check_tier_names(&piece);
                    self.catalog.insert(piece);
                    accepted += 1;
                }
                Err(reason) => {
                    log::warn!("{category}[{index}] skipped: {reason}");
                    self.diagnostics.push(CatalogDiagnostic::SkippedRecord {
                        category,
                        index,
                        reason,
                    });
                }
            }
        }
        log::debug!("loaded {accepted} {category} records");
        Ok(accepted)
    }

    /// Record a category that could not be fetched at all.
    pub fn record_failure(&mut self, category: ArmorCategory, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{category} failed to load: {message}");
        if !self.failed.contains(&category) {
            self.failed.push(category);
        }
        self.diagnostics
            .push(CatalogDiagnostic::CategoryFailed { category, message });
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NothingLoaded`] if the catalog is empty.
    pub fn finish(self) -> Result<CatalogLoad, CatalogError> {
        if self.catalog.is_empty() {
            return Err(CatalogError::NothingLoaded);
        }
        Ok(CatalogLoad {
            catalog: self.catalog,
            diagnostics: self.diagnostics,
            failed_categories: self.failed,
        })
    }

    fn check_tier_names(&mut self, piece: &ArmorPiece) {
        if !piece.is_base() {
            return;
        }
        let seen = self
            .tier_names
            .entry((piece.job.clone(), piece.category))
            .or_default();
        let names = std::iter::once(piece.name.as_str())
            .chain(piece.upgrade_path.iter().map(|step| step.name.as_str()));
        for name in names {
            if !seen.insert(name.to_owned()) {
                log::warn!(
                    "{}/{}: tier name '{name}' is used more than once",
                    piece.category,
                    piece.job
                );
                self.diagnostics.push(CatalogDiagnostic::DuplicateTierName {
                    category: piece.category,
                    job: piece.job.clone(),
                    name: name.to_owned(),
                });
            }
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

fn validate_record(category: ArmorCategory, raw: Value) -> Result<ArmorPiece, SkipReason> {
    let record: RawRecord =
        serde_json::from_value(raw).map_err(|err| SkipReason::Malformed(err.to_string()))?;
    let job = non_empty(record.job).ok_or(SkipReason::MissingField("Job"))?;
    let slot_name = non_empty(record.slot).ok_or(SkipReason::MissingField("Slot"))?;
    let name = non_empty(record.name).ok_or(SkipReason::MissingField("Name"))?;
    if !is_known_job(&job) {
        return Err(SkipReason::UnknownJob(job));
    }
    let slot = Slot::parse(&slot_name).ok_or(SkipReason::UnknownSlot(slot_name))?;

    Ok(ArmorPiece {
        job,
        category,
        slot,
        name,
        tier: record.tier,
        description: non_empty(record.description),
        url: non_empty(record.url),
        icon_url: non_empty(record.icon_url),
        upgrade_path: record.upgrade_paths,
    })
}
