use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque client-generated identifier of a repeated entity.
pub type EntityId = String;

/// Copies every `Some` field of a patch onto the target.
macro_rules! merge_fields {
    ($target:expr, $patch:ident; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info (singleton)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub title: String,
    pub summary: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn merge(&mut self, patch: PersonalInfoPatch) {
        merge_fields!(self, patch;
            first_name, last_name, email, phone, address, city, state, zip_code,
            country, title, summary, website, linkedin, github,
        );
    }
}

/// Partial update for [`PersonalInfo`]; absent fields keep their prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfoPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Repeated entities
// ────────────────────────────────────────────────────────────────────────────

/// A record inside one of the ordered resume collections.
///
/// The identifier is fixed at creation; patches carry no id field, so a merge
/// can never change an entity's identity.
pub trait Entity: Clone {
    type Patch: Clone;

    /// An entity with the given id and every other field empty.
    fn blank(id: EntityId) -> Self;

    fn id(&self) -> &str;

    /// Shallow-merges the `Some` fields of `patch` into `self`.
    fn merge(&mut self, patch: Self::Patch);

    /// A new entity built from `fields`; absent fields stay empty.
    fn create(id: EntityId, fields: Self::Patch) -> Self {
        let mut entity = Self::blank(id);
        entity.merge(fields);
        entity
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: EntityId,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationPatch {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

impl Entity for Education {
    type Patch = EducationPatch;

    fn blank(id: EntityId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&mut self, patch: EducationPatch) {
        merge_fields!(self, patch;
            school, degree, field_of_study, start_date, end_date, description,
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: EntityId,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// When set, renderers show "Present" instead of `end_date`.
    pub current: bool,
    pub description: String,
}

impl Experience {
    /// End date as shown on a rendered resume.
    pub fn display_end(&self) -> &str {
        if self.current {
            "Present"
        } else {
            &self.end_date
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl Entity for Experience {
    type Patch = ExperiencePatch;

    fn blank(id: EntityId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&mut self, patch: ExperiencePatch) {
        merge_fields!(self, patch;
            company, position, location, start_date, end_date, current, description,
        );
    }
}

/// Proficiency on a 1–5 scale. Out-of-range input is clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SkillLevel(u8);

impl SkillLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: EntityId,
    pub name: String,
    pub level: SkillLevel,
}

/// `level` stays raw so the form layer can reject out-of-range values before
/// the store clamps them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillPatch {
    pub name: Option<String>,
    pub level: Option<i64>,
}

impl Entity for Skill {
    type Patch = SkillPatch;

    fn blank(id: EntityId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&mut self, patch: SkillPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(level) = patch.level {
            self.level = SkillLevel::new(level);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub link: String,
    /// Comma-delimited list kept as a single string.
    pub technologies: String,
}

impl Project {
    pub fn technology_list(&self) -> Vec<&str> {
        self.technologies
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub technologies: Option<String>,
}

impl Entity for Project {
    type Patch = ProjectPatch;

    fn blank(id: EntityId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&mut self, patch: ProjectPatch) {
        merge_fields!(self, patch; title, description, link, technologies);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template choice
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateChoice {
    #[default]
    Modern,
    Professional,
    Minimal,
    Creative,
}

impl TemplateChoice {
    pub const ALL: [TemplateChoice; 4] = [
        TemplateChoice::Modern,
        TemplateChoice::Professional,
        TemplateChoice::Minimal,
        TemplateChoice::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateChoice::Modern => "modern",
            TemplateChoice::Professional => "professional",
            TemplateChoice::Minimal => "minimal",
            TemplateChoice::Creative => "creative",
        }
    }
}

impl fmt::Display for TemplateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateChoice::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown template '{s}'"))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate root
// ────────────────────────────────────────────────────────────────────────────

/// The full resume plus wizard navigation state. Owned by the resume store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub selected_template: TemplateChoice,
    pub current_step: u32,
}
