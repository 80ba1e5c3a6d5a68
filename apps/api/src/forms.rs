//! Form boundary: field-level validation and id assignment.
//!
//! The store accepts anything; these checks run before a mutator is called,
//! the same rules each builder form enforces on its inputs. Creating an entity
//! requires every mandatory field. Editing only checks the fields present in
//! the patch, so partial edits stay possible.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    Education, EducationPatch, Entity, EntityId, Experience, ExperiencePatch, PersonalInfoPatch,
    Project, ProjectPatch, Skill, SkillLevel, SkillPatch,
};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("static email regex")
});

/// Body of a create request: the entity fields plus an optional caller id.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntity<P> {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(flatten)]
    pub fields: P,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    #[cfg(test)]
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Edit,
}

struct Checker {
    mode: Mode,
    errors: Vec<FieldError>,
}

impl Checker {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    /// Mandatory on create; on edit only a present-but-blank value fails.
    fn required(&mut self, field: &'static str, value: Option<&str>, message: &'static str) {
        let blank = value.map_or(true, |v| v.trim().is_empty());
        match (self.mode, value) {
            (Mode::Create, _) if blank => self.fail(field, message),
            (Mode::Edit, Some(_)) if blank => self.fail(field, message),
            _ => {}
        }
    }

    fn email(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            if !EMAIL_RE.is_match(v) {
                self.fail(field, "Invalid email address");
            }
        }
    }

    /// Optional links must be absolute http(s) URLs when filled in.
    fn url(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            let lower = v.to_ascii_lowercase();
            let rest = lower
                .strip_prefix("https://")
                .or_else(|| lower.strip_prefix("http://"));
            if !matches!(rest, Some(host) if !host.is_empty() && !host.contains(' ')) {
                self.fail(field, "Must be a valid URL");
            }
        }
    }

    fn finish(self) -> Result<(), FormErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors(self.errors))
        }
    }
}

/// Keeps a caller-supplied id unless another entry in `existing` already
/// holds it. A missing or blank id gets a fresh v4 uuid.
fn assign_id<E: Entity>(
    id: Option<EntityId>,
    existing: &[E],
) -> Result<EntityId, FormErrors> {
    match id.filter(|id| !id.trim().is_empty()) {
        Some(id) if existing.iter().any(|e| e.id() == id) => {
            let taken = FieldError {
                field: "id",
                message: "An entry with this id already exists",
            };
            Err(FormErrors(vec![taken]))
        }
        Some(id) => Ok(id),
        None => Ok(Uuid::new_v4().to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

pub fn check_personal_info(patch: &PersonalInfoPatch) -> Result<(), FormErrors> {
    let mut c = Checker::new(Mode::Edit);
    c.required("firstName", patch.first_name.as_deref(), "First name is required");
    c.required("lastName", patch.last_name.as_deref(), "Last name is required");
    c.required("email", patch.email.as_deref(), "Email is required");
    c.email("email", patch.email.as_deref());
    c.required("title", patch.title.as_deref(), "Professional title is required");
    c.required("summary", patch.summary.as_deref(), "Professional summary is required");
    c.url("website", patch.website.as_deref());
    c.url("linkedin", patch.linkedin.as_deref());
    c.url("github", patch.github.as_deref());
    c.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

fn education_rules(mode: Mode, p: &EducationPatch) -> Result<(), FormErrors> {
    let mut c = Checker::new(mode);
    c.required("school", p.school.as_deref(), "School name is required");
    c.required("degree", p.degree.as_deref(), "Degree is required");
    c.required("fieldOfStudy", p.field_of_study.as_deref(), "Field of study is required");
    c.required("startDate", p.start_date.as_deref(), "Start date is required");
    c.required("endDate", p.end_date.as_deref(), "End date is required");
    c.finish()
}

pub fn new_education(
    req: NewEntity<EducationPatch>,
    existing: &[Education],
) -> Result<Education, FormErrors> {
    education_rules(Mode::Create, &req.fields)?;
    let id = assign_id(req.id, existing)?;
    Ok(Education::create(id, req.fields))
}

pub fn check_education_edit(patch: &EducationPatch) -> Result<(), FormErrors> {
    education_rules(Mode::Edit, patch)
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

fn experience_rules(mode: Mode, p: &ExperiencePatch) -> Result<(), FormErrors> {
    let mut c = Checker::new(mode);
    c.required("company", p.company.as_deref(), "Company name is required");
    c.required("position", p.position.as_deref(), "Position is required");
    c.required("startDate", p.start_date.as_deref(), "Start date is required");
    if !p.current.unwrap_or(false) {
        c.required("endDate", p.end_date.as_deref(), "End date is required");
    }
    c.required("description", p.description.as_deref(), "Description is required");
    c.finish()
}

pub fn new_experience(
    req: NewEntity<ExperiencePatch>,
    existing: &[Experience],
) -> Result<Experience, FormErrors> {
    experience_rules(Mode::Create, &req.fields)?;
    let id = assign_id(req.id, existing)?;
    Ok(Experience::create(id, req.fields))
}

pub fn check_experience_edit(patch: &ExperiencePatch) -> Result<(), FormErrors> {
    experience_rules(Mode::Edit, patch)
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

fn skill_rules(mode: Mode, p: &SkillPatch) -> Result<(), FormErrors> {
    let mut c = Checker::new(mode);
    c.required("name", p.name.as_deref(), "Skill name is required");
    let range = i64::from(SkillLevel::MIN)..=i64::from(SkillLevel::MAX);
    match (mode, p.level) {
        (Mode::Create, None) => c.fail("level", "Skill level is required"),
        (_, Some(level)) if !range.contains(&level) => {
            c.fail("level", "Skill level must be between 1 and 5")
        }
        _ => {}
    }
    c.finish()
}

pub fn new_skill(
    req: NewEntity<SkillPatch>,
    existing: &[Skill],
) -> Result<Skill, FormErrors> {
    skill_rules(Mode::Create, &req.fields)?;
    let id = assign_id(req.id, existing)?;
    Ok(Skill::create(id, req.fields))
}

pub fn check_skill_edit(patch: &SkillPatch) -> Result<(), FormErrors> {
    skill_rules(Mode::Edit, patch)
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

fn project_rules(mode: Mode, p: &ProjectPatch) -> Result<(), FormErrors> {
    let mut c = Checker::new(mode);
    c.required("title", p.title.as_deref(), "Project title is required");
    c.url("link", p.link.as_deref());
    c.required("technologies", p.technologies.as_deref(), "Technologies are required");
    c.required("description", p.description.as_deref(), "Description is required");
    c.finish()
}

pub fn new_project(
    req: NewEntity<ProjectPatch>,
    existing: &[Project],
) -> Result<Project, FormErrors> {
    project_rules(Mode::Create, &req.fields)?;
    let id = assign_id(req.id, existing)?;
    Ok(Project::create(id, req.fields))
}

pub fn check_project_edit(patch: &ProjectPatch) -> Result<(), FormErrors> {
    project_rules(Mode::Edit, patch)
}
