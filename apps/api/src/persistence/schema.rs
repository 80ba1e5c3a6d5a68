//! Versioned envelope for the persisted resume.
//!
//! ```json
//! { "version": 1, "state": { "personalInfo": {...}, "education": [...], ... } }
//! ```
//!
//! Decoding never trusts the shape: every field is read individually and
//! falls back to its initial-state value when missing or mistyped. Version 0
//! is the original browser layout (same field names, same nesting).

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    Education, Experience, PersonalInfo, Project, ResumeDocument, Skill, SkillLevel,
    TemplateChoice,
};

pub const SCHEMA_VERSION: u64 = 1;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("persisted record is not a JSON object")]
    NotAnObject,
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    state: &'a ResumeDocument,
}

pub fn encode(document: &ResumeDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Envelope {
        version: SCHEMA_VERSION,
        state: document,
    })
}

pub fn decode(raw: &str) -> Result<ResumeDocument, SchemaError> {
    let value: Value = serde_json::from_str(raw)?;
    let root = value.as_object().ok_or(SchemaError::NotAnObject)?;

    // v0 (browser layout) and v1 share field names; only the envelope differs,
    // so both hydrate the same way.
    let version = root.get("version").and_then(Value::as_u64).unwrap_or(0);
    if version == 0 {
        debug!("Reading v0 resume record");
    } else if version > SCHEMA_VERSION {
        debug!("Persisted schema v{version} is newer than v{SCHEMA_VERSION}; reading known fields");
    }

    // A bare state object (no envelope) is accepted as well.
    let state = match root.get("state") {
        Some(Value::Object(state)) => state,
        Some(_) => return Ok(ResumeDocument::default()),
        None => root,
    };

    Ok(hydrate(state))
}

/// Builds a document from a state object, filling every missing or mistyped
/// field with its default.
pub fn hydrate(state: &Map<String, Value>) -> ResumeDocument {
    let defaults = ResumeDocument::default();

    let personal_info = state
        .get("personalInfo")
        .and_then(Value::as_object)
        .map(hydrate_personal_info)
        .unwrap_or_default();

    let selected_template = state
        .get("selectedTemplate")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<TemplateChoice>().ok())
        .unwrap_or(defaults.selected_template);

    let current_step = match state.get("currentStep") {
        Some(v) => v
            .as_u64()
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or(0),
        None => defaults.current_step,
    };

    ResumeDocument {
        personal_info,
        education: hydrate_collection(state, "education", |obj, id| Education {
            id,
            school: text(obj, "school"),
            degree: text(obj, "degree"),
            field_of_study: text(obj, "fieldOfStudy"),
            start_date: text(obj, "startDate"),
            end_date: text(obj, "endDate"),
            description: text(obj, "description"),
        }),
        experience: hydrate_collection(state, "experience", |obj, id| Experience {
            id,
            company: text(obj, "company"),
            position: text(obj, "position"),
            location: text(obj, "location"),
            start_date: text(obj, "startDate"),
            end_date: text(obj, "endDate"),
            current: obj.get("current").and_then(Value::as_bool).unwrap_or(false),
            description: text(obj, "description"),
        }),
        skills: hydrate_collection(state, "skills", |obj, id| Skill {
            id,
            name: text(obj, "name"),
            level: obj
                .get("level")
                .and_then(Value::as_i64)
                .map(SkillLevel::new)
                .unwrap_or_default(),
        }),
        projects: hydrate_collection(state, "projects", |obj, id| Project {
            id,
            title: text(obj, "title"),
            description: text(obj, "description"),
            link: text(obj, "link"),
            technologies: text(obj, "technologies"),
        }),
        selected_template,
        current_step,
    }
}

fn hydrate_personal_info(obj: &Map<String, Value>) -> PersonalInfo {
    PersonalInfo {
        first_name: text(obj, "firstName"),
        last_name: text(obj, "lastName"),
        email: text(obj, "email"),
        phone: text(obj, "phone"),
        address: text(obj, "address"),
        city: text(obj, "city"),
        state: text(obj, "state"),
        zip_code: text(obj, "zipCode"),
        country: text(obj, "country"),
        title: text(obj, "title"),
        summary: text(obj, "summary"),
        website: text(obj, "website"),
        linkedin: text(obj, "linkedin"),
        github: text(obj, "github"),
    }
}

/// Elements that are not objects or lack a string id are dropped; order of
/// the survivors is kept. Repeated ids are restored as written so that the
/// document reads back exactly as it was saved.
fn hydrate_collection<T>(
    state: &Map<String, Value>,
    key: &str,
    build: impl Fn(&Map<String, Value>, String) -> T,
) -> Vec<T> {
    let Some(items) = state.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| {
            let id = obj.get("id").and_then(Value::as_str)?;
            Some(build(obj, id.to_string()))
        })
        .collect()
}

fn text(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}
