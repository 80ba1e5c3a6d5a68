use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::forms::{self, NewEntity};
use crate::models::{
    Education, EducationPatch, Experience, ExperiencePatch, PersonalInfoPatch, Project,
    ProjectPatch, ResumeDocument, Skill, SkillPatch, TemplateChoice,
};
use crate::state::AppState;
use crate::wizard::WizardStatus;

#[derive(Serialize)]
pub struct ResumeResponse {
    pub resume: ResumeDocument,
    pub wizard: WizardStatus,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeResponse> {
    let resume = state.store.snapshot().await;
    let wizard = WizardStatus::at(resume.current_step);
    Json(ResumeResponse { resume, wizard })
}

/// PATCH /api/v1/resume/personal-info
pub async fn handle_set_personal_info(
    State(state): State<AppState>,
    Json(patch): Json<PersonalInfoPatch>,
) -> Result<Json<ResumeDocument>, AppError> {
    forms::check_personal_info(&patch)?;
    state.store.set_personal_info(patch).await;
    Ok(Json(state.store.snapshot().await))
}

#[derive(Deserialize)]
pub struct TemplateRequest {
    pub template: String,
}

/// PUT /api/v1/resume/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let choice: TemplateChoice = req.template.parse().map_err(AppError::Validation)?;
    state.store.set_template(choice).await;
    Ok(Json(state.store.snapshot().await))
}

/// POST /api/v1/resume/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<ResumeDocument> {
    state.store.reset().await;
    Json(state.store.snapshot().await)
}

// Create / edit / delete handlers for one collection. `$module` is also the
// document field holding the collection. Edits and deletes of an unknown id
// succeed without changing anything.
macro_rules! collection_handlers {
    (
        $module:ident, $entity:ty, $patch:ty,
        new: $new:path, check_edit: $check:path,
        add: $add:ident, update: $update:ident, remove: $remove:ident
    ) => {
        pub mod $module {
            use super::*;

            pub async fn create(
                State(state): State<AppState>,
                Json(req): Json<NewEntity<$patch>>,
            ) -> Result<(StatusCode, Json<$entity>), AppError> {
                let current = state.store.snapshot().await;
                let entity = $new(req, &current.$module)?;
                state.store.$add(entity.clone()).await;
                Ok((StatusCode::CREATED, Json(entity)))
            }

            pub async fn update(
                State(state): State<AppState>,
                Path(id): Path<String>,
                Json(patch): Json<$patch>,
            ) -> Result<Json<ResumeDocument>, AppError> {
                $check(&patch)?;
                state.store.$update(&id, patch).await;
                Ok(Json(state.store.snapshot().await))
            }

            pub async fn remove(
                State(state): State<AppState>,
                Path(id): Path<String>,
            ) -> Json<ResumeDocument> {
                state.store.$remove(&id).await;
                Json(state.store.snapshot().await)
            }
        }
    };
}

collection_handlers!(
    education, Education, EducationPatch,
    new: forms::new_education, check_edit: forms::check_education_edit,
    add: add_education, update: update_education, remove: remove_education
);

collection_handlers!(
    experience, Experience, ExperiencePatch,
    new: forms::new_experience, check_edit: forms::check_experience_edit,
    add: add_experience, update: update_experience, remove: remove_experience
);

collection_handlers!(
    skills, Skill, SkillPatch,
    new: forms::new_skill, check_edit: forms::check_skill_edit,
    add: add_skill, update: update_skill, remove: remove_skill
);

collection_handlers!(
    projects, Project, ProjectPatch,
    new: forms::new_project, check_edit: forms::check_project_edit,
    add: add_project, update: update_project, remove: remove_project
);
