//! Resume Store, the single source of truth for the resume document.
//!
//! Constructed once at startup and shared through `AppState`. Every mutator
//! applies its change and mirrors the whole document to durable storage while
//! holding the document lock, so callers never observe a half-applied write.
//! No mutator can fail: unknown ids are silent no-ops and storage errors are
//! logged by the persistence layer.

pub mod collection;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::models::{
    Education, EducationPatch, Experience, ExperiencePatch, PersonalInfoPatch, Project,
    ProjectPatch, ResumeDocument, Skill, SkillPatch, TemplateChoice,
};
use crate::persistence::{self, KeyValueStorage};
use crate::wizard::{self, StepTransition};

pub struct ResumeStore {
    document: Mutex<ResumeDocument>,
    storage: Arc<dyn KeyValueStorage>,
}

impl ResumeStore {
    /// Restores the persisted document, or starts from defaults.
    pub async fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let document = persistence::load(storage.as_ref()).await;
        Self {
            document: Mutex::new(document),
            storage,
        }
    }

    /// A read-only copy of the current document.
    pub async fn snapshot(&self) -> ResumeDocument {
        self.document.lock().await.clone()
    }

    async fn mutate<R>(&self, action: &'static str, apply: impl FnOnce(&mut ResumeDocument) -> R) -> R {
        let mut document = self.document.lock().await;
        let outcome = apply(&mut document);
        debug!(action, "resume store mutation");
        persistence::save(self.storage.as_ref(), &document).await;
        outcome
    }

    // ── Personal info ────────────────────────────────────────────────────────

    pub async fn set_personal_info(&self, patch: PersonalInfoPatch) {
        self.mutate("set_personal_info", |doc| doc.personal_info.merge(patch))
            .await
    }

    // ── Education ────────────────────────────────────────────────────────────

    pub async fn add_education(&self, entity: Education) {
        self.mutate("add_education", |doc| {
            collection::append(&mut doc.education, entity)
        })
        .await
    }

    pub async fn update_education(&self, id: &str, patch: EducationPatch) {
        self.mutate("update_education", |doc| {
            collection::update_by_id(&mut doc.education, id, patch);
        })
        .await
    }

    pub async fn remove_education(&self, id: &str) {
        self.mutate("remove_education", |doc| {
            collection::remove_by_id(&mut doc.education, id);
        })
        .await
    }

    // ── Experience ───────────────────────────────────────────────────────────

    pub async fn add_experience(&self, entity: Experience) {
        self.mutate("add_experience", |doc| {
            collection::append(&mut doc.experience, entity)
        })
        .await
    }

    pub async fn update_experience(&self, id: &str, patch: ExperiencePatch) {
        self.mutate("update_experience", |doc| {
            collection::update_by_id(&mut doc.experience, id, patch);
        })
        .await
    }

    pub async fn remove_experience(&self, id: &str) {
        self.mutate("remove_experience", |doc| {
            collection::remove_by_id(&mut doc.experience, id);
        })
        .await
    }

    // ── Skills ───────────────────────────────────────────────────────────────

    pub async fn add_skill(&self, entity: Skill) {
        self.mutate("add_skill", |doc| collection::append(&mut doc.skills, entity))
            .await
    }

    pub async fn update_skill(&self, id: &str, patch: SkillPatch) {
        self.mutate("update_skill", |doc| {
            collection::update_by_id(&mut doc.skills, id, patch);
        })
        .await
    }

    pub async fn remove_skill(&self, id: &str) {
        self.mutate("remove_skill", |doc| {
            collection::remove_by_id(&mut doc.skills, id);
        })
        .await
    }

    // ── Projects ─────────────────────────────────────────────────────────────

    pub async fn add_project(&self, entity: Project) {
        self.mutate("add_project", |doc| {
            collection::append(&mut doc.projects, entity)
        })
        .await
    }

    pub async fn update_project(&self, id: &str, patch: ProjectPatch) {
        self.mutate("update_project", |doc| {
            collection::update_by_id(&mut doc.projects, id, patch);
        })
        .await
    }

    pub async fn remove_project(&self, id: &str) {
        self.mutate("remove_project", |doc| {
            collection::remove_by_id(&mut doc.projects, id);
        })
        .await
    }

    // ── Template ─────────────────────────────────────────────────────────────

    pub async fn set_template(&self, choice: TemplateChoice) {
        self.mutate("set_template", |doc| doc.selected_template = choice)
            .await
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    /// Jumps to `step`. Negative targets clamp to 0; there is no upper bound.
    pub async fn set_current_step(&self, step: i64) -> StepTransition {
        self.mutate("set_current_step", |doc| {
            let from = doc.current_step;
            doc.current_step = wizard::clamp_jump(step);
            wizard::transition(from, doc.current_step)
        })
        .await
    }

    pub async fn next_step(&self) -> StepTransition {
        self.mutate("next_step", |doc| {
            let from = doc.current_step;
            doc.current_step = from.saturating_add(1);
            wizard::transition(from, doc.current_step)
        })
        .await
    }

    /// Steps back one stage, never below 0.
    pub async fn prev_step(&self) -> StepTransition {
        self.mutate("prev_step", |doc| {
            let from = doc.current_step;
            doc.current_step = from.saturating_sub(1);
            wizard::transition(from, doc.current_step)
        })
        .await
    }

    /// Replaces the whole document with the initial state. The storage slot
    /// is emptied first, then the defaults are mirrored into it.
    pub async fn reset(&self) {
        let mut document = self.document.lock().await;
        persistence::clear(self.storage.as_ref()).await;
        *document = ResumeDocument::default();
        debug!(action = "reset", "resume store mutation");
        persistence::save(self.storage.as_ref(), &document).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::models::{Entity, PersonalInfo, SkillLevel};
    use crate::persistence::{MemoryStorage, StorageError, STORAGE_KEY};

    async fn fresh_store() -> (ResumeStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = ResumeStore::open(storage.clone()).await;
        (store, storage)
    }

    fn skill(id: &str, name: &str, level: i64) -> Skill {
        Skill {
            id: id.to_string(),
            name: name.to_string(),
            level: SkillLevel::new(level),
        }
    }

    fn skill_summary(doc: &ResumeDocument) -> Vec<(String, String, u8)> {
        doc.skills
            .iter()
            .map(|s| (s.id.clone(), s.name.clone(), s.level.get()))
            .collect()
    }

    #[tokio::test]
    async fn test_skill_scenarios_add_update_remove() {
        let (store, _) = fresh_store().await;

        store.add_skill(skill("s1", "Go", 4)).await;
        store.add_skill(skill("s2", "Rust", 5)).await;
        assert_eq!(
            skill_summary(&store.snapshot().await),
            vec![
                ("s1".to_string(), "Go".to_string(), 4),
                ("s2".to_string(), "Rust".to_string(), 5)
            ]
        );

        store
            .update_skill(
                "s1",
                SkillPatch {
                    level: Some(2),
                    ..SkillPatch::default()
                },
            )
            .await;
        assert_eq!(
            skill_summary(&store.snapshot().await),
            vec![
                ("s1".to_string(), "Go".to_string(), 2),
                ("s2".to_string(), "Rust".to_string(), 5)
            ]
        );

        store.remove_skill("s2").await;
        assert_eq!(
            skill_summary(&store.snapshot().await),
            vec![("s1".to_string(), "Go".to_string(), 2)]
        );
    }

    #[tokio::test]
    async fn test_adds_preserve_order_and_ids_across_collections() {
        let (store, _) = fresh_store().await;
        for id in ["e1", "e2", "e3"] {
            store
                .add_education(Education::blank(id.to_string()))
                .await;
        }
        for id in ["x1", "x2"] {
            store
                .add_experience(Experience::blank(id.to_string()))
                .await;
        }
        store.add_project(Project::blank("p1".to_string())).await;

        let doc = store.snapshot().await;
        let edu: Vec<_> = doc.education.iter().map(|e| e.id.as_str()).collect();
        let exp: Vec<_> = doc.experience.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(edu, vec!["e1", "e2", "e3"]);
        assert_eq!(exp, vec!["x1", "x2"]);
        assert_eq!(doc.projects.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_id_leaves_collection_identical() {
        let (store, _) = fresh_store().await;
        store
            .add_experience(Experience::create(
                "x1".to_string(),
                ExperiencePatch {
                    company: Some("Acme".to_string()),
                    ..ExperiencePatch::default()
                },
            ))
            .await;
        let before = store.snapshot().await;

        store
            .update_experience(
                "missing",
                ExperiencePatch {
                    company: Some("Other".to_string()),
                    ..ExperiencePatch::default()
                },
            )
            .await;
        store
            .update_education("missing", EducationPatch::default())
            .await;
        store.update_project("missing", ProjectPatch::default()).await;

        let after = store.snapshot().await;
        assert_eq!(after, before);
        assert_eq!(
            serde_json::to_string(&after.experience).unwrap(),
            serde_json::to_string(&before.experience).unwrap()
        );
    }

    #[tokio::test]
    async fn test_remove_twice_equals_remove_once() {
        let (store, _) = fresh_store().await;
        for id in ["p1", "p2", "p3"] {
            store.add_project(Project::blank(id.to_string())).await;
        }
        store.remove_project("p2").await;
        let once = store.snapshot().await;
        store.remove_project("p2").await;
        assert_eq!(store.snapshot().await, once);

        store.remove_education("nope").await;
        store.remove_experience("nope").await;
        assert_eq!(store.snapshot().await, once);
    }

    #[tokio::test]
    async fn test_set_personal_info_merges() {
        let (store, _) = fresh_store().await;
        store
            .set_personal_info(PersonalInfoPatch {
                first_name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
                ..PersonalInfoPatch::default()
            })
            .await;
        store
            .set_personal_info(PersonalInfoPatch {
                email: Some(String::new()),
                ..PersonalInfoPatch::default()
            })
            .await;

        let info = store.snapshot().await.personal_info;
        assert_eq!(info.first_name, "Ada");
        assert_eq!(info.email, "", "empty strings are accepted without validation");
    }

    #[tokio::test]
    async fn test_prev_step_never_negative() {
        let (store, _) = fresh_store().await;
        let t = store.prev_step().await;
        assert_eq!((t.from, t.to), (0, 0));
        assert!(!t.completed());

        store.set_current_step(3).await;
        for _ in 0..10 {
            store.prev_step().await;
        }
        assert_eq!(store.snapshot().await.current_step, 0);
    }

    #[tokio::test]
    async fn test_six_next_steps_reach_preview_and_emit_completed_once() {
        let (store, _) = fresh_store().await;
        store.prev_step().await;
        assert_eq!(store.snapshot().await.current_step, 0);

        let transitions = {
            let mut out = Vec::new();
            for _ in 0..6 {
                out.push(store.next_step().await);
            }
            out
        };
        assert_eq!(store.snapshot().await.current_step, 6);
        assert_eq!(transitions.iter().filter(|t| t.completed()).count(), 1);
        assert!(transitions[5].completed());

        // Unbounded above, and no second completion event.
        let t = store.next_step().await;
        assert_eq!(t.to, 7);
        assert!(!t.completed());
    }

    #[tokio::test]
    async fn test_set_current_step_negative_clamps_to_zero() {
        let (store, _) = fresh_store().await;
        store.set_current_step(4).await;
        let t = store.set_current_step(-5).await;
        assert_eq!(t.to, 0);
        assert_eq!(store.snapshot().await.current_step, 0);
    }

    #[tokio::test]
    async fn test_set_current_step_beyond_range_triggers_completion() {
        let (store, _) = fresh_store().await;
        let t = store.set_current_step(11).await;
        assert_eq!(t.to, 11);
        assert!(t.completed());
    }

    #[tokio::test]
    async fn test_reset_restores_defaults_after_any_mutations() {
        let (store, _) = fresh_store().await;
        store
            .set_personal_info(PersonalInfoPatch {
                summary: Some("Hello".to_string()),
                ..PersonalInfoPatch::default()
            })
            .await;
        store.add_skill(skill("s1", "Go", 4)).await;
        store.add_education(Education::blank("e1".to_string())).await;
        store.set_template(TemplateChoice::Creative).await;
        store.set_current_step(9).await;

        store.reset().await;
        let doc = store.snapshot().await;
        assert_eq!(doc, ResumeDocument::default());
        assert_eq!(doc.personal_info, PersonalInfo::default());
        assert_eq!(doc.selected_template, TemplateChoice::Modern);
    }

    #[tokio::test]
    async fn test_reset_leaves_defaults_in_storage() {
        let (store, storage) = fresh_store().await;
        store.add_skill(skill("s1", "Go", 4)).await;
        store.set_current_step(4).await;

        store.reset().await;
        let raw = storage.get(STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(
            crate::persistence::schema::decode(&raw).unwrap(),
            ResumeDocument::default()
        );
        let reopened = ResumeStore::open(storage.clone()).await;
        assert_eq!(reopened.snapshot().await, ResumeDocument::default());
    }

    #[tokio::test]
    async fn test_repeated_ids_survive_reopen() {
        let (store, storage) = fresh_store().await;
        store.add_skill(skill("s1", "Go", 4)).await;
        store.add_skill(skill("s1", "Rust", 5)).await;
        store.add_project(Project::blank("p1".to_string())).await;
        store.add_project(Project::blank("p1".to_string())).await;

        let reopened = ResumeStore::open(storage.clone()).await;
        let doc = reopened.snapshot().await;
        assert_eq!(doc, store.snapshot().await);
        assert_eq!(doc.skills.len(), 2);
        assert_eq!(doc.projects.len(), 2);
    }

    #[tokio::test]
    async fn test_every_mutation_is_mirrored_and_restored() {
        let (store, storage) = fresh_store().await;
        store.add_skill(skill("s1", "Go", 4)).await;
        store.set_template(TemplateChoice::Professional).await;
        store.next_step().await;
        assert!(storage.get(STORAGE_KEY).await.unwrap().is_some());

        let reopened = ResumeStore::open(storage.clone()).await;
        assert_eq!(reopened.snapshot().await, store.snapshot().await);
    }

    struct BrokenStorage;

    #[async_trait]
    impl KeyValueStorage for BrokenStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Task("disk on fire".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Task("disk on fire".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Task("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn test_storage_failures_never_surface() {
        let store = ResumeStore::open(Arc::new(BrokenStorage)).await;
        assert_eq!(store.snapshot().await, ResumeDocument::default());

        store.add_skill(skill("s1", "Go", 4)).await;
        store.next_step().await;
        let doc = store.snapshot().await;
        assert_eq!(doc.skills.len(), 1);
        assert_eq!(doc.current_step, 1);

        store.reset().await;
        assert_eq!(store.snapshot().await, ResumeDocument::default());
    }
}
