pub mod resume;

pub use resume::{
    Education, EducationPatch, Entity, EntityId, Experience, ExperiencePatch, PersonalInfo,
    PersonalInfoPatch, Project, ProjectPatch, ResumeDocument, Skill, SkillLevel, SkillPatch,
    TemplateChoice,
};
