//! Step Controller: maps the wizard step index onto form stages.
//!
//! Steps 0–5 are in-page forms. Any step ≥ 6 is the terminal "complete" state:
//! the builder hands off to the preview route. Entering that range from below
//! emits [`WizardEvent::Completed`] exactly once per crossing, so the routing
//! layer reacts to an explicit event instead of comparing numbers itself.

use serde::Serialize;

/// Route of the stepped form pages (steps 0–5).
pub const BUILDER_ROUTE: &str = "/builder";
/// Route of the read-only preview/export page.
pub const PREVIEW_ROUTE: &str = "/preview";

/// First step index that leaves the in-page wizard.
pub const PREVIEW_STEP: u32 = 6;
/// Number of in-page form stages.
pub const FORM_STEP_COUNT: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    PersonalInfo,
    Experience,
    Education,
    Skills,
    Projects,
    TemplateSelect,
    Preview,
}

impl WizardStage {
    /// The in-page stages, in step order.
    pub const FORMS: [WizardStage; 6] = [
        WizardStage::PersonalInfo,
        WizardStage::Experience,
        WizardStage::Education,
        WizardStage::Skills,
        WizardStage::Projects,
        WizardStage::TemplateSelect,
    ];

    pub fn from_step(step: u32) -> Self {
        Self::FORMS
            .get(step as usize)
            .copied()
            .unwrap_or(WizardStage::Preview)
    }

    pub fn step(self) -> u32 {
        match self {
            WizardStage::PersonalInfo => 0,
            WizardStage::Experience => 1,
            WizardStage::Education => 2,
            WizardStage::Skills => 3,
            WizardStage::Projects => 4,
            WizardStage::TemplateSelect => 5,
            WizardStage::Preview => PREVIEW_STEP,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WizardStage::PersonalInfo => "Personal Info",
            WizardStage::Experience => "Experience",
            WizardStage::Education => "Education",
            WizardStage::Skills => "Skills",
            WizardStage::Projects => "Projects",
            WizardStage::TemplateSelect => "Template",
            WizardStage::Preview => "Preview",
        }
    }
}

/// What the builder should present for a given step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepView {
    Form { stage: WizardStage, route: &'static str },
    Complete { route: &'static str },
}

pub fn view(step: u32) -> StepView {
    match WizardStage::from_step(step) {
        WizardStage::Preview => StepView::Complete {
            route: PREVIEW_ROUTE,
        },
        stage => StepView::Form {
            stage,
            route: BUILDER_ROUTE,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    /// The wizard moved past the last form; navigate to `route`.
    Completed { route: &'static str },
}

/// Outcome of one navigation mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepTransition {
    pub from: u32,
    pub to: u32,
    pub event: Option<WizardEvent>,
}

impl StepTransition {
    pub fn completed(&self) -> bool {
        self.event.is_some()
    }
}

pub fn transition(from: u32, to: u32) -> StepTransition {
    let event = (from < PREVIEW_STEP && to >= PREVIEW_STEP).then_some(WizardEvent::Completed {
        route: PREVIEW_ROUTE,
    });
    StepTransition { from, to, event }
}

/// Converts a requested jump target into a step index. Negative targets clamp
/// to 0, the same floor `prev_step` applies.
pub fn clamp_jump(requested: i64) -> u32 {
    u32::try_from(requested.max(0)).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// 1-based position among the form stages.
    pub step_number: u32,
    pub total_steps: u32,
    pub percent: u32,
}

pub fn progress(step: u32) -> Progress {
    let step_number = step.min(FORM_STEP_COUNT - 1) + 1;
    let percent = (f64::from(step_number) / f64::from(FORM_STEP_COUNT) * 100.0).round() as u32;
    Progress {
        step_number,
        total_steps: FORM_STEP_COUNT,
        percent,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStatus {
    Completed,
    Current,
    Upcoming,
}

/// One entry of the clickable step bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub step: u32,
    pub stage: WizardStage,
    pub name: &'static str,
    pub status: IndicatorStatus,
}

pub fn indicators(current: u32) -> Vec<StepIndicator> {
    WizardStage::FORMS
        .iter()
        .map(|&stage| {
            let step = stage.step();
            let status = match step.cmp(&current) {
                std::cmp::Ordering::Less => IndicatorStatus::Completed,
                std::cmp::Ordering::Equal => IndicatorStatus::Current,
                std::cmp::Ordering::Greater => IndicatorStatus::Upcoming,
            };
            StepIndicator {
                step,
                stage,
                name: stage.name(),
                status,
            }
        })
        .collect()
}

/// Full wizard state as reported to the routing layer.
#[derive(Debug, Clone, Serialize)]
pub struct WizardStatus {
    pub current_step: u32,
    pub view: StepView,
    pub progress: Progress,
    pub indicators: Vec<StepIndicator>,
}

impl WizardStatus {
    pub fn at(step: u32) -> Self {
        Self {
            current_step: step,
            view: view(step),
            progress: progress(step),
            indicators: indicators(step),
        }
    }
}
