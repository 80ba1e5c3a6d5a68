use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::AppState;
use crate::wizard::{StepTransition, WizardStatus};

#[derive(Serialize)]
pub struct NavigationResponse {
    pub transition: StepTransition,
    pub wizard: WizardStatus,
}

impl NavigationResponse {
    fn from_transition(transition: StepTransition) -> Self {
        if transition.completed() {
            info!("Wizard completed at step {}", transition.to);
        }
        NavigationResponse {
            transition,
            wizard: WizardStatus::at(transition.to),
        }
    }
}

/// GET /api/v1/wizard
pub async fn handle_get_wizard(State(state): State<AppState>) -> Json<WizardStatus> {
    let step = state.store.snapshot().await.current_step;
    Json(WizardStatus::at(step))
}

/// POST /api/v1/wizard/next
pub async fn handle_next(State(state): State<AppState>) -> Json<NavigationResponse> {
    let transition = state.store.next_step().await;
    Json(NavigationResponse::from_transition(transition))
}

/// POST /api/v1/wizard/prev
pub async fn handle_prev(State(state): State<AppState>) -> Json<NavigationResponse> {
    let transition = state.store.prev_step().await;
    Json(NavigationResponse::from_transition(transition))
}

#[derive(Deserialize)]
pub struct StepRequest {
    pub step: i64,
}

/// PUT /api/v1/wizard/step
pub async fn handle_set_step(
    State(state): State<AppState>,
    Json(req): Json<StepRequest>,
) -> Json<NavigationResponse> {
    let transition = state.store.set_current_step(req.step).await;
    Json(NavigationResponse::from_transition(transition))
}
