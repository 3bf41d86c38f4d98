//! The what-if simulation workflow.
//!
//! A short-lived state machine: `Idle → OptionsShown → Running →
//! (Succeeded | Failed)`. While `Running`, one spawned task multiplexes the
//! progress animation, the backend request, and the session's cancellation
//! token; results come back to the driver as [`WorkflowEvent`]s. Closing the
//! dialog mid-run cancels only the animation; the request completes and its
//! merge is still applied, gated by the id-match check in the reducer.

use std::time::Duration;

use dash_core::{
    simulation_tips, ActionType, Effect, GasReadings, InputEvent, NodeId, SensorNode,
    SimulationSession, Tone,
};
use tokio::sync::{mpsc, watch};

use crate::api::{ApiClient, ApiError, SimulateRequest, SimulateResponse};

/// Progress bar cadence: +10 % every 100 ms, capped at 100, independent of
/// the network round-trip.
pub const PROGRESS_TICK: Duration = Duration::from_millis(100);
pub const PROGRESS_STEP: u8 = 10;

const NO_NODE_SELECTED: &str = "Por favor, selecciona un nodo en el mapa primero para simular.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    OptionsShown,
    Running,
    Succeeded,
}

/// Session task → driver notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    Progress(u8),
    Completed(SimulateResponse),
    Failed { message: String },
}

/// Driver-facing result of feeding one [`WorkflowEvent`].
#[derive(Debug, Default)]
pub struct SessionUpdate {
    pub effects: Vec<Effect>,
    /// A merge event for the dashboard reducer, present on completion.
    pub merge: Option<InputEvent>,
}

struct ActiveSession {
    session: SimulationSession,
    cancel_tx: watch::Sender<bool>,
}

pub struct SimulationWorkflow {
    phase: WorkflowPhase,
    dialog_open: bool,
    active: Option<ActiveSession>,
}

impl SimulationWorkflow {
    pub fn new() -> Self {
        Self {
            phase: WorkflowPhase::Idle,
            dialog_open: false,
            active: None,
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn session(&self) -> Option<&SimulationSession> {
        self.active.as_ref().map(|a| &a.session)
    }

    /// Open the dialog. Requires a locked node; without one this reports a
    /// recoverable warning and stays `Idle`.
    pub fn open(&mut self, locked: Option<&SensorNode>) -> Vec<Effect> {
        if locked.is_none() {
            return vec![Effect::Feedback {
                text: NO_NODE_SELECTED.to_string(),
                tone: Tone::Warning,
            }];
        }
        self.dialog_open = true;
        if self.phase != WorkflowPhase::Running {
            self.phase = WorkflowPhase::OptionsShown;
        }
        // Opening resets any stale progress/result display.
        vec![Effect::ShowSimulationDialog]
    }

    /// Snapshot the locked node and launch the session task.
    ///
    /// Ignored unless the option list is showing; a second start while a
    /// session is inflight would orphan its snapshot.
    pub fn start(
        &mut self,
        api: &ApiClient,
        node: &SensorNode,
        action: ActionType,
        events_tx: mpsc::UnboundedSender<WorkflowEvent>,
    ) -> Vec<Effect> {
        if self.phase != WorkflowPhase::OptionsShown || self.active.is_some() {
            return Vec::new();
        }

        let (cancel_tx, cancel_rx) = watch::channel(false);
        self.active = Some(ActiveSession {
            session: SimulationSession {
                node_id: node.id.clone(),
                action,
                original: node.gases(),
                progress_pct: 0,
            },
            cancel_tx,
        });
        self.phase = WorkflowPhase::Running;

        let request = SimulateRequest {
            node_id: node.id.clone(),
            action_type: action,
        };
        tokio::spawn(run_session(api.clone(), request, events_tx, cancel_rx));

        vec![Effect::ShowSimulationProgress(0)]
    }

    /// Feed one session-task notification. `current_lock` is the lock at the
    /// time the notification is processed, not at request time.
    pub fn on_event(&mut self, event: WorkflowEvent, current_lock: Option<&NodeId>) -> SessionUpdate {
        match event {
            WorkflowEvent::Progress(pct) => self.on_progress(pct),
            WorkflowEvent::Completed(response) => self.on_completed(&response, current_lock),
            WorkflowEvent::Failed { message } => self.on_failed(message),
        }
    }

    /// Hide the dialog. Does not abandon an inflight request, but flips the
    /// session's cancellation token so the progress animation stops instead
    /// of ticking against a hidden view.
    pub fn close(&mut self) -> Vec<Effect> {
        self.dialog_open = false;
        if let Some(active) = &self.active {
            let _ = active.cancel_tx.send(true);
        }
        if self.phase != WorkflowPhase::Running {
            self.phase = WorkflowPhase::Idle;
        }
        vec![Effect::HideSimulationDialog]
    }

    fn on_progress(&mut self, pct: u8) -> SessionUpdate {
        let Some(active) = self.active.as_mut() else {
            return SessionUpdate::default();
        };
        active.session.progress_pct = pct;
        let effects = if self.dialog_open {
            vec![Effect::ShowSimulationProgress(pct)]
        } else {
            Vec::new()
        };
        SessionUpdate {
            effects,
            merge: None,
        }
    }

    fn on_completed(
        &mut self,
        response: &SimulateResponse,
        current_lock: Option<&NodeId>,
    ) -> SessionUpdate {
        let Some(active) = self.active.take() else {
            return SessionUpdate::default();
        };
        self.phase = WorkflowPhase::Succeeded;

        let updated = GasReadings {
            co2: response.new_co2,
            ch4: response.new_ch4,
            nox: response.new_nox,
        };
        let merge = Some(InputEvent::SimulationResult {
            node_id: response.node_id.clone(),
            gases: updated,
        });

        // Before/after, tips, and the success message belong to the panel the
        // user is looking at; suppress them if the lock moved mid-request.
        if current_lock != Some(&response.node_id) {
            return SessionUpdate {
                effects: Vec::new(),
                merge,
            };
        }

        let mut effects = Vec::new();
        if self.dialog_open {
            effects.push(Effect::ShowSimulationProgress(100));
            effects.push(Effect::ShowSimulationResults {
                before: active.session.original,
                after: updated,
                tips: simulation_tips(&active.session.original, &updated, active.session.action),
            });
        }
        effects.push(Effect::Feedback {
            text: success_message(active.session.action).to_string(),
            tone: Tone::Success,
        });
        SessionUpdate { effects, merge }
    }

    fn on_failed(&mut self, message: String) -> SessionUpdate {
        if self.active.take().is_none() {
            return SessionUpdate::default();
        }
        // Back to the option list so the user may retry a different action.
        self.phase = WorkflowPhase::OptionsShown;

        let mut effects = vec![Effect::Feedback {
            text: message,
            tone: Tone::Error,
        }];
        if self.dialog_open {
            effects.push(Effect::ShowSimulationDialog);
        }
        SessionUpdate {
            effects,
            merge: None,
        }
    }
}

impl Default for SimulationWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

fn success_message(action: ActionType) -> &'static str {
    match action {
        ActionType::PanelSolar => {
            "¡Simulación de Panel Solar aplicada! Reducción estimada de CO₂ y NOx."
        }
        ActionType::Biodigestor => {
            "¡Simulación de Biodigestor aplicada! Reducción estimada de CH₄."
        }
    }
}

fn user_message(err: &ApiError) -> String {
    match err {
        ApiError::Server { message, .. } => format!("Error: {message}"),
        ApiError::Malformed(_) => "Error: Error desconocido al simular el impacto.".to_string(),
        ApiError::Transport(err) => format!("Error de conexión: {err}"),
    }
}

/// One session: progress animation + backend request + cancellation token.
///
/// The animation stops when the request completes, when it caps at 100, or
/// when the token flips; the request itself always runs to completion and its
/// outcome is always delivered.
async fn run_session(
    api: ApiClient,
    request: SimulateRequest,
    events_tx: mpsc::UnboundedSender<WorkflowEvent>,
    mut cancel_rx: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(PROGRESS_TICK);
    interval.tick().await; // discard the immediate first tick

    let response = api.simulate_impact(&request);
    tokio::pin!(response);

    let mut pct: u8 = 0;
    let mut animating = true;
    loop {
        tokio::select! {
            result = &mut response => {
                match result {
                    Ok(result) => {
                        if animating {
                            let _ = events_tx.send(WorkflowEvent::Progress(100));
                        }
                        let _ = events_tx.send(WorkflowEvent::Completed(result));
                    }
                    Err(err) => {
                        tracing::warn!(node_id = %request.node_id, %err, "simulation request failed");
                        let _ = events_tx.send(WorkflowEvent::Failed {
                            message: user_message(&err),
                        });
                    }
                }
                break;
            }
            _ = interval.tick(), if animating && pct < 100 => {
                pct = (pct + PROGRESS_STEP).min(100);
                let _ = events_tx.send(WorkflowEvent::Progress(pct));
            }
            changed = cancel_rx.changed(), if animating => {
                if changed.is_err() || *cancel_rx.borrow() {
                    animating = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::test_fixtures::node;

    #[test]
    fn open_without_lock_warns_and_stays_idle() {
        let mut workflow = SimulationWorkflow::new();
        let effects = workflow.open(None);
        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert!(!workflow.dialog_open());
        assert!(matches!(
            effects.as_slice(),
            [Effect::Feedback { tone: Tone::Warning, text }] if text.contains("selecciona un nodo")
        ));
    }

    #[test]
    fn open_with_lock_shows_options() {
        let mut workflow = SimulationWorkflow::new();
        let locked = node("A", 80.0, 10.0, 8.0);
        let effects = workflow.open(Some(&locked));
        assert_eq!(workflow.phase(), WorkflowPhase::OptionsShown);
        assert_eq!(effects, vec![Effect::ShowSimulationDialog]);
    }

    #[test]
    fn close_from_options_returns_to_idle() {
        let mut workflow = SimulationWorkflow::new();
        let locked = node("A", 80.0, 10.0, 8.0);
        workflow.open(Some(&locked));
        let effects = workflow.close();
        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert_eq!(effects, vec![Effect::HideSimulationDialog]);
    }

    #[test]
    fn progress_updates_are_suppressed_when_dialog_closed() {
        let mut workflow = SimulationWorkflow::new();
        workflow.dialog_open = false;
        workflow.active = Some(ActiveSession {
            session: SimulationSession {
                node_id: dash_core::NodeId("A".to_string()),
                action: ActionType::PanelSolar,
                original: GasReadings {
                    co2: 80.0,
                    ch4: 10.0,
                    nox: 8.0,
                },
                progress_pct: 0,
            },
            cancel_tx: watch::channel(false).0,
        });
        workflow.phase = WorkflowPhase::Running;

        let update = workflow.on_event(WorkflowEvent::Progress(30), None);
        assert!(update.effects.is_empty());
        assert_eq!(workflow.session().unwrap().progress_pct, 30);
    }

    #[test]
    fn failure_returns_to_options_without_merge() {
        let mut workflow = SimulationWorkflow::new();
        workflow.dialog_open = true;
        workflow.active = Some(ActiveSession {
            session: SimulationSession {
                node_id: dash_core::NodeId("A".to_string()),
                action: ActionType::Biodigestor,
                original: GasReadings {
                    co2: 80.0,
                    ch4: 10.0,
                    nox: 8.0,
                },
                progress_pct: 40,
            },
            cancel_tx: watch::channel(false).0,
        });
        workflow.phase = WorkflowPhase::Running;

        let update = workflow.on_event(
            WorkflowEvent::Failed {
                message: "Error: Nodo no encontrado.".to_string(),
            },
            None,
        );
        assert_eq!(workflow.phase(), WorkflowPhase::OptionsShown);
        assert!(update.merge.is_none());
        assert!(update
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Feedback { tone: Tone::Error, .. })));
        assert!(update.effects.contains(&Effect::ShowSimulationDialog));
    }
}
