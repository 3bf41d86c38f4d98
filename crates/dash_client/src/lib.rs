//! `dash_client` — the asynchronous shell around `dash_core`.
//!
//! Talks to the backend over HTTP, drives the simulation workflow's progress
//! animation and cancellation, and dispatches the core's render effects to
//! pluggable rendering collaborators.

mod api;
mod loader;
mod render;
mod route;
mod workflow;

pub use api::{
    ApiClient, ApiError, RouteRequest, RouteResponse, SimulateRequest, SimulateResponse,
};
pub use loader::load_graph;
pub use render::{apply_effects, ChartSurface, MarkerLayer, PanelHost, RenderError, Renderers};
pub use route::{calculate_route, RouteReport};
pub use workflow::{
    SessionUpdate, SimulationWorkflow, WorkflowEvent, WorkflowPhase, PROGRESS_STEP, PROGRESS_TICK,
};
