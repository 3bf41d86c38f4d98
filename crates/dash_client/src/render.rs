//! Rendering capability traits and the effect dispatcher.
//!
//! The core returns [`Effect`] values; a frontend supplies these three
//! collaborators and [`apply_effects`] fans the effects out. A collaborator
//! failure is logged and skipped; a missing map container must never take
//! the session down with it.

use dash_core::{
    Effect, GasReadings, LogBlock, MarkerEmphasis, MarkerSpec, NodeId, PanelId, RoadEdge,
    SensorNode, Tone,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendering collaborator unavailable: {0}")]
    Unavailable(&'static str),
    #[error("render failed: {0}")]
    Failed(String),
}

/// The map layer: markers, per-id styling, and the route polyline.
pub trait MarkerLayer {
    fn render_graph(&mut self, markers: &[MarkerSpec], edges: &[RoadEdge])
        -> Result<(), RenderError>;
    fn set_color(&mut self, node_id: &NodeId, color: &str) -> Result<(), RenderError>;
    fn set_emphasis(
        &mut self,
        node_id: &NodeId,
        emphasis: MarkerEmphasis,
    ) -> Result<(), RenderError>;
    fn reset_emphasis(&mut self) -> Result<(), RenderError>;
    fn draw_route(&mut self, path: &[(f64, f64)]) -> Result<(), RenderError>;
    fn clear_route(&mut self) -> Result<(), RenderError>;
}

/// The gas chart: draw-and-destroy with three labeled values.
pub trait ChartSurface {
    fn draw(&mut self, gases: &GasReadings) -> Result<(), RenderError>;
    fn destroy(&mut self) -> Result<(), RenderError>;
}

/// The tab-panel host: panels, node detail, alert banner, dialog, log, and
/// inline messages.
pub trait PanelHost {
    fn show_panel(&mut self, panel: PanelId) -> Result<(), RenderError>;
    fn render_node_detail(&mut self, node: &SensorNode) -> Result<(), RenderError>;
    fn clear_node_detail(&mut self) -> Result<(), RenderError>;
    fn render_log(&mut self, blocks: &[LogBlock]) -> Result<(), RenderError>;
    fn render_mst_weight(&mut self, weight_km: f64) -> Result<(), RenderError>;
    fn route_info(&mut self, text: &str, tone: Tone) -> Result<(), RenderError>;
    fn show_alert(&mut self, district: &str) -> Result<(), RenderError>;
    fn hide_alert(&mut self) -> Result<(), RenderError>;
    fn show_simulation_dialog(&mut self) -> Result<(), RenderError>;
    fn hide_simulation_dialog(&mut self) -> Result<(), RenderError>;
    fn show_simulation_progress(&mut self, pct: u8) -> Result<(), RenderError>;
    fn show_simulation_results(
        &mut self,
        before: &GasReadings,
        after: &GasReadings,
        tips: &[String],
    ) -> Result<(), RenderError>;
    fn feedback(&mut self, text: &str, tone: Tone) -> Result<(), RenderError>;
}

/// The three collaborators a frontend wires together.
pub struct Renderers<'a> {
    pub markers: &'a mut dyn MarkerLayer,
    pub chart: &'a mut dyn ChartSurface,
    pub panels: &'a mut dyn PanelHost,
}

/// Apply effects in order, logging and skipping any that fail.
pub fn apply_effects(effects: &[Effect], renderers: &mut Renderers<'_>) {
    for effect in effects {
        if let Err(err) = apply_one(effect, renderers) {
            tracing::warn!(%err, ?effect, "render effect skipped");
        }
    }
}

fn apply_one(effect: &Effect, r: &mut Renderers<'_>) -> Result<(), RenderError> {
    match effect {
        Effect::ShowPanel(panel) => r.panels.show_panel(*panel),
        Effect::RenderNodePanel(node) => r.panels.render_node_detail(node),
        Effect::ClearNodePanel => r.panels.clear_node_detail(),
        Effect::DrawGasChart(gases) => r.chart.draw(gases),
        Effect::DestroyGasChart => r.chart.destroy(),
        Effect::SetEmphasis { node_id, emphasis } => r.markers.set_emphasis(node_id, *emphasis),
        Effect::ResetAllEmphasis => r.markers.reset_emphasis(),
        Effect::SetMarkerColor { node_id, color } => r.markers.set_color(node_id, color),
        Effect::RenderGraph { markers, edges } => r.markers.render_graph(markers, edges),
        Effect::RenderLog(blocks) => r.panels.render_log(blocks),
        Effect::RenderMstWeight(weight_km) => r.panels.render_mst_weight(*weight_km),
        Effect::DrawRoute(path) => r.markers.draw_route(path),
        Effect::ClearRoute => r.markers.clear_route(),
        Effect::RouteInfo { text, tone } => r.panels.route_info(text, *tone),
        Effect::ShowAlert { district } => r.panels.show_alert(district),
        Effect::HideAlert => r.panels.hide_alert(),
        Effect::ShowSimulationDialog => r.panels.show_simulation_dialog(),
        Effect::HideSimulationDialog => r.panels.hide_simulation_dialog(),
        Effect::ShowSimulationProgress(pct) => r.panels.show_simulation_progress(*pct),
        Effect::ShowSimulationResults {
            before,
            after,
            tips,
        } => r.panels.show_simulation_results(before, after, tips),
        Effect::Feedback { text, tone } => r.panels.feedback(text, *tone),
    }
}
