use std::time::Instant;

use ahash::AHashMap;

use crate::{
    alert::AlertController,
    classify,
    debounce::DebounceArena,
    logview::group_log_blocks,
    panel::district_name,
    selection::{LockTransition, SelectionStore},
    Effect, GraphData, InputEvent, MarkerEmphasis, MarkerSpec, NodeId, PanelId, SensorNode,
};

/// The dashboard state machine.
///
/// Owns the live node registry, the selection store, the active panel, the
/// alert state, and the per-marker debounce arena. All interaction sources
/// funnel through [`Dashboard::apply`] as tagged [`InputEvent`]s; every call
/// runs to completion and returns the render [`Effect`]s it produced, so
/// guard conditions (lock presence, panel visibility, id match) are evaluated
/// synchronously and no two transitions ever interleave.
#[derive(Debug)]
pub struct Dashboard {
    nodes: AHashMap<NodeId, SensorNode>,
    selection: SelectionStore,
    active_panel: PanelId,
    alert: AlertController,
    debounce: DebounceArena,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            nodes: AHashMap::new(),
            selection: SelectionStore::new(),
            active_panel: PanelId::Log,
            alert: AlertController::new(),
            debounce: DebounceArena::default(),
        }
    }

    /// Effects to apply once at startup: the log panel is the default view
    /// and the alert banner starts hidden.
    pub fn startup_effects(&mut self) -> Vec<Effect> {
        self.show_panel(PanelId::Log)
    }

    pub fn node(&self, id: &NodeId) -> Option<&SensorNode> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn active_panel(&self) -> PanelId {
        self.active_panel
    }

    pub fn alert_visible(&self) -> bool {
        self.alert.is_visible()
    }

    /// Earliest pending debounce deadline; the driver sleeps until this
    /// before calling [`Dashboard::poll`].
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.next_deadline()
    }

    /// Replace the node registry from freshly loaded graph data.
    ///
    /// Nodes with non-finite coordinates are dropped. Selection, pending
    /// pointer events, and the alert are reset; marker order follows the
    /// response.
    pub fn load_graph(&mut self, data: GraphData) -> Vec<Effect> {
        self.selection.reset_all();
        self.debounce.clear();
        self.nodes.clear();

        let mut markers = Vec::with_capacity(data.nodes.len());
        for node in data.nodes {
            if !node.lat.is_finite() || !node.lon.is_finite() {
                continue;
            }
            markers.push(MarkerSpec {
                node_id: node.id.clone(),
                lat: node.lat,
                lon: node.lon,
                color: classify::marker_color(&node.gases()),
            });
            self.nodes.insert(node.id.clone(), node);
        }

        vec![
            Effect::RenderLog(group_log_blocks(&data.log)),
            Effect::RenderMstWeight(data.mst_weight),
            Effect::ClearRoute,
            Effect::RenderGraph {
                markers,
                edges: data.edges,
            },
            self.alert.force_hide(),
        ]
    }

    /// Feed one interaction event.
    ///
    /// Pointer events (hover enter/leave, click) are debounced per marker and
    /// produce no effects until their quiet period elapses; everything else
    /// applies immediately.
    pub fn apply(&mut self, event: InputEvent, now: Instant) -> Vec<Effect> {
        match &event {
            InputEvent::HoverEnter(id) | InputEvent::HoverLeave(id) | InputEvent::Click(id) => {
                let marker = id.clone();
                self.debounce.schedule(marker, event, now);
                Vec::new()
            }
            _ => self.apply_immediate(event),
        }
    }

    /// Drain and apply every debounced event whose quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        for event in self.debounce.drain_due(now) {
            effects.extend(self.apply_immediate(event));
        }
        effects
    }

    /// Switch the visible panel, with the full side-effect contract: leaving
    /// the node-detail panel resets the selection, the simulation dialog, the
    /// alert, and every marker's emphasis; entering it restores a held lock
    /// or clears to the placeholder. Calling twice with the same panel
    /// produces the same visible state.
    pub fn show_panel(&mut self, panel: PanelId) -> Vec<Effect> {
        self.active_panel = panel;
        let mut effects = vec![Effect::ShowPanel(panel)];

        if panel != PanelId::NodeDetail {
            effects.extend(self.clear_node_panel());
            self.selection.reset_all();
            effects.push(Effect::HideSimulationDialog);
            effects.push(Effect::ResetAllEmphasis);
        } else if let Some(locked) = self.selection.locked().cloned() {
            effects.push(Effect::ResetAllEmphasis);
            effects.push(Effect::SetEmphasis {
                node_id: locked.clone(),
                emphasis: MarkerEmphasis::Highlighted,
            });
            effects.extend(self.render_node_panel(&locked));
        } else {
            self.selection.reset_all();
            effects.extend(self.clear_node_panel());
        }

        effects
    }

    fn apply_immediate(&mut self, event: InputEvent) -> Vec<Effect> {
        match event {
            InputEvent::HoverEnter(id) => self.hover_enter(&id),
            InputEvent::HoverLeave(id) => self.hover_leave(&id),
            InputEvent::Click(id) => self.click(&id),
            InputEvent::PanelSelected(panel) => self.show_panel(panel),
            InputEvent::DismissAlert => vec![self.alert.force_hide()],
            InputEvent::SimulationResult { node_id, gases } => {
                self.merge_simulation(&node_id, gases)
            }
        }
    }

    fn hover_enter(&mut self, id: &NodeId) -> Vec<Effect> {
        if !self.nodes.contains_key(id) {
            return Vec::new();
        }
        // The emphasis tracks the pointer even when a lock or a hidden panel
        // suppresses the data update.
        let mut effects = vec![Effect::SetEmphasis {
            node_id: id.clone(),
            emphasis: MarkerEmphasis::Highlighted,
        }];
        let panel_visible = self.active_panel == PanelId::NodeDetail;
        if self.selection.set_hovered(id, panel_visible) {
            effects.extend(self.render_node_panel(id));
        }
        effects
    }

    fn hover_leave(&mut self, id: &NodeId) -> Vec<Effect> {
        if !self.nodes.contains_key(id) {
            return Vec::new();
        }
        let mut effects = vec![Effect::SetEmphasis {
            node_id: id.clone(),
            emphasis: MarkerEmphasis::Default,
        }];
        let panel_visible = self.active_panel == PanelId::NodeDetail;
        if self.selection.clear_hovered(panel_visible) {
            effects.extend(self.clear_node_panel());
        }
        effects
    }

    fn click(&mut self, id: &NodeId) -> Vec<Effect> {
        if !self.nodes.contains_key(id) {
            return Vec::new();
        }
        match self.selection.toggle_locked(id) {
            LockTransition::Unlocked => {
                let mut effects = self.clear_node_panel();
                effects.push(Effect::SetEmphasis {
                    node_id: id.clone(),
                    emphasis: MarkerEmphasis::Default,
                });
                effects
            }
            // Locking forces the node-detail panel visible; its show_panel
            // branch renders the lock and reconciles every marker's emphasis.
            LockTransition::Locked => self.show_panel(PanelId::NodeDetail),
        }
    }

    /// Merge a simulation response into the live node.
    ///
    /// The registry data and the marker color are updated for the response id
    /// even if the lock moved away mid-request; the panel re-render (and with
    /// it the alert re-evaluation) only happens when the *current* lock still
    /// matches, so a stale response can never repaint someone else's panel.
    fn merge_simulation(&mut self, node_id: &NodeId, gases: crate::GasReadings) -> Vec<Effect> {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return Vec::new();
        };
        node.set_gases(gases);

        let mut effects = vec![Effect::SetMarkerColor {
            node_id: node_id.clone(),
            color: classify::marker_color(&gases),
        }];
        if self.selection.locked() == Some(node_id) {
            effects.extend(self.render_node_panel(node_id));
        }
        effects
    }

    fn render_node_panel(&mut self, id: &NodeId) -> Vec<Effect> {
        let Some(node) = self.nodes.get(id).cloned() else {
            return Vec::new();
        };
        let gases = node.gases();
        let level = classify::classify(&gases);
        let district = district_name(node.kmeans);
        vec![
            Effect::RenderNodePanel(Box::new(node)),
            Effect::DrawGasChart(gases),
            self.alert.evaluate(level, &district),
        ]
    }

    fn clear_node_panel(&mut self) -> Vec<Effect> {
        vec![
            Effect::ClearNodePanel,
            Effect::DestroyGasChart,
            self.alert.force_hide(),
        ]
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
