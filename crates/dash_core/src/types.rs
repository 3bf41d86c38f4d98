//! Type definitions for `dash_core`.
//!
//! All public types, structs, enums, and ID newtypes used by the dashboard.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(NodeId);

// ---------------------------------------------------------------------------
// Core enums
// ---------------------------------------------------------------------------

/// Mitigation action a simulation run applies to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    PanelSolar,
    Biodigestor,
}

impl ActionType {
    pub fn label(self) -> &'static str {
        match self {
            ActionType::PanelSolar => "Panel Solar",
            ActionType::Biodigestor => "Biodigestor",
        }
    }
}

/// The mutually-exclusive side panels. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelId {
    Log,
    Route,
    NodeDetail,
}

impl PanelId {
    pub fn label(self) -> &'static str {
        match self {
            PanelId::Log => "Bitácora",
            PanelId::Route => "Rutas",
            PanelId::NodeDetail => "Nodo Info",
        }
    }
}

/// Visual weight of a map marker's outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEmphasis {
    Default,
    Highlighted,
}

/// Tone of an inline text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

/// One node's three gas concentrations, in ppm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasReadings {
    pub co2: f64,
    pub ch4: f64,
    pub nox: f64,
}

/// An air-quality sensor node on a road segment.
///
/// Gas levels are mutable only through a successful simulation merge for this
/// id; everything else is fixed at graph load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    pub co2_level: f64,
    pub ch4_level: f64,
    pub nox_level: f64,
    #[serde(default)]
    pub codtramo: String,
    /// K-means cluster id, used as the district/zone proxy.
    pub kmeans: Option<i64>,
    /// Segment length in km.
    pub longitud: Option<f64>,
    pub dijkstra: Option<f64>,
    pub bellman: Option<f64>,
}

impl SensorNode {
    pub fn gases(&self) -> GasReadings {
        GasReadings {
            co2: self.co2_level,
            ch4: self.ch4_level,
            nox: self.nox_level,
        }
    }

    pub fn set_gases(&mut self, gases: GasReadings) {
        self.co2_level = gases.co2;
        self.ch4_level = gases.ch4;
        self.nox_level = gases.nox;
    }
}

/// A road segment between two sensor nodes, weighted in km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
}

/// Wire shape of the graph endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<SensorNode>,
    pub edges: Vec<RoadEdge>,
    pub mst_weight: f64,
    pub log: Vec<String>,
}

/// One run of a mitigation simulation against a locked node.
///
/// `original` is copied at session start: the live node may be mutated by
/// this session's own completion, and the before/after display needs the
/// pre-merge values.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSession {
    pub node_id: NodeId,
    pub action: ActionType,
    pub original: GasReadings,
    pub progress_pct: u8,
}

// ---------------------------------------------------------------------------
// Input events
// ---------------------------------------------------------------------------

/// Closed set of interaction events consumed by the [`Dashboard`] reducer.
///
/// [`Dashboard`]: crate::Dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    HoverEnter(NodeId),
    HoverLeave(NodeId),
    Click(NodeId),
    PanelSelected(PanelId),
    DismissAlert,
    /// A successful simulation response to merge into the live node.
    SimulationResult { node_id: NodeId, gases: GasReadings },
}

// ---------------------------------------------------------------------------
// Render effects
// ---------------------------------------------------------------------------

/// Everything a rendering layer needs to place one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub node_id: NodeId,
    pub lat: f64,
    pub lon: f64,
    pub color: &'static str,
}

/// Render commands emitted by the reducer and the simulation workflow.
///
/// The core never touches a rendering collaborator directly; it returns these
/// as data and the client dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Hide all panels, show this one, mark its tab active.
    ShowPanel(PanelId),
    RenderNodePanel(Box<SensorNode>),
    ClearNodePanel,
    DrawGasChart(GasReadings),
    DestroyGasChart,
    SetEmphasis {
        node_id: NodeId,
        emphasis: MarkerEmphasis,
    },
    ResetAllEmphasis,
    SetMarkerColor {
        node_id: NodeId,
        color: &'static str,
    },
    RenderGraph {
        markers: Vec<MarkerSpec>,
        edges: Vec<RoadEdge>,
    },
    RenderLog(Vec<crate::LogBlock>),
    RenderMstWeight(f64),
    DrawRoute(Vec<(f64, f64)>),
    ClearRoute,
    RouteInfo {
        text: String,
        tone: Tone,
    },
    ShowAlert {
        district: String,
    },
    HideAlert,
    ShowSimulationDialog,
    HideSimulationDialog,
    ShowSimulationProgress(u8),
    ShowSimulationResults {
        before: GasReadings,
        after: GasReadings,
        tips: Vec<String>,
    },
    Feedback {
        text: String,
        tone: Tone,
    },
}
