//! Shared test fixtures for dash_core and downstream crates.
//!
//! `base_graph()` provides a three-node graph spanning all severity levels;
//! `loaded_dashboard()` is a dashboard with that graph already in place.

use crate::{Dashboard, GraphData, NodeId, RoadEdge, SensorNode};

pub fn nid(id: &str) -> NodeId {
    NodeId(id.to_string())
}

/// A node at the Lima reference point with full metadata.
pub fn node(id: &str, co2: f64, ch4: f64, nox: f64) -> SensorNode {
    SensorNode {
        id: nid(id),
        lat: -12.0464,
        lon: -77.0428,
        co2_level: co2,
        ch4_level: ch4,
        nox_level: nox,
        codtramo: format!("TRAMO_{id}"),
        kmeans: Some(2),
        longitud: Some(1.25),
        dijkstra: Some(3.402),
        bellman: Some(3.402),
    }
}

/// Three nodes: "A" Low, "B" Moderate, "C" High (the alert-test readings).
pub fn base_graph() -> GraphData {
    GraphData {
        nodes: vec![
            node("A", 30.0, 5.0, 2.0),
            node("B", 50.0, 10.0, 5.0),
            node("C", 150.0, 25.0, 12.0),
        ],
        edges: vec![
            RoadEdge {
                source: nid("A"),
                target: nid("B"),
                weight: 1.2,
            },
            RoadEdge {
                source: nid("B"),
                target: nid("C"),
                weight: 0.8,
            },
        ],
        mst_weight: 12.5,
        log: vec![
            "Cargando tramos desde la base de datos...".to_string(),
            "300 tramos cargados.".to_string(),
            String::new(),
            "Grafo construido: 300 nodos, 412 aristas.".to_string(),
        ],
    }
}

/// A dashboard with [`base_graph`] loaded and its load effects discarded.
pub fn loaded_dashboard() -> Dashboard {
    let mut dashboard = Dashboard::new();
    let _ = dashboard.startup_effects();
    let _ = dashboard.load_graph(base_graph());
    dashboard
}
