//! The graph load flow.

use dash_core::{group_log_blocks, Dashboard, Effect};

use crate::api::ApiClient;

/// Fetch the graph and install it in the dashboard.
///
/// Infallible by design: a failed fetch becomes log lines in the bitácora
/// instead of an error the caller could drop on the floor.
pub async fn load_graph(api: &ApiClient, dashboard: &mut Dashboard) -> Vec<Effect> {
    match api.fetch_graph().await {
        Ok(data) => {
            tracing::info!(
                nodes = data.nodes.len(),
                edges = data.edges.len(),
                "graph data received"
            );
            dashboard.load_graph(data)
        }
        Err(err) => {
            tracing::error!(%err, "graph load failed");
            let lines = vec![
                "Error al cargar los datos del grafo.".to_string(),
                err.to_string(),
                "Por favor, revisa la consola del servidor para más detalles.".to_string(),
            ];
            vec![Effect::RenderLog(group_log_blocks(&lines))]
        }
    }
}
