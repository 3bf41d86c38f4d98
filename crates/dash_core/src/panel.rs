//! Pure text composition for the node-detail panel.
//!
//! The rendering layer decides typography; these functions decide content,
//! including the `Sin dato` fallbacks for fields the backend may omit.

use crate::{classify, Level, SensorNode};

/// District/zone display name, with the k-means cluster as the proxy.
pub fn district_name(kmeans: Option<i64>) -> String {
    match kmeans {
        Some(cluster) => format!("Distrito {cluster}"),
        None => "Distrito Desconocido".to_string(),
    }
}

fn fmt_km(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "Sin dato".to_string(),
    }
}

/// The textual detail block for one node.
pub fn node_detail_lines(node: &SensorNode) -> Vec<String> {
    let codtramo = if node.codtramo.is_empty() {
        "Sin dato"
    } else {
        &node.codtramo
    };
    let kmeans = node
        .kmeans
        .map_or_else(|| "Sin dato".to_string(), |k| k.to_string());

    vec![
        format!("Nodo (ID): {}", node.id),
        format!("Latitud: {:.6}", node.lat),
        format!("Longitud: {:.6}", node.lon),
        format!("CODTRAMO Original: {codtramo}"),
        format!("Cluster KMeans: {kmeans}"),
        format!("LONGITUD (tramo): {} km", fmt_km(node.longitud, 2)),
        String::new(),
        "Niveles de Gases:".to_string(),
        format!("CO₂: {:.2} ppm", node.co2_level),
        format!("CH₄: {:.2} ppm", node.ch4_level),
        format!("NOx: {:.2} ppm", node.nox_level),
        String::new(),
        format!("Dijkstra (km): {}", fmt_km(node.dijkstra, 3)),
        format!("Bellman-Ford (km): {}", fmt_km(node.bellman, 3)),
    ]
}

/// The per-district educational summary.
pub fn zone_summary(node: &SensorNode) -> Vec<String> {
    let district = district_name(node.kmeans);
    let level = classify(&node.gases());
    vec![
        format!(
            "El {district} presenta un nivel de contaminación general: {}",
            level.label()
        ),
        format!("Nivel promedio de CO₂: {:.2} ppm", node.co2_level),
        format!("Nivel promedio de CH₄: {:.2} ppm", node.ch4_level),
        format!("Nivel promedio de NOx: {:.2} ppm", node.nox_level),
        format!(
            "Estos valores son representativos de la calidad del aire en esta sección del {district}."
        ),
    ]
}

/// Suggested measures for a severity level.
pub fn recommendations(level: Level) -> &'static [&'static str] {
    match level {
        Level::Low => &[
            "Mantener el monitoreo continuo de la calidad del aire.",
            "Fomentar el uso de vehículos eléctricos y transporte público.",
            "Promover la creación de más zonas verdes.",
        ],
        Level::Moderate => &[
            "Implementar programas de incentivo para energías renovables.",
            "Optimizar las rutas de transporte público para reducir emisiones.",
            "Fomentar la reforestación urbana y el uso de filtros industriales.",
        ],
        Level::High => &[
            "Inversión urgente en tecnologías de cero emisiones.",
            "Restricciones al tráfico de vehículos contaminantes.",
            "Plantación masiva de árboles y creación de parques ecológicos.",
            "Monitoreo y control estricto de emisiones industriales.",
        ],
    }
}
