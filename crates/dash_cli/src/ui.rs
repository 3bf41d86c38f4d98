//! Terminal implementations of the rendering capability traits.

use dash_client::{
    apply_effects, ChartSurface, MarkerLayer, PanelHost, RenderError, Renderers,
};
use dash_core::{
    panel, Effect, GasReadings, LogBlock, LogColor, MarkerEmphasis, MarkerSpec, NodeId, PanelId,
    RoadEdge, SensorNode, Tone, CH4_HIGH_THRESHOLD, CO2_HIGH_THRESHOLD, NOX_HIGH_THRESHOLD,
};

const RESET: &str = "\x1b[0m";

fn tone_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "",
        Tone::Success => "\x1b[32m",
        Tone::Warning => "\x1b[33m",
        Tone::Error => "\x1b[31m",
    }
}

fn log_color(color: LogColor) -> &'static str {
    match color {
        LogColor::Blue => "\x1b[34m",
        LogColor::Red => "\x1b[31m",
        LogColor::Yellow => "\x1b[33m",
        LogColor::Green => "\x1b[32m",
        LogColor::Brown => "\x1b[38;5;130m",
    }
}

/// Stdout stand-in for the Leaflet marker layer.
#[derive(Debug, Default)]
pub struct MapView;

impl MarkerLayer for MapView {
    fn render_graph(
        &mut self,
        markers: &[MarkerSpec],
        edges: &[RoadEdge],
    ) -> Result<(), RenderError> {
        println!(
            "[mapa] {} marcadores, {} tramos dibujados",
            markers.len(),
            edges.len()
        );
        Ok(())
    }

    fn set_color(&mut self, node_id: &NodeId, color: &str) -> Result<(), RenderError> {
        println!("[mapa] nodo {node_id} → color {color}");
        Ok(())
    }

    fn set_emphasis(
        &mut self,
        node_id: &NodeId,
        emphasis: MarkerEmphasis,
    ) -> Result<(), RenderError> {
        let style = match emphasis {
            MarkerEmphasis::Default => "normal",
            MarkerEmphasis::Highlighted => "resaltado",
        };
        println!("[mapa] nodo {node_id} → {style}");
        Ok(())
    }

    fn reset_emphasis(&mut self) -> Result<(), RenderError> {
        println!("[mapa] todos los marcadores → normal");
        Ok(())
    }

    fn draw_route(&mut self, path: &[(f64, f64)]) -> Result<(), RenderError> {
        println!("[mapa] ruta dibujada con {} puntos", path.len());
        Ok(())
    }

    fn clear_route(&mut self) -> Result<(), RenderError> {
        println!("[mapa] ruta borrada");
        Ok(())
    }
}

/// Stdout stand-in for the gas chart.
#[derive(Debug, Default)]
pub struct ChartView;

fn bar(value: f64, threshold: f64) -> String {
    let width = ((value / threshold) * 20.0).clamp(0.0, 40.0) as usize;
    "#".repeat(width)
}

impl ChartSurface for ChartView {
    fn draw(&mut self, gases: &GasReadings) -> Result<(), RenderError> {
        println!("[gráfico] CO₂ {:7.2} {}", gases.co2, bar(gases.co2, CO2_HIGH_THRESHOLD));
        println!("[gráfico] CH₄ {:7.2} {}", gases.ch4, bar(gases.ch4, CH4_HIGH_THRESHOLD));
        println!("[gráfico] NOx {:7.2} {}", gases.nox, bar(gases.nox, NOX_HIGH_THRESHOLD));
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Stdout stand-in for the tab-panel host.
#[derive(Debug, Default)]
pub struct PanelView;

impl PanelHost for PanelView {
    fn show_panel(&mut self, panel: PanelId) -> Result<(), RenderError> {
        println!("=== Panel activo: {} ===", panel.label());
        Ok(())
    }

    fn render_node_detail(&mut self, node: &SensorNode) -> Result<(), RenderError> {
        for line in panel::node_detail_lines(node) {
            println!("  {line}");
        }
        println!();
        for line in panel::zone_summary(node) {
            println!("  {line}");
        }
        println!("  Medidas sugeridas:");
        let level = dash_core::classify(&node.gases());
        for suggestion in panel::recommendations(level) {
            println!("   - {suggestion}");
        }
        Ok(())
    }

    fn clear_node_detail(&mut self) -> Result<(), RenderError> {
        println!("[panel] sin nodo seleccionado");
        Ok(())
    }

    fn render_log(&mut self, blocks: &[LogBlock]) -> Result<(), RenderError> {
        for block in blocks {
            let color = log_color(block.color);
            for line in &block.lines {
                println!("{color}{line}{RESET}");
            }
            println!();
        }
        Ok(())
    }

    fn render_mst_weight(&mut self, weight_km: f64) -> Result<(), RenderError> {
        println!("Peso total del Árbol de Expansión Mínima (MST): {weight_km} km");
        Ok(())
    }

    fn route_info(&mut self, text: &str, tone: Tone) -> Result<(), RenderError> {
        println!("[ruta] {}{text}{RESET}", tone_color(tone));
        Ok(())
    }

    fn show_alert(&mut self, district: &str) -> Result<(), RenderError> {
        println!("\x1b[41m{}{RESET}", dash_core::banner_message(district));
        Ok(())
    }

    fn hide_alert(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn show_simulation_dialog(&mut self) -> Result<(), RenderError> {
        println!("[simulador] acciones disponibles: panel_solar, biodigestor");
        Ok(())
    }

    fn hide_simulation_dialog(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn show_simulation_progress(&mut self, pct: u8) -> Result<(), RenderError> {
        println!("[simulador] progreso {pct:3}%");
        Ok(())
    }

    fn show_simulation_results(
        &mut self,
        before: &GasReadings,
        after: &GasReadings,
        tips: &[String],
    ) -> Result<(), RenderError> {
        println!("[simulador] Antes  → CO₂ {:.2}  CH₄ {:.2}  NOx {:.2}", before.co2, before.ch4, before.nox);
        println!("[simulador] Después → CO₂ {:.2}  CH₄ {:.2}  NOx {:.2}", after.co2, after.ch4, after.nox);
        println!("[simulador] Tips y Mejoras:");
        for tip in tips {
            println!("   - {tip}");
        }
        Ok(())
    }

    fn feedback(&mut self, text: &str, tone: Tone) -> Result<(), RenderError> {
        println!("{}{text}{RESET}", tone_color(tone));
        Ok(())
    }
}

/// The three collaborators wired together, plus the dispatch shortcut.
#[derive(Debug, Default)]
pub struct Views {
    pub map: MapView,
    pub chart: ChartView,
    pub panels: PanelView,
}

impl Views {
    pub fn apply(&mut self, effects: &[Effect]) {
        let mut renderers = Renderers {
            markers: &mut self.map,
            chart: &mut self.chart,
            panels: &mut self.panels,
        };
        apply_effects(effects, &mut renderers);
    }
}
