use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use dash_client::{
    calculate_route, load_graph, ApiClient, SimulationWorkflow, WorkflowEvent, WorkflowPhase,
};
use dash_core::{classify, ActionType, Dashboard, InputEvent, NodeId, PanelId};

mod ui;
use ui::Views;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "dash_cli", about = "Air-quality map dashboard CLI")]
struct Cli {
    /// Backend base URL serving /graph, /route and /simulate.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server: String,
    /// Fetch the graph immediately on startup.
    #[arg(long)]
    load: bool,
}

// ---------------------------------------------------------------------------
// Interactive loop
// ---------------------------------------------------------------------------

struct App {
    api: ApiClient,
    dashboard: Dashboard,
    workflow: SimulationWorkflow,
    workflow_tx: mpsc::UnboundedSender<WorkflowEvent>,
    views: Views,
}

async fn run(cli: Cli) -> Result<()> {
    let (workflow_tx, mut workflow_rx) = mpsc::unbounded_channel();
    let mut app = App {
        api: ApiClient::new(cli.server),
        dashboard: Dashboard::new(),
        workflow: SimulationWorkflow::new(),
        workflow_tx,
        views: Views::default(),
    };

    let effects = app.dashboard.startup_effects();
    app.views.apply(&effects);
    if cli.load {
        let effects = load_graph(&app.api, &mut app.dashboard).await;
        app.views.apply(&effects);
    }
    print_help();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        // Sleep until the earliest pending debounce deadline; with nothing
        // pending a long timeout keeps the select arm alive harmlessly.
        let wake = app
            .dashboard
            .next_deadline()
            .map_or_else(
                || tokio::time::Instant::now() + Duration::from_secs(3600),
                tokio::time::Instant::from_std,
            );

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                if !handle_command(&mut app, line.trim()).await {
                    break;
                }
            }
            Some(event) = workflow_rx.recv() => {
                let update = app.workflow.on_event(event, app.dashboard.selection().locked());
                app.views.apply(&update.effects);
                if let Some(merge) = update.merge {
                    let effects = app.dashboard.apply(merge, Instant::now());
                    app.views.apply(&effects);
                }
            }
            _ = tokio::time::sleep_until(wake) => {
                let effects = app.dashboard.poll(Instant::now());
                app.views.apply(&effects);
            }
        }
    }

    Ok(())
}

/// Dispatch one input line. Returns `false` to quit.
async fn handle_command(app: &mut App, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };

    match command {
        "help" => print_help(),
        "quit" | "exit" => return false,
        "load" => {
            let effects = load_graph(&app.api, &mut app.dashboard).await;
            app.views.apply(&effects);
        }
        "hover" | "leave" | "click" => {
            let Some(id) = parts.next() else {
                println!("uso: {command} <id>");
                return true;
            };
            let node_id = NodeId(id.to_string());
            let event = match command {
                "hover" => InputEvent::HoverEnter(node_id),
                "leave" => InputEvent::HoverLeave(node_id),
                _ => InputEvent::Click(node_id),
            };
            let effects = app.dashboard.apply(event, Instant::now());
            app.views.apply(&effects);
        }
        "tab" => {
            let panel = match parts.next() {
                Some("bitacora") => PanelId::Log,
                Some("rutas") => PanelId::Route,
                Some("nodo") => PanelId::NodeDetail,
                _ => {
                    println!("uso: tab <bitacora|rutas|nodo>");
                    return true;
                }
            };
            let effects = app
                .dashboard
                .apply(InputEvent::PanelSelected(panel), Instant::now());
            app.views.apply(&effects);
            if panel != PanelId::NodeDetail {
                let effects = app.workflow.close();
                app.views.apply(&effects);
            }
        }
        "route" => {
            let origin = parts.next().unwrap_or("");
            let destination = parts.next().unwrap_or("");
            let report = calculate_route(&app.api, origin, destination).await;
            app.views.apply(&report.effects);
            if report.show_route_panel {
                let effects = app
                    .dashboard
                    .apply(InputEvent::PanelSelected(PanelId::Route), Instant::now());
                app.views.apply(&effects);
            }
        }
        "sim" => {
            let locked = app
                .dashboard
                .selection()
                .locked()
                .and_then(|id| app.dashboard.node(id));
            let effects = app.workflow.open(locked);
            app.views.apply(&effects);
        }
        "simulate" => {
            let action = match parts.next() {
                Some("panel_solar") => ActionType::PanelSolar,
                Some("biodigestor") => ActionType::Biodigestor,
                _ => {
                    println!("uso: simulate <panel_solar|biodigestor>");
                    return true;
                }
            };
            simulate(app, action);
        }
        "close" => {
            let effects = app.workflow.close();
            app.views.apply(&effects);
        }
        "dismiss" => {
            let effects = app.dashboard.apply(InputEvent::DismissAlert, Instant::now());
            app.views.apply(&effects);
        }
        "nodes" => list_nodes(app),
        _ => println!("comando desconocido: {command} (escribe 'help')"),
    }

    true
}

fn simulate(app: &mut App, action: ActionType) {
    let node = app
        .dashboard
        .selection()
        .locked()
        .and_then(|id| app.dashboard.node(id))
        .cloned();
    match node {
        None => {
            // The lock disappeared under the open dialog: warn and drop it.
            let mut effects = app.workflow.open(None);
            effects.extend(app.workflow.close());
            app.views.apply(&effects);
        }
        Some(node) => {
            if app.workflow.phase() != WorkflowPhase::OptionsShown {
                println!("(abre el simulador primero con 'sim')");
                return;
            }
            let effects = app
                .workflow
                .start(&app.api, &node, action, app.workflow_tx.clone());
            app.views.apply(&effects);
        }
    }
}

fn list_nodes(app: &App) {
    let mut ids: Vec<NodeId> = app.dashboard.node_ids().cloned().collect();
    ids.sort_by(|a, b| a.0.cmp(&b.0));
    if ids.is_empty() {
        println!("(sin nodos; ejecuta 'load' primero)");
    }
    for id in ids {
        if let Some(node) = app.dashboard.node(&id) {
            println!(
                "{id}  [{}]  CO₂ {:.2}  CH₄ {:.2}  NOx {:.2}",
                classify(&node.gases()).label(),
                node.co2_level,
                node.ch4_level,
                node.nox_level,
            );
        }
    }
}

fn print_help() {
    println!("comandos:");
    println!("  load                                cargar el grafo desde el servidor");
    println!("  nodes                               listar nodos cargados");
    println!("  hover <id> | leave <id> | click <id>  eventos de puntero sobre un marcador");
    println!("  tab <bitacora|rutas|nodo>           cambiar de pestaña");
    println!("  route <origen> <destino>            calcular ruta óptima");
    println!("  sim                                 abrir el simulador de impacto");
    println!("  simulate <panel_solar|biodigestor>  ejecutar una simulación");
    println!("  close                               cerrar el simulador");
    println!("  dismiss                             ocultar la alerta de contaminación");
    println!("  quit                                salir");
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    run(Cli::parse()).await
}
