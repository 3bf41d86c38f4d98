//! End-to-end reducer properties: overlapping hover/click/tab interaction,
//! debounce behavior, and the simulation merge race.

use std::time::{Duration, Instant};

use dash_core::test_fixtures::{base_graph, loaded_dashboard, nid, node};
use dash_core::{
    banner_message, Dashboard, Effect, GasReadings, InputEvent, MarkerEmphasis, PanelId,
};

/// Apply a pointer event and immediately drain it past the debounce window.
fn fire(dashboard: &mut Dashboard, event: InputEvent) -> Vec<Effect> {
    let t0 = Instant::now();
    let mut effects = dashboard.apply(event, t0);
    effects.extend(dashboard.poll(t0 + Duration::from_millis(60)));
    effects
}

fn panel_renders(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| {
            matches!(
                e,
                Effect::RenderNodePanel(_)
                    | Effect::ClearNodePanel
                    | Effect::DrawGasChart(_)
                    | Effect::DestroyGasChart
            )
        })
        .count()
}

#[test]
fn hover_renders_panel_when_node_detail_visible() {
    let mut dashboard = loaded_dashboard();
    fire(&mut dashboard, InputEvent::PanelSelected(PanelId::NodeDetail));

    let effects = fire(&mut dashboard, InputEvent::HoverEnter(nid("A")));
    assert!(effects.contains(&Effect::SetEmphasis {
        node_id: nid("A"),
        emphasis: MarkerEmphasis::Highlighted,
    }));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::RenderNodePanel(n) if n.id == nid("A"))));
    assert_eq!(dashboard.selection().hovered(), Some(&nid("A")));
}

#[test]
fn hover_on_other_panel_only_changes_emphasis() {
    // The log panel is active by default; hover must not touch the panel.
    let mut dashboard = loaded_dashboard();
    let effects = fire(&mut dashboard, InputEvent::HoverEnter(nid("A")));
    assert_eq!(panel_renders(&effects), 0);
    assert!(effects.contains(&Effect::SetEmphasis {
        node_id: nid("A"),
        emphasis: MarkerEmphasis::Highlighted,
    }));
    assert_eq!(dashboard.selection().hovered(), None);
}

#[test]
fn lock_suppresses_hover_panel_updates() {
    let mut dashboard = loaded_dashboard();
    fire(&mut dashboard, InputEvent::Click(nid("A")));
    assert_eq!(dashboard.selection().locked(), Some(&nid("A")));

    // Any hover sequence under a lock: emphasis may change, the panel may not.
    for event in [
        InputEvent::HoverEnter(nid("B")),
        InputEvent::HoverLeave(nid("B")),
        InputEvent::HoverEnter(nid("C")),
        InputEvent::HoverLeave(nid("C")),
        InputEvent::HoverEnter(nid("A")),
    ] {
        let effects = fire(&mut dashboard, event);
        assert_eq!(panel_renders(&effects), 0, "panel changed under lock: {effects:?}");
    }
    assert_eq!(dashboard.selection().locked(), Some(&nid("A")));
}

#[test]
fn click_toggle_restores_preclick_state() {
    let mut dashboard = loaded_dashboard();

    fire(&mut dashboard, InputEvent::Click(nid("A")));
    assert_eq!(dashboard.selection().locked(), Some(&nid("A")));
    assert_eq!(dashboard.active_panel(), PanelId::NodeDetail);

    let effects = fire(&mut dashboard, InputEvent::Click(nid("A")));
    assert_eq!(dashboard.selection().locked(), None);
    assert_eq!(dashboard.selection().hovered(), None);
    assert!(effects.contains(&Effect::ClearNodePanel));
    assert!(effects.contains(&Effect::SetEmphasis {
        node_id: nid("A"),
        emphasis: MarkerEmphasis::Default,
    }));
}

#[test]
fn click_forces_node_detail_panel() {
    let mut dashboard = loaded_dashboard();
    assert_eq!(dashboard.active_panel(), PanelId::Log);

    let effects = fire(&mut dashboard, InputEvent::Click(nid("B")));
    assert_eq!(dashboard.active_panel(), PanelId::NodeDetail);
    assert!(effects.contains(&Effect::ShowPanel(PanelId::NodeDetail)));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::RenderNodePanel(n) if n.id == nid("B"))));
}

#[test]
fn panel_switch_away_resets_everything() {
    let mut dashboard = loaded_dashboard();
    fire(&mut dashboard, InputEvent::Click(nid("C")));
    assert!(dashboard.alert_visible());

    let effects = fire(&mut dashboard, InputEvent::PanelSelected(PanelId::Log));
    assert_eq!(dashboard.selection().hovered(), None);
    assert_eq!(dashboard.selection().locked(), None);
    assert!(!dashboard.alert_visible());
    assert!(effects.contains(&Effect::ShowPanel(PanelId::Log)));
    assert!(effects.contains(&Effect::ClearNodePanel));
    assert!(effects.contains(&Effect::HideSimulationDialog));
    assert!(effects.contains(&Effect::HideAlert));
    assert!(effects.contains(&Effect::ResetAllEmphasis));
}

#[test]
fn reentering_node_detail_restores_held_lock() {
    let mut dashboard = loaded_dashboard();
    fire(&mut dashboard, InputEvent::Click(nid("A")));

    let effects = fire(&mut dashboard, InputEvent::PanelSelected(PanelId::NodeDetail));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::RenderNodePanel(n) if n.id == nid("A"))));
    assert!(effects.contains(&Effect::SetEmphasis {
        node_id: nid("A"),
        emphasis: MarkerEmphasis::Highlighted,
    }));
    assert!(effects.contains(&Effect::ResetAllEmphasis));
}

#[test]
fn show_panel_is_idempotent() {
    let mut dashboard = loaded_dashboard();
    let first = fire(&mut dashboard, InputEvent::PanelSelected(PanelId::Route));
    let second = fire(&mut dashboard, InputEvent::PanelSelected(PanelId::Route));
    assert_eq!(first, second);
    assert_eq!(dashboard.active_panel(), PanelId::Route);
}

#[test]
fn simulation_merge_applies_while_lock_held() {
    let mut dashboard = loaded_dashboard();
    fire(&mut dashboard, InputEvent::Click(nid("C")));

    let cleaned = GasReadings {
        co2: 30.0,
        ch4: 5.0,
        nox: 2.0,
    };
    let effects = fire(
        &mut dashboard,
        InputEvent::SimulationResult {
            node_id: nid("C"),
            gases: cleaned,
        },
    );

    assert_eq!(dashboard.node(&nid("C")).unwrap().gases(), cleaned);
    assert!(effects.contains(&Effect::SetMarkerColor {
        node_id: nid("C"),
        color: "#4CAF50",
    }));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::RenderNodePanel(n) if n.id == nid("C"))));
    // The merged readings are Low, so the High alert raised by the click
    // clears on the re-render.
    assert!(!dashboard.alert_visible());
}

#[test]
fn stale_simulation_result_updates_data_but_not_panel() {
    // Lock A, start a simulation for A, relock to B before the response
    // lands: A's live data and marker color still update, but no panel
    // render is emitted for A and B's panel stays in place.
    let mut dashboard = loaded_dashboard();
    fire(&mut dashboard, InputEvent::Click(nid("A")));
    fire(&mut dashboard, InputEvent::Click(nid("B")));
    assert_eq!(dashboard.selection().locked(), Some(&nid("B")));

    let cleaned = GasReadings {
        co2: 10.0,
        ch4: 1.0,
        nox: 0.5,
    };
    let effects = fire(
        &mut dashboard,
        InputEvent::SimulationResult {
            node_id: nid("A"),
            gases: cleaned,
        },
    );

    assert_eq!(dashboard.node(&nid("A")).unwrap().gases(), cleaned);
    assert!(effects.contains(&Effect::SetMarkerColor {
        node_id: nid("A"),
        color: "#4CAF50",
    }));
    assert_eq!(panel_renders(&effects), 0);
    assert_eq!(dashboard.selection().locked(), Some(&nid("B")));
}

#[test]
fn high_pollution_node_raises_district_alert() {
    // Node C carries co2:150, ch4:25, nox:12, which classifies High.
    let mut dashboard = loaded_dashboard();
    let effects = fire(&mut dashboard, InputEvent::Click(nid("C")));

    let district = effects.iter().find_map(|e| match e {
        Effect::ShowAlert { district } => Some(district.clone()),
        _ => None,
    });
    assert_eq!(district.as_deref(), Some("Distrito 2"));
    assert!(dashboard.alert_visible());
    assert!(banner_message(&district.unwrap())
        .contains("Contaminación alta detectada en Distrito 2"));
}

#[test]
fn dismissing_the_alert_hides_it() {
    let mut dashboard = loaded_dashboard();
    fire(&mut dashboard, InputEvent::Click(nid("C")));
    assert!(dashboard.alert_visible());

    let effects = fire(&mut dashboard, InputEvent::DismissAlert);
    assert_eq!(effects, vec![Effect::HideAlert]);
    assert!(!dashboard.alert_visible());
}

#[test]
fn hover_flicker_collapses_to_nothing() {
    // Enter then leave the same marker inside the 50 ms window: the leave
    // replaces the pending enter, and an empty hover's leave is inert.
    let mut dashboard = loaded_dashboard();
    fire(&mut dashboard, InputEvent::PanelSelected(PanelId::NodeDetail));

    let t0 = Instant::now();
    assert!(dashboard.apply(InputEvent::HoverEnter(nid("A")), t0).is_empty());
    assert!(dashboard
        .apply(InputEvent::HoverLeave(nid("A")), t0 + Duration::from_millis(20))
        .is_empty());

    let effects = dashboard.poll(t0 + Duration::from_millis(200));
    assert_eq!(panel_renders(&effects), 0, "flicker leaked a render: {effects:?}");
    assert_eq!(dashboard.selection().hovered(), None);
}

#[test]
fn debounce_is_independent_per_marker() {
    let mut dashboard = loaded_dashboard();
    fire(&mut dashboard, InputEvent::PanelSelected(PanelId::NodeDetail));

    let t0 = Instant::now();
    dashboard.apply(InputEvent::HoverEnter(nid("A")), t0);
    dashboard.apply(InputEvent::HoverEnter(nid("B")), t0 + Duration::from_millis(10));

    let effects = dashboard.poll(t0 + Duration::from_millis(200));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::RenderNodePanel(n) if n.id == nid("A"))));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::RenderNodePanel(n) if n.id == nid("B"))));
    assert_eq!(dashboard.selection().hovered(), Some(&nid("B")));
}

#[test]
fn load_graph_drops_non_finite_coordinates() {
    let mut graph = base_graph();
    let mut broken = node("NAN", 10.0, 1.0, 0.5);
    broken.lat = f64::NAN;
    graph.nodes.push(broken);

    let mut dashboard = Dashboard::new();
    let effects = dashboard.load_graph(graph);

    assert_eq!(dashboard.node_count(), 3);
    assert!(dashboard.node(&nid("NAN")).is_none());
    let markers = effects.iter().find_map(|e| match e {
        Effect::RenderGraph { markers, .. } => Some(markers.len()),
        _ => None,
    });
    assert_eq!(markers, Some(3));
}

#[test]
fn load_graph_resets_selection_and_colors_markers() {
    let mut dashboard = loaded_dashboard();
    fire(&mut dashboard, InputEvent::Click(nid("C")));

    let effects = dashboard.load_graph(base_graph());
    assert_eq!(dashboard.selection().locked(), None);
    assert!(effects.contains(&Effect::ClearRoute));
    assert!(effects.contains(&Effect::HideAlert));

    let colors: Vec<&str> = effects
        .iter()
        .find_map(|e| match e {
            Effect::RenderGraph { markers, .. } => {
                Some(markers.iter().map(|m| m.color).collect())
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(colors, vec!["#4CAF50", "#FFEB3B", "#F44336"]);
}

#[test]
fn startup_shows_log_panel_with_alert_hidden() {
    let mut dashboard = Dashboard::new();
    let effects = dashboard.startup_effects();
    assert_eq!(effects.first(), Some(&Effect::ShowPanel(PanelId::Log)));
    assert!(effects.contains(&Effect::HideAlert));
    assert_eq!(dashboard.active_panel(), PanelId::Log);
}
