use crate::{classify, ActionType, GasReadings, Level};

/// Advisory lines for a completed simulation, comparing the snapshot taken at
/// session start against the merged readings.
///
/// Deterministic given inputs; no side effects. Solar-panel tips reference
/// CO₂/NOx, biodigester tips reference CH₄, and the closing remark is keyed
/// to the resulting severity level.
pub fn simulation_tips(
    original: &GasReadings,
    updated: &GasReadings,
    action: ActionType,
) -> Vec<String> {
    let before = classify(original);
    let after = classify(updated);

    let mut tips = vec![format!(
        "La simulación de {} ha reducido los niveles de gases en la zona.",
        action.label()
    )];

    if after == before {
        tips.push(format!(
            "La calidad del aire se mantiene en nivel {}. Se necesitan más acciones.",
            after.label()
        ));
    } else {
        tips.push(format!(
            "¡La calidad del aire ha mejorado de {} a {}!",
            before.label(),
            after.label()
        ));
    }

    match action {
        ActionType::PanelSolar => {
            if updated.co2 < original.co2 {
                tips.push(
                    "La energía solar es clave para reducir el CO₂. Considera aumentar la capacidad instalada."
                        .to_string(),
                );
            }
            if updated.nox < original.nox {
                tips.push(
                    "Los paneles solares ayudan a mitigar los NOx. Explora la integración con la red eléctrica."
                        .to_string(),
                );
            }
        }
        ActionType::Biodigestor => {
            if updated.ch4 < original.ch4 {
                tips.push(
                    "Los biodigestores son excelentes para el metano. Evalúa la viabilidad de más unidades."
                        .to_string(),
                );
            }
            tips.push(
                "Además de reducir CH₄, los biodigestores pueden generar biogás para energía."
                    .to_string(),
            );
        }
    }

    tips.push(
        match after {
            Level::High => {
                "Aún hay un nivel de contaminación alto. Combina esta solución con otras medidas como reforestación o restricciones vehiculares."
            }
            Level::Moderate => "El nivel es moderado. Sigue buscando mejoras y monitorea constantemente.",
            Level::Low => "¡Excelente! Mantén el monitoreo y busca la sostenibilidad a largo plazo.",
        }
        .to_string(),
    );

    tips
}
