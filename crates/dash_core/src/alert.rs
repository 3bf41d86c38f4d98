use crate::{Effect, Level};

/// Text shown in the district alert banner.
pub fn banner_message(district: &str) -> String {
    format!("⚠️ Contaminación alta detectada en {district}.")
}

/// Decides whether the persistent district alert banner is shown.
///
/// Re-evaluated every time the displayed node changes; forced hidden on
/// panel switch-away and at startup. The banner is dismissible, but a
/// re-evaluation against a High node brings it back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertController {
    visible: bool,
}

impl AlertController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Evaluate against the currently displayed node's severity.
    pub fn evaluate(&mut self, level: Level, district: &str) -> Effect {
        if level == Level::High {
            self.visible = true;
            Effect::ShowAlert {
                district: district.to_string(),
            }
        } else {
            self.visible = false;
            Effect::HideAlert
        }
    }

    /// Unconditional hide: startup, panel switch-away, panel clear, dismissal.
    pub fn force_hide(&mut self) -> Effect {
        self.visible = false;
        Effect::HideAlert
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_level_shows_banner() {
        let mut alert = AlertController::new();
        let effect = alert.evaluate(Level::High, "Distrito 2");
        assert_eq!(
            effect,
            Effect::ShowAlert {
                district: "Distrito 2".to_string()
            }
        );
        assert!(alert.is_visible());
    }

    #[test]
    fn lower_levels_hide_banner() {
        let mut alert = AlertController::new();
        alert.evaluate(Level::High, "Distrito 2");
        assert_eq!(alert.evaluate(Level::Moderate, "Distrito 2"), Effect::HideAlert);
        assert!(!alert.is_visible());
        assert_eq!(alert.evaluate(Level::Low, "Distrito 2"), Effect::HideAlert);
    }

    #[test]
    fn force_hide_dismisses() {
        let mut alert = AlertController::new();
        alert.evaluate(Level::High, "Distrito 5");
        assert_eq!(alert.force_hide(), Effect::HideAlert);
        assert!(!alert.is_visible());
    }

    #[test]
    fn banner_names_the_district() {
        assert_eq!(
            banner_message("Distrito 3"),
            "⚠️ Contaminación alta detectada en Distrito 3."
        );
    }
}
