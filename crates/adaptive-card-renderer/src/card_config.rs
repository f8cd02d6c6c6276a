use crate::host_config::AdaptiveCardSettings;

/// Host-facing card settings read by the renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardConfig {
    allow_custom_style: bool,
}

impl CardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the card's own `style` is honored for the root panel.
    pub fn allow_custom_style(&self) -> bool {
        self.allow_custom_style
    }

    pub fn set_allow_custom_style(&mut self, allow_custom_style: bool) {
        self.allow_custom_style = allow_custom_style;
    }
}

impl From<&AdaptiveCardSettings> for CardConfig {
    fn from(settings: &AdaptiveCardSettings) -> Self {
        Self {
            allow_custom_style: settings.allow_custom_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_disallows_custom_style() {
        assert!(!CardConfig::new().allow_custom_style());
    }

    #[test]
    fn copies_from_settings_and_toggles() {
        let mut config = CardConfig::from(&AdaptiveCardSettings {
            allow_custom_style: true,
        });
        assert!(config.allow_custom_style());
        config.set_allow_custom_style(false);
        assert!(!config.allow_custom_style());
    }
}
