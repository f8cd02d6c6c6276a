use serde::{Deserialize, Serialize};

use crate::errors::HostConfigError;

/// Presentation settings and feature toggles supplied by the host.
///
/// Immutable for the duration of a render pass. Every section is optional in
/// JSON and falls back to the defaults below. Top-level sections this crate
/// does not model (`fontTypes`, `factSet`, ...) are ignored; unknown keys
/// inside a modelled section are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    #[serde(default = "default_true")]
    pub supports_interactivity: bool,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_sizes: FontSizesConfig,
    #[serde(default)]
    pub spacing: SpacingConfig,
    #[serde(default)]
    pub image_sizes: ImageSizesConfig,
    #[serde(default)]
    pub container_styles: ContainerStylesConfig,
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub actions: ActionsConfig,
    #[serde(default)]
    pub adaptive_card: AdaptiveCardSettings,
}

fn default_true() -> bool {
    true
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            supports_interactivity: true,
            font_family: None,
            font_sizes: FontSizesConfig::default(),
            spacing: SpacingConfig::default(),
            image_sizes: ImageSizesConfig::default(),
            container_styles: ContainerStylesConfig::default(),
            inputs: InputsConfig::default(),
            actions: ActionsConfig::default(),
            adaptive_card: AdaptiveCardSettings::default(),
        }
    }
}

impl HostConfig {
    /// Parses and validates a host config document.
    pub fn from_json_str(json: &str) -> Result<Self, HostConfigError> {
        let config: HostConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HostConfigError> {
        if self.actions.max_actions == 0 {
            return Err(HostConfigError::Invalid {
                field: "actions.maxActions",
                reason: "must be at least 1".to_string(),
            });
        }
        let sizes = &self.font_sizes;
        if [sizes.small, sizes.default, sizes.medium, sizes.large, sizes.extra_large].contains(&0) {
            return Err(HostConfigError::Invalid {
                field: "fontSizes",
                reason: "sizes must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn supports_interactivity(&self) -> bool {
        self.supports_interactivity
    }

    pub fn spacing_for(&self, spacing: Spacing) -> u32 {
        let config = &self.spacing;
        match spacing {
            Spacing::None => 0,
            Spacing::Small => config.small,
            Spacing::Default => config.default,
            Spacing::Medium => config.medium,
            Spacing::Large => config.large,
            Spacing::ExtraLarge => config.extra_large,
            Spacing::Padding => config.padding,
        }
    }

    pub fn font_size_for(&self, size: TextSize) -> u32 {
        let config = &self.font_sizes;
        match size {
            TextSize::Small => config.small,
            TextSize::Default => config.default,
            TextSize::Medium => config.medium,
            TextSize::Large => config.large,
            TextSize::ExtraLarge => config.extra_large,
        }
    }

    pub fn image_size_for(&self, size: ImageSize) -> Option<u32> {
        let config = &self.image_sizes;
        match size {
            ImageSize::Auto | ImageSize::Stretch => None,
            ImageSize::Small => Some(config.small),
            ImageSize::Medium => Some(config.medium),
            ImageSize::Large => Some(config.large),
        }
    }

    pub fn background_for(&self, style: ContainerStyle) -> &str {
        let styles = &self.container_styles;
        match style {
            ContainerStyle::Default => &styles.default.background_color,
            ContainerStyle::Emphasis => &styles.emphasis.background_color,
            ContainerStyle::Good => &styles.good.background_color,
            ContainerStyle::Attention => &styles.attention.background_color,
            ContainerStyle::Warning => &styles.warning.background_color,
            ContainerStyle::Accent => &styles.accent.background_color,
        }
    }
}

/// Named spacing step used by elements' `spacing` property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Spacing {
    None,
    Small,
    #[default]
    Default,
    Medium,
    Large,
    ExtraLarge,
    Padding,
}

impl Spacing {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "small" => Some(Self::Small),
            "default" => Some(Self::Default),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "extralarge" => Some(Self::ExtraLarge),
            "padding" => Some(Self::Padding),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextSize {
    Small,
    #[default]
    Default,
    Medium,
    Large,
    ExtraLarge,
}

impl TextSize {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "default" => Some(Self::Default),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "extralarge" => Some(Self::ExtraLarge),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSize {
    #[default]
    Auto,
    Stretch,
    Small,
    Medium,
    Large,
}

impl ImageSize {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "stretch" => Some(Self::Stretch),
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainerStyle {
    #[default]
    Default,
    Emphasis,
    Good,
    Attention,
    Warning,
    Accent,
}

impl ContainerStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "emphasis" => Some(Self::Emphasis),
            "good" => Some(Self::Good),
            "attention" => Some(Self::Attention),
            "warning" => Some(Self::Warning),
            "accent" => Some(Self::Accent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FontSizesConfig {
    pub small: u32,
    pub default: u32,
    pub medium: u32,
    pub large: u32,
    pub extra_large: u32,
}

impl Default for FontSizesConfig {
    fn default() -> Self {
        Self {
            small: 12,
            default: 14,
            medium: 17,
            large: 21,
            extra_large: 26,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpacingConfig {
    pub small: u32,
    pub default: u32,
    pub medium: u32,
    pub large: u32,
    pub extra_large: u32,
    pub padding: u32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            small: 3,
            default: 8,
            medium: 20,
            large: 30,
            extra_large: 40,
            padding: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageSizesConfig {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl Default for ImageSizesConfig {
    fn default() -> Self {
        Self {
            small: 40,
            medium: 80,
            large: 160,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContainerStyleDefinition {
    #[serde(default)]
    pub background_color: String,
}

impl ContainerStyleDefinition {
    fn with_background(color: &str) -> Self {
        Self {
            background_color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ContainerStylesConfig {
    pub default: ContainerStyleDefinition,
    pub emphasis: ContainerStyleDefinition,
    pub good: ContainerStyleDefinition,
    pub attention: ContainerStyleDefinition,
    pub warning: ContainerStyleDefinition,
    pub accent: ContainerStyleDefinition,
}

fn default_background() -> ContainerStyleDefinition {
    ContainerStyleDefinition::with_background("#FFFFFFFF")
}

fn emphasis_background() -> ContainerStyleDefinition {
    ContainerStyleDefinition::with_background("#08000000")
}

fn good_background() -> ContainerStyleDefinition {
    ContainerStyleDefinition::with_background("#FFD5F0DD")
}

fn attention_background() -> ContainerStyleDefinition {
    ContainerStyleDefinition::with_background("#F7E9E9")
}

fn warning_background() -> ContainerStyleDefinition {
    ContainerStyleDefinition::with_background("#F7F7DF")
}

fn accent_background() -> ContainerStyleDefinition {
    ContainerStyleDefinition::with_background("#DCE5F7")
}

impl Default for ContainerStylesConfig {
    fn default() -> Self {
        Self {
            default: default_background(),
            emphasis: emphasis_background(),
            good: good_background(),
            attention: attention_background(),
            warning: warning_background(),
            accent: accent_background(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InputsConfig {
    #[serde(default)]
    pub label: InputLabelConfig,
    #[serde(default)]
    pub error_message: ErrorMessageConfig,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            label: InputLabelConfig::default(),
            error_message: ErrorMessageConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct InputLabelConfig {
    pub input_spacing: Spacing,
    pub required_suffix: String,
}

fn default_required_suffix() -> String {
    "*".to_string()
}

impl Default for InputLabelConfig {
    fn default() -> Self {
        Self {
            input_spacing: Spacing::Small,
            required_suffix: default_required_suffix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ErrorMessageConfig {
    pub spacing: Spacing,
}

impl Default for ErrorMessageConfig {
    fn default() -> Self {
        Self {
            spacing: Spacing::Small,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionsOrientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ActionsConfig {
    pub max_actions: u32,
    pub button_spacing: u32,
    pub actions_orientation: ActionsOrientation,
}

fn default_max_actions() -> u32 {
    5
}

fn default_button_spacing() -> u32 {
    10
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            max_actions: default_max_actions(),
            button_spacing: default_button_spacing(),
            actions_orientation: ActionsOrientation::Horizontal,
        }
    }
}

/// Card-level settings as they appear in the host config document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdaptiveCardSettings {
    #[serde(default)]
    pub allow_custom_style: bool,
}
