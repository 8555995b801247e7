//! Semantic color roles and the two built-in themes.
//!
//! Widgets never pick raw colors; they ask the active [`Theme`] for a role
//! so dark/light toggling is a plain swap of the role table.

use form::Severity;
use ratatui::style::{Color, Modifier, Style};

/// Semantic roles used by components to request colors independent of a
/// specific theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    Background,
    Surface,
    Text,
    SubtleText,
    Border,

    Primary,
    Success,
    Warning,
    Danger,
    Info,
}

/// A mapping from semantic roles to colors for a given theme.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RoleColors {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub subtle_text: Color,
    pub border: Color,

    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,
}

impl RoleColors {
    pub fn color(&self, role: Role) -> Color {
        match role {
            Role::Background => self.background,
            Role::Surface => self.surface,
            Role::Text => self.text,
            Role::SubtleText => self.subtle_text,
            Role::Border => self.border,

            Role::Primary => self.primary,
            Role::Success => self.success,
            Role::Warning => self.warning,
            Role::Danger => self.danger,
            Role::Info => self.info,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    pub name: String,
    pub dark: bool,
    pub roles: RoleColors,
}

impl Theme {
    /// Convenience method to turn a role into a ratatui `Style`.
    pub fn style(&self, role: Role) -> Style {
        Style::default().fg(self.roles.color(role))
    }

    /// Same as `style`, but bold.
    pub fn style_bold(&self, role: Role) -> Style {
        self.style(role).add_modifier(Modifier::BOLD)
    }

    /// Severity tiers share the theme's feedback colors.
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Error => self.style(Role::Danger),
            Severity::Warning => self.style(Role::Warning),
            Severity::Success => self.style(Role::Success),
        }
    }

    pub fn toggled(&self) -> Theme {
        if self.dark { light() } else { dark() }
    }
}

/// Default dark theme, tuned for contrast in TUI environments.
pub fn dark() -> Theme {
    Theme {
        name: "dark".into(),
        dark: true,
        roles: RoleColors {
            background: Color::Rgb(24, 24, 30),
            surface: Color::Rgb(34, 34, 42),
            text: Color::Rgb(220, 220, 220),
            subtle_text: Color::Rgb(130, 130, 140),
            border: Color::Rgb(70, 74, 94),

            primary: Color::Rgb(125, 207, 255),
            success: Color::Rgb(158, 206, 106),
            warning: Color::Rgb(224, 175, 104),
            danger: Color::Rgb(247, 118, 142),
            info: Color::Rgb(122, 162, 247),
        },
    }
}

/// Light counterpart with the same role semantics.
pub fn light() -> Theme {
    Theme {
        name: "light".into(),
        dark: false,
        roles: RoleColors {
            background: Color::Rgb(245, 245, 242),
            surface: Color::Rgb(233, 233, 228),
            text: Color::Rgb(40, 40, 46),
            subtle_text: Color::Rgb(120, 120, 128),
            border: Color::Rgb(170, 170, 178),

            primary: Color::Rgb(0, 95, 175),
            success: Color::Rgb(64, 128, 0),
            warning: Color::Rgb(163, 106, 0),
            danger: Color::Rgb(180, 35, 70),
            info: Color::Rgb(46, 82, 175),
        },
    }
}

/// Pick the startup theme from the stored preference; absence means light.
pub fn from_preference(dark_mode: Option<bool>) -> Theme {
    if dark_mode.unwrap_or(false) {
        dark()
    } else {
        light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_preference_defaults_to_light() {
        assert!(!from_preference(None).dark);
        assert!(from_preference(Some(true)).dark);
        assert!(!from_preference(Some(false)).dark);
    }

    #[test]
    fn severity_styles_use_the_feedback_roles() {
        let theme = dark();
        assert_eq!(
            theme.severity_style(Severity::Error).fg,
            Some(theme.roles.danger)
        );
        assert_eq!(
            theme.severity_style(Severity::Warning).fg,
            Some(theme.roles.warning)
        );
        assert_eq!(
            theme.severity_style(Severity::Success).fg,
            Some(theme.roles.success)
        );
    }

    #[test]
    fn toggling_flips_between_the_two_themes() {
        let t = dark();
        assert!(!t.toggled().dark);
        assert_eq!(t.toggled().toggled().name, "dark");
    }
}
