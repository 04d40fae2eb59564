use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::task::{TaskPriority, TaskStatus};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub error: Color,
    /// Column accents
    pub todo: Color,
    pub doing: Color,
    pub done: Color,
    /// Priority tag colors
    pub priority_low: Color,
    pub priority_medium: Color,
    pub priority_high: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x12, 0x18),
            text: Color::Rgb(0xC8, 0xCC, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x6C, 0x72, 0x84),
            highlight: Color::Rgb(0x4C, 0x8D, 0xFF),
            selection_bg: Color::Rgb(0x26, 0x2C, 0x3C),
            error: Color::Rgb(0xFF, 0x4D, 0x4F),
            todo: Color::Rgb(0xF5, 0x22, 0x2D),
            doing: Color::Rgb(0xFA, 0xAD, 0x14),
            done: Color::Rgb(0x52, 0xC4, 0x1A),
            priority_low: Color::Rgb(0x52, 0xC4, 0x1A),
            priority_medium: Color::Rgb(0xFA, 0xAD, 0x14),
            priority_high: Color::Rgb(0xFF, 0x4D, 0x4F),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "dim" => theme.dim = color,
                    "highlight" => theme.highlight = color,
                    "selection_bg" => theme.selection_bg = color,
                    "error" => theme.error = color,
                    "todo" => theme.todo = color,
                    "doing" => theme.doing = color,
                    "done" => theme.done = color,
                    "priority_low" => theme.priority_low = color,
                    "priority_medium" => theme.priority_medium = color,
                    "priority_high" => theme.priority_high = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Accent color for a board column
    pub fn status_color(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::Doing => self.doing,
            TaskStatus::Done => self.done,
        }
    }

    /// Tag color for a priority
    pub fn priority_color(&self, priority: TaskPriority) -> Color {
        match priority {
            TaskPriority::Low => self.priority_low,
            TaskPriority::Medium => self.priority_medium,
            TaskPriority::High => self.priority_high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("done".into(), "#112233".into());
        ui.colors.insert("unknown_key".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.done, Color::Rgb(0x11, 0x22, 0x33));
        // Unchanged defaults still present
        assert_eq!(theme.doing, Theme::default().doing);
    }

    #[test]
    fn test_status_and_priority_colors() {
        let theme = Theme::default();
        assert_eq!(theme.status_color(TaskStatus::Doing), theme.doing);
        assert_eq!(
            theme.priority_color(TaskPriority::High),
            theme.priority_high
        );
    }
}
