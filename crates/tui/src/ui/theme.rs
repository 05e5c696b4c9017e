use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub positive: Color,
    pub error: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(140, 140, 140),
            dim: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(120, 190, 120),
            error: Color::Rgb(200, 80, 80),
            border: Color::Rgb(60, 70, 80),
        }
    }
}
