use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub header_style: Style,
    pub text_style: Style,
    pub input_style: Style,
    pub focused_style: Style,
    pub button_style: Style,
    pub button_focused_style: Style,
    pub spinner_style: Style,
    pub error_style: Style,
    pub prompt_style: Style,
    pub count_style: Style,
    pub card_border_style: Style,
    pub card_title_style: Style,
    pub label_style: Style,
    pub value_style: Style,
    pub footer_style: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            header_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            text_style: Style::default().fg(Color::Gray),
            input_style: Style::default().fg(Color::White),
            focused_style: Style::default().fg(Color::LightCyan),
            button_style: Style::default().fg(Color::White).bg(Color::Blue),
            button_focused_style: Style::default()
                .fg(Color::White)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            spinner_style: Style::default().fg(Color::Cyan),
            error_style: Style::default().fg(Color::LightRed),
            prompt_style: Style::default().fg(Color::Gray),
            count_style: Style::default().fg(Color::LightGreen),
            card_border_style: Style::default().fg(Color::DarkGray),
            card_title_style: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(Color::DarkGray),
            value_style: Style::default().fg(Color::White),
            footer_style: Style::default().fg(Color::Cyan),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            header_style: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            text_style: Style::default().fg(Color::DarkGray),
            input_style: Style::default().fg(Color::Black),
            focused_style: Style::default().fg(Color::Blue),
            button_style: Style::default().fg(Color::White).bg(Color::Blue),
            button_focused_style: Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            spinner_style: Style::default().fg(Color::Blue),
            error_style: Style::default().fg(Color::Red),
            prompt_style: Style::default().fg(Color::DarkGray),
            count_style: Style::default().fg(Color::Green),
            card_border_style: Style::default().fg(Color::Gray),
            card_title_style: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(Color::DarkGray),
            value_style: Style::default().fg(Color::Black),
            footer_style: Style::default().fg(Color::Blue),
        }
    }

    /// Unknown names fall back to the dark palette.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}
