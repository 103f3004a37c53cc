use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthChar;

use crate::tui::app::{ConsoleApp, Focus};
use crate::tui::render::{Card, Panel, build_card, columns_for_width, panel_for, spinner_frame};
use crate::tui::theme::Theme;

const LABEL_WIDTH: usize = 11;

impl ConsoleApp {
    pub fn view(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Search fields
                Constraint::Min(1),    // Body
                Constraint::Length(1), // Footer
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_search_bar(f, chunks[1]);
        self.render_body(f, chunks[2]);
        self.render_footer(f, chunks[3]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "CREDENTIAL RECOVERY CONSOLE",
                self.theme.header_style,
            )),
            Line::from(Span::styled(
                "Hola censista, ¿olvidaste tu contraseña?",
                self.theme.card_title_style,
            )),
            Line::from(Span::styled(
                "Filtra por DNI o por nombres y apellidos; solo se muestran las coincidencias relevantes.",
                self.theme.text_style,
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_search_bar(&self, f: &mut Frame, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Min(20),
                Constraint::Length(14),
            ])
            .split(area);

        self.render_input(
            f,
            cols[0],
            "Buscar por DNI",
            &self.search.dni_input,
            "Ejemplo: 7403345",
            self.focus == Focus::Dni,
        );
        self.render_input(
            f,
            cols[1],
            "Buscar por nombres y apellidos",
            &self.search.nombre_input,
            "Ejemplo: JORGE PEREZ",
            self.focus == Focus::Nombre,
        );

        let focused = self.focus == Focus::Button;
        let style = if focused {
            self.theme.button_focused_style
        } else {
            self.theme.button_style
        };
        let button = Paragraph::new("Buscar")
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style(&self.theme, focused)),
            );
        f.render_widget(button, cols[2]);
    }

    fn render_input(
        &self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        value: &str,
        placeholder: &str,
        focused: bool,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style(&self.theme, focused));
        let inner = block.inner(area);

        let text = if value.is_empty() && !focused {
            Span::styled(placeholder.to_string(), self.theme.label_style)
        } else {
            // Keep the end of the text, where the cursor is, in view.
            let width = (inner.width as usize).saturating_sub(1);
            Span::styled(visible_tail(value, width), self.theme.input_style)
        };
        let cursor_x = inner.x + text.width() as u16;
        f.render_widget(Paragraph::new(Line::from(text)).block(block), area);

        if focused && inner.width > 0 && inner.height > 0 {
            f.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    fn render_body(&mut self, f: &mut Frame, area: Rect) {
        match panel_for(&self.search) {
            Panel::Loading => {
                let text = format!("{} Cargando datos…", spinner_frame(self.spinner_state));
                let p = Paragraph::new(Span::styled(text, self.theme.spinner_style))
                    .alignment(Alignment::Center);
                f.render_widget(p, centered_line(area));
            }
            Panel::Error(msg) => {
                let p = Paragraph::new(msg.to_string())
                    .style(self.theme.error_style)
                    .wrap(Wrap { trim: false })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(self.theme.error_style)
                            .title("Error al cargar datos"),
                    );
                f.render_widget(p, panel_area(area, 4));
            }
            Panel::Prompt => {
                let p = Paragraph::new(
                    "Ingresa un DNI o nombres y apellidos y presiona Buscar para iniciar el escaneo de credenciales.",
                )
                .style(self.theme.prompt_style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(self.theme.card_border_style),
                );
                f.render_widget(p, panel_area(area, 4));
            }
            Panel::NoMatches => {
                let [count_area, rest] = split_count_line(area);
                f.render_widget(self.count_line(0, None), count_area);
                let p = Paragraph::new(
                    "No se encontraron coincidencias. Ajusta el DNI o los nombres y apellidos e intenta nuevamente.",
                )
                .style(self.theme.prompt_style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(self.theme.card_border_style),
                );
                f.render_widget(p, panel_area(rest, 4));
            }
            Panel::Results(records) => {
                let cards: Vec<Card> = records
                    .iter()
                    .map(|r| build_card(r, self.mask_passwords))
                    .collect();
                self.render_cards(f, area, &cards);
            }
        }
    }

    fn render_cards(&mut self, f: &mut Frame, area: Rect, cards: &[Card]) {
        let [count_area, grid_area] = split_count_line(area);

        let columns = columns_for_width(grid_area.width);
        let card_height = cards.first().map(Card::height).unwrap_or(1).max(1);
        let total_rows = cards.len().div_ceil(columns);
        let visible_rows = ((grid_area.height / card_height) as usize).max(1);
        self.page_rows = visible_rows;
        self.scroll = self.scroll.min(total_rows.saturating_sub(visible_rows));

        let window = (total_rows > visible_rows).then(|| {
            let last = (self.scroll + visible_rows).min(total_rows);
            (self.scroll + 1, last, total_rows)
        });
        f.render_widget(self.count_line(cards.len(), window), count_area);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(card_height); visible_rows])
            .split(grid_area);

        for (row_area, row_cards) in row_areas
            .iter()
            .zip(cards.chunks(columns).skip(self.scroll))
        {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(*row_area);
            for (cell, card) in cells.iter().zip(row_cards) {
                self.render_card(f, *cell, card);
            }
        }
    }

    fn render_card(&self, f: &mut Frame, area: Rect, card: &Card) {
        let mut lines = Vec::with_capacity(card.rows.len() + 1);
        lines.push(Line::from(Span::styled(
            card.title.clone(),
            self.theme.card_title_style,
        )));
        for (label, value) in &card.rows {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<LABEL_WIDTH$} "), self.theme.label_style),
                Span::styled(value.clone(), self.theme.value_style),
            ]));
        }
        let p = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.card_border_style),
        );
        f.render_widget(p, area);
    }

    fn count_line(&self, total: usize, window: Option<(usize, usize, usize)>) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("Resultados: ", self.theme.text_style),
            Span::styled(total.to_string(), self.theme.count_style),
        ];
        if let Some((first, last, rows)) = window {
            spans.push(Span::styled(
                format!("  (filas {first}-{last} de {rows}, ↑↓ para desplazar)"),
                self.theme.label_style,
            ));
        }
        Paragraph::new(Line::from(spans))
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let text = match &self.notice {
            Some(notice) => notice.clone(),
            None => format!(
                "{} · Tab: campo · Enter: buscar · ↑↓ PgUp PgDn: desplazar · Esc: salir",
                self.endpoint
            ),
        };
        f.render_widget(
            Paragraph::new(text).style(self.theme.footer_style),
            area,
        );
    }
}

fn border_style(theme: &Theme, focused: bool) -> Style {
    if focused {
        theme.focused_style
    } else {
        theme.card_border_style
    }
}

fn split_count_line(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    [chunks[0], chunks[1]]
}

fn panel_area(area: Rect, height: u16) -> Rect {
    Rect {
        height: area.height.min(height),
        ..area
    }
}

fn centered_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}

/// Longest suffix of `s` that fits in `max` columns.
fn visible_tail(s: &str, max: usize) -> String {
    let mut width = 0usize;
    let mut start = s.len();
    for (idx, ch) in s.char_indices().rev() {
        let ch_w = ch.width().unwrap_or(0);
        if width + ch_w > max {
            break;
        }
        width += ch_w;
        start = idx;
    }
    s[start..].to_string()
}
