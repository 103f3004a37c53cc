use std::borrow::Cow;

use serde_json::Value;

use crate::api::{Field, Record};
use crate::search::SearchState;

/// Shown for fields that are null, missing or empty.
pub const PLACEHOLDER: &str = "—";
pub const MISSING_NAME: &str = "Nombre no disponible";
pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// What the body of the screen shows. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Panel<'a> {
    Loading,
    Error(&'a str),
    Prompt,
    NoMatches,
    Results(&'a [Record]),
}

pub fn panel_for(state: &SearchState) -> Panel<'_> {
    if state.is_loading() {
        return Panel::Loading;
    }
    if let Some(msg) = state.error() {
        return Panel::Error(msg);
    }
    if !state.has_filters() {
        return Panel::Prompt;
    }
    match state.results() {
        [] => Panel::NoMatches,
        records => Panel::Results(records),
    }
}

pub fn spinner_frame(spinner_state: usize) -> char {
    SPINNER_FRAMES[spinner_state % SPINNER_FRAMES.len()]
}

fn is_blank(field: &Field) -> bool {
    match field {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

pub fn display_value(field: &Field) -> Cow<'_, str> {
    match field {
        Some(Value::String(s)) if !s.is_empty() => Cow::Borrowed(s.as_str()),
        Some(v) if !is_blank(field) => Cow::Owned(v.to_string()),
        _ => Cow::Borrowed(PLACEHOLDER),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub rows: Vec<(&'static str, String)>,
}

impl Card {
    /// Title line, one line per row, and the two border lines.
    pub fn height(&self) -> u16 {
        self.rows.len() as u16 + 3
    }
}

pub fn build_card(record: &Record, mask_passwords: bool) -> Card {
    let title = if is_blank(&record.full_name) {
        MISSING_NAME.to_string()
    } else {
        display_value(&record.full_name).into_owned()
    };

    let password = display_value(&record.password);
    let password = if mask_passwords && !is_blank(&record.password) {
        "•".repeat(password.chars().count())
    } else {
        password.into_owned()
    };

    let rows = vec![
        ("ID", display_value(&record.id).into_owned()),
        ("DNI", display_value(&record.dni).into_owned()),
        ("Usuario", display_value(&record.username).into_owned()),
        ("Contraseña", password),
        ("Cód. sede", display_value(&record.site_code).into_owned()),
        ("Sede", display_value(&record.site_name).into_owned()),
        ("Brigada", display_value(&record.brigade).into_owned()),
        ("Ruta", display_value(&record.route).into_owned()),
        ("Permisos", display_value(&record.permissions).into_owned()),
        ("Id rol", display_value(&record.id_rol).into_owned()),
        ("Rol", display_value(&record.role_description).into_owned()),
    ];

    Card { title, rows }
}

pub fn columns_for_width(width: u16) -> usize {
    match width {
        w if w >= 150 => 3,
        w if w >= 100 => 2,
        _ => 1,
    }
}
