use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::consts::EMPTY_CELL;
use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberFormat {
    group_sep: char,
    decimal_sep: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            group_sep: ',',
            decimal_sep: '.',
        }
    }
}

impl NumberFormat {
    pub(crate) fn from_locale(locale: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = locale else {
            return Ok(NumberFormat::default());
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(NumberFormat::default());
        }
        let base = trimmed
            .split(['-', '_'])
            .next()
            .unwrap_or(trimmed)
            .to_ascii_lowercase();

        let format = match base.as_str() {
            "de" => NumberFormat {
                group_sep: '.',
                decimal_sep: ',',
            },
            "fr" | "ru" => NumberFormat {
                group_sep: ' ',
                decimal_sep: ',',
            },
            "en" | "zh" => NumberFormat::default(),
            _ => {
                return Err(AppError::UnsupportedLocale {
                    input: trimmed.to_string(),
                });
            }
        };

        Ok(format)
    }
}

pub(super) fn format_number(n: i64, format: NumberFormat) -> String {
    let (sign, digits) = if n < 0 {
        ("-", n.unsigned_abs().to_string())
    } else {
        ("", n.to_string())
    };
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(format.group_sep);
        }
        result.push(c);
    }
    let formatted: String = result.chars().rev().collect();
    format!("{sign}{formatted}")
}

pub(super) fn format_count(n: usize, format: NumberFormat) -> String {
    format_number(i64::try_from(n).unwrap_or(i64::MAX), format)
}

/// Money with grouping; cents are shown only when present ("$1,250", "$99.50")
pub(super) fn format_amount(amount: f64, format: NumberFormat) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    let whole = format_number(cents / 100, format);
    let frac = cents % 100;
    if frac == 0 {
        format!("{sign}${whole}")
    } else {
        format!("{sign}${whole}{}{frac:02}", format.decimal_sep)
    }
}

/// Money in short form (K, M, B suffixes)
pub(super) fn format_compact_amount(amount: f64, format: NumberFormat) -> String {
    let (sign, value) = if amount < 0.0 { ("-", -amount) } else { ("", amount) };
    let (scaled, suffix) = if value >= 1_000_000_000.0 {
        (value / 1_000_000_000.0, "B")
    } else if value >= 1_000_000.0 {
        (value / 1_000_000.0, "M")
    } else if value >= 1_000.0 {
        (value / 1_000.0, "K")
    } else {
        return format!("{sign}{}", format_amount(value, format));
    };
    let mut s = format!("{scaled:.1}");
    if format.decimal_sep != '.' {
        s = s.replace('.', &format.decimal_sep.to_string());
    }
    format!("{sign}${s}{suffix}")
}

pub(super) fn format_percent(value: f64, format: NumberFormat) -> String {
    let s = format!("{value:.1}%");
    if format.decimal_sep == '.' {
        s
    } else {
        s.replace('.', &format.decimal_sep.to_string())
    }
}

/// Text for an optional column, with a placeholder when absent or blank
pub(super) fn text_or_dash(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => EMPTY_CELL,
    }
}

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}
