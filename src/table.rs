//! Table rendering: the header, body and pagination containers.
//!
//! The browser never draws directly. It writes into a [`Surface`] handed to it
//! at construction, which keeps the component testable without a terminal.
//! [`Model`] is the terminal surface.
//!
//! Every render is a full clear-and-rebuild of the affected container. Cell
//! text is stored as plain text: escape sequences and control characters in the
//! data are stripped, so nothing in the dataset can restyle or move the
//! terminal cursor.

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

use crate::dataset::Row;
use crate::paginator::Control;

/// The three containers the browser renders into.
pub trait Surface {
    /// Replaces the header row with one cell per header, in order.
    fn render_header(&mut self, headers: &[String]);

    /// Replaces the body with one line per row and one cell per value.
    fn render_body(&mut self, rows: &[&Row]);

    /// Replaces the pagination controls.
    fn render_controls(&mut self, controls: &[Control]);

    /// Marks the control the keyboard selection is on, if any.
    fn select_control(&mut self, _index: Option<usize>) {}
}

/// Strips terminal escape sequences and control characters from cell text.
///
/// # Examples
///
/// ```rust
/// use nutrition_tui::table::sanitize;
///
/// assert_eq!(sanitize("\x1b[31mEgg\x1b[0m"), "Egg");
/// ```
pub fn sanitize(text: &str) -> String {
    strip_ansi_escapes::strip_str(text)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Styles {
    pub header: Style,
    pub cell: Style,
    pub control: Style,
    pub active_control: Style,
    pub selected_control: Style,
    pub empty: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            header: Style::new().bold(true).foreground(lipgloss::Color::from("#7571F9")),
            cell: Style::new(),
            control: Style::new().foreground(lipgloss::Color::from("#A49FA5")),
            active_control: Style::new()
                .bold(true)
                .foreground(lipgloss::Color::from("#EE6FF8")),
            selected_control: Style::new()
                .underline(true)
                .foreground(lipgloss::Color::from("#F1F1F1")),
            empty: Style::new().foreground(lipgloss::Color::from("#626262")),
        }
    }
}

/// Terminal table surface.
#[derive(Debug, Clone, Default)]
pub struct Model {
    header: Vec<String>,
    body: Vec<Vec<String>>,
    controls: Vec<Control>,
    selected: Option<usize>,
    pub styles: Styles,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn body(&self) -> &[Vec<String>] {
        &self.body
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn selected_control(&self) -> Option<usize> {
        self.selected
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .body
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|i| {
                self.body
                    .iter()
                    .filter_map(|row| row.get(i))
                    .chain(self.header.get(i))
                    .map(|cell| cell.width())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn render_line(cells: &[String], widths: &[usize], style: &Style) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| {
                let padded = format!("{}{}", cell, " ".repeat(width.saturating_sub(cell.width())));
                style.clone().inline(true).render(&padded)
            })
            .collect::<Vec<_>>()
            .join(" │ ")
    }

    /// Renders the pagination controls on one line.
    pub fn controls_view(&self) -> String {
        self.controls
            .iter()
            .enumerate()
            .map(|(i, control)| {
                let label = if control.active {
                    format!("[{}]", control.label())
                } else {
                    control.label()
                };
                let mut style = if control.active {
                    self.styles.active_control.clone()
                } else {
                    self.styles.control.clone()
                };
                if self.selected == Some(i) {
                    style = self.styles.selected_control.clone();
                }
                style.inline(true).render(&label)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn view(&self) -> String {
        let widths = self.column_widths();
        let mut output = String::new();

        if !self.header.is_empty() {
            output.push_str(&Self::render_line(&self.header, &widths, &self.styles.header));
            output.push('\n');
            output.push_str(
                &widths
                    .iter()
                    .map(|&w| "─".repeat(w))
                    .collect::<Vec<_>>()
                    .join("─┼─"),
            );
            output.push('\n');
        }

        if self.body.is_empty() {
            output.push_str(&self.styles.empty.clone().inline(true).render("No rows."));
            output.push('\n');
        }
        for row in &self.body {
            output.push_str(&Self::render_line(row, &widths, &self.styles.cell));
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&self.controls_view());
        output
    }
}

impl Surface for Model {
    fn render_header(&mut self, headers: &[String]) {
        self.header.clear();
        self.header.extend(headers.iter().map(|h| sanitize(h)));
    }

    fn render_body(&mut self, rows: &[&Row]) {
        self.body.clear();
        self.body.extend(
            rows.iter()
                .map(|row| row.cells.iter().map(|cell| sanitize(cell)).collect()),
        );
    }

    fn render_controls(&mut self, controls: &[Control]) {
        self.controls.clear();
        self.controls.extend_from_slice(controls);
        if self.selected.is_some_and(|i| i >= self.controls.len()) {
            self.selected = None;
        }
    }

    fn select_control(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.controls.len());
    }
}
