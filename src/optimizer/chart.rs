//! Text charts for an optimal result.
//!
//! ```text
//! PFC Ratio
//! Total Energy: 1800 kcal
//! Protein (92.3g)       ██████░░░░░░░░░░░░░░░░░░░░░░░░  20.5%
//! Fat (50g)             ████████░░░░░░░░░░░░░░░░░░░░░░  25.0%
//! Carbohydrates (245g)  ████████████████░░░░░░░░░░░░░░  54.5%
//!
//! Food Intakes (units)
//! Rice     ██████████████████████████████ 3
//! Egg      ████████████████████░░░░░░░░░░ 2
//! ```

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

use super::response::OptimizeResult;

const PROTEIN_COLOR: &str = "#FF8080";
const FAT_COLOR: &str = "#80FF80";
const CARBOHYDRATES_COLOR: &str = "#8080FF";
const INTAKE_COLOR: &str = "#8080FF";
const EMPTY_COLOR: &str = "#606060";

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    /// Share in percent.
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PfcChart {
    pub subtitle: String,
    pub slices: Vec<Slice>,
}

impl PfcChart {
    pub fn from_result(result: &OptimizeResult) -> Self {
        let ratio = &result.pfc_ratio;
        let totals = &result.total_nutrient_values;
        let slices = [
            ("Protein", totals.protein, ratio.protein, PROTEIN_COLOR),
            ("Fat", totals.fat, ratio.fat, FAT_COLOR),
            ("Carbohydrates", totals.carbohydrates, ratio.carbohydrates, CARBOHYDRATES_COLOR),
        ]
        .into_iter()
        .map(|(name, grams, value, color)| Slice {
            label: format!("{name} ({grams}g)"),
            value,
            color,
        })
        .collect();

        Self {
            subtitle: format!("Total Energy: {} kcal", totals.energy),
            slices,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntakeChart {
    pub bars: Vec<(String, f64)>,
}

impl IntakeChart {
    pub fn from_result(result: &OptimizeResult) -> Self {
        Self {
            bars: result.food_intakes.0.clone(),
        }
    }
}

/// Both result charts; empty until a result is drawn.
#[derive(Debug, Clone)]
pub struct Model {
    pfc: Option<PfcChart>,
    intakes: Option<IntakeChart>,
    /// Width of each bar in cells.
    pub bar_width: usize,
    pub full: char,
    pub empty: char,
    pub title_style: Style,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            pfc: None,
            intakes: None,
            bar_width: 30,
            full: '█',
            empty: '░',
            title_style: Style::new().bold(true),
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both charts with ones built from `result`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrition_tui::optimizer::{chart, OptimizeResult};
    ///
    /// let result: OptimizeResult = serde_json::from_str(
    ///     r#"{"status": "Optimal",
    ///         "pfcRatio": {"protein": 20, "fat": 25, "carbohydrates": 55},
    ///         "totalNutrientValues": {"energy": 1800, "protein": 90, "fat": 50, "carbohydrates": 245},
    ///         "foodIntakes": {"Rice": 3, "Egg": 2}}"#,
    /// )
    /// .unwrap();
    ///
    /// let mut charts = chart::Model::new();
    /// charts.draw(&result);
    ///
    /// assert_eq!(charts.pfc().unwrap().subtitle, "Total Energy: 1800 kcal");
    /// assert_eq!(charts.intakes().unwrap().bars[0], ("Rice".to_string(), 3.0));
    /// ```
    pub fn draw(&mut self, result: &OptimizeResult) {
        self.pfc = Some(PfcChart::from_result(result));
        self.intakes = Some(IntakeChart::from_result(result));
    }

    pub fn clear(&mut self) {
        self.pfc = None;
        self.intakes = None;
    }

    pub fn is_empty(&self) -> bool {
        self.pfc.is_none() && self.intakes.is_none()
    }

    pub fn pfc(&self) -> Option<&PfcChart> {
        self.pfc.as_ref()
    }

    pub fn intakes(&self) -> Option<&IntakeChart> {
        self.intakes.as_ref()
    }

    fn bar(&self, fraction: f64, color: &str) -> String {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = ((self.bar_width as f64) * fraction).round() as usize;
        let full = Style::new()
            .foreground(lipgloss::Color::from(color))
            .inline(true)
            .render(&self.full.to_string().repeat(filled));
        let empty = Style::new()
            .foreground(lipgloss::Color::from(EMPTY_COLOR))
            .inline(true)
            .render(&self.empty.to_string().repeat(self.bar_width - filled));
        format!("{full}{empty}")
    }

    fn pad(label: &str, width: usize) -> String {
        format!("{label}{}", " ".repeat(width.saturating_sub(label.width())))
    }

    fn pfc_view(&self, chart: &PfcChart) -> String {
        let label_width = chart.slices.iter().map(|s| s.label.width()).max().unwrap_or(0);
        let mut lines = vec![
            self.title_style.clone().inline(true).render("PFC Ratio"),
            chart.subtitle.clone(),
        ];
        lines.extend(chart.slices.iter().map(|slice| {
            format!(
                "{}  {} {:5.1}%",
                Self::pad(&slice.label, label_width),
                self.bar(slice.value / 100.0, slice.color),
                slice.value
            )
        }));
        lines.join("\n")
    }

    fn intakes_view(&self, chart: &IntakeChart) -> String {
        let label_width = chart.bars.iter().map(|(n, _)| n.width()).max().unwrap_or(0);
        let largest = chart.bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        let mut lines = vec![self
            .title_style
            .clone()
            .inline(true)
            .render("Food Intakes (units)")];
        lines.extend(chart.bars.iter().map(|(name, amount)| {
            let fraction = if largest > 0.0 { amount / largest } else { 0.0 };
            format!(
                "{}  {} {}",
                Self::pad(name, label_width),
                self.bar(fraction, INTAKE_COLOR),
                amount
            )
        }));
        lines.join("\n")
    }

    pub fn view(&self) -> String {
        let mut sections = Vec::new();
        if let Some(pfc) = &self.pfc {
            sections.push(self.pfc_view(pfc));
        }
        if let Some(intakes) = &self.intakes {
            sections.push(self.intakes_view(intakes));
        }
        sections.join("\n\n")
    }
}
