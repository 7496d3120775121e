use crate::worksheet::WorksheetEntry;
use crate::worksheet::bacs::{BacsAssessment, BacsThresholds};
use serde::Serialize;
use std::collections::BTreeMap;

/// Parallel label/value vectors, ready to hand to a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl<S: Into<String>> FromIterator<(S, f64)> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut series = ChartSeries::default();
        for (label, value) in iter {
            series.labels.push(label.into());
            series.values.push(value);
        }
        series
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPower {
    pub category: String,
    pub total_power_kw: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCharts {
    /// Share of installed power per category.
    pub pie: ChartSeries,
    /// Installed power per category, smallest first.
    pub bar: ChartSeries,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetSummary {
    pub empty: bool,
    pub total_power_kw: f64,
    pub equipment_count: usize,
    pub catalog_count: usize,
    pub catalog_share_pct: f64,
    /// Ordered by category name.
    pub by_category: Vec<CategoryPower>,
    pub charts: SummaryCharts,
    pub bacs: BacsAssessment,
}

impl WorksheetSummary {
    pub fn from_entries(entries: &[WorksheetEntry], thresholds: &BacsThresholds) -> Self {
        let total_power_kw: f64 = entries.iter().map(WorksheetEntry::installed_power_kw).sum();
        let equipment_count = entries.len();
        let catalog_count = entries.iter().filter(|e| e.from_catalog).count();
        let catalog_share_pct = if equipment_count > 0 {
            catalog_count as f64 / equipment_count as f64 * 100.0
        } else {
            0.0
        };

        let mut grouped: BTreeMap<&str, f64> = BTreeMap::new();
        for entry in entries {
            *grouped.entry(entry.category.as_str()).or_default() += entry.installed_power_kw();
        }
        let by_category: Vec<CategoryPower> = grouped
            .into_iter()
            .map(|(category, total_power_kw)| CategoryPower {
                category: category.to_string(),
                total_power_kw,
            })
            .collect();

        let pie: ChartSeries = by_category
            .iter()
            .map(|c| (c.category.as_str(), c.total_power_kw))
            .collect();
        let mut ascending: Vec<&CategoryPower> = by_category.iter().collect();
        ascending.sort_by(|a, b| a.total_power_kw.total_cmp(&b.total_power_kw));
        let bar: ChartSeries = ascending
            .into_iter()
            .map(|c| (c.category.as_str(), c.total_power_kw))
            .collect();

        let largest_equipment_kw = entries.iter().map(|e| e.power_kw).reduce(f64::max);

        Self {
            empty: entries.is_empty(),
            total_power_kw,
            equipment_count,
            catalog_count,
            catalog_share_pct,
            by_category,
            charts: SummaryCharts { pie, bar },
            bacs: thresholds.assess(largest_equipment_kw, total_power_kw),
        }
    }
}
