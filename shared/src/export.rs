//! CSV export of catalog tables and of the worksheet, one sheet per file.

use crate::catalog::models::{Category, EquipmentModel, EquipmentType};
use crate::worksheet::WorksheetEntry;
use crate::worksheet::summary::{CategoryPower, WorksheetSummary};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown sheet {0:?}")]
    UnknownSheet(String),
    #[error("the worksheet has no equipment to export")]
    EmptyWorksheet,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSheet {
    Categories,
    Types,
    Models,
}

impl FromStr for CatalogSheet {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "categories" => Ok(Self::Categories),
            "types" => Ok(Self::Types),
            "models" => Ok(Self::Models),
            other => Err(ExportError::UnknownSheet(other.to_string())),
        }
    }
}

impl fmt::Display for CatalogSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Categories => "categories",
            Self::Types => "types",
            Self::Models => "models",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorksheetSheet {
    Equipment,
    ByCategory,
    Summary,
}

impl FromStr for WorksheetSheet {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equipment" => Ok(Self::Equipment),
            "by-category" => Ok(Self::ByCategory),
            "summary" => Ok(Self::Summary),
            other => Err(ExportError::UnknownSheet(other.to_string())),
        }
    }
}

impl fmt::Display for WorksheetSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equipment => "equipment",
            Self::ByCategory => "by-category",
            Self::Summary => "summary",
        })
    }
}

/// A row type that can be written as one line of a CSV sheet. `HEADER` must list the serialized
/// field names in declaration order.
pub trait CsvRecord: Serialize {
    const HEADER: &'static [&'static str];
}

impl CsvRecord for Category {
    const HEADER: &'static [&'static str] = &["id", "name", "description", "unit"];
}

impl CsvRecord for EquipmentType {
    const HEADER: &'static [&'static str] = &[
        "id",
        "categoryId",
        "categoryName",
        "name",
        "averagePowerKw",
        "minPowerKw",
        "maxPowerKw",
        "loadFactorPct",
        "operatingHoursPerDay",
    ];
}

impl CsvRecord for EquipmentModel {
    const HEADER: &'static [&'static str] = &[
        "id",
        "typeId",
        "typeName",
        "brand",
        "model",
        "ratedPowerKw",
        "year",
        "energyClass",
    ];
}

impl CsvRecord for WorksheetEntry {
    const HEADER: &'static [&'static str] = &[
        "id",
        "name",
        "typeName",
        "category",
        "powerKw",
        "quantity",
        "loadFactorPct",
        "operatingHoursPerDay",
        "operatingDaysPerYear",
        "location",
        "floor",
        "system",
        "controllable",
        "priority",
        "notes",
        "fromCatalog",
    ];
}

impl CsvRecord for CategoryPower {
    const HEADER: &'static [&'static str] = &["category", "totalPowerKw"];
}

#[derive(Serialize)]
struct MetricRow {
    metric: &'static str,
    value: String,
}

impl CsvRecord for MetricRow {
    const HEADER: &'static [&'static str] = &["metric", "value"];
}

/// Writes the header line even when `rows` is empty.
pub fn to_csv<T: CsvRecord>(rows: &[T]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(T::HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// Renders one sheet of the worksheet. An empty worksheet has nothing to export.
pub fn worksheet_sheet_csv(
    sheet: WorksheetSheet,
    entries: &[WorksheetEntry],
    summary: &WorksheetSummary,
) -> Result<Vec<u8>, ExportError> {
    if entries.is_empty() {
        return Err(ExportError::EmptyWorksheet);
    }

    match sheet {
        WorksheetSheet::Equipment => to_csv(entries),
        WorksheetSheet::ByCategory => to_csv(&summary.by_category),
        WorksheetSheet::Summary => to_csv(&[
            MetricRow {
                metric: "Total power",
                value: format!("{:.1} kW", summary.total_power_kw),
            },
            MetricRow {
                metric: "Equipment count",
                value: summary.equipment_count.to_string(),
            },
            MetricRow {
                metric: "BACS compliance",
                value: summary.bacs.label.to_string(),
            },
        ]),
    }
}

pub fn worksheet_file_name<Tz>(now: &DateTime<Tz>, sheet: WorksheetSheet) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("bilan_puissance_{}_{sheet}.csv", now.format("%Y%m%d_%H%M"))
}

pub fn catalog_file_name(sheet: CatalogSheet) -> String {
    format!("base_equipements_{sheet}.csv")
}
