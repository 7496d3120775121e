//! The working list of equipment for the building being assessed. It lives in memory only and
//! starts empty on every run.

pub mod bacs;
pub mod summary;

use crate::catalog::models::{
    DEFAULT_LOAD_FACTOR_PCT, DEFAULT_OPERATING_HOURS_PER_DAY, EquipmentType,
};
use crate::worksheet::bacs::BacsThresholds;
use crate::worksheet::summary::WorksheetSummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Smallest power accepted for a manually entered piece of equipment.
pub const MIN_MANUAL_POWER_KW: f64 = 0.01;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorksheetConfig {
    pub default_days_per_year: u32,
}

impl Default for WorksheetConfig {
    fn default() -> Self {
        Self {
            default_days_per_year: 220,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum WorksheetError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("equipment name must not be blank")]
    BlankName,
    #[error("search term must not be blank")]
    BlankSearchTerm,
    #[error("power must be at least {MIN_MANUAL_POWER_KW} kW, got {0}")]
    PowerTooLow(f64),
    #[error("load factor must be within 0..=100 %, got {0}")]
    LoadFactorOutOfRange(f64),
    #[error("operating hours must be within 0..=24 h/day, got {0}")]
    HoursOutOfRange(f64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Categories offered for manually entered equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManualCategory {
    #[serde(rename = "CVC")]
    Hvac,
    #[serde(rename = "Éclairage")]
    Lighting,
    #[serde(rename = "ECS")]
    HotWater,
    #[serde(rename = "Ventilation")]
    Ventilation,
    #[serde(rename = "Ascenseur")]
    Elevator,
    #[serde(rename = "Bureautique")]
    Office,
    #[serde(rename = "Autre")]
    Other,
}

impl ManualCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hvac => "CVC",
            Self::Lighting => "Éclairage",
            Self::HotWater => "ECS",
            Self::Ventilation => "Ventilation",
            Self::Elevator => "Ascenseur",
            Self::Office => "Bureautique",
            Self::Other => "Autre",
        }
    }
}

impl fmt::Display for ManualCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetEntry {
    pub id: usize,
    pub name: String,
    pub type_name: String,
    pub category: String,
    /// Per-unit power.
    pub power_kw: f64,
    pub quantity: u32,
    pub load_factor_pct: f64,
    pub operating_hours_per_day: f64,
    pub operating_days_per_year: u32,
    pub location: String,
    pub floor: String,
    pub system: String,
    pub controllable: bool,
    pub priority: Priority,
    pub notes: String,
    pub from_catalog: bool,
}

impl WorksheetEntry {
    pub fn installed_power_kw(&self) -> f64 {
        self.power_kw * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntry {
    pub name: String,
    pub category: ManualCategory,
    pub power_kw: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default = "default_load_factor")]
    pub load_factor_pct: f64,
    #[serde(default = "default_operating_hours")]
    pub operating_hours_per_day: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub priority: Priority,
}

pub fn default_quantity() -> u32 {
    1
}

fn default_load_factor() -> f64 {
    DEFAULT_LOAD_FACTOR_PCT
}

fn default_operating_hours() -> f64 {
    DEFAULT_OPERATING_HOURS_PER_DAY
}

#[derive(Debug)]
pub struct Worksheet {
    entries: Vec<WorksheetEntry>,
    default_days_per_year: u32,
}

impl Worksheet {
    pub fn new(config: &WorksheetConfig) -> Self {
        Self {
            entries: Vec::new(),
            default_days_per_year: config.default_days_per_year,
        }
    }

    pub fn entries(&self) -> &[WorksheetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a catalog equipment type picked while browsing a category. Usage figures come from the
    /// catalog row.
    pub fn add_from_catalog(
        &mut self,
        equipment_type: &EquipmentType,
        quantity: u32,
    ) -> Result<WorksheetEntry, WorksheetError> {
        self.push_catalog_entry(
            equipment_type,
            quantity,
            equipment_type.load_factor_pct,
            equipment_type.operating_hours_per_day,
            format!("Imported from catalog - ID: {}", equipment_type.id),
        )
    }

    /// Adds a catalog equipment type picked from search results. Search hits carry no usage
    /// figures, so the catalog defaults apply.
    pub fn add_from_search(
        &mut self,
        equipment_type: &EquipmentType,
        quantity: u32,
        search_term: &str,
    ) -> Result<WorksheetEntry, WorksheetError> {
        let search_term = search_term.trim();
        if search_term.is_empty() {
            return Err(WorksheetError::BlankSearchTerm);
        }
        self.push_catalog_entry(
            equipment_type,
            quantity,
            DEFAULT_LOAD_FACTOR_PCT,
            DEFAULT_OPERATING_HOURS_PER_DAY,
            format!("Catalog search: {search_term}"),
        )
    }

    pub fn add_manual(&mut self, manual: ManualEntry) -> Result<WorksheetEntry, WorksheetError> {
        let name = manual.name.trim();
        if name.is_empty() {
            return Err(WorksheetError::BlankName);
        }
        // also rejects NaN
        if !(manual.power_kw >= MIN_MANUAL_POWER_KW) {
            return Err(WorksheetError::PowerTooLow(manual.power_kw));
        }
        validate_usage(
            manual.quantity,
            manual.load_factor_pct,
            manual.operating_hours_per_day,
        )?;

        let entry = WorksheetEntry {
            id: self.next_id(),
            name: name.to_string(),
            type_name: name.to_string(),
            category: manual.category.to_string(),
            power_kw: manual.power_kw,
            quantity: manual.quantity,
            load_factor_pct: manual.load_factor_pct,
            operating_hours_per_day: manual.operating_hours_per_day,
            operating_days_per_year: self.default_days_per_year,
            location: manual.location.trim().to_string(),
            floor: String::new(),
            system: String::new(),
            controllable: true,
            priority: manual.priority,
            notes: "Manual entry".to_string(),
            from_catalog: false,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn summary(&self, thresholds: &BacsThresholds) -> WorksheetSummary {
        WorksheetSummary::from_entries(&self.entries, thresholds)
    }

    fn next_id(&self) -> usize {
        self.entries.len() + 1
    }

    fn push_catalog_entry(
        &mut self,
        equipment_type: &EquipmentType,
        quantity: u32,
        load_factor_pct: f64,
        operating_hours_per_day: f64,
        notes: String,
    ) -> Result<WorksheetEntry, WorksheetError> {
        validate_usage(quantity, load_factor_pct, operating_hours_per_day)?;

        let entry = WorksheetEntry {
            id: self.next_id(),
            name: equipment_type.name.clone(),
            type_name: equipment_type.name.clone(),
            category: equipment_type.category_name.clone(),
            power_kw: equipment_type.average_power_kw,
            quantity,
            load_factor_pct,
            operating_hours_per_day,
            operating_days_per_year: self.default_days_per_year,
            location: String::new(),
            floor: String::new(),
            system: String::new(),
            controllable: true,
            priority: Priority::default(),
            notes,
            from_catalog: true,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }
}

fn validate_usage(
    quantity: u32,
    load_factor_pct: f64,
    operating_hours_per_day: f64,
) -> Result<(), WorksheetError> {
    if quantity == 0 {
        return Err(WorksheetError::InvalidQuantity);
    }
    if !(0.0..=100.0).contains(&load_factor_pct) {
        return Err(WorksheetError::LoadFactorOutOfRange(load_factor_pct));
    }
    if !(0.0..=24.0).contains(&operating_hours_per_day) {
        return Err(WorksheetError::HoursOutOfRange(operating_hours_per_day));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn equipment_type(id: i64, name: &str, category: &str, power: f64) -> EquipmentType {
        EquipmentType {
            id,
            category_id: 1,
            category_name: category.to_string(),
            name: name.to_string(),
            average_power_kw: power,
            min_power_kw: power,
            max_power_kw: power,
            load_factor_pct: 75.0,
            operating_hours_per_day: 12.0,
        }
    }

    pub(crate) fn manual(name: &str, power_kw: f64, quantity: u32) -> ManualEntry {
        ManualEntry {
            name: name.to_string(),
            category: ManualCategory::Other,
            power_kw,
            quantity,
            load_factor_pct: 70.0,
            operating_hours_per_day: 10.0,
            location: String::new(),
            priority: Priority::Medium,
        }
    }

    #[test]
    fn starts_empty() {
        let sheet = Worksheet::new(&WorksheetConfig::default());
        assert!(sheet.is_empty());
        assert_eq!(sheet.len(), 0);
    }

    #[test]
    fn catalog_entry_keeps_type_usage() {
        let mut sheet = Worksheet::new(&WorksheetConfig::default());
        let ty = equipment_type(2, "VRV Mitsubishi 11.2kW", "CVC - VRV/DRV", 11.2);
        let entry = sheet.add_from_catalog(&ty, 3).unwrap();

        assert_eq!(entry.id, 1);
        assert_eq!(entry.category, "CVC - VRV/DRV");
        assert_eq!(entry.quantity, 3);
        assert_eq!(entry.load_factor_pct, 75.0);
        assert_eq!(entry.operating_hours_per_day, 12.0);
        assert_eq!(entry.operating_days_per_year, 220);
        assert_eq!(entry.priority, Priority::Medium);
        assert_eq!(entry.notes, "Imported from catalog - ID: 2");
        assert!(entry.from_catalog);
        assert!(entry.controllable);
    }

    #[test]
    fn search_entry_uses_catalog_defaults() {
        let mut sheet = Worksheet::new(&WorksheetConfig {
            default_days_per_year: 250,
        });
        let ty = equipment_type(16, "LED 18W", "Éclairage - LED", 0.018);
        let entry = sheet.add_from_search(&ty, 40, " led ").unwrap();

        assert_eq!(entry.load_factor_pct, 70.0);
        assert_eq!(entry.operating_hours_per_day, 10.0);
        assert_eq!(entry.operating_days_per_year, 250);
        assert_eq!(entry.notes, "Catalog search: led");
        assert!(entry.from_catalog);

        assert_eq!(
            sheet.add_from_search(&ty, 1, "  ").unwrap_err(),
            WorksheetError::BlankSearchTerm
        );
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut sheet = Worksheet::new(&WorksheetConfig::default());
        let ty = equipment_type(1, "Serveur 1U", "Serveur", 0.5);
        sheet.add_from_catalog(&ty, 1).unwrap();
        sheet.add_manual(manual("Pompe de relevage", 1.1, 2)).unwrap();
        let third = sheet.add_from_search(&ty, 1, "serveur").unwrap();

        assert_eq!(third.id, 3);
        let ids: Vec<_> = sheet.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn manual_entry_validation() {
        let mut sheet = Worksheet::new(&WorksheetConfig::default());

        assert_eq!(
            sheet.add_manual(manual(" ", 1.0, 1)).unwrap_err(),
            WorksheetError::BlankName
        );
        assert_eq!(
            sheet.add_manual(manual("Four", 0.0, 1)).unwrap_err(),
            WorksheetError::PowerTooLow(0.0)
        );
        assert_eq!(
            sheet.add_manual(manual("Four", 2.0, 0)).unwrap_err(),
            WorksheetError::InvalidQuantity
        );

        let mut hot = manual("Four", 2.0, 1);
        hot.load_factor_pct = 101.0;
        assert_eq!(
            sheet.add_manual(hot).unwrap_err(),
            WorksheetError::LoadFactorOutOfRange(101.0)
        );

        let mut long = manual("Four", 2.0, 1);
        long.operating_hours_per_day = 24.5;
        assert_eq!(
            sheet.add_manual(long).unwrap_err(),
            WorksheetError::HoursOutOfRange(24.5)
        );

        assert!(sheet.is_empty());
    }

    #[test]
    fn manual_entry_is_not_from_catalog() {
        let mut sheet = Worksheet::new(&WorksheetConfig::default());
        let mut four = manual("  Four de cuisson ", 6.0, 2);
        four.category = ManualCategory::Lighting;
        four.location = "Cuisine".to_string();
        four.priority = Priority::High;

        let entry = sheet.add_manual(four).unwrap();
        assert_eq!(entry.name, "Four de cuisson");
        assert_eq!(entry.category, "Éclairage");
        assert_eq!(entry.location, "Cuisine");
        assert_eq!(entry.priority, Priority::High);
        assert_eq!(entry.notes, "Manual entry");
        assert!(!entry.from_catalog);
        assert_eq!(entry.installed_power_kw(), 12.0);
    }
}
