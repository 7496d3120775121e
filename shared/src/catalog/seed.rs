//! Default catalog content, inserted once into an empty database.

use sqlx::{Pool, Sqlite};
use tracing::{debug, info};

struct SeedCategory {
    name: &'static str,
    description: &'static str,
    types: &'static [SeedType],
}

struct SeedType {
    name: &'static str,
    average_power_kw: f64,
    min_power_kw: f64,
    max_power_kw: f64,
    load_factor_pct: f64,
    operating_hours_per_day: f64,
    models: &'static [SeedModel],
}

struct SeedModel {
    brand: &'static str,
    model: &'static str,
    rated_power_kw: f64,
    year: i64,
    energy_class: &'static str,
}

const fn ty(
    name: &'static str,
    average_power_kw: f64,
    min_power_kw: f64,
    max_power_kw: f64,
    load_factor_pct: f64,
    operating_hours_per_day: f64,
    models: &'static [SeedModel],
) -> SeedType {
    SeedType {
        name,
        average_power_kw,
        min_power_kw,
        max_power_kw,
        load_factor_pct,
        operating_hours_per_day,
        models,
    }
}

const fn model(
    brand: &'static str,
    model: &'static str,
    rated_power_kw: f64,
    year: i64,
    energy_class: &'static str,
) -> SeedModel {
    SeedModel {
        brand,
        model,
        rated_power_kw,
        year,
        energy_class,
    }
}

const CATALOG: &[SeedCategory] = &[
    SeedCategory {
        name: "CVC - VRV/DRV",
        description: "Climatisation à volume de réfrigérant variable",
        types: &[
            ty(
                "VRV Daikin 7.1kW",
                7.1,
                5.6,
                8.5,
                70.0,
                10.0,
                &[
                    model("Daikin", "RXYQ8P7W1B", 7.1, 2020, "A++"),
                    model("Daikin", "RXYQ14P7W1B", 14.0, 2021, "A++"),
                ],
            ),
            ty(
                "VRV Mitsubishi 11.2kW",
                11.2,
                9.0,
                13.5,
                75.0,
                12.0,
                &[model("Mitsubishi", "FDC112KXES6", 11.2, 2019, "A+")],
            ),
            ty("VRV Toshiba 14.0kW", 14.0, 11.2, 16.8, 72.0, 10.0, &[]),
            ty(
                "DRV Carrier 9.0kW",
                9.0,
                7.2,
                10.8,
                68.0,
                11.0,
                &[model("Carrier", "30XAV - 240", 9.0, 2018, "A")],
            ),
        ],
    },
    SeedCategory {
        name: "CVC - Pompe à chaleur",
        description: "Systèmes de chauffage/refroidissement",
        types: &[
            ty(
                "PAC air/eau 8kW",
                8.0,
                6.4,
                9.6,
                65.0,
                8.0,
                &[model("Atlantic", "Alea COMPACT 8", 8.0, 2022, "A++")],
            ),
            ty(
                "PAC air/air 5kW",
                5.0,
                4.0,
                6.0,
                70.0,
                10.0,
                &[model("Panasonic", "CS-Z25WKE", 2.5, 2021, "A+++")],
            ),
            ty("PAC géothermique 12kW", 12.0, 9.6, 14.4, 60.0, 9.0, &[]),
        ],
    },
    SeedCategory {
        name: "CVC - Chauffage électrique",
        description: "Convecteurs, radiateurs électriques",
        types: &[
            ty("Convecteur 750W", 0.75, 0.75, 0.75, 80.0, 8.0, &[]),
            ty("Convecteur 1500W", 1.5, 1.5, 1.5, 75.0, 7.0, &[]),
            ty("Radiateur inertie 2000W", 2.0, 2.0, 2.0, 70.0, 9.0, &[]),
        ],
    },
    SeedCategory {
        name: "ECS - Ballon électrique",
        description: "Chauffe-eau électrique",
        types: &[
            ty(
                "Ballon 50L 2000W",
                2.0,
                2.0,
                2.0,
                50.0,
                4.0,
                &[model("Thermor", "Aéromax 3 50L", 2.0, 2020, "C")],
            ),
            ty(
                "Ballon 100L 3000W",
                3.0,
                3.0,
                3.0,
                55.0,
                5.0,
                &[model("Atlantic", "Caliopa 100L", 3.0, 2021, "B")],
            ),
            ty("Ballon 200L 4000W", 4.0, 4.0, 4.0, 60.0, 6.0, &[]),
        ],
    },
    SeedCategory {
        name: "ECS - Thermodynamique",
        description: "Chauffe-eau thermodynamique",
        types: &[
            ty("CESI 200L", 0.5, 0.4, 0.6, 40.0, 8.0, &[]),
            ty(
                "Chauffe-eau thermodynamique 300L",
                1.2,
                1.0,
                1.4,
                45.0,
                7.0,
                &[],
            ),
        ],
    },
    SeedCategory {
        name: "Éclairage - LED",
        description: "Éclairage LED",
        types: &[
            ty(
                "LED 18W",
                0.018,
                0.018,
                0.018,
                100.0,
                10.0,
                &[model("Philips", "CorePro LEDtube 18W", 0.018, 2022, "A++")],
            ),
            ty(
                "LED 24W",
                0.024,
                0.024,
                0.024,
                100.0,
                10.0,
                &[model("Osram", "LED Star 24W", 0.024, 2021, "A++")],
            ),
            ty("LED 36W", 0.036, 0.036, 0.036, 100.0, 10.0, &[]),
            ty("LED 54W", 0.054, 0.054, 0.054, 100.0, 10.0, &[]),
        ],
    },
    SeedCategory {
        name: "Éclairage - Fluorescent",
        description: "Éclairage fluorescent",
        types: &[
            ty("TL5 28W", 0.028, 0.028, 0.028, 95.0, 10.0, &[]),
            ty("TL5 54W", 0.054, 0.054, 0.054, 95.0, 10.0, &[]),
        ],
    },
    SeedCategory {
        name: "Ventilation - VMC",
        description: "Ventilation mécanique contrôlée",
        types: &[
            ty("VMC simple flux", 0.08, 0.06, 0.10, 80.0, 24.0, &[]),
            ty(
                "VMC double flux",
                0.15,
                0.12,
                0.18,
                75.0,
                24.0,
                &[model("Aldes", "Ventilation Expert 350", 0.15, 2020, "A")],
            ),
            ty("VMC hygroréglable", 0.10, 0.08, 0.12, 70.0, 24.0, &[]),
        ],
    },
    SeedCategory {
        name: "Ventilation - Extracteur",
        description: "Extracteurs d'air",
        types: &[
            ty("Extracteur salle de bain", 0.03, 0.025, 0.035, 30.0, 4.0, &[]),
            ty("Extracteur cuisine", 0.05, 0.04, 0.06, 40.0, 6.0, &[]),
        ],
    },
    SeedCategory {
        name: "Ascenseur",
        description: "Ascenseurs et monte-charge",
        types: &[
            ty(
                "Ascenseur 4 personnes",
                4.0,
                3.2,
                4.8,
                40.0,
                12.0,
                &[model("Schindler", "3300 AP 4pers", 4.0, 2018, "A")],
            ),
            ty(
                "Ascenseur 8 personnes",
                7.5,
                6.0,
                9.0,
                35.0,
                14.0,
                &[model("Kone", "MonoSpace 500 8pers", 7.5, 2019, "A")],
            ),
            ty("Ascenseur 13 personnes", 11.0, 8.8, 13.2, 30.0, 16.0, &[]),
        ],
    },
    SeedCategory {
        name: "Prises bureautique",
        description: "Prise électrique bureautique",
        types: &[
            ty("Poste bureautique", 0.15, 0.10, 0.20, 60.0, 9.0, &[]),
            ty("Imprimante", 0.3, 0.2, 0.4, 30.0, 6.0, &[]),
            ty("Photocopieur", 1.5, 1.2, 1.8, 40.0, 8.0, &[]),
        ],
    },
    SeedCategory {
        name: "Serveur",
        description: "Serveurs et baies informatiques",
        types: &[
            ty("Serveur 1U", 0.5, 0.4, 0.6, 90.0, 24.0, &[]),
            ty("Serveur 2U", 0.8, 0.64, 0.96, 85.0, 24.0, &[]),
            ty("Baie informatique", 3.0, 2.4, 3.6, 80.0, 24.0, &[]),
        ],
    },
];

/// Monthly multiplier applied to a category's load. Heating and hot water peak in winter, lighting
/// peaks in the dark months, everything else is flat.
pub fn seasonal_coefficient(category_name: &str, month: u32) -> f64 {
    if category_name.contains("CVC") {
        match month {
            12 | 1 | 2 => 1.2,
            6..=8 => 0.8,
            _ => 1.0,
        }
    } else if category_name.contains("ECS") {
        match month {
            11 | 12 | 1 => 1.1,
            6..=8 => 0.9,
            _ => 1.0,
        }
    } else if category_name.contains("Éclairage") {
        match month {
            11 | 12 | 1 => 1.3,
            6 | 7 => 0.7,
            _ => 1.0,
        }
    } else {
        1.0
    }
}

/// Inserts the default catalog when the `categories` table is empty. Returns whether anything was
/// inserted.
pub async fn seed_if_empty(pool: &Pool<Sqlite>) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        debug!(categories = existing, "catalog already populated, skipping seed");
        tx.commit().await?;
        return Ok(false);
    }

    let (mut type_count, mut model_count) = (0usize, 0usize);
    for category in CATALOG {
        let category_id = sqlx::query(
            "INSERT INTO categories (name, description, unit) VALUES (?, ?, 'kW')",
        )
        .bind(category.name)
        .bind(category.description)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for equipment_type in category.types {
            let type_id = sqlx::query(
                r"
                INSERT INTO equipment_types
                    (category_id, name, average_power_kw, min_power_kw, max_power_kw,
                     load_factor_pct, operating_hours_per_day)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(category_id)
            .bind(equipment_type.name)
            .bind(equipment_type.average_power_kw)
            .bind(equipment_type.min_power_kw)
            .bind(equipment_type.max_power_kw)
            .bind(equipment_type.load_factor_pct)
            .bind(equipment_type.operating_hours_per_day)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
            type_count += 1;

            for model in equipment_type.models {
                sqlx::query(
                    r"
                    INSERT INTO equipment_models
                        (type_id, brand, model, rated_power_kw, year, energy_class)
                    VALUES (?, ?, ?, ?, ?, ?)
                    ",
                )
                .bind(type_id)
                .bind(model.brand)
                .bind(model.model)
                .bind(model.rated_power_kw)
                .bind(model.year)
                .bind(model.energy_class)
                .execute(&mut *tx)
                .await?;
                model_count += 1;
            }
        }

        for month in 1..=12u32 {
            sqlx::query(
                "INSERT INTO seasonal_coefficients (month, category_id, coefficient) VALUES (?, ?, ?)",
            )
            .bind(i64::from(month))
            .bind(category_id)
            .bind(seasonal_coefficient(category.name, month))
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    info!(
        name: "db.seeded",
        categories = CATALOG.len(),
        equipment_types = type_count,
        equipment_models = model_count,
        "seeded default equipment catalog"
    );

    Ok(true)
}
