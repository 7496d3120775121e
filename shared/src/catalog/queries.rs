use crate::catalog::QueryError;
use crate::catalog::models::{
    CatalogCounts, Category, CategoryPowerStats, DEFAULT_LOAD_FACTOR_PCT,
    DEFAULT_OPERATING_HOURS_PER_DAY, EquipmentModel, EquipmentType, NewEquipmentType, SearchHit,
    SeasonalCoefficient,
};
use sqlx::{Pool, Sqlite};

const EQUIPMENT_TYPE_COLUMNS: &str = r"
    t.id,
    t.category_id,
    c.name AS category_name,
    t.name,
    t.average_power_kw,
    t.min_power_kw,
    t.max_power_kw,
    t.load_factor_pct,
    t.operating_hours_per_day
";

const EQUIPMENT_MODEL_COLUMNS: &str = r"
    m.id,
    m.type_id,
    t.name AS type_name,
    m.brand,
    m.model,
    m.rated_power_kw,
    m.year,
    m.energy_class
";

pub async fn list_categories(pool: &Pool<Sqlite>) -> Result<Vec<Category>, QueryError> {
    sqlx::query_as::<_, Category>(
        r"
        SELECT id, name, description, unit
        FROM categories
        ORDER BY name
        ",
    )
    .fetch_all(pool)
    .await
    .map_err(QueryError::Sql)
}

pub async fn get_category(pool: &Pool<Sqlite>, category_id: i64) -> Result<Category, QueryError> {
    sqlx::query_as::<_, Category>(
        r"
        SELECT id, name, description, unit
        FROM categories
        WHERE id = ?
        ",
    )
    .bind(category_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| QueryError::NotFound(format!("category {category_id}")))
}

/// Equipment types of one category, ordered by name. Fails with [`QueryError::NotFound`] when the
/// category does not exist so callers can tell an unknown category from an empty one.
pub async fn types_by_category(
    pool: &Pool<Sqlite>,
    category_id: i64,
) -> Result<Vec<EquipmentType>, QueryError> {
    get_category(pool, category_id).await?;

    let query = format!(
        r"
        SELECT {EQUIPMENT_TYPE_COLUMNS}
        FROM equipment_types t
        JOIN categories c ON t.category_id = c.id
        WHERE t.category_id = ?
        ORDER BY t.name
        "
    );

    sqlx::query_as::<_, EquipmentType>(&query)
        .bind(category_id)
        .fetch_all(pool)
        .await
        .map_err(QueryError::Sql)
}

pub async fn get_equipment_type(
    pool: &Pool<Sqlite>,
    type_id: i64,
) -> Result<EquipmentType, QueryError> {
    let query = format!(
        r"
        SELECT {EQUIPMENT_TYPE_COLUMNS}
        FROM equipment_types t
        JOIN categories c ON t.category_id = c.id
        WHERE t.id = ?
        "
    );

    sqlx::query_as::<_, EquipmentType>(&query)
        .bind(type_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| QueryError::NotFound(format!("equipment type {type_id}")))
}

pub async fn all_equipment_types(pool: &Pool<Sqlite>) -> Result<Vec<EquipmentType>, QueryError> {
    let query = format!(
        r"
        SELECT {EQUIPMENT_TYPE_COLUMNS}
        FROM equipment_types t
        JOIN categories c ON t.category_id = c.id
        ORDER BY t.id
        "
    );

    sqlx::query_as::<_, EquipmentType>(&query)
        .fetch_all(pool)
        .await
        .map_err(QueryError::Sql)
}

/// Manufacturer models of one equipment type, ordered by brand then model.
pub async fn models_by_type(
    pool: &Pool<Sqlite>,
    type_id: i64,
) -> Result<Vec<EquipmentModel>, QueryError> {
    get_equipment_type(pool, type_id).await?;

    let query = format!(
        r"
        SELECT {EQUIPMENT_MODEL_COLUMNS}
        FROM equipment_models m
        JOIN equipment_types t ON m.type_id = t.id
        WHERE m.type_id = ?
        ORDER BY m.brand, m.model
        "
    );

    sqlx::query_as::<_, EquipmentModel>(&query)
        .bind(type_id)
        .fetch_all(pool)
        .await
        .map_err(QueryError::Sql)
}

pub async fn all_equipment_models(pool: &Pool<Sqlite>) -> Result<Vec<EquipmentModel>, QueryError> {
    let query = format!(
        r"
        SELECT {EQUIPMENT_MODEL_COLUMNS}
        FROM equipment_models m
        JOIN equipment_types t ON m.type_id = t.id
        ORDER BY m.id
        "
    );

    sqlx::query_as::<_, EquipmentModel>(&query)
        .fetch_all(pool)
        .await
        .map_err(QueryError::Sql)
}

/// Case-insensitive substring search over equipment type names and category names.
pub async fn search_equipment(
    pool: &Pool<Sqlite>,
    term: &str,
) -> Result<Vec<SearchHit>, QueryError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(QueryError::IllegalArgs(
            "search term must not be blank".to_string(),
        ));
    }
    let pattern = format!("%{term}%");

    sqlx::query_as::<_, SearchHit>(
        r"
        SELECT
            t.id AS type_id,
            t.name AS type_name,
            t.average_power_kw,
            t.min_power_kw,
            t.max_power_kw,
            c.name AS category_name,
            c.unit
        FROM equipment_types t
        JOIN categories c ON t.category_id = c.id
        WHERE LOWER(t.name) LIKE LOWER(?)
           OR LOWER(c.name) LIKE LOWER(?)
        ORDER BY t.name
        ",
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await
    .map_err(QueryError::Sql)
}

/// Per-category power statistics over the catalog's equipment types, largest total first.
pub async fn power_stats_by_category(
    pool: &Pool<Sqlite>,
) -> Result<Vec<CategoryPowerStats>, QueryError> {
    sqlx::query_as::<_, CategoryPowerStats>(
        r"
        SELECT
            c.name AS category,
            COUNT(t.id) AS type_count,
            AVG(t.average_power_kw) AS average_power_kw,
            MIN(t.min_power_kw) AS min_power_kw,
            MAX(t.max_power_kw) AS max_power_kw,
            SUM(t.average_power_kw) AS total_power_kw
        FROM equipment_types t
        JOIN categories c ON t.category_id = c.id
        GROUP BY c.name
        ORDER BY total_power_kw DESC
        ",
    )
    .fetch_all(pool)
    .await
    .map_err(QueryError::Sql)
}

pub async fn seasonal_coefficients(
    pool: &Pool<Sqlite>,
    category_id: i64,
) -> Result<Vec<SeasonalCoefficient>, QueryError> {
    get_category(pool, category_id).await?;

    sqlx::query_as::<_, SeasonalCoefficient>(
        r"
        SELECT month, category_id, coefficient
        FROM seasonal_coefficients
        WHERE category_id = ?
        ORDER BY month
        ",
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
    .map_err(QueryError::Sql)
}

/// Names of the categories whose seasonal coefficients do not cover all twelve months.
pub async fn categories_missing_seasonal_coverage(
    pool: &Pool<Sqlite>,
) -> Result<Vec<String>, QueryError> {
    sqlx::query_scalar::<_, String>(
        r"
        SELECT c.name
        FROM categories c
        LEFT JOIN seasonal_coefficients s ON s.category_id = c.id
        GROUP BY c.id, c.name
        HAVING COUNT(DISTINCT s.month) < 12
        ORDER BY c.name
        ",
    )
    .fetch_all(pool)
    .await
    .map_err(QueryError::Sql)
}

pub async fn catalog_counts(pool: &Pool<Sqlite>) -> Result<CatalogCounts, QueryError> {
    let (categories, equipment_types, equipment_models, seasonal_coefficients) =
        sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r"
            SELECT
                (SELECT COUNT(*) FROM categories),
                (SELECT COUNT(*) FROM equipment_types),
                (SELECT COUNT(*) FROM equipment_models),
                (SELECT COUNT(*) FROM seasonal_coefficients)
            ",
        )
        .fetch_one(pool)
        .await?;

    Ok(CatalogCounts {
        categories,
        equipment_types,
        equipment_models,
        seasonal_coefficients,
    })
}

fn validate_new_equipment_type(new_type: &NewEquipmentType) -> Result<(), QueryError> {
    let illegal = |msg: String| Err(QueryError::IllegalArgs(msg));

    if new_type.name.trim().is_empty() {
        return illegal("name must not be blank".to_string());
    }

    let (min, avg, max) = (
        new_type.min_power_kw,
        new_type.average_power_kw,
        new_type.max_power_kw,
    );
    if !(min >= 0.0 && avg >= 0.0 && max >= 0.0) {
        return illegal("power values must be zero or greater".to_string());
    }
    if !(min <= avg && avg <= max) {
        return illegal(format!(
            "expected min <= average <= max, got min = {min}, average = {avg}, max = {max}"
        ));
    }

    if let Some(load_factor) = new_type.load_factor_pct
        && !(0.0..=100.0).contains(&load_factor)
    {
        return illegal(format!("load factor must be within 0..=100, got {load_factor}"));
    }
    if let Some(hours) = new_type.operating_hours_per_day
        && !(0.0..=24.0).contains(&hours)
    {
        return illegal(format!("operating hours must be within 0..=24, got {hours}"));
    }

    Ok(())
}

/// Adds an equipment type to the catalog and returns it as stored.
pub async fn insert_equipment_type(
    pool: &Pool<Sqlite>,
    new_type: &NewEquipmentType,
) -> Result<EquipmentType, QueryError> {
    validate_new_equipment_type(new_type)?;
    get_category(pool, new_type.category_id).await?;

    let type_id = sqlx::query(
        r"
        INSERT INTO equipment_types
            (category_id, name, average_power_kw, min_power_kw, max_power_kw,
             load_factor_pct, operating_hours_per_day)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(new_type.category_id)
    .bind(new_type.name.trim())
    .bind(new_type.average_power_kw)
    .bind(new_type.min_power_kw)
    .bind(new_type.max_power_kw)
    .bind(new_type.load_factor_pct.unwrap_or(DEFAULT_LOAD_FACTOR_PCT))
    .bind(
        new_type
            .operating_hours_per_day
            .unwrap_or(DEFAULT_OPERATING_HOURS_PER_DAY),
    )
    .execute(pool)
    .await?
    .last_insert_rowid();

    get_equipment_type(pool, type_id).await
}
