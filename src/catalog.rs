//! Dish catalog: CRUD over the dishes table.
//!
//! Updates treat the three mandatory fields (name, price, category) as
//! required-and-non-null, while the optional fields follow patch semantics:
//! an omitted key keeps the stored value, an explicit null clears it.

use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::db::models::{Dish, DishCategory};
use crate::error::{AppError, AppResult};
use crate::serde_helpers::double_option;
use crate::state::DbPool;

const DISH_COLUMNS: &str =
    "id, name, description, price, category, image_url, ingredients, preparation, allergens";

#[derive(Debug, Default, Deserialize)]
pub struct CreateDish {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
    pub preparation: Option<String>,
    pub allergens: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDish {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub ingredients: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub preparation: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub allergens: Option<Option<String>>,
}

pub fn create(pool: &DbPool, payload: CreateDish) -> AppResult<Dish> {
    let (name, price, category_raw) = match (&payload.name, payload.price, &payload.category) {
        (Some(n), Some(p), Some(c)) if !n.is_empty() && !c.is_empty() => (n, p, c),
        _ => {
            return Err(AppError::Validation(
                "Name, price, and category are required.".into(),
            ))
        }
    };
    let category = parse_category(category_raw)?;

    let conn = pool.get()?;
    conn.execute(
        "INSERT INTO dishes (name, description, price, category, image_url, ingredients, preparation, allergens) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            name,
            payload.description,
            price,
            category.as_str(),
            payload.image_url,
            payload.ingredients,
            payload.preparation,
            payload.allergens
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(dish_id = id, "created dish");

    fetch(&conn, id)
}

pub fn list(pool: &DbPool, category: Option<&str>) -> AppResult<Vec<Dish>> {
    // An empty ?category= is treated as no filter.
    let category = category.filter(|c| !c.is_empty());

    let conn = pool.get()?;
    let mut dishes = Vec::new();
    match category {
        Some(raw) => {
            let category = DishCategory::parse(raw).ok_or_else(|| {
                AppError::Validation("Category query parameter must be 'meat' or 'fish'.".into())
            })?;
            let mut stmt =
                conn.prepare(&format!("SELECT {DISH_COLUMNS} FROM dishes WHERE category = ?1"))?;
            let rows = stmt.query_map(params![category.as_str()], Dish::from_row)?;
            for dish in rows {
                dishes.push(dish?);
            }
        }
        None => {
            let mut stmt = conn.prepare(&format!("SELECT {DISH_COLUMNS} FROM dishes"))?;
            let rows = stmt.query_map([], Dish::from_row)?;
            for dish in rows {
                dishes.push(dish?);
            }
        }
    }
    Ok(dishes)
}

pub fn get(pool: &DbPool, id: i64) -> AppResult<Dish> {
    let conn = pool.get()?;
    conn.query_row(
        &format!("SELECT {DISH_COLUMNS} FROM dishes WHERE id = ?1"),
        params![id],
        Dish::from_row,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => AppError::NotFound("Dish not found.".into()),
        _ => AppError::from(e),
    })
}

pub fn update(pool: &DbPool, id: i64, payload: UpdateDish) -> AppResult<Dish> {
    let (name, price, category_raw) = match (payload.name, payload.price, payload.category) {
        (None, _, _) | (_, None, _) | (_, _, None) => {
            return Err(AppError::Validation(
                "Name, price, and category are required for update and cannot be null/undefined."
                    .into(),
            ))
        }
        (Some(None), _, _) | (_, Some(None), _) | (_, _, Some(None)) => {
            return Err(AppError::Validation(
                "Name, price, and category cannot be null.".into(),
            ))
        }
        (Some(Some(n)), Some(Some(p)), Some(Some(c))) => (n, p, c),
    };
    let category = parse_category(&category_raw)?;

    let conn = pool.get()?;
    let existing = conn
        .query_row(
            &format!("SELECT {DISH_COLUMNS} FROM dishes WHERE id = ?1"),
            params![id],
            Dish::from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                AppError::NotFound("Dish not found to update.".into())
            }
            _ => AppError::from(e),
        })?;

    // Omitted optional fields keep the stored value; explicit nulls clear it.
    let description = payload.description.unwrap_or(existing.description);
    let image_url = payload.image_url.unwrap_or(existing.image_url);
    let ingredients = payload.ingredients.unwrap_or(existing.ingredients);
    let preparation = payload.preparation.unwrap_or(existing.preparation);
    let allergens = payload.allergens.unwrap_or(existing.allergens);

    conn.execute(
        "UPDATE dishes SET name = ?1, description = ?2, price = ?3, category = ?4, \
         image_url = ?5, ingredients = ?6, preparation = ?7, allergens = ?8 WHERE id = ?9",
        params![
            name,
            description,
            price,
            category.as_str(),
            image_url,
            ingredients,
            preparation,
            allergens,
            id
        ],
    )?;
    tracing::info!(dish_id = id, "updated dish");

    fetch(&conn, id)
}

pub fn delete(pool: &DbPool, id: i64) -> AppResult<()> {
    let conn = pool.get()?;
    let affected = conn.execute("DELETE FROM dishes WHERE id = ?1", params![id])?;
    if affected == 0 {
        return Err(AppError::NotFound("Dish not found to delete.".into()));
    }
    tracing::info!(dish_id = id, "deleted dish");
    Ok(())
}

fn parse_category(raw: &str) -> AppResult<DishCategory> {
    DishCategory::parse(raw)
        .ok_or_else(|| AppError::Validation("Category must be 'meat' or 'fish'.".into()))
}

fn fetch(conn: &Connection, id: i64) -> AppResult<Dish> {
    Ok(conn.query_row(
        &format!("SELECT {DISH_COLUMNS} FROM dishes WHERE id = ?1"),
        params![id],
        Dish::from_row,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use r2d2::Pool;
    use r2d2_sqlite::SqliteConnectionManager;

    fn test_pool() -> DbPool {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager).unwrap();
        crate::db::run_migrations(&pool).unwrap();
        pool
    }

    fn sample_create() -> CreateDish {
        CreateDish {
            name: Some("Grilled Octopus".to_string()),
            description: Some("Charred tentacles over fava".to_string()),
            price: Some(19.5),
            category: Some("fish".to_string()),
            ..CreateDish::default()
        }
    }

    #[test]
    fn create_inserts_and_returns_the_stored_row() {
        let pool = test_pool();
        let dish = create(&pool, sample_create()).unwrap();

        assert!(dish.id > 0);
        assert_eq!(dish.name, "Grilled Octopus");
        assert_eq!(dish.category, DishCategory::Fish);
        assert_eq!(dish.image_url, None);
    }

    #[test]
    fn create_requires_name_price_and_category() {
        let pool = test_pool();
        let payload = CreateDish {
            name: Some("No price".to_string()),
            category: Some("meat".to_string()),
            ..CreateDish::default()
        };
        let err = create(&pool, payload).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn create_rejects_category_outside_the_enum() {
        let pool = test_pool();
        let payload = CreateDish {
            name: Some("Tiramisu".to_string()),
            price: Some(8.0),
            category: Some("dessert".to_string()),
            ..CreateDish::default()
        };
        let err = create(&pool, payload).unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "Category must be 'meat' or 'fish'."),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn list_filters_by_category() {
        let pool = test_pool();
        create(&pool, sample_create()).unwrap();
        create(
            &pool,
            CreateDish {
                name: Some("Bistecca".to_string()),
                price: Some(32.0),
                category: Some("meat".to_string()),
                ..CreateDish::default()
            },
        )
        .unwrap();

        assert_eq!(list(&pool, None).unwrap().len(), 2);
        let fish = list(&pool, Some("fish")).unwrap();
        assert_eq!(fish.len(), 1);
        assert_eq!(fish[0].name, "Grilled Octopus");
        // Empty filter means no filter.
        assert_eq!(list(&pool, Some("")).unwrap().len(), 2);
    }

    #[test]
    fn list_rejects_unknown_filter_category() {
        let pool = test_pool();
        let err = list(&pool, Some("vegan")).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "Category query parameter must be 'meat' or 'fish'.")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn get_missing_dish_is_not_found() {
        let pool = test_pool();
        let err = get(&pool, 999).unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Dish not found."),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn update_distinguishes_absent_from_null_mandatory_fields() {
        let pool = test_pool();
        let dish = create(&pool, sample_create()).unwrap();

        let err = update(&pool, dish.id, UpdateDish::default()).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("required for update")),
            other => panic!("expected validation error, got {other:?}"),
        }

        let nulled = UpdateDish {
            name: Some(None),
            price: Some(Some(10.0)),
            category: Some(Some("fish".to_string())),
            ..UpdateDish::default()
        };
        let err = update(&pool, dish.id, nulled).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "Name, price, and category cannot be null.")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_keeps_omitted_optionals_and_clears_nulled_ones() {
        let pool = test_pool();
        let dish = create(&pool, sample_create()).unwrap();

        let patch = UpdateDish {
            name: Some(Some("Grilled Octopus".to_string())),
            price: Some(Some(21.0)),
            category: Some(Some("fish".to_string())),
            // description omitted, image_url explicitly nulled
            image_url: Some(None),
            ..UpdateDish::default()
        };
        let updated = update(&pool, dish.id, patch).unwrap();

        assert_eq!(updated.price, 21.0);
        assert_eq!(
            updated.description.as_deref(),
            Some("Charred tentacles over fava")
        );
        assert_eq!(updated.image_url, None);
    }

    #[test]
    fn update_missing_dish_is_not_found() {
        let pool = test_pool();
        let patch = UpdateDish {
            name: Some(Some("Ghost".to_string())),
            price: Some(Some(1.0)),
            category: Some(Some("meat".to_string())),
            ..UpdateDish::default()
        };
        let err = update(&pool, 999, patch).unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Dish not found to update."),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn delete_removes_the_row_once() {
        let pool = test_pool();
        let dish = create(&pool, sample_create()).unwrap();

        delete(&pool, dish.id).unwrap();
        let err = delete(&pool, dish.id).unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Dish not found to delete."),
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
