use rusqlite::types::Type;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Account row. The password column holds a bcrypt hash and is never
/// serialized; responses use [`PublicUser`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
        })
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DishCategory {
    Meat,
    Fish,
}

impl DishCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DishCategory::Meat => "meat",
            DishCategory::Fish => "fish",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "meat" => Some(DishCategory::Meat),
            "fish" => Some(DishCategory::Fish),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: DishCategory,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
    pub preparation: Option<String>,
    pub allergens: Option<String>,
}

impl Dish {
    /// Column order: id, name, description, price, category, image_url,
    /// ingredients, preparation, allergens.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let category: String = row.get(4)?;
        let category = DishCategory::parse(&category).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("unknown dish category: {category}").into(),
            )
        })?;
        Ok(Dish {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            price: row.get(3)?,
            category,
            image_url: row.get(5)?,
            ingredients: row.get(6)?,
            preparation: row.get(7)?,
            allergens: row.get(8)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationType {
    Table,
    Sunbed,
}

impl ReservationType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationType::Table => "table",
            ReservationType::Sunbed => "sunbed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "table" => Some(ReservationType::Table),
            "sunbed" => Some(ReservationType::Sunbed),
            _ => None,
        }
    }
}

/// A stored reservation. Exactly one of `num_people` / `sunbed_type` is set,
/// selected by `kind`; the other is always null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: ReservationType,
    pub reservation_date: String,
    pub reservation_time: String,
    pub num_people: Option<i64>,
    pub sunbed_type: Option<String>,
}

impl Reservation {
    /// Column order: id, user_id, type, reservation_date, reservation_time,
    /// num_people, sunbed_type.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let kind: String = row.get(2)?;
        let kind = ReservationType::parse(&kind).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                Type::Text,
                format!("unknown reservation type: {kind}").into(),
            )
        })?;
        Ok(Reservation {
            id: row.get(0)?,
            user_id: row.get(1)?,
            kind,
            reservation_date: row.get(3)?,
            reservation_time: row.get(4)?,
            num_people: row.get(5)?,
            sunbed_type: row.get(6)?,
        })
    }
}
