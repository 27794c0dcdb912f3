/// Data models for database entities
///
/// All models map to database tables and use sqlx for type-safe queries.
/// Money is stored as integer cents; filters take whole currency units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Input for creating a user
///
/// `password` is stored as given, so callers hash it first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A rentable property
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i64, // cents
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

impl Property {
    /// Nightly cost in whole currency units
    pub fn cost_per_night_dollars(&self) -> f64 {
        self.cost_per_night as f64 / 100.0
    }
}

/// Input for listing a new property
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_photo_url: String,
    #[serde(default)]
    pub cover_photo_url: String,
    pub cost_per_night: i64, // cents
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub post_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
}

/// Property row plus its review average (None when unreviewed)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

/// A booking of a property by a guest
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Reservation {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i64,
    pub guest_id: i64,
}

/// Input for booking a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i64,
    pub guest_id: i64,
}

/// A guest's reservation joined with the reserved property
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReservationListing {
    pub reservation_id: i64,
    pub guest_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

/// A guest's rating of a property
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct PropertyReview {
    pub id: i64,
    pub guest_id: i64,
    pub property_id: i64,
    pub reservation_id: Option<i64>,
    pub rating: i32,
    pub message: Option<String>,
}

/// Input for reviewing a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub guest_id: i64,
    pub property_id: i64,
    pub reservation_id: Option<i64>,
    pub rating: i32,
    pub message: Option<String>,
}

/// Property search filters
///
/// Every field is optional. Empty strings and zero values count as unset,
/// the same way a submitted-but-blank search form field would.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertySearch {
    pub city: Option<String>,
    pub owner_id: Option<i64>,
    pub minimum_price_per_night: Option<f64>,
    pub maximum_price_per_night: Option<f64>,
    pub minimum_rating: Option<f64>,
}

impl PropertySearch {
    /// Drop blank and zero-valued filters
    pub fn normalized(&self) -> Self {
        Self {
            city: self
                .city
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            owner_id: self.owner_id.filter(|id| *id != 0),
            minimum_price_per_night: self.minimum_price_per_night.filter(|p| *p != 0.0),
            maximum_price_per_night: self.maximum_price_per_night.filter(|p| *p != 0.0),
            minimum_rating: self.minimum_rating.filter(|r| *r != 0.0),
        }
    }

    /// `LIKE` pattern matching the city anywhere in `city_folded`
    pub fn city_pattern(&self) -> Option<String> {
        self.city.as_ref().map(|city| format!("%{}%", fold_case(city)))
    }

    pub fn minimum_price_cents(&self) -> Option<i64> {
        self.minimum_price_per_night.map(dollars_to_cents)
    }

    pub fn maximum_price_cents(&self) -> Option<i64> {
        self.maximum_price_per_night.map(dollars_to_cents)
    }
}

/// Case-folded form of a searchable text value
///
/// SQLite's `LIKE` only folds ASCII, so searchable columns keep a folded
/// copy written at insert time.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}
