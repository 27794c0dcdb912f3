/// SQL query functions for database operations
///
/// Each function issues exactly one parameterized statement. Missing rows
/// are `Ok(None)` or an empty Vec; failures are always `Err`.

use crate::db::filters::property_search_query;
use crate::db::models::*;
use crate::db::Database;
use crate::error::{LightbnbError, Result};

impl Database {
    /// Get a single user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The matching user
    /// * `Ok(None)` - No user has this email
    pub async fn get_user_with_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool())
            .await?;

        Ok(user)
    }

    /// Get a single user by id
    pub async fn get_user_with_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(user)
    }

    /// Insert a user and return the stored row
    ///
    /// A duplicate email surfaces as a unique-constraint database error.
    pub async fn add_user(&self, user: NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, password, email) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(user.name)
        .bind(user.password)
        .bind(user.email)
        .fetch_one(self.pool())
        .await?;

        Ok(user)
    }

    /// Get a guest's past reservations
    ///
    /// Only reservations that ended before today are returned, oldest
    /// first, each with the reserved property and its review average.
    ///
    /// # Arguments
    /// * `guest_id` - The guest's user id
    /// * `limit` - Maximum number of reservations to return
    pub async fn get_all_reservations(
        &self,
        guest_id: i64,
        limit: i64,
    ) -> Result<Vec<ReservationListing>> {
        check_limit(limit)?;
        let reservations = sqlx::query_as::<_, ReservationListing>(
            r#"
            SELECT reservations.id AS reservation_id,
                   reservations.guest_id AS guest_id,
                   reservations.start_date AS start_date,
                   reservations.end_date AS end_date,
                   properties.*,
                   AVG(property_reviews.rating) AS average_rating
            FROM reservations
            JOIN properties ON properties.id = reservations.property_id
            LEFT JOIN property_reviews ON property_reviews.property_id = reservations.property_id
            WHERE reservations.guest_id = ? AND reservations.end_date < date('now')
            GROUP BY reservations.id, properties.id
            ORDER BY reservations.start_date
            LIMIT ?
            "#,
        )
        .bind(guest_id)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        Ok(reservations)
    }

    /// Search properties
    ///
    /// # Arguments
    /// * `search` - Optional filters; blank values are ignored
    /// * `limit` - Maximum number of properties to return
    ///
    /// # Returns
    /// * `Ok(Vec<PropertyListing>)` - Cheapest first
    pub async fn get_all_properties(
        &self,
        search: &PropertySearch,
        limit: i64,
    ) -> Result<Vec<PropertyListing>> {
        check_limit(limit)?;
        let search = search.normalized();
        let mut builder = property_search_query(&search, limit);
        tracing::debug!(sql = builder.sql(), ?search, limit, "property search");

        let properties = builder
            .build_query_as::<PropertyListing>()
            .fetch_all(self.pool())
            .await?;

        Ok(properties)
    }

    /// Get property by id
    pub async fn get_property_with_id(&self, id: i64) -> Result<Option<Property>> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(property)
    }

    /// Insert a property and return the stored row
    pub async fn add_property(&self, property: NewProperty) -> Result<Property> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, street, city, city_folded, province, post_code, country,
                parking_spaces, number_of_bathrooms, number_of_bedrooms
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(property.title)
        .bind(property.description)
        .bind(property.thumbnail_photo_url)
        .bind(property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(property.street)
        .bind(fold_case(&property.city))
        .bind(property.city)
        .bind(property.province)
        .bind(property.post_code)
        .bind(property.country)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .fetch_one(self.pool())
        .await?;

        Ok(property)
    }

    /// Insert a reservation and return the stored row
    pub async fn add_reservation(&self, reservation: NewReservation) -> Result<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (start_date, end_date, property_id, guest_id)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.property_id)
        .bind(reservation.guest_id)
        .fetch_one(self.pool())
        .await?;

        Ok(reservation)
    }

    /// Get reservation by id
    pub async fn get_reservation_with_id(&self, id: i64) -> Result<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(reservation)
    }

    /// Insert a review and return the stored row
    pub async fn add_review(&self, review: NewReview) -> Result<PropertyReview> {
        let review = sqlx::query_as::<_, PropertyReview>(
            r#"
            INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating, message)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(review.guest_id)
        .bind(review.property_id)
        .bind(review.reservation_id)
        .bind(review.rating)
        .bind(review.message)
        .fetch_one(self.pool())
        .await?;

        Ok(review)
    }
}

// SQLite reads a negative LIMIT as "no limit"
fn check_limit(limit: i64) -> Result<()> {
    if limit < 1 {
        return Err(LightbnbError::invalid(format!("limit must be positive, got {}", limit)));
    }
    Ok(())
}
