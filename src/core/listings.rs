/// Property search and listing
///
/// Validates filters and new listings before they reach the query layer.

use crate::config::MAX_RESULT_LIMIT;
use crate::db::{Database, NewProperty, Property, PropertyListing, PropertySearch};
use crate::error::{LightbnbError, Result};
use std::sync::Arc;

/// Handles property search and creation
pub struct Listings {
    db: Arc<Database>,
}

impl Listings {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Search properties, cheapest first
    ///
    /// # Arguments
    /// * `search` - Filter options; blank values are ignored
    /// * `limit` - Maximum results, 1 to 100
    pub async fn search(&self, search: &PropertySearch, limit: i64) -> Result<Vec<PropertyListing>> {
        let search = search.normalized();
        validate_search(&search, limit)?;

        let listings = self
            .db
            .get_all_properties(&search, limit)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "property search failed"))?;

        tracing::debug!(results = listings.len(), "property search done");
        Ok(listings)
    }

    /// List a new property for an existing owner
    pub async fn add(&self, property: NewProperty) -> Result<Property> {
        validate_property(&property)?;

        if self.db.get_user_with_id(property.owner_id).await?.is_none() {
            return Err(LightbnbError::UserNotFound(property.owner_id));
        }

        let property = self
            .db
            .add_property(property)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "failed to add property"))?;

        tracing::info!(property_id = property.id, owner_id = property.owner_id, "listed property");
        Ok(property)
    }

    /// Fetch a single property
    pub async fn get(&self, id: i64) -> Result<Property> {
        self.db
            .get_property_with_id(id)
            .await?
            .ok_or(LightbnbError::PropertyNotFound(id))
    }
}

fn validate_search(search: &PropertySearch, limit: i64) -> Result<()> {
    if !(1..=MAX_RESULT_LIMIT).contains(&limit) {
        return Err(LightbnbError::invalid(format!(
            "limit must be between 1 and {}",
            MAX_RESULT_LIMIT
        )));
    }

    for price in [search.minimum_price_per_night, search.maximum_price_per_night]
        .into_iter()
        .flatten()
    {
        if !price.is_finite() || price < 0.0 {
            return Err(LightbnbError::invalid("prices must be non-negative"));
        }
    }

    if let (Some(min), Some(max)) = (search.minimum_price_per_night, search.maximum_price_per_night) {
        if min > max {
            return Err(LightbnbError::invalid(
                "minimum price is above maximum price",
            ));
        }
    }

    if let Some(rating) = search.minimum_rating {
        if !(1.0..=5.0).contains(&rating) {
            return Err(LightbnbError::invalid("minimum rating must be between 1 and 5"));
        }
    }

    Ok(())
}

fn validate_property(property: &NewProperty) -> Result<()> {
    if property.title.trim().is_empty() {
        return Err(LightbnbError::invalid("title is required"));
    }
    if property.cost_per_night < 0 {
        return Err(LightbnbError::invalid("cost per night can't be negative"));
    }
    if property.parking_spaces < 0
        || property.number_of_bathrooms < 0
        || property.number_of_bedrooms < 0
    {
        return Err(LightbnbError::invalid("room and parking counts can't be negative"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::tests::{listing, seed_user};

    async fn setup() -> (Listings, Arc<Database>) {
        let db = Arc::new(Database::new_test().await.unwrap());
        (Listings::new(Arc::clone(&db)), db)
    }

    #[tokio::test]
    async fn test_add_and_search() {
        let (listings, db) = setup().await;
        let owner = seed_user(&db, "Owner", "owner@example.com").await;

        let added = listings
            .add(listing(owner.id, "Habit mix", "Vancouver", 34_291))
            .await
            .unwrap();

        let search = PropertySearch {
            city: Some("vancouver".to_string()),
            ..Default::default()
        };
        let found = listings.search(&search, 10).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].property.id, added.id);
        assert_eq!(listings.get(added.id).await.unwrap(), added);
    }

    #[tokio::test]
    async fn test_add_requires_owner() {
        let (listings, _db) = setup().await;

        let result = listings.add(listing(77, "Orphan", "Nowhere", 100)).await;
        match result {
            Err(LightbnbError::UserNotFound(77)) => {}
            _ => panic!("Expected UserNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_add_rejects_bad_listing() {
        let (listings, db) = setup().await;
        let owner = seed_user(&db, "Owner", "owner@example.com").await;

        let mut untitled = listing(owner.id, "  ", "Ottawa", 100);
        assert!(matches!(
            listings.add(untitled.clone()).await,
            Err(LightbnbError::InvalidInput(_))
        ));

        untitled.title = "Titled".to_string();
        untitled.cost_per_night = -1;
        assert!(matches!(
            listings.add(untitled).await,
            Err(LightbnbError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_search_validation() {
        let (listings, _db) = setup().await;

        let inverted = PropertySearch {
            minimum_price_per_night: Some(300.0),
            maximum_price_per_night: Some(100.0),
            ..Default::default()
        };
        assert!(listings.search(&inverted, 10).await.is_err());

        let rating = PropertySearch {
            minimum_rating: Some(6.0),
            ..Default::default()
        };
        assert!(listings.search(&rating, 10).await.is_err());

        assert!(listings.search(&PropertySearch::default(), 0).await.is_err());
        assert!(listings.search(&PropertySearch::default(), 101).await.is_err());
    }

    #[tokio::test]
    async fn test_zero_filters_are_ignored() {
        let (listings, db) = setup().await;
        let owner = seed_user(&db, "Owner", "owner@example.com").await;
        listings.add(listing(owner.id, "Any", "Victoria", 100)).await.unwrap();

        let blank = PropertySearch {
            city: Some(String::new()),
            minimum_rating: Some(0.0),
            maximum_price_per_night: Some(0.0),
            ..Default::default()
        };
        let found = listings.search(&blank, 10).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_property() {
        let (listings, _db) = setup().await;
        assert!(matches!(
            listings.get(5).await,
            Err(LightbnbError::PropertyNotFound(5))
        ));
    }
}
