// Reservations and reviews

use crate::config::MAX_RESULT_LIMIT;
use crate::db::{Database, NewReservation, NewReview, PropertyReview, Reservation, ReservationListing};
use crate::error::{LightbnbError, Result};
use std::sync::Arc;

pub struct Bookings {
    db: Arc<Database>,
}

impl Bookings {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Reservations the guest has already completed, oldest first
    pub async fn past_reservations(
        &self,
        guest_id: i64,
        limit: i64,
    ) -> Result<Vec<ReservationListing>> {
        if !(1..=MAX_RESULT_LIMIT).contains(&limit) {
            return Err(LightbnbError::invalid(format!(
                "limit must be between 1 and {}",
                MAX_RESULT_LIMIT
            )));
        }

        self.db
            .get_all_reservations(guest_id, limit)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, guest_id, "reservation lookup failed"))
    }

    /// Book a property
    pub async fn reserve(&self, reservation: NewReservation) -> Result<Reservation> {
        if reservation.end_date <= reservation.start_date {
            return Err(LightbnbError::invalid("end date must be after start date"));
        }
        if self.db.get_property_with_id(reservation.property_id).await?.is_none() {
            return Err(LightbnbError::PropertyNotFound(reservation.property_id));
        }
        if self.db.get_user_with_id(reservation.guest_id).await?.is_none() {
            return Err(LightbnbError::UserNotFound(reservation.guest_id));
        }

        let reservation = self
            .db
            .add_reservation(reservation)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "failed to add reservation"))?;

        tracing::info!(
            reservation_id = reservation.id,
            property_id = reservation.property_id,
            "reserved property"
        );
        Ok(reservation)
    }

    /// Leave a 1-5 star review
    pub async fn review(&self, review: NewReview) -> Result<PropertyReview> {
        if !(1..=5).contains(&review.rating) {
            return Err(LightbnbError::invalid("rating must be between 1 and 5"));
        }
        if self.db.get_property_with_id(review.property_id).await?.is_none() {
            return Err(LightbnbError::PropertyNotFound(review.property_id));
        }
        if self.db.get_user_with_id(review.guest_id).await?.is_none() {
            return Err(LightbnbError::UserNotFound(review.guest_id));
        }
        if let Some(reservation_id) = review.reservation_id {
            match self.db.get_reservation_with_id(reservation_id).await? {
                Some(r) if r.guest_id == review.guest_id && r.property_id == review.property_id => {}
                Some(_) => {
                    return Err(LightbnbError::invalid(format!(
                        "reservation {} is not this guest's stay at this property",
                        reservation_id
                    )))
                }
                None => {
                    return Err(LightbnbError::invalid(format!(
                        "reservation {} does not exist",
                        reservation_id
                    )))
                }
            }
        }

        self.db
            .add_review(review)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "failed to add review"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::tests::{listing, seed_user};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (Bookings, i64, i64) {
        let db = Arc::new(Database::new_test().await.unwrap());
        let owner = seed_user(&db, "Owner", "owner@example.com").await;
        let guest = seed_user(&db, "Guest", "guest@example.com").await;
        let property = db
            .add_property(listing(owner.id, "Cabin", "Whistler", 18_000))
            .await
            .unwrap();

        (Bookings::new(db), guest.id, property.id)
    }

    #[tokio::test]
    async fn test_reserve_then_list_past() {
        let (bookings, guest_id, property_id) = setup().await;

        let reservation = bookings
            .reserve(NewReservation {
                start_date: date(2021, 3, 1),
                end_date: date(2021, 3, 8),
                property_id,
                guest_id,
            })
            .await
            .unwrap();

        bookings
            .review(NewReview {
                guest_id,
                property_id,
                reservation_id: Some(reservation.id),
                rating: 4,
                message: Some("messages".to_string()),
            })
            .await
            .unwrap();

        let past = bookings.past_reservations(guest_id, 10).await.unwrap();
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].reservation_id, reservation.id);
        assert_eq!(past[0].property.id, property_id);
        assert_eq!(past[0].average_rating, Some(4.0));
    }

    #[tokio::test]
    async fn test_reserve_rejects_inverted_dates() {
        let (bookings, guest_id, property_id) = setup().await;

        let result = bookings
            .reserve(NewReservation {
                start_date: date(2021, 3, 8),
                end_date: date(2021, 3, 8),
                property_id,
                guest_id,
            })
            .await;

        assert!(matches!(result, Err(LightbnbError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_reserve_unknown_property() {
        let (bookings, guest_id, _) = setup().await;

        let result = bookings
            .reserve(NewReservation {
                start_date: date(2021, 3, 1),
                end_date: date(2021, 3, 2),
                property_id: 999,
                guest_id,
            })
            .await;

        assert!(matches!(result, Err(LightbnbError::PropertyNotFound(999))));
    }

    #[tokio::test]
    async fn test_review_rating_bounds() {
        let (bookings, guest_id, property_id) = setup().await;

        for rating in [0, 6] {
            let result = bookings
                .review(NewReview {
                    guest_id,
                    property_id,
                    reservation_id: None,
                    rating,
                    message: None,
                })
                .await;
            assert!(matches!(result, Err(LightbnbError::InvalidInput(_))));
        }
    }

    #[tokio::test]
    async fn test_review_unknown_guest() {
        let (bookings, _, property_id) = setup().await;

        let result = bookings
            .review(NewReview {
                guest_id: 404,
                property_id,
                reservation_id: None,
                rating: 5,
                message: None,
            })
            .await;

        assert!(matches!(result, Err(LightbnbError::UserNotFound(404))));
    }

    #[tokio::test]
    async fn test_review_rejects_someone_elses_reservation() {
        let (bookings, guest_id, property_id) = setup().await;
        let stranger = seed_user(&bookings.db, "Stranger", "stranger@example.com").await;

        let reservation = bookings
            .reserve(NewReservation {
                start_date: date(2021, 5, 1),
                end_date: date(2021, 5, 4),
                property_id,
                guest_id,
            })
            .await
            .unwrap();

        let result = bookings
            .review(NewReview {
                guest_id: stranger.id,
                property_id,
                reservation_id: Some(reservation.id),
                rating: 1,
                message: None,
            })
            .await;
        assert!(matches!(result, Err(LightbnbError::InvalidInput(_))));

        let result = bookings
            .review(NewReview {
                guest_id,
                property_id,
                reservation_id: Some(reservation.id + 100),
                rating: 5,
                message: None,
            })
            .await;
        assert!(matches!(result, Err(LightbnbError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_past_reservations_limit_bounds() {
        let (bookings, guest_id, _) = setup().await;
        assert!(bookings.past_reservations(guest_id, 0).await.is_err());
    }
}
