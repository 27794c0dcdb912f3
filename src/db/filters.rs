// Dynamic SQL for property search
//
// Builds one parameterized statement from whichever filters are set.
// Values only ever go through push_bind.

use crate::db::models::PropertySearch;
use sqlx::{QueryBuilder, Sqlite};

const BASE_QUERY: &str = "SELECT properties.*, AVG(property_reviews.rating) AS average_rating \
     FROM properties \
     LEFT JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Assemble the search statement. `search` should already be normalized.
pub fn property_search_query(search: &PropertySearch, limit: i64) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(BASE_QUERY);
    let mut has_where = false;

    if let Some(pattern) = search.city_pattern() {
        push_condition(&mut builder, &mut has_where);
        builder.push("properties.city_folded LIKE ");
        builder.push_bind(pattern);
    }

    if let Some(owner_id) = search.owner_id {
        push_condition(&mut builder, &mut has_where);
        builder.push("properties.owner_id = ");
        builder.push_bind(owner_id);
    }

    if let Some(min_cents) = search.minimum_price_cents() {
        push_condition(&mut builder, &mut has_where);
        builder.push("properties.cost_per_night >= ");
        builder.push_bind(min_cents);
    }

    if let Some(max_cents) = search.maximum_price_cents() {
        push_condition(&mut builder, &mut has_where);
        builder.push("properties.cost_per_night <= ");
        builder.push_bind(max_cents);
    }

    builder.push(" GROUP BY properties.id");

    if let Some(min_rating) = search.minimum_rating {
        builder.push(" HAVING AVG(property_reviews.rating) >= ");
        builder.push_bind(min_rating);
    }

    builder.push(" ORDER BY properties.cost_per_night LIMIT ");
    builder.push_bind(limit);

    builder
}

// First condition opens the WHERE clause, the rest chain with AND
fn push_condition(builder: &mut QueryBuilder<'static, Sqlite>, has_where: &mut bool) {
    if *has_where {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_where = true;
    }
}
