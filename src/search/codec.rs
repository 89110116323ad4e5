//! Bidirectional mapping between a [`FilterSet`] and the flat query-string
//! parameter set carried in the address bar. Pure and side-effect free.
//!
//! `decode(encode(f))` is observationally equal to `f` for every
//! representable filter set. Decode never fails: malformed values drop the
//! offending field, a bad bounding box is discarded whole, unknown
//! parameters are ignored.

use url::form_urlencoded;

use crate::models::{ListingKind, PropertyKind};
use crate::search::types::{BoundingBox, FilterSet, SortOrder};

/// Serialize the filter set into query-string form. Absent or falsy fields
/// are omitted entirely, so a default search encodes to the empty string.
pub fn encode(filters: &FilterSet) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if let Some(city) = filters.city.as_deref() {
        if !city.is_empty() {
            query.append_pair("q", city);
        }
    }
    if let Some(price) = filters.min_price {
        query.append_pair("priceMin", &price.to_string());
    }
    if let Some(price) = filters.max_price {
        query.append_pair("priceMax", &price.to_string());
    }
    if let Some(rooms) = filters.min_bedrooms {
        query.append_pair("rooms", &rooms.to_string());
    }
    if let Some(kind) = filters.kind {
        query.append_pair("type", kind.as_param());
    }
    if let Some(listing) = filters.listing {
        query.append_pair("listing", listing.as_param());
    }
    if filters.featured == Some(true) {
        query.append_pair("featured", "true");
    }
    if let Some(sort) = filters.sort {
        query.append_pair("sort", sort.as_param());
    }
    if let Some(bounds) = &filters.bounds {
        query.append_pair(
            "bbox",
            &format!(
                "{},{},{},{}",
                bounds.min_lng, bounds.min_lat, bounds.max_lng, bounds.max_lat
            ),
        );
    }

    query.finish()
}

/// Parse a query string back into a filter set. A leading `?` is tolerated.
pub fn decode(query: &str) -> FilterSet {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filters = FilterSet::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "q" => {
                if !value.is_empty() {
                    filters.city = Some(value.into_owned());
                }
            }
            "priceMin" => filters.min_price = value.parse().ok(),
            "priceMax" => filters.max_price = value.parse().ok(),
            "rooms" => filters.min_bedrooms = value.parse().ok(),
            "type" => filters.kind = PropertyKind::from_param(&value),
            "listing" => filters.listing = ListingKind::from_param(&value),
            "featured" => {
                if value == "true" {
                    filters.featured = Some(true);
                }
            }
            "sort" => filters.sort = SortOrder::from_param(&value),
            "bbox" => filters.bounds = parse_bbox(&value),
            _ => {}
        }
    }

    filters
}

/// Four comma-joined floats: minLng,minLat,maxLng,maxLat. Anything else
/// discards the whole box without touching other fields.
fn parse_bbox(raw: &str) -> Option<BoundingBox> {
    let mut corners = [0f64; 4];
    let mut count = 0;

    for token in raw.split(',') {
        if count == 4 {
            return None;
        }
        let value: f64 = token.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        corners[count] = value;
        count += 1;
    }
    if count != 4 {
        return None;
    }

    BoundingBox::new(corners[0], corners[1], corners[2], corners[3])
}
