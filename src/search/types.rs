use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ListingKind, Property, PropertyKind};

/// Visible map viewport as min/max corners, in degrees.
///
/// Replaced wholesale whenever the map settles after a pan or zoom;
/// never partially mutated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// All corners finite, min strictly below max on both axes.
    pub fn new(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Option<Self> {
        let finite = [min_lng, min_lat, max_lng, max_lat]
            .iter()
            .all(|v| v.is_finite());
        (finite && min_lng < max_lng && min_lat < max_lat).then_some(Self {
            min_lng,
            min_lat,
            max_lng,
            max_lat,
        })
    }

    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        longitude >= self.min_lng
            && longitude <= self.max_lng
            && latitude >= self.min_lat
            && latitude <= self.max_lat
    }

    /// Web-map zoom level that would roughly frame this box, clamped to 0..=18.
    pub fn estimated_zoom(&self) -> u8 {
        let span = (self.max_lng - self.min_lng).max(1e-9);
        (360.0 / span).log2().round().clamp(0.0, 18.0) as u8
    }
}

/// Result ordering requested by the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Newest,
    PriceAsc,
    PriceDesc,
    Featured,
}

impl SortOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::Featured => "featured",
        }
    }

    pub fn from_param(raw: &str) -> Option<Self> {
        [
            SortOrder::Newest,
            SortOrder::PriceAsc,
            SortOrder::PriceDesc,
            SortOrder::Featured,
        ]
        .into_iter()
        .find(|sort| sort.as_param().eq_ignore_ascii_case(raw))
    }
}

/// Which surface the results render on
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    List,
    Map,
}

/// Search predicates. Absence of a field means "no constraint",
/// never a sentinel value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterSet {
    pub city: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_bedrooms: Option<u32>,
    pub kind: Option<PropertyKind>,
    pub listing: Option<ListingKind>,
    pub featured: Option<bool>,
    pub sort: Option<SortOrder>,
    pub bounds: Option<BoundingBox>,
}

/// A single-field edit. Each variant replaces the whole field;
/// `None` clears the constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEdit {
    City(Option<String>),
    PriceMin(Option<u64>),
    PriceMax(Option<u64>),
    MinBedrooms(Option<u32>),
    Kind(Option<PropertyKind>),
    Listing(Option<ListingKind>),
    Featured(Option<bool>),
    Sort(Option<SortOrder>),
    Bounds(Option<BoundingBox>),
}

impl FilterSet {
    /// Produce the next filter state. Every edit yields a new value so
    /// prior state can be diffed and compared by value downstream.
    pub fn with(&self, edit: FilterEdit) -> FilterSet {
        let mut next = self.clone();
        match edit {
            FilterEdit::City(city) => next.city = city,
            FilterEdit::PriceMin(price) => next.min_price = price,
            FilterEdit::PriceMax(price) => next.max_price = price,
            FilterEdit::MinBedrooms(rooms) => next.min_bedrooms = rooms,
            FilterEdit::Kind(kind) => next.kind = kind,
            FilterEdit::Listing(listing) => next.listing = listing,
            FilterEdit::Featured(featured) => next.featured = featured,
            FilterEdit::Sort(sort) => next.sort = sort,
            FilterEdit::Bounds(bounds) => next.bounds = bounds,
        }
        next
    }

    pub fn is_empty(&self) -> bool {
        *self == FilterSet::default()
    }

    /// Local narrowing predicate: case-insensitive substring on city,
    /// inclusive price range, bedroom minimum, exact match on the rest.
    /// Viewport containment is left to the remote query.
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(city) = &self.city {
            let haystack = property.location.city.to_lowercase();
            if !haystack.contains(&city.to_lowercase()) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }
        if let Some(rooms) = self.min_bedrooms {
            if property.bedrooms < rooms {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if property.kind != kind {
                return false;
            }
        }
        if let Some(listing) = self.listing {
            if property.listing != listing {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if property.featured != featured {
                return false;
            }
        }
        true
    }
}

/// One page of remote results
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub items: Vec<Property>,
    pub total: u64,
}

/// Failure surfaced by a result fetcher
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Session lifecycle: Idle until the first fetch, then Loading and
/// either Ready or Failed; any triggering operation re-enters Loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}
