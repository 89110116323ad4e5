use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structural category of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyKind {
    House,
    Apartment,
    Commercial,
    Land,
}

impl PropertyKind {
    /// Lowercase token used in query strings
    pub fn as_param(&self) -> &'static str {
        match self {
            PropertyKind::House => "house",
            PropertyKind::Apartment => "apartment",
            PropertyKind::Commercial => "commercial",
            PropertyKind::Land => "land",
        }
    }

    /// Case-insensitive parse; unknown tokens yield `None`
    pub fn from_param(raw: &str) -> Option<Self> {
        [
            PropertyKind::House,
            PropertyKind::Apartment,
            PropertyKind::Commercial,
            PropertyKind::Land,
        ]
        .into_iter()
        .find(|kind| kind.as_param().eq_ignore_ascii_case(raw))
    }
}

/// Whether the listing is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingKind {
    Sale,
    Rent,
}

impl ListingKind {
    pub fn as_param(&self) -> &'static str {
        match self {
            ListingKind::Sale => "sale",
            ListingKind::Rent => "rent",
        }
    }

    pub fn from_param(raw: &str) -> Option<Self> {
        [ListingKind::Sale, ListingKind::Rent]
            .into_iter()
            .find(|listing| listing.as_param().eq_ignore_ascii_case(raw))
    }
}

/// Location information for a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub province: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Core listing data model, as returned by the data collaborator.
/// Read-only to the search core: it renders and filters snapshots,
/// never creates or deletes records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub location: Location,
    pub address: Option<String>,
    pub price: u64,
    pub currency: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area_sqm: u32,
    #[serde(rename = "propertyType")]
    pub kind: PropertyKind,
    #[serde(rename = "listingType")]
    pub listing: ListingKind,
    pub featured: bool,
    pub images: Vec<String>,
    pub listed_at: DateTime<Utc>,
}
