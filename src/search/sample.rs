//! Built-in illustrative listings shown when a fetch fails before any page
//! was loaded, so the screen stays visibly populated in degraded mode.
//! Selection is governed by [`FallbackPolicy`](crate::search::FallbackPolicy).

use chrono::Utc;

use crate::models::{ListingKind, Location, Property, PropertyKind};

/// A small, plausible page of listings across the province.
pub fn sample_listings() -> Vec<Property> {
    vec![
        Property {
            id: "sample-posadas-1".to_string(),
            title: "Casa moderna en Posadas Centro".to_string(),
            location: Location {
                city: "Posadas".to_string(),
                province: Some("Misiones".to_string()),
                latitude: Some(-27.3621),
                longitude: Some(-55.9008),
            },
            address: Some("Av. Mitre 1234".to_string()),
            price: 120_000,
            currency: "ARS".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            area_sqm: 150,
            kind: PropertyKind::House,
            listing: ListingKind::Sale,
            featured: true,
            images: vec!["/placeholder-house-1.jpg".to_string()],
            listed_at: Utc::now(),
        },
        Property {
            id: "sample-obera-2".to_string(),
            title: "Departamento céntrico en Oberá".to_string(),
            location: Location {
                city: "Oberá".to_string(),
                province: Some("Misiones".to_string()),
                latitude: Some(-27.4878),
                longitude: Some(-55.1199),
            },
            address: Some("San Martín 567".to_string()),
            price: 85_000,
            currency: "ARS".to_string(),
            bedrooms: 2,
            bathrooms: 1,
            area_sqm: 80,
            kind: PropertyKind::Apartment,
            listing: ListingKind::Sale,
            featured: false,
            images: vec!["/placeholder-apartment-1.jpg".to_string()],
            listed_at: Utc::now(),
        },
        Property {
            id: "sample-iguazu-3".to_string(),
            title: "Local comercial en Puerto Iguazú".to_string(),
            location: Location {
                city: "Puerto Iguazú".to_string(),
                province: Some("Misiones".to_string()),
                latitude: Some(-25.5948),
                longitude: Some(-54.5805),
            },
            address: Some("Av. Brasil 890".to_string()),
            price: 200_000,
            currency: "ARS".to_string(),
            bedrooms: 0,
            bathrooms: 2,
            area_sqm: 120,
            kind: PropertyKind::Commercial,
            listing: ListingKind::Rent,
            featured: true,
            images: vec!["/placeholder-commercial-1.jpg".to_string()],
            listed_at: Utc::now(),
        },
        Property {
            id: "sample-eldorado-4".to_string(),
            title: "Terreno en Eldorado".to_string(),
            location: Location {
                city: "Eldorado".to_string(),
                province: Some("Misiones".to_string()),
                latitude: Some(-26.4009),
                longitude: Some(-54.6156),
            },
            address: Some("Ruta 12 Km 45".to_string()),
            price: 45_000,
            currency: "ARS".to_string(),
            bedrooms: 0,
            bathrooms: 0,
            area_sqm: 1000,
            kind: PropertyKind::Land,
            listing: ListingKind::Sale,
            featured: false,
            images: vec!["/placeholder-land-1.jpg".to_string()],
            listed_at: Utc::now(),
        },
    ]
}
