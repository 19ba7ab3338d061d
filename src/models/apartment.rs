use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ApartmentType {
    Studio,
    T1,
    T2,
    T3,
    #[serde(rename = "t4", alias = "t4+")]
    T4Plus,
}

impl ApartmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApartmentType::Studio => "studio",
            ApartmentType::T1 => "t1",
            ApartmentType::T2 => "t2",
            ApartmentType::T3 => "t3",
            ApartmentType::T4Plus => "t4",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApartmentType::Studio => "Studio",
            ApartmentType::T1 => "T1",
            ApartmentType::T2 => "T2",
            ApartmentType::T3 => "T3",
            ApartmentType::T4Plus => "T4+",
        }
    }

    pub fn rooms(&self) -> u32 {
        match self {
            ApartmentType::Studio => 0,
            ApartmentType::T1 => 1,
            ApartmentType::T2 => 2,
            ApartmentType::T3 => 3,
            ApartmentType::T4Plus => 4,
        }
    }

    /// Accepts either the id (`t2`) or the display name (`T4+`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "studio" => Some(ApartmentType::Studio),
            "t1" => Some(ApartmentType::T1),
            "t2" => Some(ApartmentType::T2),
            "t3" => Some(ApartmentType::T3),
            "t4" | "t4+" => Some(ApartmentType::T4Plus),
            _ => None,
        }
    }
}

/// Closed amenity catalog. Variants are declared in id order so that sets of
/// amenities iterate alphabetically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Amenity {
    Ac,
    Balcony,
    Cleaning,
    Concierge,
    Iron,
    Kitchen,
    Parking,
    Security,
    Tv,
    View,
    Washing,
    Wifi,
}

impl Amenity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Amenity::Ac => "ac",
            Amenity::Balcony => "balcony",
            Amenity::Cleaning => "cleaning",
            Amenity::Concierge => "concierge",
            Amenity::Iron => "iron",
            Amenity::Kitchen => "kitchen",
            Amenity::Parking => "parking",
            Amenity::Security => "security",
            Amenity::Tv => "tv",
            Amenity::View => "view",
            Amenity::Washing => "washing",
            Amenity::Wifi => "wifi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Amenity::Ac => "Climatisation",
            Amenity::Balcony => "Balcon/Terrasse",
            Amenity::Cleaning => "Service Ménage",
            Amenity::Concierge => "Conciergerie 24h",
            Amenity::Iron => "Fer à repasser",
            Amenity::Kitchen => "Cuisine Équipée",
            Amenity::Parking => "Parking Privé",
            Amenity::Security => "Sécurité 24h",
            Amenity::Tv => "TV 4K",
            Amenity::View => "Vue Panoramique",
            Amenity::Washing => "Lave-linge",
            Amenity::Wifi => "WiFi Haut Débit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ac" => Some(Amenity::Ac),
            "balcony" => Some(Amenity::Balcony),
            "cleaning" => Some(Amenity::Cleaning),
            "concierge" => Some(Amenity::Concierge),
            "iron" => Some(Amenity::Iron),
            "kitchen" => Some(Amenity::Kitchen),
            "parking" => Some(Amenity::Parking),
            "security" => Some(Amenity::Security),
            "tv" => Some(Amenity::Tv),
            "view" => Some(Amenity::View),
            "washing" => Some(Amenity::Washing),
            "wifi" => Some(Amenity::Wifi),
            _ => None,
        }
    }
}

/// Keeps the amenity ids this catalog knows and drops the rest.
fn known_amenities<'de, D>(deserializer: D) -> Result<BTreeSet<Amenity>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Vec::<String>::deserialize(deserializer)?;
    Ok(ids
        .iter()
        .filter_map(|id| {
            let amenity = Amenity::parse(id);
            if amenity.is_none() {
                tracing::warn!(amenity = %id, "ignoring unknown amenity in listing");
            }
            amenity
        })
        .collect())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quarter {
    pub id: String,
    pub name: String,
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub average_price: Option<u64>,
}

impl Quarter {
    pub fn matches(&self, wanted: &str) -> bool {
        self.id == wanted || self.name == wanted
    }
}

/// Rates in FCFA.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pricing {
    pub daily: u64,
    pub weekly: u64,
    pub monthly: u64,
    #[serde(default)]
    pub extra_person_fee: u64,
    #[serde(default)]
    pub cleaning_fee: u64,
    #[serde(default)]
    pub deposit: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Rating {
    pub average: f32,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ListingAvailability {
    #[serde(default)]
    pub status: AvailabilityStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A furnished apartment as published in the catalog.
///
/// Only `id` and `title` are mandatory. Everything a filter or a message
/// template reads is optional so that an incomplete record still loads and
/// simply fails the predicates that need the missing data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApartmentListing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub apartment_type: Option<ApartmentType>,
    #[serde(default)]
    pub quarter: Option<Quarter>,
    #[serde(default)]
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub surface: Option<f32>,
    #[serde(default, deserialize_with = "known_amenities")]
    pub amenities: BTreeSet<Amenity>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub availability: ListingAvailability,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub popular: bool,
}

impl ApartmentListing {
    pub fn daily_price(&self) -> Option<u64> {
        self.pricing.as_ref().map(|p| p.daily)
    }

    pub fn quarter_name(&self) -> Option<&str> {
        self.quarter.as_ref().map(|q| q.name.as_str())
    }

    /// Bedroom count when recorded, otherwise the count implied by the type.
    pub fn room_count(&self) -> Option<u32> {
        self.bedrooms
            .or_else(|| self.apartment_type.map(|t| t.rooms()))
    }

    pub fn is_available(&self) -> bool {
        self.availability.status == AvailabilityStatus::Available
    }
}
