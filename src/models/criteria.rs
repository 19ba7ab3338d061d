use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::apartment::{Amenity, ApartmentType};

/// Typed search criteria. Every `None` (or an empty amenity set) is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(rename = "type")]
    pub apartment_type: Option<ApartmentType>,
    /// Quarter id or name.
    pub quarter: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub capacity: Option<u32>,
    pub rooms: Option<u32>,
    #[serde(default)]
    pub amenities: BTreeSet<Amenity>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.apartment_type.is_none()
            && self.quarter.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.capacity.is_none()
            && self.rooms.is_none()
            && self.amenities.is_empty()
    }
}

/// Search form as it arrives from the front-end: every field is raw text and
/// amenities are comma separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(rename = "type")]
    pub apartment_type: Option<String>,
    pub quarter: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub capacity: Option<String>,
    pub rooms: Option<String>,
    pub amenities: Option<String>,
    pub sort: Option<String>,
}

impl FilterQuery {
    /// Fields that are blank or do not parse are dropped, not rejected.
    pub fn into_criteria(self) -> FilterCriteria {
        let apartment_type = non_blank(self.apartment_type.as_deref()).and_then(|raw| {
            let parsed = ApartmentType::parse(raw);
            if parsed.is_none() {
                tracing::debug!(value = raw, "ignoring unknown apartment type filter");
            }
            parsed
        });

        let amenities = self
            .amenities
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|raw| {
                let parsed = Amenity::parse(raw);
                if parsed.is_none() {
                    tracing::debug!(value = raw, "ignoring unknown amenity filter");
                }
                parsed
            })
            .collect();

        FilterCriteria {
            apartment_type,
            quarter: non_blank(self.quarter.as_deref()).map(str::to_string),
            min_price: parse_number("min_price", self.min_price.as_deref()),
            max_price: parse_number("max_price", self.max_price.as_deref()),
            capacity: parse_number("capacity", self.capacity.as_deref()),
            rooms: parse_number("rooms", self.rooms.as_deref()),
            amenities,
        }
    }

    pub fn sort_order(&self) -> SortOrder {
        non_blank(self.sort.as_deref())
            .and_then(SortOrder::parse)
            .unwrap_or_default()
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: Option<&str>) -> Option<T> {
    let raw = non_blank(raw)?;
    match raw.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::debug!(field, value = raw, "ignoring non-numeric filter");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

/// Distinct values present in a catalog, for building the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub types: Vec<ApartmentType>,
    pub quarters: Vec<String>,
    pub amenities: BTreeSet<Amenity>,
    /// `None` when no listing carries a daily price.
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Catalog,
    Featured,
    PriceAsc,
    PriceDesc,
    Rating,
    Popular,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "catalog" => Some(SortOrder::Catalog),
            "featured" => Some(SortOrder::Featured),
            "price_asc" => Some(SortOrder::PriceAsc),
            "price_desc" => Some(SortOrder::PriceDesc),
            "rating" => Some(SortOrder::Rating),
            "popular" => Some(SortOrder::Popular),
            _ => None,
        }
    }
}
