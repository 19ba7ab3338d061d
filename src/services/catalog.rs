use std::cmp::Ordering;

use crate::errors::AppError;
use crate::models::{ApartmentListing, FilterCriteria, FilterOptions, PriceRange, SortOrder};

static BUILTIN_CATALOG: &str = include_str!("../data/apartments.json");

/// Parses a JSON array of listings one record at a time. Records that do not
/// deserialize are logged and skipped.
pub fn load_catalog(json: &str) -> Result<Vec<ApartmentListing>, AppError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let total = raw.len();

    let listings: Vec<ApartmentListing> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            let id = value
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or("?")
                .to_string();
            match serde_json::from_value::<ApartmentListing>(value) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    tracing::warn!(index = idx, id = %id, error = %e, "skipping malformed listing");
                    None
                }
            }
        })
        .collect();

    tracing::debug!(loaded = listings.len(), total, "catalog parsed");
    Ok(listings)
}

pub fn builtin_catalog() -> Result<Vec<ApartmentListing>, AppError> {
    load_catalog(BUILTIN_CATALOG)
}

fn matches(listing: &ApartmentListing, criteria: &FilterCriteria) -> bool {
    if let Some(wanted) = criteria.apartment_type {
        if listing.apartment_type != Some(wanted) {
            return false;
        }
    }
    if let Some(wanted) = criteria.quarter.as_deref() {
        if !listing.quarter.as_ref().is_some_and(|q| q.matches(wanted)) {
            return false;
        }
    }
    if criteria.min_price.is_some() || criteria.max_price.is_some() {
        let Some(price) = listing.daily_price() else {
            return false;
        };
        if criteria.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if criteria.max_price.is_some_and(|max| price > max) {
            return false;
        }
    }
    if let Some(wanted) = criteria.capacity {
        if !listing.capacity.is_some_and(|c| c >= wanted) {
            return false;
        }
    }
    if let Some(wanted) = criteria.rooms {
        if listing.room_count() != Some(wanted) {
            return false;
        }
    }
    criteria.amenities.is_subset(&listing.amenities)
}

/// Listings matching every populated criterion, in catalog order.
pub fn filter_catalog<'a>(
    catalog: &'a [ApartmentListing],
    criteria: &FilterCriteria,
) -> Vec<&'a ApartmentListing> {
    catalog.iter().filter(|l| matches(l, criteria)).collect()
}

pub fn derive_filter_options(catalog: &[ApartmentListing]) -> FilterOptions {
    let mut options = FilterOptions::default();

    for listing in catalog {
        if let Some(t) = listing.apartment_type {
            if !options.types.contains(&t) {
                options.types.push(t);
            }
        }
        if let Some(name) = listing.quarter_name() {
            if !options.quarters.iter().any(|q| q == name) {
                options.quarters.push(name.to_string());
            }
        }
        options.amenities.extend(listing.amenities.iter().copied());
        if let Some(price) = listing.daily_price() {
            options.price_range = Some(match options.price_range {
                Some(r) => PriceRange {
                    min: r.min.min(price),
                    max: r.max.max(price),
                },
                None => PriceRange {
                    min: price,
                    max: price,
                },
            });
        }
    }

    options
}

/// Stable sort; listings without the sort key go last.
pub fn sort_listings(listings: &mut [&ApartmentListing], order: SortOrder) {
    match order {
        SortOrder::Catalog => {}
        SortOrder::Featured => listings.sort_by_key(|l| !l.featured),
        SortOrder::Popular => listings.sort_by_key(|l| !l.popular),
        SortOrder::PriceAsc => listings.sort_by(|a, b| by_price(a, b, false)),
        SortOrder::PriceDesc => listings.sort_by(|a, b| by_price(a, b, true)),
        SortOrder::Rating => listings.sort_by(|a, b| {
            b.rating
                .average
                .partial_cmp(&a.rating.average)
                .unwrap_or(Ordering::Equal)
        }),
    }
}

fn by_price(a: &ApartmentListing, b: &ApartmentListing, descending: bool) -> Ordering {
    match (a.daily_price(), b.daily_price()) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn find_by_id<'a>(catalog: &'a [ApartmentListing], id: &str) -> Option<&'a ApartmentListing> {
    catalog.iter().find(|l| l.id == id)
}

pub fn by_quarter<'a>(catalog: &'a [ApartmentListing], quarter: &str) -> Vec<&'a ApartmentListing> {
    filter_catalog(
        catalog,
        &FilterCriteria {
            quarter: Some(quarter.to_string()),
            ..Default::default()
        },
    )
}

pub fn featured(catalog: &[ApartmentListing]) -> Vec<&ApartmentListing> {
    catalog.iter().filter(|l| l.featured).collect()
}

pub fn popular(catalog: &[ApartmentListing]) -> Vec<&ApartmentListing> {
    catalog.iter().filter(|l| l.popular).collect()
}

pub fn available(catalog: &[ApartmentListing]) -> Vec<&ApartmentListing> {
    catalog.iter().filter(|l| l.is_available()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amenity, ApartmentType};

    fn listing(json: &str) -> ApartmentListing {
        serde_json::from_str(json).unwrap()
    }

    fn three_listings() -> Vec<ApartmentListing> {
        vec![
            listing(
                r#"{"id":"a","title":"A","type":"studio","capacity":2,"bedrooms":0,
                "quarter":{"id":"bali","name":"Bali"},
                "pricing":{"daily":28000,"weekly":175000,"monthly":600000},
                "amenities":["wifi","ac"]}"#,
            ),
            listing(
                r#"{"id":"b","title":"B","type":"t2","capacity":4,"bedrooms":2,
                "quarter":{"id":"bonanjo","name":"Bonanjo"},
                "pricing":{"daily":45000,"weekly":270000,"monthly":900000},
                "amenities":["wifi","kitchen"],"featured":true}"#,
            ),
            listing(
                r#"{"id":"c","title":"C","type":"t3","capacity":6,"bedrooms":3,
                "quarter":{"id":"akwa","name":"Akwa"},
                "pricing":{"daily":75000,"weekly":450000,"monthly":1500000},
                "amenities":["wifi","ac","kitchen"],"featured":true}"#,
            ),
        ]
    }

    fn ids(listings: &[&ApartmentListing]) -> Vec<String> {
        listings.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything_in_order() {
        let catalog = three_listings();
        let result = filter_catalog(&catalog, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["a", "b", "c"]);
        assert_eq!(result[1], &catalog[1]);
    }

    #[test]
    fn test_price_window() {
        let catalog = three_listings();
        let criteria = FilterCriteria {
            min_price: Some(30000),
            max_price: Some(50000),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, &criteria)), vec!["b"]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let catalog = three_listings();
        let criteria = FilterCriteria {
            min_price: Some(28000),
            max_price: Some(45000),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, &criteria)), vec!["a", "b"]);
    }

    #[test]
    fn test_amenities_require_all() {
        let catalog = three_listings();
        let criteria = FilterCriteria {
            amenities: [Amenity::Ac, Amenity::Kitchen].into_iter().collect(),
            ..Default::default()
        };
        let result = filter_catalog(&catalog, &criteria);
        assert_eq!(ids(&result), vec!["c"]);
        for l in result {
            assert!(l.amenities.contains(&Amenity::Ac));
            assert!(l.amenities.contains(&Amenity::Kitchen));
        }
    }

    #[test]
    fn test_capacity_is_a_minimum() {
        let catalog = three_listings();
        let criteria = FilterCriteria {
            capacity: Some(4),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, &criteria)), vec!["b", "c"]);
    }

    #[test]
    fn test_type_quarter_and_rooms() {
        let catalog = three_listings();
        let by_type = FilterCriteria {
            apartment_type: Some(ApartmentType::T2),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, &by_type)), vec!["b"]);

        assert_eq!(ids(&by_quarter(&catalog, "akwa")), vec!["c"]);
        assert_eq!(ids(&by_quarter(&catalog, "Akwa")), vec!["c"]);

        let by_rooms = FilterCriteria {
            rooms: Some(0),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, &by_rooms)), vec!["a"]);
    }

    #[test]
    fn test_adding_criteria_never_grows_result() {
        let catalog = three_listings();
        let mut criteria = FilterCriteria::default();
        let mut last = filter_catalog(&catalog, &criteria).len();

        criteria.amenities.insert(Amenity::Wifi);
        let n = filter_catalog(&catalog, &criteria).len();
        assert!(n <= last);
        last = n;

        criteria.capacity = Some(3);
        let n = filter_catalog(&catalog, &criteria).len();
        assert!(n <= last);
        last = n;

        criteria.max_price = Some(50000);
        let n = filter_catalog(&catalog, &criteria).len();
        assert!(n <= last);
        assert_eq!(n, 1);
    }

    #[test]
    fn test_incomplete_listing_fails_only_its_predicates() {
        let mut catalog = three_listings();
        catalog.push(listing(r#"{"id":"bare","title":"Bare"}"#));

        assert_eq!(filter_catalog(&catalog, &FilterCriteria::default()).len(), 4);

        let criteria = FilterCriteria {
            max_price: Some(100000),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, &criteria)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_catalog_skips_bad_records() {
        let json = r#"[
            {"id":"ok","title":"Fine"},
            {"id":"bad","title":"Bad","capacity":"lots"},
            {"title":"No id"},
            {"id":"sauna","title":"Sauna","amenities":["sauna","ac"]}
        ]"#;
        let catalog = load_catalog(json).unwrap();
        assert_eq!(ids(&catalog.iter().collect::<Vec<_>>()), vec!["ok", "sauna"]);

        let criteria = FilterCriteria {
            amenities: [Amenity::Ac].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_catalog(&catalog, &criteria)), vec!["sauna"]);
    }

    #[test]
    fn test_load_catalog_rejects_non_array() {
        assert!(load_catalog(r#"{"id":"x"}"#).is_err());
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.len(), 5);
        assert!(find_by_id(&catalog, "apt_004").is_some());
        assert_eq!(available(&catalog).len(), 4);
    }

    #[test]
    fn test_derive_filter_options() {
        let catalog = three_listings();
        let options = derive_filter_options(&catalog);
        assert_eq!(
            options.types,
            vec![ApartmentType::Studio, ApartmentType::T2, ApartmentType::T3]
        );
        assert_eq!(options.quarters, vec!["Bali", "Bonanjo", "Akwa"]);
        let amenities: Vec<&str> = options.amenities.iter().map(|a| a.as_str()).collect();
        assert_eq!(amenities, vec!["ac", "kitchen", "wifi"]);
        assert_eq!(
            options.price_range,
            Some(PriceRange {
                min: 28000,
                max: 75000
            })
        );
    }

    #[test]
    fn test_derive_filter_options_empty_catalog() {
        let options = derive_filter_options(&[]);
        assert!(options.types.is_empty());
        assert!(options.quarters.is_empty());
        assert!(options.amenities.is_empty());
        assert_eq!(options.price_range, None);
    }

    #[test]
    fn test_sort_featured_is_stable() {
        let catalog = three_listings();
        let mut result = filter_catalog(&catalog, &FilterCriteria::default());
        sort_listings(&mut result, SortOrder::Featured);
        assert_eq!(ids(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_by_price() {
        let mut catalog = three_listings();
        catalog.push(listing(r#"{"id":"bare","title":"Bare"}"#));
        let mut result = filter_catalog(&catalog, &FilterCriteria::default());

        sort_listings(&mut result, SortOrder::PriceDesc);
        assert_eq!(ids(&result), vec!["c", "b", "a", "bare"]);

        sort_listings(&mut result, SortOrder::PriceAsc);
        assert_eq!(ids(&result), vec!["a", "b", "c", "bare"]);
    }

    #[test]
    fn test_featured_and_popular() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(featured(&catalog).len(), 3);
        assert_eq!(popular(&catalog).len(), 4);
    }
}
