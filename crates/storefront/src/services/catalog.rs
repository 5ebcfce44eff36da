//! Catalog assembly: fetch, per-profile decoration, sorting.
//!
//! The grid's sort dropdown and the visual profile's image substitution both
//! happen here, on the read-through copies - the backend rows themselves are
//! never touched.

use serde::Deserialize;

use mango_stand_core::{BehaviorProfile, Product};

use crate::backend::{Backend, BackendError};

/// Sort orders offered by the product grid dropdown.
///
/// Wire values match the dropdown options; the default is price high-to-low,
/// same as the grid's initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortKey {
    /// Name (A to Z)
    #[serde(rename = "az")]
    NameAsc,
    /// Name (Z to A)
    #[serde(rename = "za")]
    NameDesc,
    /// Price (low to high)
    #[serde(rename = "lohi")]
    PriceAsc,
    /// Price (high to low)
    #[default]
    #[serde(rename = "hilo")]
    PriceDesc,
}

/// Sort products in place according to the dropdown selection.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::NameAsc => products.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::NameDesc => products.sort_by(|a, b| b.name.cmp(&a.name)),
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}

/// Apply profile decoration to a fetched list. Currently that is only the
/// visual profile's wholesale image substitution.
pub fn decorate(products: &mut [Product], profile: &BehaviorProfile) {
    if let Some(placeholder) = profile.image_override() {
        for product in products {
            product.image = placeholder.to_string();
        }
    }
}

/// Fetch the catalog and shape it for the grid: decorate, then sort.
///
/// The performance-glitch delay is the caller's business - it belongs to the
/// screen lifetime, not to this assembly.
///
/// # Errors
///
/// Propagates [`BackendError`] from the product fetch.
pub async fn list<B: Backend>(
    backend: &B,
    profile: &BehaviorProfile,
    sort: SortKey,
) -> Result<Vec<Product>, BackendError> {
    let mut products = backend.list_products().await?;
    decorate(&mut products, profile);
    sort_products(&mut products, sort);
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mango_stand_core::{ProductId, ProfileKind, profile::VISUAL_PLACEHOLDER_IMAGE};
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Decimal::new(price_cents, 2),
            image: format!("https://cdn.example.com/{id}.jpg"),
            stock: 5,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Mango Chutney", 450),
            product(2, "Apron", 1999),
            product(3, "Basket", 1250),
        ]
    }

    #[test]
    fn test_sort_by_name() {
        let mut products = catalog();
        sort_products(&mut products, SortKey::NameAsc);
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apron", "Basket", "Mango Chutney"]);

        sort_products(&mut products, SortKey::NameDesc);
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mango Chutney", "Basket", "Apron"]);
    }

    #[test]
    fn test_sort_by_price() {
        let mut products = catalog();
        sort_products(&mut products, SortKey::PriceAsc);
        let ids: Vec<i64> = products.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3, 2]);

        sort_products(&mut products, SortKey::PriceDesc);
        let ids: Vec<i64> = products.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_default_sort_is_price_high_to_low() {
        assert_eq!(SortKey::default(), SortKey::PriceDesc);
    }

    #[test]
    fn test_sort_key_wire_values() {
        let key: SortKey = serde_json::from_str("\"lohi\"").expect("deserialize");
        assert_eq!(key, SortKey::PriceAsc);
        assert!(serde_json::from_str::<SortKey>("\"price\"").is_err());
    }

    #[test]
    fn test_visual_profile_replaces_every_image() {
        let mut products = catalog();
        decorate(&mut products, &BehaviorProfile::new(ProfileKind::Visual));
        assert!(products.iter().all(|p| p.image == VISUAL_PLACEHOLDER_IMAGE));
    }

    #[test]
    fn test_other_profiles_pass_images_through() {
        let mut products = catalog();
        let original: Vec<String> = products.iter().map(|p| p.image.clone()).collect();
        decorate(&mut products, &BehaviorProfile::new(ProfileKind::Problem));
        let after: Vec<String> = products.iter().map(|p| p.image.clone()).collect();
        assert_eq!(after, original);
    }
}
