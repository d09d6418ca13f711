//! # Catalog Commands
//!
//! Product listing for the POS grid and the catalog manager's CRUD.
//!
//! Cart lines and recorded sales carry their own name and price copies, so
//! editing or deleting a product never changes them.

use chrono::Utc;
use tracing::{debug, info};
use vendure_core::validation::validate_product_input;
use vendure_core::{next_timestamp_id, CoreError, Product};
use vendure_store::KeyValueStore;

use crate::error::ApiError;
use crate::state::{ConfirmState, ConfirmationRequest, PendingAction, StoreState};

/// Lists the catalog in its stored order. Seeds the default menu on first run.
pub async fn list_products<S: KeyValueStore>(
    store: &StoreState<S>,
) -> Result<Vec<Product>, ApiError> {
    debug!("list_products command");
    Ok(store.inner().catalog().load().await?)
}

/// Adds a product from the manager form.
///
/// ## Arguments
/// * `name` - Product name (trimmed, required)
/// * `price` - Price as typed, e.g. `"95"` or `"95.50"`; must be positive
///
/// ## Returns
/// The new product with a fresh timestamp id.
pub async fn add_product<S: KeyValueStore>(
    store: &StoreState<S>,
    name: &str,
    price: &str,
) -> Result<Product, ApiError> {
    debug!(name = %name, price = %price, "add_product command");

    let (name, price) = validate_product_input(name, price)?;

    let catalog = store.inner().catalog();
    let mut products = catalog.load().await?;
    let id = next_timestamp_id(Utc::now(), products.iter().map(|p| p.id));
    let product = Product::new(id, name, price);

    products.push(product.clone());
    catalog.save(&products).await?;

    info!(id = product.id, name = %product.name, "Product added");
    Ok(product)
}

/// Replaces a product's name and price.
///
/// ## Errors
/// - `VALIDATION_ERROR` for a blank name or a non-positive/unparseable price
/// - `NOT_FOUND` when `id` is not in the catalog
pub async fn update_product<S: KeyValueStore>(
    store: &StoreState<S>,
    id: i64,
    name: &str,
    price: &str,
) -> Result<Product, ApiError> {
    debug!(id, name = %name, price = %price, "update_product command");

    let (name, price) = validate_product_input(name, price)?;

    let catalog = store.inner().catalog();
    let mut products = catalog.load().await?;
    let product = products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(CoreError::ProductNotFound(id))?;

    product.name = name;
    product.price_cents = price.cents();
    let updated = product.clone();

    catalog.save(&products).await?;

    info!(id, name = %updated.name, "Product updated");
    Ok(updated)
}

/// Asks for confirmation before deleting a product.
pub fn request_delete_product(confirmations: &ConfirmState, id: i64) -> ConfirmationRequest {
    debug!(id, "request_delete_product command");
    confirmations.request(PendingAction::DeleteProduct(id))
}

/// Removes a product from the catalog. Runs on confirmation.
///
/// Returns `false` and writes nothing for an unknown id.
pub(crate) async fn delete_product<S: KeyValueStore>(
    store: &StoreState<S>,
    id: i64,
) -> Result<bool, ApiError> {
    let catalog = store.inner().catalog();
    let mut products = catalog.load().await?;
    let before = products.len();
    products.retain(|p| p.id != id);

    if products.len() == before {
        return Ok(false);
    }

    catalog.save(&products).await?;
    info!(id, "Product deleted");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::test_support::memory_register;

    #[tokio::test]
    async fn test_list_seeds_default_menu() {
        let register = memory_register().await;
        let products = list_products(register.store()).await.unwrap();

        assert_eq!(products.len(), 20);
        assert_eq!(products[0].name, "Big Mac");
        assert_eq!(products[0].price_cents, 15000);
    }

    #[tokio::test]
    async fn test_add_product() {
        let register = memory_register().await;
        let product = add_product(register.store(), "  Iced Coffee ", "95.50")
            .await
            .unwrap();

        assert_eq!(product.name, "Iced Coffee");
        assert_eq!(product.price_cents, 9550);
        assert!(product.id > 20);

        let products = list_products(register.store()).await.unwrap();
        assert_eq!(products.len(), 21);
        assert_eq!(products.last(), Some(&product));
    }

    #[tokio::test]
    async fn test_add_product_ids_are_unique() {
        let register = memory_register().await;
        let a = add_product(register.store(), "A", "1").await.unwrap();
        let b = add_product(register.store(), "B", "2").await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_invalid_input_writes_nothing() {
        let register = memory_register().await;

        for (name, price) in [("", "10"), ("   ", "10"), ("Tea", "0"), ("Tea", "-1"), ("Tea", "abc")] {
            let err = add_product(register.store(), name, price).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "{name:?} / {price:?}");
        }

        let err = update_product(register.store(), 1, "Big Mac", "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let products = list_products(register.store()).await.unwrap();
        assert_eq!(products.len(), 20);
        assert_eq!(products[0].price_cents, 15000);
    }

    #[tokio::test]
    async fn test_price_above_cap_is_rejected() {
        let register = memory_register().await;

        let err = add_product(register.store(), "Gold Bar", "90000000000000000")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "price must be at most 10000000.00");

        let err = update_product(register.store(), 1, "Big Mac", "10000000.01")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let top = add_product(register.store(), "Gold Bar", "10000000").await.unwrap();
        assert_eq!(top.price_cents, 1_000_000_000);

        let products = list_products(register.store()).await.unwrap();
        assert_eq!(products.len(), 21);
        assert_eq!(products[0].price_cents, 15000);
    }

    #[tokio::test]
    async fn test_update_product() {
        let register = memory_register().await;
        let updated = update_product(register.store(), 1, "Big Mac Deluxe", "175")
            .await
            .unwrap();
        assert_eq!(updated.price_cents, 17500);

        let products = list_products(register.store()).await.unwrap();
        assert_eq!(products[0], updated);
        assert_eq!(products.len(), 20);
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let register = memory_register().await;
        let err = update_product(register.store(), 999, "Ghost", "10")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(list_products(register.store()).await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_price_edit_does_not_touch_cart_lines() {
        let register = memory_register().await;
        add_to_cart(register.store(), register.cart(), register.config(), 1)
            .await
            .unwrap();

        update_product(register.store(), 1, "Big Mac", "999").await.unwrap();

        let line = register.cart().with_cart(|c| c.line(1).cloned()).unwrap();
        assert_eq!(line.price_cents, 15000);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let register = memory_register().await;
        assert!(delete_product(register.store(), 3).await.unwrap());
        assert!(!delete_product(register.store(), 3).await.unwrap());

        let products = list_products(register.store()).await.unwrap();
        assert_eq!(products.len(), 19);
        assert!(products.iter().all(|p| p.id != 3));
    }
}
