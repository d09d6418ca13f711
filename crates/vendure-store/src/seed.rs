//! # Seed Catalog
//!
//! The menu installed the first time the register starts with no catalog.

use vendure_core::{Money, Product};

/// `(id, name, price in whole pesos)`
const SEED_MENU: [(i64, &str, i64); 20] = [
    (1, "Big Mac", 150),
    (2, "Cheeseburger", 80),
    (3, "McChicken", 120),
    (4, "McSpaghetti", 100),
    (5, "6pc Nuggets", 130),
    (6, "Fries (Small)", 45),
    (7, "Fries (Medium)", 60),
    (8, "Fries (Large)", 75),
    (9, "Coke Float", 55),
    (10, "Iced Coffee", 50),
    (11, "McFlurry Oreo", 65),
    (12, "Hot Fudge Sundae", 55),
    (13, "Burger McDo", 65),
    (14, "1pc Chicken McDo", 120),
    (15, "2pc Chicken McDo", 190),
    (16, "Chicken McDo w/ Spaghetti", 160),
    (17, "Sundae Cone", 25),
    (18, "Apple Pie", 40),
    (19, "Hash Browns", 35),
    (20, "Sausage McMuffin", 80),
];

/// Returns the seed products in menu order.
pub fn default_catalog() -> Vec<Product> {
    SEED_MENU
        .iter()
        .map(|&(id, name, pesos)| Product::new(id, name, Money::from_cents(pesos * 100)))
        .collect()
}
