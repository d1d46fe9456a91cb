//! Fixed catalogs the generator draws from.
//!
//! Curated, append-only lists: stores grouped by city, products grouped
//! by category, and the payment-method probability table. Changing an
//! entry changes every seeded dataset, so treat these as frozen.

use crate::model::PaymentMethod;

/// City code paired with its store names.
pub const STORES: &[(&str, &[&str])] = &[
    ("NY", &["NY-Downtown", "NY-Uptown", "NY-Brooklyn"]),
    ("LA", &["LA-Santa Monica", "LA-Beverly Hills", "LA-Downtown"]),
    ("CH", &["CH-Loop", "CH-Lincoln Park", "CH-Wicker Park"]),
];

/// Category paired with its product names.
pub const PRODUCTS: &[(&str, &[&str])] = &[
    (
        "Dairy",
        &[
            "Organic Whole Milk",
            "Cheddar Cheese Block",
            "Greek Yogurt",
            "Butter Stick",
            "Vanilla Ice Cream",
        ],
    ),
    (
        "Bakery",
        &[
            "Whole Wheat Bread",
            "Bagels (6-pack)",
            "Croissants",
            "Blueberry Muffins",
            "Chocolate Chip Cookies",
        ],
    ),
    (
        "Produce",
        &["Red Apples", "Bananas", "Tomatoes", "Romaine Lettuce", "Carrots"],
    ),
    (
        "Meat",
        &[
            "Chicken Breast",
            "Ground Beef",
            "Pork Chops",
            "Salmon Fillet",
            "Bacon",
        ],
    ),
    (
        "Beverages",
        &[
            "Orange Juice",
            "Cola Soda",
            "Spring Water",
            "Coffee Beans",
            "Green Tea",
        ],
    ),
    (
        "Snacks",
        &[
            "Potato Chips",
            "Mixed Nuts",
            "Crackers",
            "Popcorn",
            "Chocolate Bar",
        ],
    ),
    (
        "Household",
        &[
            "Paper Towels",
            "Hand Soap",
            "Laundry Detergent",
            "AA Batteries",
            "Trash Bags",
        ],
    ),
    (
        "Frozen",
        &[
            "Frozen Pizza",
            "Ice Cream",
            "Frozen Vegetables",
            "Frozen Dinners",
            "Frozen Desserts",
        ],
    ),
];

/// Payment methods with selection weights (retail cash-heavy mix).
/// Weights sum to 1.0.
pub const PAYMENT_WEIGHTS: &[(PaymentMethod, f64)] = &[
    (PaymentMethod::Cash, 0.55),
    (PaymentMethod::CreditCard, 0.25),
    (PaymentMethod::DebitCard, 0.15),
    (PaymentMethod::Digital, 0.03),
    (PaymentMethod::GiftCard, 0.02),
];

/// Sales tax rate applied to every transaction subtotal.
pub const TAX_RATE: f64 = 0.0825;
