//! Sample catalog used to populate an empty database.

use stockroom_products::NewProduct;

/// (name, brand, category, subcategory, price, quantity)
const SAMPLE_CATALOG: &[(&str, &str, &str, &str, f64, i64)] = &[
    ("Laptop Computer", "Dell", "Electronics", "Computers", 899.99, 25),
    ("Wireless Mouse", "Logitech", "Electronics", "Peripherals", 29.99, 8),
    ("USB Keyboard", "Logitech", "Electronics", "Peripherals", 45.50, 15),
    ("Monitor 24 inch", "Samsung", "Electronics", "Displays", 249.99, 12),
    ("Office Chair", "Herman Miller", "Furniture", "Seating", 199.99, 5),
    ("Desk Lamp", "IKEA", "Furniture", "Lighting", 34.99, 20),
    ("Filing Cabinet", "HON", "Furniture", "Storage", 159.99, 7),
    ("Coffee Maker", "Keurig", "Appliances", "Kitchen", 79.99, 18),
    ("Printer", "HP", "Electronics", "Office Equipment", 179.99, 4),
    ("Paper A4", "Hammermill", "Office Supplies", "Paper Products", 12.99, 50),
    ("Stapler", "Swingline", "Office Supplies", "Desk Accessories", 8.99, 30),
    ("Pen Set", "Pilot", "Office Supplies", "Writing Instruments", 15.99, 9),
    ("Notebook", "Moleskine", "Office Supplies", "Paper Products", 6.99, 35),
    ("Desk Organizer", "SimpleHouseware", "Office Supplies", "Desk Accessories", 24.99, 14),
    ("Headphones", "Sony", "Electronics", "Audio", 89.99, 22),
    ("Webcam", "Logitech", "Electronics", "Peripherals", 59.99, 11),
    ("Tablet Stand", "Lamicall", "Electronics", "Accessories", 19.99, 6),
    ("Cable Organizer", "J Channel", "Electronics", "Accessories", 14.99, 28),
    ("Whiteboard", "Quartet", "Office Supplies", "Presentation", 39.99, 10),
    ("Marker Set", "Expo", "Office Supplies", "Writing Instruments", 9.99, 3),
];

pub fn sample_products() -> Vec<NewProduct> {
    SAMPLE_CATALOG
        .iter()
        .map(|&(name, brand, category, subcategory, price, quantity)| NewProduct {
            name: name.to_string(),
            brand: Some(brand.to_string()),
            category: category.to_string(),
            subcategory: Some(subcategory.to_string()),
            price,
            quantity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_twenty_unique_valid_products() {
        let products = sample_products();
        assert_eq!(products.len(), 20);
        let names: HashSet<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), 20);
        assert!(products.iter().all(|p| p.price >= 0.0 && p.quantity >= 0));
    }
}
