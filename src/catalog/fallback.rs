//! Fallback catalog
//!
//! Fixed product list served whenever the product API is unreachable or
//! returns nothing usable, together with the placeholder images its
//! thumbnails point at.

use super::models::{Product, StockStatus};
use rust_decimal::Decimal;

/// Thumbnail prefix marking an image from [`MOCK_IMAGE_URLS`].
pub const MOCK_IMAGE_PREFIX: &str = "mock-";

/// Placeholder image for every fallback thumbnail.
pub const MOCK_IMAGE_URLS: [(&str, &str); 8] = [
    (
        "mock-leather-jacket.jpg",
        "/placeholder.svg?height=300&width=300&text=Leather+Jacket",
    ),
    (
        "mock-headphones.jpg",
        "/placeholder.svg?height=300&width=300&text=Headphones",
    ),
    (
        "mock-tshirt.jpg",
        "/placeholder.svg?height=300&width=300&text=T-Shirt",
    ),
    (
        "mock-water-bottle.jpg",
        "/placeholder.svg?height=300&width=300&text=Water+Bottle",
    ),
    (
        "mock-fitness-tracker.jpg",
        "/placeholder.svg?height=300&width=300&text=Fitness+Tracker",
    ),
    (
        "mock-ceramic-mug.jpg",
        "/placeholder.svg?height=300&width=300&text=Ceramic+Mug",
    ),
    (
        "mock-backpack.jpg",
        "/placeholder.svg?height=300&width=300&text=Backpack",
    ),
    (
        "mock-soy-candle.jpg",
        "/placeholder.svg?height=300&width=300&text=Soy+Candle",
    ),
];

/// Looks up the placeholder URL for a `mock-` thumbnail.
pub fn mock_image_url(thumbnail: &str) -> Option<&'static str> {
    if !thumbnail.starts_with(MOCK_IMAGE_PREFIX) {
        return None;
    }

    MOCK_IMAGE_URLS
        .iter()
        .find(|(name, _)| *name == thumbnail)
        .map(|(_, url)| *url)
}

/// Returns the fallback catalog in display order.
pub fn fallback_products() -> Vec<Product> {
    vec![
        fallback_product(
            1,
            "Premium Leather Jacket",
            "Genuine leather jacket with premium stitching and comfortable fit",
            "<p>This premium leather jacket is crafted from the finest genuine leather. Features include durable YKK zippers, multiple pockets, and a comfortable polyester lining. Perfect for casual outings or a night on the town.</p>",
            Decimal::new(29999, 2),
            "mock-leather-jacket.jpg",
            "Outerwear",
            4.8,
        ),
        fallback_product(
            2,
            "Wireless Noise-Cancelling Headphones",
            "High-quality wireless headphones with active noise cancellation",
            "<p>Experience immersive sound with these wireless noise-cancelling headphones. Features include 30-hour battery life, comfortable over-ear design, and premium audio drivers for exceptional sound quality.</p>",
            Decimal::new(19999, 2),
            "mock-headphones.jpg",
            "Electronics",
            4.5,
        ),
        fallback_product(
            3,
            "Organic Cotton T-Shirt",
            "Soft, breathable organic cotton t-shirt in various colors",
            "<p>Made from 100% organic cotton, this t-shirt is both environmentally friendly and incredibly comfortable. Available in multiple colors, it features a classic fit and is perfect for everyday wear.</p>",
            Decimal::new(2999, 2),
            "mock-tshirt.jpg",
            "Clothing",
            4.2,
        ),
        fallback_product(
            4,
            "Stainless Steel Water Bottle",
            "Vacuum-insulated water bottle that keeps drinks cold for 24 hours",
            "<p>This double-walled, vacuum-insulated stainless steel water bottle keeps your drinks cold for up to 24 hours or hot for up to 12 hours. BPA-free, leak-proof, and available in multiple colors.</p>",
            Decimal::new(3499, 2),
            "mock-water-bottle.jpg",
            "Accessories",
            4.7,
        ),
        fallback_product(
            5,
            "Smart Fitness Tracker",
            "Advanced fitness tracker with heart rate monitoring and GPS",
            "<p>Track your fitness goals with this advanced smart fitness tracker. Features include heart rate monitoring, built-in GPS, sleep tracking, and water resistance up to 50 meters. Compatible with iOS and Android.</p>",
            Decimal::new(12999, 2),
            "mock-fitness-tracker.jpg",
            "Electronics",
            4.4,
        ),
        fallback_product(
            6,
            "Handcrafted Ceramic Mug",
            "Artisan-made ceramic mug with unique glazing",
            "<p>Each of these ceramic mugs is handcrafted by skilled artisans. The unique glazing technique ensures no two mugs are exactly alike. Microwave and dishwasher safe.</p>",
            Decimal::new(2499, 2),
            "mock-ceramic-mug.jpg",
            "Home",
            4.9,
        ),
        fallback_product(
            7,
            "Vintage-Style Backpack",
            "Durable canvas backpack with leather accents",
            "<p>This vintage-style backpack combines durability with classic aesthetics. Made from heavy-duty canvas with genuine leather accents, it features multiple compartments including a padded laptop sleeve.</p>",
            Decimal::new(5999, 2),
            "mock-backpack.jpg",
            "Bags",
            4.6,
        ),
        fallback_product(
            8,
            "Natural Soy Candle",
            "Hand-poured soy candle with essential oil fragrances",
            "<p>These natural soy candles are hand-poured and scented with pure essential oils. With a clean-burning cotton wick and approximately 50 hours of burn time, they create a warm, inviting atmosphere in any room.</p>",
            Decimal::new(1999, 2),
            "mock-soy-candle.jpg",
            "Home",
            4.3,
        ),
    ]
}

/// Finds a fallback product by its identifier in decimal form.
pub fn find_fallback(id: &str) -> Option<Product> {
    fallback_products()
        .into_iter()
        .find(|product| product.matches_id(id))
}

#[allow(clippy::too_many_arguments)]
fn fallback_product(
    id: u64,
    name: &str,
    short_description: &str,
    description: &str,
    price: Decimal,
    thumbnail: &str,
    category_name: &str,
    rating: f64,
) -> Product {
    Product {
        short_description: Some(short_description.to_owned()),
        description: Some(description.to_owned()),
        thumbnail: Some(thumbnail.to_owned()),
        category_name: Some(category_name.to_owned()),
        stock_status: Some(StockStatus::InStock),
        rating: Some(rating),
        ..Product::new(id, name).with_price(price)
    }
}
