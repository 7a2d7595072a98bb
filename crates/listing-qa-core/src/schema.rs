//! Category schemas: required attribute keys per listing category.
//!
//! The table is static. Unknown categories fall back to
//! [`DEFAULT_CATEGORY`].

/// Category used when the submitted one is absent or unknown.
pub const DEFAULT_CATEGORY: &str = "T-Shirt";

const CATEGORY_SCHEMAS: &[(&str, &[&str])] = &[
    ("T-Shirt", &["brand", "size", "color", "material"]),
    ("Saree", &["brand", "color", "fabric", "length"]),
    ("Footwear", &["brand", "size", "color", "gender"]),
];

/// Returns the required keys for a category, without fallback.
#[must_use]
pub fn lookup(category: &str) -> Option<&'static [&'static str]> {
    CATEGORY_SCHEMAS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, keys)| *keys)
}

/// Returns the required keys for a category.
///
/// Unknown categories use the default category's keys, or none if the
/// default itself is not in the table.
#[must_use]
pub fn required_attributes(category: &str) -> &'static [&'static str] {
    lookup(category)
        .or_else(|| lookup(DEFAULT_CATEGORY))
        .unwrap_or(&[])
}

/// Known category names in declaration order.
pub fn categories() -> impl Iterator<Item = &'static str> {
    CATEGORY_SCHEMAS.iter().map(|(name, _)| *name)
}
