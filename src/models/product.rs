use serde::{Deserialize, Serialize};

/// One (base product, variant) combination from a menu page. Created fresh
/// per extraction pass and never mutated afterwards; a product offered in
/// three weights yields three records differing only in weight and price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub brand: String,
    pub strain_type: String,
    /// THC percentage in [0, 100]; absent when the source text is unparsable.
    pub potency: Option<f64>,
    /// Normalized weight (fractional ounce labels become decimal ounces).
    pub weight: Option<f64>,
    /// Decimal currency amount.
    pub price: Option<f64>,
    /// Which dispensary menu produced the record; injected by the caller.
    pub location: String,
}
