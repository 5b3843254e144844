//! Shared test utilities for the catalog crates
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: Deterministic product records
//! - `assertions`: Custom assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let record = builder.product("main");
//! }
//! ```

use serde_json::{Value, json};

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Every category name the catalog accepts
pub const CATEGORIES: [&str; 6] = [
    "UNKNOWN",
    "CLOTHS",
    "FOOD",
    "HOUSEWARES",
    "AUTOMOTIVE",
    "TOOLS",
];

const PRODUCT_NAMES: [&str; 8] = [
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Hammer",
];

/// Builder for test data with deterministic randomization
///
/// The same seed (or test name) always produces the same records.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A name unique to this builder
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("product", "main"), "test-product-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Mixes the seed with `salt` (splitmix64 finalizer)
    fn value(&self, salt: &str) -> u64 {
        let mut z = salt
            .bytes()
            .fold(self.seed, |acc, b| acc.rotate_left(5) ^ u64::from(b))
            .wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// A complete, valid product record as a client would POST it.
    ///
    /// Fields vary with `suffix`; the price is a two-decimal string.
    pub fn product(&self, suffix: &str) -> Value {
        let v = self.value(suffix);
        let base = PRODUCT_NAMES[(v % PRODUCT_NAMES.len() as u64) as usize];

        json!({
            "name": format!("{} {}", base, suffix),
            "description": format!("{} for test {}", base, self.seed),
            "price": format!("{}.{:02}", (v >> 8) % 1000, (v >> 20) % 100),
            "available": (v >> 4) & 1 == 1,
            "category": CATEGORIES[((v >> 12) % CATEGORIES.len() as u64) as usize],
        })
    }

    /// `count` distinct product records
    pub fn products(&self, count: usize) -> Vec<Value> {
        (0..count).map(|i| self.product(&format!("p{}", i))).collect()
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a returned product carries the fields that were sent.
    ///
    /// Prices are compared numerically so `"12.50"` matches `"12.5"`.
    pub fn assert_product_matches(actual: &Value, expected: &Value) {
        for field in ["name", "description", "available", "category"] {
            assert_eq!(
                actual[field], expected[field],
                "field '{}' differs: expected {}, got {}",
                field, expected[field], actual[field]
            );
        }

        let price = |v: &Value| -> f64 {
            match v {
                Value::String(s) => s.parse().unwrap_or_else(|_| panic!("bad price {:?}", s)),
                other => other.as_f64().unwrap_or_else(|| panic!("bad price {:?}", other)),
            }
        };
        assert!(
            (price(&actual["price"]) - price(&expected["price"])).abs() < 1e-9,
            "price differs: expected {}, got {}",
            expected["price"],
            actual["price"]
        );
    }
}
