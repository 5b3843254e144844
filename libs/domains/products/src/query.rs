use crate::models::{Category, Product, ProductFilter};

/// A resolved list query: the conjunction of every `Some` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub available: Option<bool>,
}

impl ProductQuery {
    /// Matches every product
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.name.as_ref().is_none_or(|name| product.name == *name)
            && self.category.is_none_or(|category| product.category == category)
            && self.available.is_none_or(|available| product.available == available)
    }
}

impl ProductFilter {
    /// Interprets the raw query string.
    ///
    /// Returns `None` when the filter cannot match anything (an unknown
    /// category name), so callers can answer without touching storage.
    pub fn resolve(self) -> Option<ProductQuery> {
        let category = match self.category {
            Some(name) => Some(name.parse::<Category>().ok()?),
            None => None,
        };

        Some(ProductQuery {
            name: self.name,
            category,
            available: self
                .available
                .map(|value| value.eq_ignore_ascii_case("true")),
        })
    }
}
