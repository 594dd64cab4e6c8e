use serde::{Deserialize, Serialize};

/// Catalog identifier. The upstream API serves numeric ids, but the route
/// accepts any string, so both shapes deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// One catalog record, fetched per request and discarded after rendering.
/// Deserialization is all-or-nothing: a partial upstream object fails to
/// decode instead of reaching the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    pub rating: Rating,
}

impl Product {
    /// Price with a `$` prefix at the source precision, no added rounding.
    pub fn price_display(&self) -> String {
        format!("${}", self.price)
    }

    pub fn rating_display(&self) -> String {
        format!("Rating: {} / 5 ({} reviews)", self.rating.rate, self.rating.count)
    }
}
