use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::Display;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{ProductError, ProductResult};

/// Largest price the `NUMERIC(14,2)` column can hold, exclusive
const PRICE_LIMIT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0); // 10^12

fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    if *price >= PRICE_LIMIT {
        return Err(validator::ValidationError::new("price_too_large"));
    }
    Ok(())
}

/// Product category
///
/// Names are matched case-sensitively everywhere: JSON bodies, query
/// filters and the Postgres `category` enum.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "category")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
    #[sea_orm(string_value = "CLOTHS")]
    Cloths,
    #[sea_orm(string_value = "FOOD")]
    Food,
    #[sea_orm(string_value = "HOUSEWARES")]
    Housewares,
    #[sea_orm(string_value = "AUTOMOTIVE")]
    Automotive,
    #[sea_orm(string_value = "TOOLS")]
    Tools,
}

// Hand-written instead of `strum::EnumString`: sea-orm's `DeriveActiveEnum`
// already emits `TryFrom<&str>`, which conflicts with the one strum derives.
impl std::str::FromStr for Category {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNKNOWN" => Ok(Self::Unknown),
            "CLOTHS" => Ok(Self::Cloths),
            "FOOD" => Ok(Self::Food),
            "HOUSEWARES" => Ok(Self::Housewares),
            "AUTOMOTIVE" => Ok(Self::Automotive),
            "TOOLS" => Ok(Self::Tools),
            _ => Err(strum::ParseError::VariantNotFound),
        }
    }
}

/// A persisted catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Server-assigned identifier
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Exact decimal, serialized as a string (e.g. `"12.50"`)
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Product {
    pub fn from_payload(id: i32, payload: ProductPayload) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            available: payload.available,
            category: payload.category,
        }
    }

    /// The wire record for this product.
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.to_string(),
        })
    }

    /// Rebuilds a product, `id` included, from a record made by [`serialize`](Self::serialize).
    pub fn deserialize(record: &Value) -> ProductResult<Self> {
        let id = record
            .get("id")
            .and_then(Value::as_i64)
            .and_then(|id| i32::try_from(id).ok())
            .ok_or_else(|| ProductError::Validation("missing or invalid field `id`".to_string()))?;

        Ok(Self::from_payload(id, ProductPayload::from_record(record)?))
    }
}

/// Wire shape before category and price normalization
#[derive(Deserialize)]
struct ProductRecord {
    name: String,
    description: String,
    price: Decimal,
    available: bool,
    category: String,
}

/// Every mutable field of a product, validated and ready to persist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 250))]
    pub description: String,
    /// Non-negative, two decimal places; JSON string or number
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl ProductPayload {
    /// Parses and validates a client record.
    ///
    /// Any extra keys (such as `id`) are ignored. All five fields are
    /// required; `null`, arrays and scalars fail as a whole.
    pub fn from_record(record: &Value) -> ProductResult<Self> {
        if !record.is_object() {
            return Err(ProductError::Validation(
                "request body must be a JSON object".to_string(),
            ));
        }

        let raw: ProductRecord = serde_json::from_value(record.clone())
            .map_err(|e| ProductError::Validation(format!("invalid product record: {}", e)))?;

        let category = raw
            .category
            .parse::<Category>()
            .map_err(|_| ProductError::InvalidCategory(raw.category.clone()))?;

        let mut price = raw
            .price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        price.rescale(2);

        let payload = Self {
            name: raw.name,
            description: raw.description,
            price,
            available: raw.available,
            category,
        };

        payload.validate()?;

        Ok(payload)
    }
}

/// Query string of `GET /products`
///
/// Values stay raw strings here; [`ProductFilter::resolve`](crate::query)
/// decides what they mean.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Exact name match
    pub name: Option<String>,
    /// Category name, case-sensitive; unknown names match nothing
    pub category: Option<String>,
    /// `true` (any case) selects available products; anything else unavailable ones
    pub available: Option<String>,
}
