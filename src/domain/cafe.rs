//! The `Cafe` entity and the shapes it takes on the way in and out of the API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name of the relational table holding cafes.
pub const TABLE_NAME: &str = "cafe";

/// Longest value accepted for the `VARCHAR(250)` columns.
pub const MAX_TEXT_LEN: usize = 250;
/// Longest value accepted for `map_url` and `img_url`.
pub const MAX_URL_LEN: usize = 500;

/// Executed at startup by the Postgres store; there is no migration tooling.
pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS cafe (
    id SERIAL PRIMARY KEY,
    name VARCHAR(250) NOT NULL UNIQUE,
    map_url VARCHAR(500) NOT NULL,
    img_url VARCHAR(500) NOT NULL,
    location VARCHAR(250) NOT NULL,
    seats VARCHAR(250) NOT NULL,
    has_toilet BOOLEAN NOT NULL,
    has_wifi BOOLEAN NOT NULL,
    has_sockets BOOLEAN NOT NULL,
    can_take_calls BOOLEAN NOT NULL,
    coffee_price VARCHAR(250)
)";

/// A stored cafe row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Cafe {
    pub id: i32,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    /// Free-text capacity descriptor such as "20-30".
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// Everything needed to insert a cafe; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl NewCafe {
    /// Builds the row to insert from its id and the submitted fields.
    pub fn into_cafe(self, id: i32) -> Cafe {
        Cafe {
            id,
            name: self.name,
            map_url: self.map_url,
            img_url: self.img_url,
            location: self.location,
            seats: self.seats,
            has_toilet: self.has_toilet,
            has_wifi: self.has_wifi,
            has_sockets: self.has_sockets,
            can_take_calls: self.can_take_calls,
            coffee_price: self.coffee_price,
        }
    }
}

/// The url-encoded body of `POST /add`, before validation.
///
/// Fields are optional here so that a missing one can be reported by name.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CafeForm {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub location: Option<String>,
    pub seats: Option<String>,
    /// `"true"` or `"false"`.
    pub has_toilet: Option<String>,
    pub has_wifi: Option<String>,
    pub has_sockets: Option<String>,
    pub can_take_calls: Option<String>,
    pub coffee_price: Option<String>,
}

impl TryFrom<CafeForm> for NewCafe {
    type Error = FormError;

    /// Every field is required, including `coffee_price`.
    fn try_from(form: CafeForm) -> Result<Self, Self::Error> {
        fn text(value: Option<String>, field: &'static str) -> Result<String, FormError> {
            let value = value.ok_or(FormError::MissingField(field))?;
            check_len(field, &value, MAX_TEXT_LEN)?;
            Ok(value)
        }
        fn url(value: Option<String>, field: &'static str) -> Result<String, FormError> {
            let value = value.ok_or(FormError::MissingField(field))?;
            check_len(field, &value, MAX_URL_LEN)?;
            Ok(value)
        }
        fn flag(value: Option<String>, field: &'static str) -> Result<bool, FormError> {
            let raw = value.ok_or(FormError::MissingField(field))?;
            parse_flag(&raw).ok_or(FormError::InvalidFlag { field, value: raw })
        }

        Ok(Self {
            name: text(form.name, "name")?,
            map_url: url(form.map_url, "map_url")?,
            img_url: url(form.img_url, "img_url")?,
            location: text(form.location, "location")?,
            seats: text(form.seats, "seats")?,
            has_toilet: flag(form.has_toilet, "has_toilet")?,
            has_wifi: flag(form.has_wifi, "has_wifi")?,
            has_sockets: flag(form.has_sockets, "has_sockets")?,
            can_take_calls: flag(form.can_take_calls, "can_take_calls")?,
            coffee_price: Some(text(form.coffee_price, "coffee_price")?),
        })
    }
}

/// Why an `/add` form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Missing required field '{0}'.")]
    MissingField(&'static str),
    #[error("Field '{field}' must be 'true' or 'false', got '{value}'.")]
    InvalidFlag { field: &'static str, value: String },
    #[error("Field '{field}' must be at most {max} characters long.")]
    TooLong { field: &'static str, max: usize },
}

/// Column widths count characters, not bytes.
fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), FormError> {
    if value.chars().count() > max {
        return Err(FormError::TooLong { field, max });
    }
    Ok(())
}

/// Validates a new `coffee_price` for `/update-price`.
pub fn check_coffee_price(price: &str) -> Result<(), FormError> {
    check_len("coffee_price", price, MAX_TEXT_LEN)
}

/// Parses a textual boolean (`"true"` / `"false"`, any case, surrounding whitespace ignored).
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Amenity flags, grouped under `amenities` in every read response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Amenities {
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
}

/// The public JSON shape of a cafe. The id is deliberately left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CafeView {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub coffee_price: Option<String>,
    pub amenities: Amenities,
}

impl From<Cafe> for CafeView {
    fn from(cafe: Cafe) -> Self {
        Self {
            name: cafe.name,
            map_url: cafe.map_url,
            img_url: cafe.img_url,
            location: cafe.location,
            seats: cafe.seats,
            coffee_price: cafe.coffee_price,
            amenities: Amenities {
                has_toilet: cafe.has_toilet,
                has_wifi: cafe.has_wifi,
                has_sockets: cafe.has_sockets,
                can_take_calls: cafe.can_take_calls,
            },
        }
    }
}
