use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned identifier, kept as the exact text the server used.
/// A JSON number and a JSON string with the same digits are the same id.
#[derive(Deserialize, Debug, Eq, PartialEq, Hash, Clone)]
#[serde(from = "RawId")]
pub struct NewsId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

impl From<RawId> for NewsId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Signed(n) => NewsId(n.to_string()),
            RawId::Unsigned(n) => NewsId(n.to_string()),
            RawId::Text(s) => NewsId(s),
        }
    }
}

impl Serialize for NewsId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl NewsId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NewsId {
    fn from(value: &str) -> Self {
        NewsId(value.to_string())
    }
}

impl From<String> for NewsId {
    fn from(value: String) -> Self {
        NewsId(value)
    }
}

impl From<i64> for NewsId {
    fn from(value: i64) -> Self {
        NewsId(value.to_string())
    }
}

#[derive(
    Debug,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
pub enum Category {
    Politics,
    Exclusive,
    Lifestyle,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: NewsId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// As sent by the server; not necessarily one of [`Category`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub editor_first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub editor_last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: i64,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub date_updated: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /news`.
#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub editor_first_name: String,
    pub editor_last_name: String,
    pub date_created: String,
    pub date_updated: Option<String>,
}

/// Body of `PUT /news/{id}`. The API reads the update stamp from
/// `updatedAt`, not `dateUpdated`.
#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub editor_first_name: String,
    pub editor_last_name: String,
    pub updated_at: String,
}

/// Raw values posted by the create and update forms.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone)]
pub struct NewsForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "editorFirstname", default)]
    pub editor_first_name: String,
    #[serde(rename = "editorLastname", default)]
    pub editor_last_name: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct NewsFields {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub editor_first_name: String,
    pub editor_last_name: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("missing required field: {0}")]
    Missing(&'static str),

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

impl NewsForm {
    pub fn validate(self) -> Result<NewsFields, FormError> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
            ("editorFirstname", &self.editor_first_name),
            ("editorLastname", &self.editor_last_name),
        ];
        if let Some((name, _)) =
            required.iter().find(|(_, value)| value.trim().is_empty())
        {
            return Err(FormError::Missing(*name));
        }

        let category = self
            .category
            .parse::<Category>()
            .map_err(|_| FormError::UnknownCategory(self.category.clone()))?;

        Ok(NewsFields {
            title: self.title,
            description: self.description,
            category,
            editor_first_name: self.editor_first_name,
            editor_last_name: self.editor_last_name,
        })
    }
}

impl From<&NewsItem> for NewsForm {
    fn from(item: &NewsItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            category: item.category.clone(),
            editor_first_name: item.editor_first_name.clone(),
            editor_last_name: item.editor_last_name.clone(),
        }
    }
}

impl NewsFields {
    pub fn into_create_request(self, now: DateTime<Utc>) -> CreateNewsRequest {
        CreateNewsRequest {
            title: self.title,
            description: self.description,
            category: self.category,
            editor_first_name: self.editor_first_name,
            editor_last_name: self.editor_last_name,
            date_created: iso_timestamp(now),
            date_updated: None,
        }
    }

    pub fn into_update_request(self, now: DateTime<Utc>) -> UpdateNewsRequest {
        UpdateNewsRequest {
            title: self.title,
            description: self.description,
            category: self.category,
            editor_first_name: self.editor_first_name,
            editor_last_name: self.editor_last_name,
            updated_at: iso_timestamp(now),
        }
    }
}

// e.g. 2024-05-01T10:20:30.123Z
fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses the timestamp shapes the API is known to return. Naive values
/// are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
    {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}
