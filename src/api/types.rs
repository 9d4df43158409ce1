use serde::{Deserialize, Serialize};

/// Link to a related collection, e.g. a user's direct reports
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ListRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Reference to another object by ID
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ObjectRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub direct_reports: ListRef,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ReviewCycle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub reviewees: ListRef,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Reviewee {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub user: ObjectRef,

    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: ListRef,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Question {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

/// Who a review record was written about, relative to its author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    #[default]
    Peer,
    #[serde(rename = "self")]
    SelfReview,
    Other,
}

impl From<String> for ReviewType {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "self" => ReviewType::SelfReview,
            "peer" => ReviewType::Peer,
            _ => ReviewType::Other,
        }
    }
}

impl<'de> Deserialize<'de> for ReviewType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // A missing type is treated like any other non-self review
        Ok(Option::<String>::deserialize(deserializer)?
            .map(ReviewType::from)
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<String>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default, alias = "ratingLabel")]
    pub rating_string: Option<String>,
}

/// One answer to one review question
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default)]
    pub review_type: ReviewType,

    #[serde(default, deserialize_with = "null_as_default")]
    pub question: ObjectRef,

    #[serde(default)]
    pub reviewer: Option<ObjectRef>,

    #[serde(default)]
    pub response: Option<Response>,
}

impl ReviewRecord {
    pub fn question_id(&self) -> &str {
        &self.question.id
    }

    /// Reviewer ID, if the record names a non-blank one
    pub fn reviewer_id(&self) -> Option<&str> {
        self.reviewer
            .as_ref()
            .map(|r| r.id.as_str())
            .filter(|id| !id.trim().is_empty())
    }
}

/// Read an explicit `null` as the type's default, like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paginated list envelope; only the first page is used
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ListEnvelope<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub has_more: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
}
