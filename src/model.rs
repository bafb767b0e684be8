use crate::error::DetailError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipe or product record as returned by `GET /recipes/{id}`.
///
/// Every field is optional; missing data is handled at display time.
/// Unrecognised fields are kept in `extra` so the record round-trips verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: Option<u64>,
    pub images: Option<Vec<String>>,
    pub image: Option<String>,
    pub title: Option<String>,
    /// The live recipes endpoint names the title `name`.
    pub name: Option<String>,
    pub brand: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<Vec<serde_json::Value>>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub shipping_information: Option<String>,
    pub warranty_information: Option<String>,
    pub return_policy: Option<String>,
    pub availability_status: Option<String>,
    pub prep_time: Option<u32>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    /// `title`, or `name` when the title is absent or blank.
    pub fn title_text(&self) -> Option<&str> {
        [self.title.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    }

    pub fn prep_minutes(&self) -> Option<u32> {
        self.prep_time.filter(|m| *m > 0).or(self.prep_time_minutes)
    }

    pub fn cook_minutes(&self) -> Option<u32> {
        self.cook_time.filter(|m| *m > 0).or(self.cook_time_minutes)
    }

    /// Image URLs in display order. Falls back to the single `image` field
    /// when `images` is absent or empty.
    pub fn image_urls(&self) -> Vec<&str> {
        match self.images.as_deref() {
            Some(images) if !images.is_empty() => images.iter().map(String::as_str).collect(),
            _ => self.image.as_deref().into_iter().collect(),
        }
    }
}

/// Opaque record identifier taken from the command line or stdin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Accepts a bare id (`7`, `abc-1`) or a record URL
    /// (`https://dummyjson.com/recipes/7`), in which case the last path
    /// segment is used.
    pub fn parse(input: &str) -> Result<Self, DetailError> {
        let input = input.trim();

        if input.contains("://") {
            let url = url::Url::parse(input)
                .map_err(|e| DetailError::InvalidIdentifier(format!("{}: {}", input, e)))?;
            if let Some(segment) = url
                .path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            {
                return Self::parse(segment);
            }
            return Err(DetailError::InvalidIdentifier(format!(
                "{}. The URL has no record id in its path",
                input
            )));
        }

        if input.is_empty() || input.contains('/') || input.chars().any(char::is_whitespace) {
            return Err(DetailError::InvalidIdentifier(format!(
                "'{}'. Use a record id or a full record URL",
                input
            )));
        }

        Ok(Identifier(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;

    #[test]
    fn empty_object_deserializes_to_all_absent() -> TestResult {
        let record: Record = serde_json::from_str("{}")?;
        assert_eq!(record, Record::default());
        assert!(record.image_urls().is_empty());
        Ok(())
    }

    #[test]
    fn live_api_field_names_are_accepted() -> TestResult {
        let record: Record = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Classic Margherita Pizza",
                "prepTimeMinutes": 20,
                "cookTimeMinutes": 15,
                "servings": 4,
                "image": "https://cdn.dummyjson.com/recipe-images/1.webp",
                "reviewCount": 98
            }"#,
        )?;
        assert_eq!(record.title_text(), Some("Classic Margherita Pizza"));
        assert_eq!(record.prep_minutes(), Some(20));
        assert_eq!(record.cook_minutes(), Some(15));
        assert_eq!(
            record.image_urls(),
            vec!["https://cdn.dummyjson.com/recipe-images/1.webp"]
        );
        assert_eq!(record.extra.get("reviewCount"), Some(&serde_json::json!(98)));
        Ok(())
    }

    #[test]
    fn both_spellings_of_a_field_deserialize_together() -> TestResult {
        let record: Record = serde_json::from_str(
            r#"{
                "title": "Cake",
                "name": "Sponge Cake",
                "prepTime": 10,
                "prepTimeMinutes": 20,
                "cookTime": 0,
                "cookTimeMinutes": 35
            }"#,
        )?;
        assert_eq!(record.title_text(), Some("Cake"));
        assert_eq!(record.prep_minutes(), Some(10));
        assert_eq!(record.cook_minutes(), Some(35));
        Ok(())
    }

    #[test]
    fn blank_title_falls_through_to_name() -> TestResult {
        let record: Record = serde_json::from_str(r#"{"title": " ", "name": "Pizza"}"#)?;
        assert_eq!(record.title_text(), Some("Pizza"));
        assert_eq!(Record::default().title_text(), None);
        Ok(())
    }

    #[test]
    fn images_take_precedence_over_single_image() -> TestResult {
        let record: Record =
            serde_json::from_str(r#"{"images": ["a.png", "b.png"], "image": "c.png"}"#)?;
        assert_eq!(record.image_urls(), vec!["a.png", "b.png"]);
        Ok(())
    }

    #[test]
    fn extra_fields_survive_serialization() -> TestResult {
        let raw = serde_json::json!({"title": "Cake", "tags": ["sweet"]});
        let record: Record = serde_json::from_value(raw)?;
        let back = serde_json::to_value(&record)?;
        assert_eq!(back["tags"], serde_json::json!(["sweet"]));
        assert_eq!(back["title"], "Cake");
        Ok(())
    }

    #[test]
    fn parses_numeric_and_opaque_ids() -> TestResult {
        assert_eq!(Identifier::parse("42")?.as_str(), "42");
        assert_eq!(Identifier::parse("  abc-1 ")?.as_str(), "abc-1");
        Ok(())
    }

    #[test]
    fn parses_record_urls() -> TestResult {
        assert_eq!(
            Identifier::parse("https://dummyjson.com/recipes/7")?.as_str(),
            "7"
        );
        assert_eq!(
            Identifier::parse("https://dummyjson.com/recipes/7/")?.as_str(),
            "7"
        );
        Ok(())
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(Identifier::parse("").is_err());
        assert!(Identifier::parse("1 2").is_err());
        assert!(Identifier::parse("a/b").is_err());
        assert!(Identifier::parse("https://dummyjson.com/").is_err());
    }
}
