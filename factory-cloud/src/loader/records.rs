//! Upload file records

use serde::{Deserialize, Serialize};
use shared::models::{CookCreate, DishCreate};
use uuid::Uuid;

/// Top-level upload document. Both sections are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadDocument {
    #[serde(default)]
    pub cooks: Vec<CookRecord>,
    #[serde(default)]
    pub dishes: Vec<DishRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookRecord {
    pub name: String,
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl From<&CookRecord> for CookCreate {
    fn from(record: &CookRecord) -> Self {
        CookCreate {
            name: record.name.clone(),
            floor: record.floor,
            email: record.email.clone(),
            phone: record.phone.clone(),
            specialty: record.specialty.clone(),
            is_active: record.is_active,
        }
    }
}

/// Dish row; the default cook is referenced by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub default_cook_name: Option<String>,
    #[serde(default)]
    pub preparation_time: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl DishRecord {
    /// Cook name to resolve, ignoring blanks
    pub fn cook_name(&self) -> Option<&str> {
        self.default_cook_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    pub fn to_create(&self, default_cook_id: Option<Uuid>) -> DishCreate {
        DishCreate {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            default_cook_id,
            preparation_time: self.preparation_time,
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_sections_optional() {
        let doc: UploadDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.cooks.is_empty());
        assert!(doc.dishes.is_empty());

        let doc: UploadDocument =
            serde_json::from_str(r#"{"dishes": [{"name": "Bread"}]}"#).unwrap();
        assert!(doc.cooks.is_empty());
        assert_eq!(doc.dishes[0].name, "Bread");
        assert!(doc.dishes[0].default_cook_name.is_none());
    }

    #[test]
    fn test_cook_record_into_create() {
        let record: CookRecord = serde_json::from_str(
            r#"{"name": "Dana", "floor": 2, "email": "dana@factory.com", "is_active": false}"#,
        )
        .unwrap();
        let create = CookCreate::from(&record);
        assert_eq!(create.name, "Dana");
        assert_eq!(create.floor, Some(2));
        assert_eq!(create.is_active, Some(false));
        assert!(create.phone.is_none());
    }

    #[test]
    fn test_blank_cook_name_is_absent() {
        let record: DishRecord =
            serde_json::from_str(r#"{"name": "Bread", "default_cook_name": "  "}"#).unwrap();
        assert_eq!(record.cook_name(), None);

        let record: DishRecord =
            serde_json::from_str(r#"{"name": "Bread", "default_cook_name": " Dana "}"#).unwrap();
        assert_eq!(record.cook_name(), Some("Dana"));
    }

    #[test]
    fn test_dish_record_to_create() {
        let record: DishRecord = serde_json::from_str(
            r#"{"name": "Bread", "category": "bakery", "preparation_time": 45}"#,
        )
        .unwrap();
        let cook_id = Uuid::new_v4();
        let create = record.to_create(Some(cook_id));
        assert_eq!(create.default_cook_id, Some(cook_id));
        assert_eq!(create.category.as_deref(), Some("bakery"));
        assert_eq!(create.preparation_time, Some(45));
    }
}
