use serde::Deserializer;
use serde_derive::{Deserialize, Serialize};

pub type WorkId = u32;
pub type CategoryId = u32;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Work {
    pub id: WorkId,
    pub title: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(
        rename = "categoryId",
        default,
        deserialize_with = "numeric_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<CategoryId>,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Work {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.name.as_str())
    }
}

// Multipart uploads echo form fields back as strings.
fn numeric_or_string<'de, D>(deserializer: D) -> Result<Option<CategoryId>, D::Error>
    where
        D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(CategoryId),
        Text(String),
    }

    match <Option<Raw> as serde::Deserialize>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(id)) => Ok(Some(id)),
        Some(Raw::Text(text)) => text.trim().parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
