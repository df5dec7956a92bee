//! # Navigation Data Transfer Objects
//!
//! - `GET /api/navigation` - list of [`NavItemDto`]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavItemDto {
    pub id: String,
    #[serde(alias = "title", alias = "name")]
    pub label: String,
    #[serde(alias = "href", alias = "route")]
    pub path: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, alias = "sortOrder", alias = "sort_order")]
    pub order: i32,
}
