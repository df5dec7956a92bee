//! # Navigation Endpoint

use shared::NavItemDto;

use super::client::ApiClient;
use crate::core::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub path: String,
    pub icon: Option<String>,
    pub order: i32,
}

impl From<NavItemDto> for NavItem {
    fn from(dto: NavItemDto) -> Self {
        Self {
            id: dto.id,
            label: dto.label,
            path: dto.path,
            icon: dto.icon,
            order: dto.order,
        }
    }
}

impl ApiClient {
    /// Menu items sorted by `order`.
    pub async fn get_navigation(&self) -> Result<Vec<NavItem>> {
        let dtos: Vec<NavItemDto> = self.get_json("/api/navigation", &[]).await?;
        let mut items: Vec<NavItem> = dtos.into_iter().map(NavItem::from).collect();
        items.sort_by_key(|item| item.order);
        Ok(items)
    }
}
