//! Censys ASM response models

use crate::types::HostId;
use serde::Deserialize;

/// One asset in an `assets/hosts` page
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_id: HostId,
}

/// Raw body of a successful `assets/hosts` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPageResponse {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub total_pages: u32,
}

/// One fetched page of the host inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPage {
    pub assets: Vec<HostId>,
    pub page_number: u32,
    pub total_pages: u32,
}

impl AssetPage {
    pub fn from_response(page_number: u32, response: AssetPageResponse) -> Self {
        Self {
            assets: response.assets.into_iter().map(|a| a.asset_id).collect(),
            page_number,
            total_pages: response.total_pages,
        }
    }

    /// No further page should be requested after this one
    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.page_number >= self.total_pages
    }
}
