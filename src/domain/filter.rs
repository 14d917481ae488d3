//! Record Filter
//!
//! Conjunctive predicate used by every summary view before aggregation.

use serde::{Deserialize, Serialize};

use super::error::FilterError;
use super::record::ProductRecord;

/// Seller criterion.
///
/// `Unassigned` matches records with no seller reference. It is a distinct
/// variant rather than a magic id, so a seller literally named "none" or
/// "unassigned" is still matched only through `Id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellerFilter {
    Unassigned,
    Id(String),
}

impl SellerFilter {
    pub fn matches(&self, seller: Option<&str>) -> bool {
        match self {
            Self::Unassigned => seller.is_none(),
            Self::Id(id) => seller == Some(id.as_str()),
        }
    }
}

/// Filter over product records. All present criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Case-insensitive substring of description, size or code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase: Option<String>,
}

impl RecordFilter {
    /// Filter that matches every record
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_seller(mut self, seller_id: impl Into<String>) -> Self {
        self.seller = Some(SellerFilter::Id(seller_id.into()));
        self
    }

    pub fn unassigned_seller(mut self) -> Self {
        self.seller = Some(SellerFilter::Unassigned);
        self
    }

    pub fn with_provider(mut self, provider_id: impl Into<String>) -> Self {
        self.provider = Some(provider_id.into());
        self
    }

    pub fn with_purchase(mut self, purchase_id: impl Into<String>) -> Self {
        self.purchase = Some(purchase_id.into());
        self
    }

    /// Build from loose arguments, such as query parameters.
    ///
    /// Blank strings are treated as absent.
    pub fn from_parts(
        text: Option<String>,
        seller: Option<String>,
        unassigned_seller: bool,
        provider: Option<String>,
        purchase: Option<String>,
    ) -> Result<Self, FilterError> {
        let seller = blank_to_none(seller);
        let seller = match (seller, unassigned_seller) {
            (Some(_), true) => return Err(FilterError::ConflictingSeller),
            (Some(id), false) => Some(SellerFilter::Id(id)),
            (None, true) => Some(SellerFilter::Unassigned),
            (None, false) => None,
        };

        Ok(Self {
            text: blank_to_none(text),
            seller,
            provider: blank_to_none(provider),
            purchase: blank_to_none(purchase),
        })
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.seller.is_none() && self.provider.is_none() && self.purchase.is_none()
    }

    pub fn matches(&self, record: &ProductRecord) -> bool {
        self.matches_text(record)
            && self
                .seller
                .as_ref()
                .map_or(true, |seller| seller.matches(record.seller.as_deref()))
            && self
                .provider
                .as_deref()
                .map_or(true, |provider| record.provider == provider)
            && self
                .purchase
                .as_deref()
                .map_or(true, |purchase| record.purchase.as_deref() == Some(purchase))
    }

    fn matches_text(&self, record: &ProductRecord) -> bool {
        let needle = match self.text.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => needle.to_lowercase(),
            _ => return true,
        };

        record
            .text_fields()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
