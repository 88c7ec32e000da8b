use canopy_core::pricing::{BasePricingPayload, PricingRulePayload};
use canopy_core::{EntityId, PricingCatalog, PricingEntity};
use reqwest::Method;
use serde::Serialize;

use super::CanopyClient;
use crate::error::ClientError;

/// Base-pricing writes name their entity kind in the body rather than the
/// query string: `{ "type": "base_pricing", "data": {...} }`.
#[derive(Debug, Serialize)]
struct TypedBody<'a, T> {
    #[serde(rename = "type")]
    entity: &'static str,
    data: &'a T,
}

#[derive(Debug, Serialize)]
struct ActiveToggle {
    is_active: bool,
}

impl CanopyClient {
    /// `GET /api/pricing`: pricing rules and base pricing tiers together.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`], [`ClientError::Http`], or
    /// [`ClientError::Deserialize`].
    pub async fn get_pricing(&self) -> Result<PricingCatalog, ClientError> {
        let url = self.endpoint("api/pricing", &[])?;
        self.get_json(url).await
    }

    /// `POST /api/pricing` with a flat rule body. Specials are created here
    /// too.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] or [`ClientError::Http`].
    pub async fn create_pricing_rule(
        &self,
        payload: &PricingRulePayload,
    ) -> Result<(), ClientError> {
        let url = self.endpoint("api/pricing", &[])?;
        self.send(Method::POST, url, Some(payload)).await
    }

    /// `PUT /api/pricing/:id` with a flat rule body.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] or [`ClientError::Http`].
    pub async fn update_pricing_rule(
        &self,
        id: EntityId,
        payload: &PricingRulePayload,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("api/pricing/{id}"), &[])?;
        self.send(Method::PUT, url, Some(payload)).await
    }

    /// `PUT /api/pricing/:id` with only `{ "is_active": ... }`. Used by the
    /// specials table's status badge.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] or [`ClientError::Http`].
    pub async fn set_pricing_rule_active(
        &self,
        id: EntityId,
        is_active: bool,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("api/pricing/{id}"), &[])?;
        self.send(Method::PUT, url, Some(&ActiveToggle { is_active }))
            .await
    }

    /// `POST /api/pricing` with `{ "type": "base_pricing", "data": {...} }`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] or [`ClientError::Http`].
    pub async fn create_base_pricing(
        &self,
        payload: &BasePricingPayload,
    ) -> Result<(), ClientError> {
        let url = self.endpoint("api/pricing", &[])?;
        self.send(Method::POST, url, Some(&base_pricing_body(payload)))
            .await
    }

    /// `PUT /api/pricing/:id` with `{ "type": "base_pricing", "data": {...} }`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] or [`ClientError::Http`].
    pub async fn update_base_pricing(
        &self,
        id: EntityId,
        payload: &BasePricingPayload,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("api/pricing/{id}"), &[])?;
        self.send(Method::PUT, url, Some(&base_pricing_body(payload)))
            .await
    }

    /// `DELETE /api/pricing/:id?type=...`. Rules and tiers share an ID
    /// space per kind only, so the query parameter is mandatory.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] or [`ClientError::Http`].
    pub async fn delete_pricing(
        &self,
        entity: PricingEntity,
        id: EntityId,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(
            &format!("api/pricing/{id}"),
            &[("type", entity.as_query_value())],
        )?;
        self.send::<()>(Method::DELETE, url, None).await
    }
}

fn base_pricing_body(payload: &BasePricingPayload) -> TypedBody<'_, BasePricingPayload> {
    TypedBody {
        entity: PricingEntity::BasePricing.as_query_value(),
        data: payload,
    }
}
