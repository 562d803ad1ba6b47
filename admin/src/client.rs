//! Typed HTTP client for the storefront REST API.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use storefront::footer::{FooterLink, FooterLinkDraft, FooterSettings, ReorderItem};
use storefront::hero::Hero;
use storefront::inventory::{InventoryItem, InventorySummary};
use storefront::marquee::{Announcement, AnnouncementDraft};
use storefront::rate::{RateDraft, RateQuote, ShippingRate, ShippingZone, ZoneDraft};
use storefront::validate::{ProductInput, ReviewInput};
use uuid::Uuid;

use crate::AdminError;

/// Subset of `GET /api/config` the console uses.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicConfig {
    pub locale: String,
    pub low_stock_threshold: i32,
    #[serde(default)]
    pub image_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<String>,
}

/// Catalogue fields the console lists. Colors and sizes stay server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub id: Uuid,
    pub rating: i16,
    pub comment: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Partial inventory edit. Absent fields are left alone by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl InventoryPatch {
    /// # Errors
    ///
    /// Returns [`AdminError::Invalid`] for a negative quantity or an empty patch.
    pub fn new(quantity: Option<i32>, location: Option<String>) -> Result<Self, AdminError> {
        let mut errors = Vec::new();
        if quantity.is_some_and(|q| q < 0) {
            errors.push("Quantity cannot be negative".to_owned());
        }
        if quantity.is_none() && location.is_none() {
            errors.push("Nothing to update".to_owned());
        }
        if errors.is_empty() { Ok(Self { quantity, location }) } else { Err(AdminError::Invalid(errors)) }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    errors: Vec<String>,
}

#[derive(Serialize)]
struct ReorderBody<'a> {
    links: &'a [ReorderItem],
}

#[derive(Serialize)]
struct ImageMoveBody {
    from: usize,
    to: usize,
}

#[derive(Serialize)]
struct QuoteBody<'a> {
    country: &'a str,
    weight: f64,
    subtotal: f64,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    has_token: bool,
}

impl ApiClient {
    /// Build a client. Without a token only public reads will succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or the token is not a
    /// valid header value.
    pub fn new(base_url: &str, admin_token: Option<&str>) -> Result<Self, AdminError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AdminError::InvalidBaseUrl(base_url.to_owned()));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = admin_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self { base_url: base_url.to_owned(), http, has_token: admin_token.is_some() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    fn admin_request(&self, method: Method, path: &str) -> Result<RequestBuilder, AdminError> {
        if !self.has_token {
            return Err(AdminError::MissingToken);
        }
        Ok(self.request(method, path))
    }

    async fn check(response: Response) -> Result<Response, AdminError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let errors = serde_json::from_str::<ErrorBody>(&text).map_or_else(|_| vec![text], |body| body.errors);
        Err(AdminError::Api { status: status.as_u16(), errors })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AdminError> {
        let response = self.request(Method::GET, path).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(&self, method: Method, path: &str, body: &B) -> Result<T, AdminError> {
        let response = self.admin_request(method, path)?.json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<(), AdminError> {
        let response = self.admin_request(Method::DELETE, path)?.send().await?;
        Self::check(response).await?;
        Ok(())
    }

    // =========================================================================
    // GENERAL
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the server is unreachable or unhealthy.
    pub async fn ping(&self) -> Result<(), AdminError> {
        let response = self.request(Method::GET, "/healthz").send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn public_config(&self) -> Result<PublicConfig, AdminError> {
        self.get("/api/config").await
    }

    // =========================================================================
    // HERO
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn hero(&self) -> Result<Hero, AdminError> {
        self.get("/api/hero").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the banner.
    pub async fn put_hero(&self, hero: &Hero) -> Result<Hero, AdminError> {
        self.send(Method::PUT, "/api/hero", hero).await
    }

    // =========================================================================
    // FOOTER
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn footer_settings(&self) -> Result<FooterSettings, AdminError> {
        self.get("/api/footer/settings").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the settings.
    pub async fn put_footer_settings(&self, settings: &FooterSettings) -> Result<FooterSettings, AdminError> {
        self.send(Method::PUT, "/api/footer/settings", settings).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn footer_links(&self) -> Result<Vec<FooterLink>, AdminError> {
        self.get("/api/footer/links").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the link.
    pub async fn create_footer_link(&self, draft: &FooterLinkDraft) -> Result<FooterLink, AdminError> {
        self.send(Method::POST, "/api/footer/links", draft).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_footer_link(&self, link_id: Uuid) -> Result<(), AdminError> {
        self.delete(&format!("/api/footer/links/{link_id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails; the server applies nothing then.
    pub async fn reorder_footer_links(&self, items: &[ReorderItem]) -> Result<Vec<FooterLink>, AdminError> {
        self.send(Method::PUT, "/api/footer/links/reorder", &ReorderBody { links: items }).await
    }

    // =========================================================================
    // SHIPPING
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn zones(&self) -> Result<Vec<ShippingZone>, AdminError> {
        self.get("/api/shipping/zones").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the zone.
    pub async fn create_zone(&self, draft: &ZoneDraft) -> Result<ShippingZone, AdminError> {
        self.send(Method::POST, "/api/shipping/zones", draft).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_zone(&self, zone_id: Uuid) -> Result<(), AdminError> {
        self.delete(&format!("/api/shipping/zones/{zone_id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn rates(&self, zone_id: Uuid) -> Result<Vec<ShippingRate>, AdminError> {
        self.get(&format!("/api/shipping/zones/{zone_id}/rates")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the rate.
    pub async fn create_rate(&self, zone_id: Uuid, draft: &RateDraft) -> Result<ShippingRate, AdminError> {
        self.send(Method::POST, &format!("/api/shipping/zones/{zone_id}/rates"), draft).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the rate.
    pub async fn replace_rate(&self, rate_id: Uuid, draft: &RateDraft) -> Result<ShippingRate, AdminError> {
        self.send(Method::PUT, &format!("/api/shipping/rates/{rate_id}"), draft).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_rate(&self, rate_id: Uuid) -> Result<(), AdminError> {
        self.delete(&format!("/api/shipping/rates/{rate_id}")).await
    }

    /// Quoting is public, so this does not need the admin token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn quote(&self, country: &str, weight: f64, subtotal: f64) -> Result<Vec<RateQuote>, AdminError> {
        let response = self
            .request(Method::POST, "/api/shipping/quote")
            .json(&QuoteBody { country, weight, subtotal })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    // =========================================================================
    // INVENTORY
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn inventory(&self) -> Result<Vec<InventoryItem>, AdminError> {
        self.get("/api/inventory").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn inventory_summary(&self) -> Result<InventorySummary, AdminError> {
        self.get("/api/inventory/summary").await
    }

    /// Download the spreadsheet as CSV text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn export_inventory(&self) -> Result<String, AdminError> {
        let response = self.request(Method::GET, "/api/inventory/export.csv").send().await?;
        Ok(Self::check(response).await?.text().await?)
    }

    /// Upload CSV text. Rejected rows come back in [`ImportSummary::errors`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the header row is unusable.
    pub async fn import_inventory(&self, csv: String) -> Result<ImportSummary, AdminError> {
        let response = self
            .admin_request(Method::POST, "/api/inventory/import.csv")?
            .header(reqwest::header::CONTENT_TYPE, "text/csv")
            .body(csv)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the patch.
    pub async fn update_inventory(&self, item_id: Uuid, patch: &InventoryPatch) -> Result<InventoryItem, AdminError> {
        self.send(Method::PATCH, &format!("/api/inventory/{item_id}"), patch).await
    }

    // =========================================================================
    // PRODUCTS
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn products(&self) -> Result<Vec<ProductSummary>, AdminError> {
        self.get("/api/products").await
    }

    /// Full product record as the server stores it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the product does not exist.
    pub async fn product(&self, product_id: Uuid) -> Result<serde_json::Value, AdminError> {
        self.get(&format!("/api/products/{product_id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the product.
    pub async fn create_product(&self, input: &ProductInput) -> Result<ProductSummary, AdminError> {
        self.send(Method::POST, "/api/products", input).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), AdminError> {
        self.delete(&format!("/api/products/{product_id}")).await
    }

    /// Move one gallery image and return the new image order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or either index is out of range.
    pub async fn move_product_image(&self, product_id: Uuid, from: usize, to: usize) -> Result<Vec<String>, AdminError> {
        self.send(Method::PUT, &format!("/api/products/{product_id}/images"), &ImageMoveBody { from, to })
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn reviews(&self, product_id: Uuid) -> Result<Vec<ReviewSummary>, AdminError> {
        self.get(&format!("/api/products/{product_id}/reviews")).await
    }

    /// Reviews are open to shoppers, so no admin token is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the review.
    pub async fn create_review(&self, product_id: Uuid, input: &ReviewInput) -> Result<ReviewSummary, AdminError> {
        let response = self
            .request(Method::POST, &format!("/api/products/{product_id}/reviews"))
            .json(input)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    // =========================================================================
    // MARQUEE
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn announcements(&self) -> Result<Vec<Announcement>, AdminError> {
        self.get("/api/marquee").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the text.
    pub async fn create_announcement(&self, draft: &AnnouncementDraft) -> Result<Announcement, AdminError> {
        self.send(Method::POST, "/api/marquee", draft).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_announcement(&self, announcement_id: Uuid) -> Result<(), AdminError> {
        self.delete(&format!("/api/marquee/{announcement_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_must_be_http() {
        assert!(matches!(ApiClient::new("ftp://shop", None), Err(AdminError::InvalidBaseUrl(_))));
        let client = ApiClient::new(" http://localhost:3000/ ", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn mutations_without_token_fail_locally() {
        let client = ApiClient::new("http://localhost:3000", None).unwrap();
        assert!(matches!(client.admin_request(Method::PUT, "/api/hero"), Err(AdminError::MissingToken)));
    }

    #[test]
    fn reorder_body_wraps_links() {
        let id = Uuid::nil();
        let items = [ReorderItem { id, order: 1, section: storefront::footer::FooterSection::Shop }];
        let value = serde_json::to_value(ReorderBody { links: &items }).unwrap();
        assert_eq!(value["links"][0]["section"], "shop");
        assert_eq!(value["links"][0]["order"], 1);
    }

    #[test]
    fn inventory_patch_sends_only_given_fields() {
        let patch = InventoryPatch::new(Some(4), None).unwrap();
        assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({"quantity": 4}));

        let Err(AdminError::Invalid(errors)) = InventoryPatch::new(Some(-1), None) else {
            panic!("negative quantity should be rejected");
        };
        assert_eq!(errors, vec!["Quantity cannot be negative"]);
        assert!(matches!(InventoryPatch::new(None, None), Err(AdminError::Invalid(_))));
    }

    #[test]
    fn product_summary_ignores_server_only_fields() {
        let raw = serde_json::json!({
            "id": Uuid::nil(),
            "name": "Linen Shirt",
            "description": "Breathable",
            "price": 49.0,
            "category": "tops",
            "images": ["/a.jpg"],
            "colors": [{"name": "Red", "hex_code": "#FF0000"}],
            "sizes": [],
            "created_at": "2026-03-01T00:00:00Z"
        });
        let product: ProductSummary = serde_json::from_value(raw).unwrap();
        assert_eq!(product.name, "Linen Shirt");
        assert_eq!(product.images, vec!["/a.jpg"]);
    }
}
