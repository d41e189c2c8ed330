use horuspay_core::{
    static_request, ApiResource, Headers, HorusPayObject, HorusPayResult, Requestor,
};
use reqwest::Method;
use serde_json::Value;

use super::api_resource;

api_resource!(
    /// A public/secret key pair of the account.
    ApiKey,
    "api_key",
    "/accounts"
);

impl ApiKey {
    pub fn public_key(&self) -> Option<&str> {
        self.0.get_str("public_key")
    }

    pub fn secret_key(&self) -> Option<&str> {
        self.0.get_str("secret_key")
    }

    /// `"live"` or `"sandbox"`.
    pub fn environment(&self) -> Option<&str> {
        self.0.get_str("environment")
    }

    /// Revokes the current keys and issues new ones.
    pub async fn regenerate(
        requestor: &Requestor,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        let path = format!("{}/regenerate", Self::collection_path());
        static_request(requestor, Method::POST, &path, params, headers).await
    }
}
