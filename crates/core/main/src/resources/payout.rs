use horuspay_core::{
    static_request, ApiResource, Headers, HorusPayObject, HorusPayResult, Requestor,
};
use reqwest::Method;
use serde_json::Value;

use super::api_resource;

api_resource!(
    /// A transfer from the account to a beneficiary.
    Payout,
    "payout",
    "/accounts"
);

impl Payout {
    pub fn reference(&self) -> Option<&str> {
        self.0.get_str("reference")
    }

    pub fn amount(&self) -> Option<f64> {
        self.0.get_f64("amount")
    }

    pub fn currency(&self) -> Option<&str> {
        self.0.get_str("currency")
    }

    pub fn mode(&self) -> Option<&str> {
        self.0.get_str("mode")
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get_str("status")
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.0.get_str("callback_url")
    }

    pub fn customer_id(&self) -> Option<i64> {
        self.0.get_i64("customer_id")
    }

    /// Triggers the transfer.
    pub async fn pay(
        &self,
        requestor: &Requestor,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        let path = format!("{}/pay", self.instance_path()?);
        static_request(requestor, Method::POST, &path, params, headers).await
    }

    /// Creates several payouts in one request.
    ///
    /// The payouts are posted as a JSON array to the collection path.
    pub async fn create_batch(
        requestor: &Requestor,
        payouts: Vec<Value>,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        static_request(
            requestor,
            Method::POST,
            &Self::collection_path(),
            Value::Array(payouts),
            headers,
        )
        .await
    }
}
