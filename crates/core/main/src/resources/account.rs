use horuspay_core::{
    static_request, ApiResource, Headers, HorusPayObject, HorusPayResult, Requestor,
};
use reqwest::Method;
use serde_json::Value;

use super::api_resource;

api_resource!(
    /// A merchant account.
    Account,
    "account",
    ""
);

impl Account {
    pub fn name(&self) -> Option<&str> {
        self.0.get_str("name")
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get_str("email")
    }

    pub fn country_code(&self) -> Option<&str> {
        self.0.get_str("country_code")
    }

    /// Invites a user to this account.
    pub async fn invite(
        &self,
        requestor: &Requestor,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        let path = format!("{}/invite", self.instance_path()?);
        static_request(requestor, Method::POST, &path, params, headers).await
    }
}
