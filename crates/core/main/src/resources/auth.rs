//! Session and profile endpoints under `/auth`.

use horuspay_core::{
    static_request, validate_params, Headers, HorusPayObject, HorusPayResult, Requestor,
};
use reqwest::Method;
use serde_json::Value;

/// Authentication calls for dashboard users.
///
/// The returned objects carry the session token; pass it to
/// [`ClientConfig::set_token`](horuspay_core::ClientConfig::set_token) to act as that user.
#[derive(Debug, Clone, Copy)]
pub struct Auth<'a> {
    requestor: &'a Requestor,
}

impl<'a> Auth<'a> {
    pub fn new(requestor: &'a Requestor) -> Self {
        Self { requestor }
    }

    /// Registers a user (`email`, `password`, `password_confirmation`, `fullname`).
    pub async fn register(&self, params: Value, headers: Headers) -> HorusPayResult<HorusPayObject> {
        self.call(Method::POST, "/auth/registrations", params, headers)
            .await
    }

    /// Opens a session with `email` and `password`, or with an OTP.
    pub async fn login(&self, params: Value, headers: Headers) -> HorusPayResult<HorusPayObject> {
        self.call(Method::POST, "/auth/sessions", params, headers)
            .await
    }

    /// Finds the connection type of a user by `email`.
    pub async fn find_role(&self, params: Value, headers: Headers) -> HorusPayResult<HorusPayObject> {
        self.call(Method::POST, "/auth/find_role", params, headers)
            .await
    }

    pub async fn confirm_email(
        &self,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        self.call(Method::POST, "/auth/confirmations", params, headers)
            .await
    }

    pub async fn update_confirmation(
        &self,
        id: &str,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        let path = format!("/auth/confirmations/{}", urlencoding::encode(id));
        self.call(Method::PUT, &path, params, headers).await
    }

    pub async fn request_password_reset(
        &self,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        self.call(Method::POST, "/auth/passwords", params, headers)
            .await
    }

    pub async fn reset_password(
        &self,
        reset_token: &str,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        let path = format!("/auth/passwords/{}", urlencoding::encode(reset_token));
        self.call(Method::PUT, &path, params, headers).await
    }

    pub async fn profile(&self, params: Value, headers: Headers) -> HorusPayResult<HorusPayObject> {
        self.call(Method::GET, "/auth/profile", params, headers)
            .await
    }

    /// Lists the accounts the current user belongs to.
    pub async fn profile_accounts(
        &self,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        self.call(Method::GET, "/auth/profile/accounts", params, headers)
            .await
    }

    pub async fn update_profile(
        &self,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        self.call(Method::PUT, "/auth/profile", params, headers)
            .await
    }

    pub async fn change_password(
        &self,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        self.call(Method::PUT, "/auth/profile/password", params, headers)
            .await
    }

    /// Switches the session to another account of the user.
    pub async fn switch_account(
        &self,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        self.call(Method::PUT, "/auth/profile/switch_account", params, headers)
            .await
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        validate_params(&params)?;
        static_request(self.requestor, method, path, params, headers).await
    }
}
