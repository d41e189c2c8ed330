use horuspay_core::{
    ApiResource, ClientConfig, Headers, HorusPayObject, HorusPayResult, Requestor,
    ResourceProtocol, static_request,
};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::resources::{
    Account, ApiKey, Auth, Customer, Payout, Transaction, WebhookEndpoint,
};

/// Entry point of the HorusPay API.
///
/// Each client owns its configuration, so clients for different accounts or
/// environments can be used side by side.
#[derive(Debug)]
pub struct HorusPayClient {
    requestor: Requestor,
}

impl HorusPayClient {
    /// Creates a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> HorusPayResult<Self> {
        debug!(environment = ?config.environment, "creating HorusPay client");
        Ok(Self {
            requestor: Requestor::new(config)?,
        })
    }

    /// Creates a sandbox client authenticated with a secret API key.
    pub fn with_api_key(api_key: impl Into<String>) -> HorusPayResult<Self> {
        Self::new(ClientConfig::new().with_api_key(api_key))
    }

    /// Creates a client configured from `HORUSPAY_*` environment variables.
    pub fn from_env() -> HorusPayResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The dispatcher, for resource methods outside the CRUD set.
    pub fn requestor(&self) -> &Requestor {
        &self.requestor
    }

    /// Current configuration.
    pub fn config(&self) -> &ClientConfig {
        self.requestor.config()
    }

    /// Mutable access to the configuration, e.g. to install a session token
    /// after [`Auth::login`].
    pub fn config_mut(&mut self) -> &mut ClientConfig {
        self.requestor.config_mut()
    }

    /// Applies `interceptor` to every request sent by this client.
    pub fn add_interceptor<F>(&mut self, interceptor: F)
    where
        F: Fn(RequestBuilder) -> RequestBuilder + Send + Sync + 'static,
    {
        self.requestor.add_interceptor(interceptor);
    }

    /// CRUD operations of any resource.
    pub fn resource<R: ApiResource>(&self) -> ResourceProtocol<'_, R> {
        ResourceProtocol::new(&self.requestor)
    }

    pub fn accounts(&self) -> ResourceProtocol<'_, Account> {
        self.resource()
    }

    pub fn api_keys(&self) -> ResourceProtocol<'_, ApiKey> {
        self.resource()
    }

    pub fn customers(&self) -> ResourceProtocol<'_, Customer> {
        self.resource()
    }

    pub fn payouts(&self) -> ResourceProtocol<'_, Payout> {
        self.resource()
    }

    pub fn transactions(&self) -> ResourceProtocol<'_, Transaction> {
        self.resource()
    }

    pub fn webhooks(&self) -> ResourceProtocol<'_, WebhookEndpoint> {
        self.resource()
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth::new(&self.requestor)
    }

    /// Sends an arbitrary request and unwraps the response envelope.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        static_request(&self.requestor, method, path, params, headers).await
    }
}
