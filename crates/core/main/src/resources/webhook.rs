use super::api_resource;

api_resource!(
    /// A webhook endpoint registered on the account.
    ///
    /// Deliveries to the endpoint are verified with
    /// [`WebhookReceiver`](horuspay_webhooks::WebhookReceiver).
    WebhookEndpoint,
    "webhook",
    "/accounts"
);

impl WebhookEndpoint {
    /// Target URL of the deliveries.
    pub fn url(&self) -> Option<&str> {
        self.0.get_str("url")
    }
}
