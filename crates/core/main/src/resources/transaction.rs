use horuspay_core::{
    static_request, ApiResource, Headers, HorusPayObject, HorusPayResult, Requestor,
};
use reqwest::Method;
use serde_json::Value;

use super::api_resource;

/// Statuses of a transaction whose funds were collected.
const PAID_STATUSES: [&str; 5] = [
    "approved",
    "transferred",
    "refunded",
    "approved_partially_refunded",
    "transferred_partially_refunded",
];

api_resource!(
    /// A payment collected from a customer.
    Transaction,
    "transaction",
    "/accounts"
);

impl Transaction {
    pub fn reference(&self) -> Option<&str> {
        self.0.get_str("reference")
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get_str("description")
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.0.get_str("callback_url")
    }

    /// Amount in major units. The API may send it as a string.
    pub fn amount(&self) -> Option<f64> {
        self.0.get_f64("amount")
    }

    pub fn currency(&self) -> Option<&str> {
        self.0.get_str("currency")
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get_str("status")
    }

    /// `"live"` or `"sandbox"`.
    pub fn mode(&self) -> Option<&str> {
        self.0.get_str("mode")
    }

    pub fn customer_id(&self) -> Option<i64> {
        self.0.get_i64("customer_id")
    }

    pub fn was_paid(&self) -> bool {
        self.status()
            .is_some_and(|status| PAID_STATUSES.contains(&status))
    }

    pub fn was_refunded(&self) -> bool {
        self.status()
            .is_some_and(|status| status.contains("refunded"))
    }

    pub fn was_partially_refunded(&self) -> bool {
        self.status()
            .is_some_and(|status| status.contains("partially_refunded"))
    }

    /// Fetches the current payment status.
    pub async fn get_status(
        &self,
        requestor: &Requestor,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        self.action(requestor, Method::GET, "status", params, headers)
            .await
    }

    /// Pays the transaction without redirecting the customer.
    pub async fn pay(
        &self,
        requestor: &Requestor,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        self.action(requestor, Method::POST, "pay", params, headers)
            .await
    }

    /// Generates the payment token used by the checkout.
    pub async fn generate_token(
        &self,
        requestor: &Requestor,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        self.action(requestor, Method::POST, "generate_token", params, headers)
            .await
    }

    pub async fn refund(
        &self,
        requestor: &Requestor,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        self.action(requestor, Method::POST, "refund", params, headers)
            .await
    }

    async fn action(
        &self,
        requestor: &Requestor,
        method: Method,
        action: &str,
        params: Value,
        headers: Headers,
    ) -> HorusPayResult<HorusPayObject> {
        let path = format!("{}/{}", self.instance_path()?, action);
        static_request(requestor, method, &path, params, headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_status(status: &str) -> Transaction {
        Transaction::from_object(HorusPayObject::from_value(json!({
            "id": 1,
            "klass": "v1/transaction",
            "status": status
        })))
    }

    #[test]
    fn test_was_paid() {
        assert!(with_status("approved").was_paid());
        assert!(with_status("transferred_partially_refunded").was_paid());
        assert!(!with_status("pending").was_paid());
        assert!(!with_status("declined").was_paid());
    }

    #[test]
    fn test_refund_statuses() {
        let refunded = with_status("refunded");
        assert!(refunded.was_refunded());
        assert!(!refunded.was_partially_refunded());

        let partial = with_status("approved_partially_refunded");
        assert!(partial.was_refunded());
        assert!(partial.was_partially_refunded());

        assert!(!with_status("approved").was_refunded());
    }

    #[test]
    fn test_missing_status() {
        let transaction = Transaction::from_object(HorusPayObject::from_value(json!({ "id": 1 })));
        assert!(!transaction.was_paid());
        assert!(!transaction.was_refunded());
    }

    #[test]
    fn test_amount_as_string() {
        let transaction = Transaction::from_object(HorusPayObject::from_value(json!({
            "amount": "2500.00",
            "customer_id": 7
        })));
        assert_eq!(transaction.amount(), Some(2500.0));
        assert_eq!(transaction.customer_id(), Some(7));
    }

    #[test]
    fn test_path() {
        assert_eq!(Transaction::item_path(12).unwrap(), "/accounts/transactions/12");
    }
}
