use super::api_resource;

api_resource!(
    /// A customer of the merchant account.
    Customer,
    "customer",
    "/accounts"
);

impl Customer {
    pub fn firstname(&self) -> Option<&str> {
        self.0.get_str("firstname")
    }

    pub fn lastname(&self) -> Option<&str> {
        self.0.get_str("lastname")
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get_str("email")
    }

    /// ISO 3166 alpha-2 country code.
    pub fn country_code(&self) -> Option<&str> {
        self.0.get_str("country_code")
    }

    pub fn phone_prefix(&self) -> Option<&str> {
        self.0.get_str("phone_prefix")
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.0.get_str("phone_number")
    }
}
