use std::fmt;

use super::shipment::Product;

/// Account data for the Parcel DE Shipping API.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
    ekp: String,
    api_key: String,
    /// Reserved. Stored for callers that keep it with the rest of the login;
    /// never sent in a request.
    api_password: String,
}

impl Credentials {
    pub const SANDBOX_USER: &'static str = "sandy_sandbox";
    pub const SANDBOX_PASSWORD: &'static str = "pass";
    pub const SANDBOX_EKP: &'static str = "3333333333";

    pub fn new(
        user: impl AsRef<str>,
        password: impl Into<String>,
        ekp: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            user: user.as_ref().to_lowercase(),
            password: password.into(),
            ekp: ekp.into(),
            api_key: api_key.into(),
            api_password: String::new(),
        }
    }

    /// The public test account of the DHL sandbox. The API key still has to
    /// be set.
    pub fn sandbox() -> Self {
        Self::new(Self::SANDBOX_USER, Self::SANDBOX_PASSWORD, Self::SANDBOX_EKP, "")
    }

    /// Read `DHL_USER`, `DHL_PASSWORD`, `DHL_EKP`, `DHL_API_KEY` and the
    /// optional `DHL_API_PASSWORD` from the environment.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, super::VersandError> {
        #[derive(serde::Deserialize)]
        struct Raw {
            user: String,
            password: String,
            ekp: String,
            api_key: String,
            #[serde(default)]
            api_password: String,
        }

        let raw = config::Config::builder()
            .add_source(config::Environment::with_prefix("DHL"))
            .build()
            .and_then(|c| c.try_deserialize::<Raw>())
            .map_err(|e| super::VersandError::Config(e.to_string()))?;

        Ok(Self::new(raw.user, raw.password, raw.ekp, raw.api_key).with_api_password(raw.api_password))
    }

    /// Keep the API secret alongside the login. It is never sent; requests
    /// authenticate with the user, password and API key only.
    pub fn with_api_password(mut self, api_password: impl Into<String>) -> Self {
        self.api_password = api_password.into();
        self
    }

    /// Lower-cased user name.
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn set_user(&mut self, user: impl AsRef<str>) {
        self.user = user.as_ref().to_lowercase();
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// The EKP, cut to its first `len` characters when given.
    pub fn ekp(&self, len: Option<usize>) -> &str {
        match len {
            Some(len) => match self.ekp.char_indices().nth(len) {
                Some((end, _)) => &self.ekp[..end],
                None => &self.ekp,
            },
            None => &self.ekp,
        }
    }

    pub fn set_ekp(&mut self, ekp: impl Into<String>) {
        self.ekp = ekp.into();
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Reserved, never sent in a request.
    pub fn api_password(&self) -> &str {
        &self.api_password
    }

    /// 14-digit billing number: EKP, procedure of the product, participation.
    ///
    /// ```
    /// use versand::core::{Credentials, Product};
    ///
    /// let credentials = Credentials::sandbox();
    /// assert_eq!(credentials.billing_number(Product::V01Pak, "01"), "33333333330101");
    /// ```
    pub fn billing_number(&self, product: Product, participation: &str) -> String {
        format!("{}{}{}", self.ekp(Some(10)), product.procedure(), participation)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("ekp", &self.ekp)
            .field("api_key", &"<redacted>")
            .field("api_password", &"<redacted>")
            .finish()
    }
}
