//! Customer details captured by the order form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sheetshop_core::{Email, EmailError};

/// Errors from [`CustomerDetails::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// A required field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// The email field is not a usable address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Who the order is for and where it goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl CustomerDetails {
    /// Create customer details from form values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    /// Check that the form is complete enough to send an order.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::MissingField`] for the first blank field (in
    /// form order) and [`CustomerError::InvalidEmail`] for a malformed
    /// address.
    pub fn validate(&self) -> Result<Email, CustomerError> {
        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("address", &self.address),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CustomerError::MissingField(*field));
        }

        Ok(Email::parse(&self.email)?)
    }
}
