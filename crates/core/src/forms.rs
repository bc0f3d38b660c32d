//! Form state and validation.
//!
//! A form holds the raw text the user typed. [`Form::validate`] checks the
//! fields in display order and either returns the first failure or a typed
//! payload ready to send. `Default` is the form's initial (cleared) state.

use rust_decimal::Decimal;

use crate::models::{
    AddressInput, AssignmentInput, CustomerInput, DeliveryInput, PaymentInput, SellerInput,
};
use crate::types::{Amount, CustomerId, Phone, PaymentMethod, PaymentStatus, Rate, SellerId};
use crate::validation::{
    ValidationError, choice, id, iso_date, optional_password, password, phone, positive_number,
    required,
};

/// Raw form input that validates into a payload.
pub trait Form: Default {
    /// What a valid form turns into.
    type Payload;

    /// Check every field in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first failing field's [`ValidationError`].
    fn validate(&self) -> Result<Self::Payload, ValidationError>;

    /// Clear back to the initial state.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Credentials {
    pub contact: Phone,
    pub password: String,
}

/// Login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub contact: String,
    pub password: String,
}

impl Form for LoginForm {
    type Payload = Credentials;

    fn validate(&self) -> Result<Credentials, ValidationError> {
        Ok(Credentials {
            contact: phone("contact", "Mobile number", &self.contact)?,
            password: password("password", "Password", &self.password)?,
        })
    }
}

/// Validated password change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Change-password screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl Form for PasswordForm {
    type Payload = PasswordChange;

    fn validate(&self) -> Result<PasswordChange, ValidationError> {
        let current_password = required("current", "Current password", &self.current)?;
        let new_password = password("new", "New password", &self.new)?;
        if self.confirm != self.new {
            return Err(ValidationError::new("confirm", "Passwords do not match"));
        }
        if new_password == current_password {
            return Err(ValidationError::new(
                "new",
                "New password must differ from the current one",
            ));
        }
        Ok(PasswordChange {
            current_password,
            new_password,
        })
    }
}

/// Add/edit customer screen. `id` is set when editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub id: Option<CustomerId>,
    pub name: String,
    pub contact: String,
    pub address_id: String,
    pub price: String,
    pub join_date: String,
    pub milk_quantity: String,
    pub password: String,
}

impl Form for CustomerForm {
    type Payload = CustomerInput;

    fn validate(&self) -> Result<CustomerInput, ValidationError> {
        let name = required("name", "Name", &self.name)?;
        let contact = phone("contact", "Contact", &self.contact)?;
        let address_id = id("address_id", "Address", &self.address_id)?;
        let price = Rate::new(positive_number("price", "Price", &self.price)?);
        let join_date = iso_date("join_date", "Join date", &self.join_date)?;
        let milk_quantity = positive_number("milk_quantity", "Milk quantity", &self.milk_quantity)?;
        let password = if self.id.is_some() {
            optional_password("password", "Password", &self.password)?
        } else {
            Some(password("password", "Password", &self.password)?)
        };
        Ok(CustomerInput {
            id: self.id,
            name,
            contact,
            address_id,
            price,
            join_date,
            milk_quantity,
            password,
        })
    }
}

/// Add/edit seller screen. `id` is set when editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellerForm {
    pub id: Option<SellerId>,
    pub name: String,
    pub contact: String,
    pub vehicle_no: String,
    pub password: String,
}

impl Form for SellerForm {
    type Payload = SellerInput;

    fn validate(&self) -> Result<SellerInput, ValidationError> {
        let name = required("name", "Name", &self.name)?;
        let contact = phone("contact", "Contact", &self.contact)?;
        let vehicle_no = required("vehicle_no", "Vehicle number", &self.vehicle_no)?.to_uppercase();
        let password = if self.id.is_some() {
            optional_password("password", "Password", &self.password)?
        } else {
            Some(password("password", "Password", &self.password)?)
        };
        Ok(SellerInput {
            id: self.id,
            name,
            contact,
            vehicle_no,
            password,
        })
    }
}

/// Add area screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub label: String,
}

impl Form for AddressForm {
    type Payload = AddressInput;

    fn validate(&self) -> Result<AddressInput, ValidationError> {
        Ok(AddressInput {
            label: required("label", "Address", &self.label)?,
        })
    }
}

/// Seller's record-delivery screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryForm {
    pub customer_id: String,
    pub date: String,
    pub quantity: String,
}

impl Form for DeliveryForm {
    type Payload = DeliveryInput;

    fn validate(&self) -> Result<DeliveryInput, ValidationError> {
        Ok(DeliveryInput {
            customer_id: id("customer_id", "Customer", &self.customer_id)?,
            date: iso_date("date", "Date", &self.date)?,
            quantity: positive_number("quantity", "Quantity", &self.quantity)?,
        })
    }
}

/// Record-payment screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    pub customer_id: String,
    pub amount: String,
    pub method: String,
    pub paid: bool,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            customer_id: String::new(),
            amount: String::new(),
            method: PaymentMethod::default().as_str().to_owned(),
            paid: true,
        }
    }
}

impl Form for PaymentForm {
    type Payload = PaymentInput;

    fn validate(&self) -> Result<PaymentInput, ValidationError> {
        let customer_id = id("customer_id", "Customer", &self.customer_id)?;
        let amount = Amount::new(positive_number("amount", "Amount", &self.amount)?);
        let method: PaymentMethod = choice("method", "Payment method", &self.method)?;
        Ok(PaymentInput {
            customer_id,
            amount,
            method,
            status: if self.paid {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            },
        })
    }
}

/// Admin's assign-milk screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentForm {
    pub seller_id: String,
    pub date: String,
    pub quantity: String,
}

impl Form for AssignmentForm {
    type Payload = AssignmentInput;

    fn validate(&self) -> Result<AssignmentInput, ValidationError> {
        let seller_id = id("seller_id", "Seller", &self.seller_id)?;
        let date = iso_date("date", "Date", &self.date)?;
        let quantity: Decimal = positive_number("quantity", "Quantity", &self.quantity)?;
        Ok(AssignmentInput {
            seller_id,
            date,
            quantity,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::types::AddressId;

    fn valid_customer() -> CustomerForm {
        CustomerForm {
            id: None,
            name: "Sunita Devi".into(),
            contact: "9876500012".into(),
            address_id: "3".into(),
            price: "64".into(),
            join_date: "2024-03-15".into(),
            milk_quantity: "2.5".into(),
            password: "secret1".into(),
        }
    }

    #[test]
    fn test_customer_form_valid() {
        let input = valid_customer().validate().unwrap();
        assert_eq!(input.address_id, AddressId::new(3));
        assert_eq!(input.join_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(input.password.as_deref(), Some("secret1"));
    }

    #[test]
    fn test_customer_form_nine_digit_phone_rejected() {
        let form = CustomerForm {
            contact: "987650001".into(),
            ..valid_customer()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, "contact");
    }

    #[test]
    fn test_only_first_failure_reported() {
        let form = CustomerForm {
            name: String::new(),
            contact: "123".into(),
            price: "-1".into(),
            ..valid_customer()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "Name is required");
    }

    #[test]
    fn test_edit_customer_may_skip_password() {
        let form = CustomerForm {
            id: Some(CustomerId::new(12)),
            password: String::new(),
            ..valid_customer()
        };
        assert_eq!(form.validate().unwrap().password, None);

        let create = CustomerForm {
            password: String::new(),
            ..valid_customer()
        };
        assert_eq!(create.validate().unwrap_err().field, "password");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = valid_customer();
        form.reset();
        assert_eq!(form, CustomerForm::default());

        let mut payment = PaymentForm {
            amount: "100".into(),
            paid: false,
            ..PaymentForm::default()
        };
        payment.reset();
        assert!(payment.paid);
        assert_eq!(payment.method, "Cash");
    }

    #[test]
    fn test_password_form_mismatch() {
        let form = PasswordForm {
            current: "oldpass".into(),
            new: "newpass1".into(),
            confirm: "newpass2".into(),
        };
        assert_eq!(form.validate().unwrap_err().field, "confirm");
    }

    #[test]
    fn test_payment_form_method_choice() {
        let form = PaymentForm {
            customer_id: "3".into(),
            amount: "450".into(),
            method: "upi".into(),
            paid: false,
        };
        let input = form.validate().unwrap();
        assert_eq!(input.method, PaymentMethod::Upi);
        assert_eq!(input.status, PaymentStatus::Pending);

        let bad = PaymentForm {
            method: "barter".into(),
            ..form
        };
        assert_eq!(bad.validate().unwrap_err().field, "method");
    }

    #[test]
    fn test_delivery_form_order() {
        let form = DeliveryForm {
            customer_id: "5".into(),
            date: "2024/05/01".into(),
            quantity: "0".into(),
        };
        assert_eq!(form.validate().unwrap_err().field, "date");
    }

    #[test]
    fn test_seller_vehicle_uppercased() {
        let form = SellerForm {
            id: None,
            name: "Mahesh".into(),
            contact: "9000000002".into(),
            vehicle_no: "mh12ab1234".into(),
            password: "sellerpw".into(),
        };
        assert_eq!(form.validate().unwrap().vehicle_no, "MH12AB1234");
    }
}
