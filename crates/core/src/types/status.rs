//! Roles and status enums.

use serde::{Deserialize, Serialize};

/// Who is signed in. Each role sees a different set of screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages customers, sellers, addresses and milk assignment.
    Admin,
    /// Delivers milk and records deliveries.
    Seller,
    /// Receives milk, views own deliveries and pays bills.
    Customer,
}

impl Role {
    /// The lowercase wire/storage name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Seller => "seller",
            Self::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "seller" => Ok(Self::Seller),
            "customer" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Whether a customer's bill has been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    Paid,
    #[default]
    #[serde(other)]
    Pending,
}

impl PaymentStatus {
    /// Display label, as the backend spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    #[serde(rename = "UPI")]
    Upi,
    Card,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    /// Display label, as the backend spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Upi => "UPI",
            Self::Card => "Card",
            Self::BankTransfer => "Bank Transfer",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            "bank" | "bank transfer" | "bank_transfer" => Ok(Self::BankTransfer),
            "other" => Ok(Self::Other),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_names() {
        for role in [Role::Admin, Role::Seller, Role::Customer] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("driver".parse::<Role>().is_err());
    }

    #[test]
    fn test_payment_status_unknown_is_pending() {
        let status: PaymentStatus = serde_json::from_str("\"Paid\"").unwrap();
        assert_eq!(status, PaymentStatus::Paid);
        let status: PaymentStatus = serde_json::from_str("\"Unpaid\"").unwrap();
        assert_eq!(status, PaymentStatus::Pending);
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Upi).unwrap(), "\"UPI\"");
        let method: PaymentMethod = serde_json::from_str("\"Bank Transfer\"").unwrap();
        assert_eq!(method, PaymentMethod::BankTransfer);
        let method: PaymentMethod = serde_json::from_str("\"Cheque\"").unwrap();
        assert_eq!(method, PaymentMethod::Other);
    }
}
