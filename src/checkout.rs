//! Checkout
//!
//! Buyer form validation and the order snapshot handed to the payment provider.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine, LineKind, NewLine},
    dispatch::{DispatchQuote, format_dispatch_date, format_window},
};

/// Product id used for dispatch coordination lines.
pub const COORDINATION_PRODUCT_ID: &str = "COORDINACION";

/// Errors raised when preparing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The buyer form has invalid fields.
    #[error(transparent)]
    InvalidForm(#[from] FieldErrors),

    /// There is nothing to pay for.
    #[error("cart is empty")]
    EmptyCart,
}

/// A single invalid form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as submitted
    pub field: String,

    /// Message shown next to the field
    pub message: String,
}

/// Invalid form fields, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{} checkout field(s) are invalid", .0.len())]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Message for a field, if it failed validation.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// All field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Buyer details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    /// Full name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    /// Street address
    pub address: String,

    /// Commune
    pub commune: String,

    /// Region
    pub region: String,

    /// Delivery notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckoutForm {
    /// Check required fields and the shape of email and phone.
    ///
    /// # Errors
    ///
    /// Returns every invalid field at once.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if is_blank(&self.name) {
            errors.push("name", "El nombre es obligatorio");
        }

        if is_blank(&self.email) {
            errors.push("email", "El correo es obligatorio");
        } else if !is_valid_email(&self.email) {
            errors.push("email", "Ingresa un correo válido");
        }

        if is_blank(&self.phone) {
            errors.push("phone", "El teléfono es obligatorio");
        } else if !is_valid_phone(&self.phone) {
            errors.push("phone", "Ingresa un teléfono válido");
        }

        if is_blank(&self.address) {
            errors.push("address", "La dirección es obligatoria");
        }

        if is_blank(&self.commune) {
            errors.push("commune", "La comuna es obligatoria");
        }

        if is_blank(&self.region) {
            errors.push("region", "La región es obligatoria");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Snapshot of an order, as sent to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Buyer details
    pub buyer: CheckoutForm,

    /// Cart lines
    pub lines: Vec<CartLine>,

    /// Amount payable in CLP
    pub total: u64,

    /// Scheduled dispatch
    pub dispatch: DispatchQuote,
}

impl OrderSummary {
    /// Build an order from a cart.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidForm`]: the buyer form fails validation.
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    pub fn from_cart(
        cart: &Cart,
        buyer: &CheckoutForm,
        dispatch: DispatchQuote,
    ) -> Result<Self, CheckoutError> {
        buyer.validate()?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            buyer: buyer.clone(),
            lines: cart.lines().to_vec(),
            total: cart.total(),
            dispatch,
        })
    }
}

/// Category that drives the dispatch date of a cart: the first product line's category.
pub fn dispatch_category(cart: &Cart) -> &str {
    cart.lines()
        .iter()
        .filter(|line| line.kind == LineKind::Product)
        .find_map(|line| line.category.as_deref())
        .unwrap_or_default()
}

/// A dispatch coordination line for the quoted slot.
pub fn coordination_line(quote: &DispatchQuote, price: u64) -> NewLine {
    NewLine {
        product_id: COORDINATION_PRODUCT_ID.to_string(),
        variant_id: Some(quote.date.to_string()),
        kind: LineKind::Coordination,
        name: "Coordinación de despacho".to_string(),
        description: format!("Despacho el {}", format_dispatch_date(quote.date)),
        image: None,
        specifications: vec![
            format!("Fecha: {}", format_dispatch_date(quote.date)),
            format!("Horario: {}", format_window(quote.window)),
        ],
        category: None,
        quantity: 1,
        unit_price: price,
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_valid_email(email: &str) -> bool {
    let email = email.trim();

    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

fn is_valid_phone(phone: &str) -> bool {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')');
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    phone.trim().chars().all(allowed) && (8..=12).contains(&digits)
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use testresult::TestResult;

    use crate::dispatch::TimeWindow;

    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Valentina Rojas".to_string(),
            email: "valentina@example.cl".to_string(),
            phone: "+56 9 8765 4321".to_string(),
            address: "Av. Siempre Viva 742".to_string(),
            commune: "Ñuñoa".to_string(),
            region: "Metropolitana".to_string(),
            notes: None,
        }
    }

    fn quote() -> DispatchQuote {
        DispatchQuote {
            rule_key: "policarbonato".to_string(),
            date: date(2026, 10, 22),
            window: TimeWindow::new(9, 13),
        }
    }

    fn product(category: &str) -> NewLine {
        NewLine {
            product_id: "ALV-6".to_string(),
            variant_id: None,
            kind: LineKind::Product,
            name: "Alveolar 6mm".to_string(),
            description: String::new(),
            image: None,
            specifications: Vec::new(),
            category: Some(category.to_string()),
            quantity: 2,
            unit_price: 30_000,
        }
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(form().validate(), Ok(()));
    }

    #[test]
    fn blank_fields_are_all_reported() {
        let errors = CheckoutForm::default().validate().err().unwrap_or_default();

        let fields: Vec<_> = errors.errors().iter().map(|e| e.field.as_str()).collect();

        assert_eq!(
            fields,
            vec!["name", "email", "phone", "address", "commune", "region"]
        );
        assert_eq!(errors.get("email"), Some("El correo es obligatorio"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["sin-arroba", "a@b", "@example.cl", "a@@example.cl", "a b@example.cl", "a@example..cl", "a@.cl"] {
            let buyer = CheckoutForm {
                email: email.to_string(),
                ..form()
            };

            let errors = buyer.validate().err().unwrap_or_default();

            assert_eq!(errors.get("email"), Some("Ingresa un correo válido"), "{email}");
        }
    }

    #[test]
    fn phone_needs_eight_to_twelve_digits() {
        let with_phone = |phone: &str| CheckoutForm {
            phone: phone.to_string(),
            ..form()
        };

        assert!(with_phone("22345678").validate().is_ok());
        assert!(with_phone("(2) 2345-6789").validate().is_ok());
        assert!(with_phone("1234567").validate().is_err());
        assert!(with_phone("+56 9 1234 5678 99").validate().is_err());
        assert!(with_phone("9876abcd4321").validate().is_err());
    }

    #[test]
    fn order_requires_lines() {
        let result = OrderSummary::from_cart(&Cart::new(), &form(), quote());

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn order_requires_valid_form() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(product("Policarbonato"), Timestamp::UNIX_EPOCH);

        let result = OrderSummary::from_cart(&cart, &CheckoutForm::default(), quote());

        assert!(matches!(result, Err(CheckoutError::InvalidForm(_))));

        Ok(())
    }

    #[test]
    fn order_snapshots_cart() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(product("Policarbonato"), Timestamp::UNIX_EPOCH);

        let order = OrderSummary::from_cart(&cart, &form(), quote())?;

        assert_eq!(order.total, 60_000);
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.dispatch.date, date(2026, 10, 22));

        Ok(())
    }

    #[test]
    fn dispatch_category_skips_service_lines() {
        let mut cart = Cart::new();

        assert_eq!(dispatch_category(&cart), "");

        cart.add_item(coordination_line(&quote(), 5_000), Timestamp::UNIX_EPOCH);
        cart.add_item(product("Perfiles"), Timestamp::UNIX_EPOCH);

        assert_eq!(dispatch_category(&cart), "Perfiles");
    }

    #[test]
    fn coordination_line_describes_slot() {
        let line = coordination_line(&quote(), 5_000);

        assert_eq!(line.kind, LineKind::Coordination);
        assert_eq!(
            line.specifications,
            vec![
                "Fecha: jueves 22 de octubre".to_string(),
                "Horario: 09:00 – 13:00".to_string()
            ]
        );
    }
}
