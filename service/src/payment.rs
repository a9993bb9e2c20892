use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use dao::payment::PaymentMethodEntity;
use mockall::automock;
use thiserror::Error;

use crate::booking::BookingRecord;
use crate::session::Identity;
use crate::CallFailure;

pub const PAYMENT_FAILED_MESSAGE: &str = "The payment could not be processed.";

/// How the customer pays. Each variant carries only what its branch sends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentSelection {
    /// Hosted checkout; the currency comes from the configuration.
    Card,
    BankTransfer { depositor: Option<Arc<str>> },
    MobileEasyPay { provider: Option<Arc<str>> },
}

impl PaymentSelection {
    /// Method and optional detail for the generic payment endpoint.
    /// `None` for the card branch, which never uses that endpoint.
    pub fn direct_method(&self) -> Option<(PaymentMethodEntity, Option<Arc<str>>)> {
        match self {
            PaymentSelection::Card => None,
            PaymentSelection::BankTransfer { depositor } => {
                Some((PaymentMethodEntity::BankTransfer, depositor.clone()))
            }
            PaymentSelection::MobileEasyPay { provider } => {
                Some((PaymentMethodEntity::MobileEasyPay, provider.clone()))
            }
        }
    }
}

impl Display for PaymentSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentSelection::Card => write!(f, "card"),
            PaymentSelection::BankTransfer { .. } => write!(f, "bank-transfer"),
            PaymentSelection::MobileEasyPay { .. } => write!(f, "mobile-easy-pay"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Payment continues on a hosted checkout page.
    Redirect(Arc<str>),
    /// The server reported the payment as done.
    Completed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("No customer is signed in")]
    NotSignedIn,

    #[error("Checkout session created without a redirect url")]
    MissingRedirectUrl,

    #[error("Payment configuration unavailable: {0}")]
    Config(Arc<str>),

    #[error("Payment call failed: {0}")]
    Call(#[from] CallFailure),
}

impl PaymentError {
    pub fn user_message(&self) -> Arc<str> {
        match self {
            PaymentError::NotSignedIn => "Please sign in to pay.".into(),
            PaymentError::MissingRedirectUrl | PaymentError::Config(_) => {
                PAYMENT_FAILED_MESSAGE.into()
            }
            PaymentError::Call(failure) => failure.user_message(PAYMENT_FAILED_MESSAGE),
        }
    }
}

#[automock]
#[async_trait]
pub trait PaymentService {
    async fn initiate(
        &self,
        record: &BookingRecord,
        selection: &PaymentSelection,
        identity: &Identity,
    ) -> Result<PaymentOutcome, PaymentError>;
}
