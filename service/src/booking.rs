use std::sync::Arc;

use async_trait::async_trait;
use dao::booking::NewBookingEntity;
use mockall::automock;
use thiserror::Error;
use time::{Date, Time};

use crate::session::Identity;
use crate::{CallFailure, ValidationFailureItem};

pub const BOOKING_FAILED_MESSAGE: &str = "The booking could not be created.";

/// Booking data collected by the wizard, one step at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub shop_id: Option<Arc<str>>,
    pub shop_name: Option<Arc<str>>,
    pub partner_id: Option<Arc<str>>,
    pub service_id: Option<Arc<str>>,
    pub service_name: Option<Arc<str>>,
    pub price: Option<u64>,
    pub date: Option<Date>,
    pub time: Option<Time>,
    pub customer_name: Option<Arc<str>>,
    pub customer_phone: Option<Arc<str>>,
}

impl BookingDraft {
    pub fn missing_fields(&self) -> Vec<ValidationFailureItem> {
        let mut missing = Vec::with_capacity(8);
        if self.shop_id.is_none() || self.partner_id.is_none() {
            missing.push(ValidationFailureItem::MissingField("shop".into()));
        } else if self.shop_name.is_none() {
            missing.push(ValidationFailureItem::MissingField("shop_name".into()));
        }
        if self.service_id.is_none() || self.price.is_none() {
            missing.push(ValidationFailureItem::MissingField("service".into()));
        } else if self.service_name.is_none() {
            missing.push(ValidationFailureItem::MissingField("service_name".into()));
        }
        missing.extend(self.missing_schedule_fields());
        missing
    }

    /// Fields of the date/time step: schedule and customer contact.
    pub fn missing_schedule_fields(&self) -> Vec<ValidationFailureItem> {
        let mut missing = Vec::with_capacity(4);
        if self.date.is_none() {
            missing.push(ValidationFailureItem::MissingField("date".into()));
        }
        if self.time.is_none() {
            missing.push(ValidationFailureItem::MissingField("time".into()));
        }
        if is_blank(&self.customer_name) {
            missing.push(ValidationFailureItem::MissingField("customer_name".into()));
        }
        if is_blank(&self.customer_phone) {
            missing.push(ValidationFailureItem::MissingField("customer_phone".into()));
        }
        missing
    }

    pub fn to_submission(&self) -> Result<BookingSubmission, BookingError> {
        match self {
            BookingDraft {
                shop_id: Some(shop_id),
                shop_name: Some(shop_name),
                partner_id: Some(partner_id),
                service_id: Some(service_id),
                service_name: Some(service_name),
                price: Some(price),
                date: Some(date),
                time: Some(time),
                customer_name: Some(customer_name),
                customer_phone: Some(customer_phone),
            } if !customer_name.trim().is_empty() && !customer_phone.trim().is_empty() => {
                Ok(BookingSubmission {
                    shop_id: shop_id.clone(),
                    shop_name: shop_name.clone(),
                    partner_id: partner_id.clone(),
                    service_id: service_id.clone(),
                    service_name: service_name.clone(),
                    price: *price,
                    date: *date,
                    time: *time,
                    customer_name: customer_name.clone(),
                    customer_phone: customer_phone.clone(),
                })
            }
            _ => Err(BookingError::Incomplete(self.missing_fields().into())),
        }
    }
}

fn is_blank(value: &Option<Arc<str>>) -> bool {
    value.as_ref().is_none_or(|value| value.trim().is_empty())
}

/// A complete draft, ready to be sent with the create-booking call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingSubmission {
    pub shop_id: Arc<str>,
    pub shop_name: Arc<str>,
    pub partner_id: Arc<str>,
    pub service_id: Arc<str>,
    pub service_name: Arc<str>,
    pub price: u64,
    pub date: Date,
    pub time: Time,
    pub customer_name: Arc<str>,
    pub customer_phone: Arc<str>,
}

impl BookingSubmission {
    pub fn to_entity(&self, identity: &Identity) -> NewBookingEntity {
        NewBookingEntity {
            user_id: identity.user_id.clone(),
            user_name: self.customer_name.clone(),
            user_phone: self.customer_phone.clone(),
            shop_id: self.shop_id.clone(),
            shop_name: self.shop_name.clone(),
            partner_id: self.partner_id.clone(),
            service_id: self.service_id.clone(),
            service_name: self.service_name.clone(),
            date: self.date,
            time: self.time,
            price: self.price,
        }
    }
}

/// A booking confirmed by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRecord {
    pub id: Arc<str>,
    pub submission: BookingSubmission,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Booking is incomplete: {0:?}")]
    Incomplete(Arc<[ValidationFailureItem]>),

    #[error("No customer is signed in")]
    NotSignedIn,

    #[error("Create booking call failed: {0}")]
    Call(#[from] CallFailure),
}

impl BookingError {
    pub fn user_message(&self) -> Arc<str> {
        match self {
            BookingError::Incomplete(_) => "Please fill in all required fields.".into(),
            BookingError::NotSignedIn => "Please sign in to book.".into(),
            BookingError::Call(failure) => failure.user_message(BOOKING_FAILED_MESSAGE),
        }
    }
}

#[automock]
#[async_trait]
pub trait BookingService {
    async fn create(
        &self,
        submission: &BookingSubmission,
        identity: &Identity,
    ) -> Result<BookingRecord, BookingError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn complete_draft() -> BookingDraft {
        BookingDraft {
            shop_id: Some("S1".into()),
            shop_name: Some("Glow Nails".into()),
            partner_id: Some("P1".into()),
            service_id: Some("SV1".into()),
            service_name: Some("Gel nails".into()),
            price: Some(50000),
            date: Some(date!(2025 - 03 - 10)),
            time: Some(time!(14:00)),
            customer_name: Some("Kim".into()),
            customer_phone: Some("010-0000-0000".into()),
        }
    }

    #[test]
    fn test_to_submission() {
        let submission = complete_draft().to_submission().unwrap();
        assert_eq!(submission.price, 50000);
        assert_eq!(submission.customer_name.as_ref(), "Kim");
    }

    #[test]
    fn test_to_submission_blank_phone() {
        let draft = BookingDraft {
            customer_phone: Some("  ".into()),
            ..complete_draft()
        };
        assert_eq!(
            draft.to_submission(),
            Err(BookingError::Incomplete(
                [ValidationFailureItem::MissingField("customer_phone".into())].into()
            ))
        );
    }

    #[test]
    fn test_to_submission_missing_names() {
        let draft = BookingDraft {
            shop_name: None,
            service_name: None,
            ..complete_draft()
        };
        assert_eq!(
            draft.to_submission(),
            Err(BookingError::Incomplete(
                [
                    ValidationFailureItem::MissingField("shop_name".into()),
                    ValidationFailureItem::MissingField("service_name".into()),
                ]
                .into()
            ))
        );
    }

    #[test]
    fn test_missing_fields_of_empty_draft() {
        assert_eq!(BookingDraft::default().missing_fields().len(), 6);
    }

    #[test]
    fn test_to_entity_uses_identity() {
        let identity = Identity {
            user_id: "U1".into(),
            name: "Account name".into(),
            phone: None,
        };
        let entity = complete_draft()
            .to_submission()
            .unwrap()
            .to_entity(&identity);
        assert_eq!(entity.user_id.as_ref(), "U1");
        assert_eq!(entity.user_name.as_ref(), "Kim");
        assert_eq!(entity.partner_id.as_ref(), "P1");
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            BookingError::Call(CallFailure::Rejected(None))
                .user_message()
                .as_ref(),
            BOOKING_FAILED_MESSAGE
        );
    }
}
