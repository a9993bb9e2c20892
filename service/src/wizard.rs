//! The booking wizard: `shop → service → datetime → confirm → payment → success`.
//!
//! [`WizardState`] holds everything the customer entered and enforces the
//! step rules without any I/O. [`BookingWizardService`] drives the steps that
//! need the marketplace API: loading the catalog, creating the booking and
//! initiating the payment.

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use salon_utils::date_utils::{
    booking_dates, booking_time_slots, is_booking_slot, is_within_booking_window,
};
use thiserror::Error;
use time::{Date, Time};
use uuid::Uuid;

use crate::booking::{BookingDraft, BookingError, BookingRecord, BookingSubmission};
use crate::catalog::{Shop, ShopSummary};
use crate::payment::{PaymentError, PaymentOutcome, PaymentSelection};
use crate::session::Identity;
use crate::{ServiceError, ValidationFailureItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    Shop,
    Service,
    DateTime,
    Confirm,
    Payment,
    Success,
}

impl WizardStep {
    pub fn predecessor(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Shop | WizardStep::Success => None,
            WizardStep::Service => Some(WizardStep::Shop),
            WizardStep::DateTime => Some(WizardStep::Service),
            WizardStep::Confirm => Some(WizardStep::DateTime),
            WizardStep::Payment => Some(WizardStep::Confirm),
        }
    }
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                WizardStep::Shop => "shop",
                WizardStep::Service => "service",
                WizardStep::DateTime => "datetime",
                WizardStep::Confirm => "confirm",
                WizardStep::Payment => "payment",
                WizardStep::Success => "success",
            }
        )
    }
}

/// Shop and service chosen before the wizard opened, e.g. from a link on a
/// shop page. The wizard then starts at the date/time step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingReference {
    pub shop_id: Arc<str>,
    pub service_id: Arc<str>,
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Not allowed at step {actual}, expected step {expected}")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    #[error("Required fields missing: {0:?}")]
    Incomplete(Arc<[ValidationFailureItem]>),

    #[error("Step {0} is left by submitting it")]
    SubmissionRequired(WizardStep),

    #[error("Step {0} has no predecessor")]
    NoPredecessor(WizardStep),

    #[error("The booking is already finished")]
    Finished,

    #[error("The selected shop offers no service {0}")]
    UnknownTreatment(Arc<str>),

    #[error("{0} is outside the booking window")]
    OutsideBookingWindow(Date),

    #[error("{0} is not a bookable time slot")]
    InvalidTimeSlot(Time),

    #[error("The booking was already submitted")]
    AlreadySubmitted,

    #[error("No booking record exists")]
    NoBooking,

    #[error("No payment method selected")]
    NoPaymentSelection,

    #[error("Catalog error: {0}")]
    Catalog(#[from] ServiceError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl WizardError {
    /// Text shown to the customer for this error.
    pub fn user_message(&self) -> Arc<str> {
        match self {
            WizardError::Catalog(err) => err.user_message(),
            WizardError::Booking(err) => err.user_message(),
            WizardError::Payment(err) => err.user_message(),
            WizardError::Incomplete(_) => "Please fill in all required fields.".into(),
            WizardError::UnknownTreatment(_) => {
                "The selected service is not offered by this shop.".into()
            }
            WizardError::OutsideBookingWindow(_) => {
                "Please choose a date within the next 30 days.".into()
            }
            WizardError::InvalidTimeSlot(_) => {
                "Please choose a time between 09:00 and 17:30.".into()
            }
            WizardError::AlreadySubmitted => {
                "The booking was already submitted and can no longer be changed.".into()
            }
            WizardError::NoPaymentSelection => "Please choose a payment method.".into(),
            WizardError::NoBooking => "Please confirm the booking first.".into(),
            WizardError::WrongStep { .. }
            | WizardError::SubmissionRequired(_)
            | WizardError::NoPredecessor(_)
            | WizardError::Finished => "This action is not available right now.".into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct WizardState {
    wizard_id: Uuid,
    today: Date,
    step: WizardStep,
    draft: BookingDraft,
    catalog: Option<Arc<[ShopSummary]>>,
    shop: Option<Shop>,
    preselected: bool,
    record: Option<BookingRecord>,
    payment_selection: Option<PaymentSelection>,
    paid_booking_id: Option<Arc<str>>,
    error: Option<Arc<str>>,
}

impl WizardState {
    pub fn new(wizard_id: Uuid, today: Date) -> Self {
        Self {
            wizard_id,
            today,
            step: WizardStep::Shop,
            draft: BookingDraft::default(),
            catalog: None,
            shop: None,
            preselected: false,
            record: None,
            payment_selection: None,
            paid_booking_id: None,
            error: None,
        }
    }

    pub fn wizard_id(&self) -> Uuid {
        self.wizard_id
    }
    pub fn step(&self) -> WizardStep {
        self.step
    }
    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }
    pub fn catalog(&self) -> Option<&Arc<[ShopSummary]>> {
        self.catalog.as_ref()
    }
    pub fn shop(&self) -> Option<&Shop> {
        self.shop.as_ref()
    }
    pub fn is_preselected(&self) -> bool {
        self.preselected
    }
    pub fn record(&self) -> Option<&BookingRecord> {
        self.record.as_ref()
    }
    pub fn payment_selection(&self) -> Option<&PaymentSelection> {
        self.payment_selection.as_ref()
    }
    pub fn paid_booking_id(&self) -> Option<&Arc<str>> {
        self.paid_booking_id.as_ref()
    }
    /// Last user-visible error message, cleared by the next successful move.
    pub fn error(&self) -> Option<&Arc<str>> {
        self.error.as_ref()
    }

    pub fn available_dates(&self) -> Arc<[Date]> {
        booking_dates(self.today)
    }
    pub fn available_times(&self) -> Arc<[Time]> {
        booking_time_slots()
    }

    pub fn ensure_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn ensure_editable(&self, expected: WizardStep) -> Result<(), WizardError> {
        self.ensure_step(expected)?;
        if self.record.is_some() {
            return Err(WizardError::AlreadySubmitted);
        }
        Ok(())
    }

    /// Choosing a shop drops any service picked for a previous shop.
    pub fn select_shop(&mut self, shop: Shop) -> Result<(), WizardError> {
        self.ensure_editable(WizardStep::Shop)?;
        self.draft.shop_id = Some(shop.id.clone());
        self.draft.shop_name = Some(shop.name.clone());
        self.draft.partner_id = Some(shop.partner_id.clone());
        self.draft.service_id = None;
        self.draft.service_name = None;
        self.draft.price = None;
        self.shop = Some(shop);
        Ok(())
    }

    pub fn select_treatment(&mut self, service_id: &str) -> Result<(), WizardError> {
        self.ensure_editable(WizardStep::Service)?;
        let shop = self.shop.as_ref().ok_or_else(|| {
            WizardError::Incomplete([ValidationFailureItem::MissingField("shop".into())].into())
        })?;
        let treatment = shop
            .treatment(service_id)
            .ok_or_else(|| WizardError::UnknownTreatment(service_id.into()))?;
        self.draft.service_id = Some(treatment.id.clone());
        self.draft.service_name = Some(treatment.name.clone());
        self.draft.price = Some(treatment.price);
        Ok(())
    }

    pub fn set_date(&mut self, date: Date) -> Result<(), WizardError> {
        self.ensure_editable(WizardStep::DateTime)?;
        if !is_within_booking_window(self.today, date) {
            return Err(WizardError::OutsideBookingWindow(date));
        }
        self.draft.date = Some(date);
        Ok(())
    }

    pub fn set_time(&mut self, time: Time) -> Result<(), WizardError> {
        self.ensure_editable(WizardStep::DateTime)?;
        if !is_booking_slot(time) {
            return Err(WizardError::InvalidTimeSlot(time));
        }
        self.draft.time = Some(time);
        Ok(())
    }

    pub fn set_customer_name(&mut self, name: &str) -> Result<(), WizardError> {
        self.ensure_editable(WizardStep::DateTime)?;
        self.draft.customer_name = non_blank(name);
        Ok(())
    }

    pub fn set_customer_phone(&mut self, phone: &str) -> Result<(), WizardError> {
        self.ensure_editable(WizardStep::DateTime)?;
        self.draft.customer_phone = non_blank(phone);
        Ok(())
    }

    pub fn select_payment(&mut self, selection: PaymentSelection) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Payment)?;
        self.payment_selection = Some(selection);
        Ok(())
    }

    /// Required fields of the current step which are still empty.
    pub fn missing_fields(&self) -> Vec<ValidationFailureItem> {
        match self.step {
            WizardStep::Shop if self.draft.shop_id.is_none() => {
                vec![ValidationFailureItem::MissingField("shop".into())]
            }
            WizardStep::Service if self.draft.service_id.is_none() => {
                vec![ValidationFailureItem::MissingField("service".into())]
            }
            WizardStep::DateTime => self.draft.missing_schedule_fields(),
            WizardStep::Confirm => self.draft.missing_fields(),
            WizardStep::Payment => {
                let mut missing = Vec::with_capacity(2);
                if self.record.is_none() {
                    missing.push(ValidationFailureItem::MissingField("booking".into()));
                }
                if self.payment_selection.is_none() {
                    missing.push(ValidationFailureItem::MissingField(
                        "payment_method".into(),
                    ));
                }
                missing
            }
            _ => Vec::new(),
        }
    }

    pub fn can_advance(&self) -> bool {
        self.step != WizardStep::Success && self.missing_fields().is_empty()
    }

    /// Move forward through the input steps. Confirm and payment are left
    /// only by submitting them.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let next = match self.step {
            WizardStep::Shop => WizardStep::Service,
            WizardStep::Service => WizardStep::DateTime,
            WizardStep::DateTime => WizardStep::Confirm,
            WizardStep::Confirm | WizardStep::Payment => {
                return Err(WizardError::SubmissionRequired(self.step))
            }
            WizardStep::Success => return Err(WizardError::Finished),
        };
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(WizardError::Incomplete(missing.into()));
        }
        self.step = next;
        self.error = None;
        Ok(next)
    }

    /// Step back to the predecessor. Entered data stays untouched.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        if self.step == WizardStep::Success {
            return Err(WizardError::Finished);
        }
        let previous = self
            .step
            .predecessor()
            .ok_or(WizardError::NoPredecessor(self.step))?;
        self.step = previous;
        self.error = None;
        Ok(previous)
    }

    pub fn submission(&self) -> Result<BookingSubmission, WizardError> {
        Ok(self.draft.to_submission()?)
    }

    pub fn set_catalog(&mut self, catalog: Arc<[ShopSummary]>) {
        self.catalog = Some(catalog);
    }

    /// Jump to the date/time step with shop and service chosen up front.
    pub fn preselect(&mut self, shop: Shop, service_id: &str) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Shop)?;
        self.select_shop(shop)?;
        self.step = WizardStep::Service;
        if let Err(err) = self.select_treatment(service_id) {
            self.step = WizardStep::Shop;
            return Err(err);
        }
        self.step = WizardStep::DateTime;
        self.preselected = true;
        Ok(())
    }

    /// Fill customer contact from the signed-in identity where still empty.
    pub fn prefill_customer(&mut self, identity: &Identity) {
        if self.record.is_some() {
            return;
        }
        if self.draft.customer_name.is_none() {
            self.draft.customer_name = non_blank(&identity.name);
        }
        if self.draft.customer_phone.is_none() {
            self.draft.customer_phone = identity.phone.as_deref().and_then(non_blank);
        }
    }

    pub fn record_booking(&mut self, record: BookingRecord) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Confirm)?;
        self.record = Some(record);
        self.step = WizardStep::Payment;
        self.error = None;
        Ok(())
    }

    /// Resume payment for a booking which was created before stepping back.
    pub fn resume_payment(&mut self) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Confirm)?;
        if self.record.is_none() {
            return Err(WizardError::NoBooking);
        }
        self.step = WizardStep::Payment;
        self.error = None;
        Ok(())
    }

    /// The booking is paid: discard draft and record, keep the booking id.
    pub fn complete_payment(&mut self) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Payment)?;
        let record = self.record.take().ok_or(WizardError::NoBooking)?;
        self.paid_booking_id = Some(record.id);
        self.draft = BookingDraft::default();
        self.payment_selection = None;
        self.step = WizardStep::Success;
        self.error = None;
        Ok(())
    }

    pub fn fail(&mut self, message: Arc<str>) {
        self.error = Some(message);
    }
}

fn non_blank(value: &str) -> Option<Arc<str>> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.into())
    }
}

/// Steps of the wizard which talk to the marketplace API.
///
/// The booking is created before any payment call is made, and a failed
/// call leaves the wizard on its current step with [`WizardState::error`]
/// set. Nothing is retried.
#[async_trait]
pub trait BookingWizardService {
    async fn start(&self, reference: Option<BookingReference>)
        -> Result<WizardState, WizardError>;
    async fn load_catalog(
        &self,
        state: &mut WizardState,
    ) -> Result<Arc<[ShopSummary]>, WizardError>;
    async fn choose_shop(&self, state: &mut WizardState, shop_id: &str)
        -> Result<(), WizardError>;
    async fn advance(&self, state: &mut WizardState) -> Result<WizardStep, WizardError>;
    async fn submit_booking(&self, state: &mut WizardState)
        -> Result<BookingRecord, WizardError>;
    async fn submit_payment(
        &self,
        state: &mut WizardState,
    ) -> Result<PaymentOutcome, WizardError>;
}
