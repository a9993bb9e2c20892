use std::sync::Arc;

use async_trait::async_trait;
use service::{
    booking::{BookingError, BookingRecord, BookingService},
    catalog::{CatalogService, ShopSummary},
    clock::ClockService,
    navigation::NavigationService,
    payment::{PaymentError, PaymentOutcome, PaymentService},
    session::SessionService,
    uuid_service::UuidService,
    wizard::{BookingReference, BookingWizardService, WizardError, WizardState, WizardStep},
};
use tracing::instrument;

use crate::gen_service_impl;

const WIZARD_UUID_USAGE: &str = "booking-wizard";

gen_service_impl! {
    struct BookingWizardServiceImpl: service::wizard::BookingWizardService = BookingWizardServiceDeps {
        CatalogService: service::catalog::CatalogService = catalog_service,
        BookingService: service::booking::BookingService = booking_service,
        PaymentService: service::payment::PaymentService = payment_service,
        SessionService: service::session::SessionService = session_service,
        NavigationService: service::navigation::NavigationService = navigation_service,
        ClockService: service::clock::ClockService = clock_service,
        UuidService: service::uuid_service::UuidService = uuid_service,
    }
}

/// Keep the wizard on its step and show the message of `result`'s error.
fn record_failure<T>(state: &mut WizardState, result: &Result<T, WizardError>) {
    if let Err(err) = result {
        tracing::warn!("Wizard step {} failed: {}", state.step(), err);
        state.fail(err.user_message());
    }
}

impl<Deps: BookingWizardServiceDeps> BookingWizardServiceImpl<Deps> {
    async fn fetch_catalog(
        &self,
        state: &mut WizardState,
    ) -> Result<Arc<[ShopSummary]>, WizardError> {
        if let Some(catalog) = state.catalog() {
            return Ok(catalog.clone());
        }
        let catalog = self.catalog_service.list_shops().await?;
        tracing::debug!("Loaded {} shops", catalog.len());
        state.set_catalog(catalog.clone());
        Ok(catalog)
    }

    async fn choose_shop_inner(
        &self,
        state: &mut WizardState,
        shop_id: &str,
    ) -> Result<(), WizardError> {
        state.ensure_step(WizardStep::Shop)?;
        let shop = self.catalog_service.get_shop(shop_id).await?;
        state.select_shop(shop)
    }

    async fn advance_inner(&self, state: &mut WizardState) -> Result<WizardStep, WizardError> {
        let next = state.advance()?;
        if next == WizardStep::DateTime && !state.is_preselected() {
            if let Err(err) = self.fetch_catalog(state).await {
                tracing::warn!("Catalog refresh failed: {}", err);
            }
        }
        Ok(next)
    }

    async fn submit_booking_inner(
        &self,
        state: &mut WizardState,
    ) -> Result<BookingRecord, WizardError> {
        state.ensure_step(WizardStep::Confirm)?;
        if let Some(record) = state.record().cloned() {
            tracing::info!("Reusing booking {}", record.id);
            state.resume_payment()?;
            return Ok(record);
        }
        let identity = self
            .session_service
            .current_identity()
            .ok_or(BookingError::NotSignedIn)?;
        let submission = state.submission()?;
        let record = self
            .booking_service
            .create(&submission, &identity)
            .await?;
        state.record_booking(record.clone())?;
        Ok(record)
    }

    async fn submit_payment_inner(
        &self,
        state: &mut WizardState,
    ) -> Result<PaymentOutcome, WizardError> {
        state.ensure_step(WizardStep::Payment)?;
        let record = state.record().cloned().ok_or(WizardError::NoBooking)?;
        let selection = state
            .payment_selection()
            .cloned()
            .ok_or(WizardError::NoPaymentSelection)?;
        let identity = self
            .session_service
            .current_identity()
            .ok_or(PaymentError::NotSignedIn)?;
        let outcome = self
            .payment_service
            .initiate(&record, &selection, &identity)
            .await?;
        match &outcome {
            PaymentOutcome::Redirect(url) => self.navigation_service.redirect(url),
            PaymentOutcome::Completed => state.complete_payment()?,
        }
        Ok(outcome)
    }
}

#[async_trait]
impl<Deps: BookingWizardServiceDeps> BookingWizardService for BookingWizardServiceImpl<Deps> {
    #[instrument(skip(self))]
    async fn start(
        &self,
        reference: Option<BookingReference>,
    ) -> Result<WizardState, WizardError> {
        let mut state = WizardState::new(
            self.uuid_service.new_uuid(WIZARD_UUID_USAGE),
            self.clock_service.date_now(),
        );
        if let Some(identity) = self.session_service.current_identity() {
            state.prefill_customer(&identity);
        }
        match reference {
            Some(reference) => {
                let shop = self.catalog_service.get_shop(&reference.shop_id).await?;
                state.preselect(shop, &reference.service_id)?;
            }
            None => {
                let result = self.fetch_catalog(&mut state).await;
                record_failure(&mut state, &result);
            }
        }
        tracing::info!("Wizard {} started at step {}", state.wizard_id(), state.step());
        Ok(state)
    }

    #[instrument(skip(self, state), fields(wizard_id = %state.wizard_id()))]
    async fn load_catalog(
        &self,
        state: &mut WizardState,
    ) -> Result<Arc<[ShopSummary]>, WizardError> {
        let result = self.fetch_catalog(state).await;
        record_failure(state, &result);
        result
    }

    #[instrument(skip(self, state), fields(wizard_id = %state.wizard_id()))]
    async fn choose_shop(&self, state: &mut WizardState, shop_id: &str) -> Result<(), WizardError> {
        let result = self.choose_shop_inner(state, shop_id).await;
        record_failure(state, &result);
        result
    }

    #[instrument(skip(self, state), fields(wizard_id = %state.wizard_id()))]
    async fn advance(&self, state: &mut WizardState) -> Result<WizardStep, WizardError> {
        let result = self.advance_inner(state).await;
        record_failure(state, &result);
        result
    }

    #[instrument(skip(self, state), fields(wizard_id = %state.wizard_id()))]
    async fn submit_booking(
        &self,
        state: &mut WizardState,
    ) -> Result<BookingRecord, WizardError> {
        let result = self.submit_booking_inner(state).await;
        record_failure(state, &result);
        result
    }

    #[instrument(skip(self, state), fields(wizard_id = %state.wizard_id()))]
    async fn submit_payment(
        &self,
        state: &mut WizardState,
    ) -> Result<PaymentOutcome, WizardError> {
        let result = self.submit_payment_inner(state).await;
        record_failure(state, &result);
        result
    }
}
