use salon_utils::date_utils::format_date;
use serde_json::json;
use service::{
    payment::{PaymentOutcome, PaymentSelection},
    wizard::{BookingReference, BookingWizardService, WizardState, WizardStep},
    NETWORK_ERROR_MESSAGE,
};
use time::macros::time;

use crate::console::Console;
use crate::integration_test::{MockBackend, TestSetup, CHECKOUT_URL};

/// Fill the date/time step with the tenth bookable day at 14:00 and move
/// on to confirm. Name and phone come from the signed-in identity.
async fn fill_schedule(test_setup: &TestSetup, state: &mut WizardState) -> String {
    let date = state.available_dates()[9];
    state.set_date(date).unwrap();
    state.set_time(time!(14:00)).unwrap();
    assert_eq!(
        test_setup
            .app_state
            .wizard_service
            .advance(state)
            .await
            .unwrap(),
        WizardStep::Confirm
    );
    format_date(date).unwrap()
}

async fn state_at_confirm(test_setup: &TestSetup) -> (WizardState, String) {
    let wizard_service = &test_setup.app_state.wizard_service;
    let mut state = wizard_service.start(None).await.unwrap();
    wizard_service.choose_shop(&mut state, "S1").await.unwrap();
    wizard_service.advance(&mut state).await.unwrap();
    state.select_treatment("SV1").unwrap();
    wizard_service.advance(&mut state).await.unwrap();
    let date = fill_schedule(test_setup, &mut state).await;
    (state, date)
}

#[tokio::test]
async fn test_card_booking_end_to_end() {
    let test_setup = TestSetup::new(MockBackend::default()).await;
    let wizard_service = &test_setup.app_state.wizard_service;
    let (mut state, date) = state_at_confirm(&test_setup).await;
    assert_eq!(state.catalog().map(|shops| shops.len()), Some(2));
    assert_eq!(test_setup.backend.calls_to("/api/shops").len(), 1);

    let record = wizard_service.submit_booking(&mut state).await.unwrap();
    assert_eq!(record.id.as_ref(), "B1");
    assert_eq!(state.step(), WizardStep::Payment);
    assert_eq!(
        test_setup.backend.calls_to("/api/bookings"),
        vec![json!({
            "userId": "U1",
            "userName": "Kim",
            "userPhone": "010-0000-0000",
            "shopId": "S1",
            "shopName": "Glow Nails",
            "partnerId": "P1",
            "serviceId": "SV1",
            "serviceName": "Gel nails",
            "date": date,
            "time": "14:00",
            "price": 50000
        })]
    );

    state.select_payment(PaymentSelection::Card).unwrap();
    let outcome = wizard_service.submit_payment(&mut state).await.unwrap();
    assert_eq!(outcome, PaymentOutcome::Redirect(CHECKOUT_URL.into()));
    assert_eq!(state.step(), WizardStep::Payment);
    assert_eq!(state.paid_booking_id(), None);
    assert_eq!(
        test_setup.backend.calls_to("/api/payments/checkout-session"),
        vec![json!({"bookingId": "B1", "userId": "U1", "currency": "krw"})]
    );
    assert!(test_setup.backend.calls_to("/api/payments").is_empty());
}

#[tokio::test]
async fn test_card_checkout_uses_configured_currency() {
    let test_setup = TestSetup::with_currency(MockBackend::default(), "usd").await;
    let wizard_service = &test_setup.app_state.wizard_service;
    let (mut state, _) = state_at_confirm(&test_setup).await;
    wizard_service.submit_booking(&mut state).await.unwrap();
    state.select_payment(PaymentSelection::Card).unwrap();
    wizard_service.submit_payment(&mut state).await.unwrap();
    assert_eq!(
        test_setup.backend.calls_to("/api/payments/checkout-session"),
        vec![json!({"bookingId": "B1", "userId": "U1", "currency": "usd"})]
    );
}

#[tokio::test]
async fn test_booking_server_error_stays_at_confirm() {
    let test_setup = TestSetup::new(MockBackend::failing_bookings()).await;
    let wizard_service = &test_setup.app_state.wizard_service;
    let (mut state, _) = state_at_confirm(&test_setup).await;

    assert!(wizard_service.submit_booking(&mut state).await.is_err());
    assert_eq!(state.step(), WizardStep::Confirm);
    assert_eq!(state.record(), None);
    assert_eq!(
        state.error().map(|e| e.as_ref()),
        Some(NETWORK_ERROR_MESSAGE)
    );
    assert_eq!(test_setup.backend.calls_to("/api/bookings").len(), 1);
    assert!(test_setup
        .backend
        .calls_to("/api/payments/checkout-session")
        .is_empty());
    assert!(test_setup.backend.calls_to("/api/payments").is_empty());
}

#[tokio::test]
async fn test_bank_transfer_from_shop_link() {
    let test_setup = TestSetup::new(MockBackend::default()).await;
    let wizard_service = &test_setup.app_state.wizard_service;
    let mut state = wizard_service
        .start(Some(BookingReference {
            shop_id: "S1".into(),
            service_id: "SV1".into(),
        }))
        .await
        .unwrap();
    assert_eq!(state.step(), WizardStep::DateTime);
    fill_schedule(&test_setup, &mut state).await;
    assert!(test_setup.backend.calls_to("/api/shops").is_empty());

    wizard_service.submit_booking(&mut state).await.unwrap();
    state
        .select_payment(PaymentSelection::BankTransfer {
            depositor: Some("Kim".into()),
        })
        .unwrap();
    let outcome = wizard_service.submit_payment(&mut state).await.unwrap();
    assert_eq!(outcome, PaymentOutcome::Completed);
    assert_eq!(state.step(), WizardStep::Success);
    assert_eq!(state.paid_booking_id().map(|id| id.as_ref()), Some("B1"));
    assert_eq!(
        test_setup.backend.calls_to("/api/payments"),
        vec![json!({
            "bookingId": "B1",
            "userId": "U1",
            "amount": 50000,
            "method": "bank-transfer",
            "paymentMethodDetail": "Kim"
        })]
    );
}

#[tokio::test]
async fn test_unknown_shop_link() {
    let test_setup = TestSetup::new(MockBackend::default()).await;
    let result = test_setup
        .app_state
        .wizard_service
        .start(Some(BookingReference {
            shop_id: "S9".into(),
            service_id: "SV1".into(),
        }))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_console_session() {
    let test_setup = TestSetup::new(MockBackend::default()).await;
    let console = Console::new(
        test_setup.app_state.wizard_service.clone(),
        test_setup.app_state.session_service.clone(),
    );
    let input: &[u8] = b"1\n1\n10\n1\n\n\nyes\n3 kakao\n";
    let state = console.run(None, input).await.unwrap().unwrap();
    assert_eq!(state.step(), WizardStep::Success);
    assert_eq!(
        test_setup.backend.calls_to("/api/payments"),
        vec![json!({
            "bookingId": "B1",
            "userId": "U1",
            "amount": 50000,
            "method": "mobile-easy-pay",
            "paymentMethodDetail": "kakao"
        })]
    );
    let bookings = test_setup.backend.calls_to("/api/bookings");
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["time"], json!("09:00"));
}

#[tokio::test]
async fn test_console_requires_sign_in() {
    let test_setup = TestSetup::with_identity(MockBackend::default(), None).await;
    let console = Console::new(
        test_setup.app_state.wizard_service.clone(),
        test_setup.app_state.session_service.clone(),
    );
    let input: &[u8] = b"1\n1\n10\n1\nLee\n010-1111-1111\nyes\nlogin U2 Lee\nyes\nquit\n";
    let state = console.run(None, input).await.unwrap().unwrap();
    assert_eq!(state.step(), WizardStep::Payment);
    let bookings = test_setup.backend.calls_to("/api/bookings");
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["userId"], json!("U2"));
    assert_eq!(bookings[0]["userName"], json!("Lee"));
}
