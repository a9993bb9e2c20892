use std::{io::Write, sync::Arc};

use salon_utils::date_utils::{format_date, format_time, parse_date, parse_time, DayOfWeek};
use service::{
    payment::{PaymentOutcome, PaymentSelection},
    session::Identity,
    wizard::{BookingReference, BookingWizardService, WizardState, WizardStep},
};
use service_impl::session::SessionServiceImpl;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const INVALID_CHOICE_MESSAGE: &str = "Please choose one of the listed options.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Back,
    Quit,
    Login(Identity),
    Logout,
    Invalid(&'static str),
    Answer(String),
}

/// Commands available at every prompt; anything else answers the prompt.
/// An empty answer at the shop or service prompt keeps the current choice.
pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let mut words = line.split_whitespace();
    match words.next() {
        Some("back") => Input::Back,
        Some("quit") | Some("exit") => Input::Quit,
        Some("logout") => Input::Logout,
        Some("login") => match (words.next(), words.next(), words.next()) {
            (Some(user_id), Some(name), phone) => Input::Login(Identity {
                user_id: user_id.into(),
                name: name.into(),
                phone: phone.map(Arc::from),
            }),
            _ => Input::Invalid("Usage: login <user-id> <name> [phone]"),
        },
        _ => Input::Answer(line.to_string()),
    }
}

/// `card`, `bank [depositor]` or `easy [provider]`, or the option number.
pub fn parse_payment(answer: &str) -> Option<PaymentSelection> {
    let (method, detail) = match answer.trim().split_once(char::is_whitespace) {
        Some((method, detail)) => (method, Some(detail.trim()).filter(|d| !d.is_empty())),
        None => (answer.trim(), None),
    };
    match method {
        "1" | "card" => Some(PaymentSelection::Card),
        "2" | "bank" => Some(PaymentSelection::BankTransfer {
            depositor: detail.map(Arc::from),
        }),
        "3" | "easy" => Some(PaymentSelection::MobileEasyPay {
            provider: detail.map(Arc::from),
        }),
        _ => None,
    }
}

/// Option chosen by its 1-based number, or by `matches` on the raw answer.
pub fn pick<T: Clone>(options: &[T], answer: &str, matches: impl Fn(&T) -> bool) -> Option<T> {
    match answer.parse::<usize>() {
        Ok(number) if number >= 1 => options.get(number - 1).cloned(),
        _ => options.iter().find(|option| matches(option)).cloned(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DateTimeField {
    Date,
    Time,
    Name,
    Phone,
}

enum Flow {
    Continue,
    Finished,
}

pub struct Console<W: BookingWizardService> {
    wizard_service: Arc<W>,
    session_service: Arc<SessionServiceImpl>,
}

impl<W: BookingWizardService> Console<W> {
    pub fn new(wizard_service: Arc<W>, session_service: Arc<SessionServiceImpl>) -> Self {
        Self {
            wizard_service,
            session_service,
        }
    }

    /// Drive one wizard from `input` until it finishes, the customer quits,
    /// or the input ends. Returns the final state.
    pub async fn run<R: AsyncBufRead + Unpin>(
        &self,
        reference: Option<BookingReference>,
        input: R,
    ) -> std::io::Result<Option<WizardState>> {
        let mut lines = input.lines();
        let mut state = match self.wizard_service.start(reference).await {
            Ok(state) => state,
            Err(err) => {
                println!("! {}", err.user_message());
                return Ok(None);
            }
        };
        if let Some(error) = state.error() {
            println!("! {}", error);
        }
        let mut field = DateTimeField::Date;
        let mut last_step = state.step();

        loop {
            if state.step() != last_step {
                if state.step() == WizardStep::DateTime {
                    field = DateTimeField::Date;
                }
                last_step = state.step();
            }
            print_prompt(&state, field);
            std::io::stdout().flush()?;
            let Some(line) = lines.next_line().await? else {
                return Ok(Some(state));
            };
            match parse_input(&line) {
                Input::Quit => return Ok(Some(state)),
                Input::Back => {
                    if let Err(err) = state.back() {
                        println!("! {}", err.user_message());
                    }
                }
                Input::Login(identity) => {
                    state.prefill_customer(&identity);
                    self.session_service.sign_in(identity);
                }
                Input::Logout => self.session_service.sign_out(),
                Input::Invalid(message) => println!("! {}", message),
                Input::Answer(answer) => match self.answer(&mut state, &mut field, &answer).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Finished) => return Ok(Some(state)),
                    Err(message) => println!("! {}", message),
                },
            }
        }
    }

    async fn answer(
        &self,
        state: &mut WizardState,
        field: &mut DateTimeField,
        answer: &str,
    ) -> Result<Flow, Arc<str>> {
        match state.step() {
            WizardStep::Shop | WizardStep::Service if answer.is_empty() => {
                self.advance(state).await
            }
            WizardStep::Shop => {
                if state.catalog().is_none() {
                    self.wizard_service
                        .load_catalog(state)
                        .await
                        .map_err(|err| err.user_message())?;
                }
                let catalog = state.catalog().map(|c| c.to_vec()).unwrap_or_default();
                let shop = pick(&catalog, answer, |shop| shop.id.as_ref() == answer)
                    .ok_or(INVALID_CHOICE_MESSAGE)?;
                self.wizard_service
                    .choose_shop(state, &shop.id)
                    .await
                    .map_err(|err| err.user_message())?;
                self.advance(state).await
            }
            WizardStep::Service => {
                let treatments = state
                    .shop()
                    .map(|shop| shop.treatments.to_vec())
                    .unwrap_or_default();
                let treatment = pick(&treatments, answer, |t| t.id.as_ref() == answer)
                    .ok_or(INVALID_CHOICE_MESSAGE)?;
                state
                    .select_treatment(&treatment.id)
                    .map_err(|err| err.user_message())?;
                self.advance(state).await
            }
            WizardStep::DateTime => self.answer_date_time(state, field, answer).await,
            WizardStep::Confirm => match answer {
                "yes" | "y" => {
                    let record = self
                        .wizard_service
                        .submit_booking(state)
                        .await
                        .map_err(|err| err.user_message())?;
                    println!("Booking {} created.", record.id);
                    Ok(Flow::Continue)
                }
                _ => Err("Type yes to book, or back to change your booking.".into()),
            },
            WizardStep::Payment => {
                let selection = parse_payment(answer).ok_or(INVALID_CHOICE_MESSAGE)?;
                state
                    .select_payment(selection)
                    .map_err(|err| err.user_message())?;
                match self
                    .wizard_service
                    .submit_payment(state)
                    .await
                    .map_err(|err| err.user_message())?
                {
                    PaymentOutcome::Redirect(_) => {
                        println!("Finish the payment on the checkout page.");
                    }
                    PaymentOutcome::Completed => {
                        if let Some(id) = state.paid_booking_id() {
                            println!("Booking {} is confirmed. Thank you!", id);
                        }
                    }
                }
                Ok(Flow::Finished)
            }
            WizardStep::Success => Ok(Flow::Finished),
        }
    }

    async fn answer_date_time(
        &self,
        state: &mut WizardState,
        field: &mut DateTimeField,
        answer: &str,
    ) -> Result<Flow, Arc<str>> {
        match *field {
            DateTimeField::Date => {
                let date = match parse_date(answer) {
                    Ok(date) => date,
                    Err(_) => pick(&state.available_dates(), answer, |_| false)
                        .ok_or(INVALID_CHOICE_MESSAGE)?,
                };
                state.set_date(date).map_err(|err| err.user_message())?;
                *field = DateTimeField::Time;
            }
            DateTimeField::Time => {
                let time = match parse_time(answer) {
                    Ok(time) => time,
                    Err(_) => pick(&state.available_times(), answer, |_| false)
                        .ok_or(INVALID_CHOICE_MESSAGE)?,
                };
                state.set_time(time).map_err(|err| err.user_message())?;
                *field = DateTimeField::Name;
            }
            DateTimeField::Name => {
                if !answer.is_empty() || state.draft().customer_name.is_none() {
                    state
                        .set_customer_name(answer)
                        .map_err(|err| err.user_message())?;
                }
                *field = DateTimeField::Phone;
            }
            DateTimeField::Phone => {
                if !answer.is_empty() || state.draft().customer_phone.is_none() {
                    state
                        .set_customer_phone(answer)
                        .map_err(|err| err.user_message())?;
                }
                *field = DateTimeField::Date;
                return self.advance(state).await;
            }
        }
        Ok(Flow::Continue)
    }

    async fn advance(&self, state: &mut WizardState) -> Result<Flow, Arc<str>> {
        self.wizard_service
            .advance(state)
            .await
            .map_err(|err| err.user_message())?;
        Ok(Flow::Continue)
    }
}

fn print_prompt(state: &WizardState, field: DateTimeField) {
    match state.step() {
        WizardStep::Shop => {
            println!("Choose a shop:");
            for (index, shop) in state.catalog().into_iter().flat_map(|c| c.iter()).enumerate() {
                match &shop.address {
                    Some(address) => println!("  {}) {} ({})", index + 1, shop.name, address),
                    None => println!("  {}) {}", index + 1, shop.name),
                }
            }
        }
        WizardStep::Service => {
            println!("Choose a service:");
            for (index, treatment) in state
                .shop()
                .into_iter()
                .flat_map(|shop| shop.treatments.iter())
                .enumerate()
            {
                match treatment.duration_minutes {
                    Some(minutes) => println!(
                        "  {}) {} - {} ({} min)",
                        index + 1,
                        treatment.name,
                        treatment.price,
                        minutes
                    ),
                    None => println!("  {}) {} - {}", index + 1, treatment.name, treatment.price),
                }
            }
        }
        WizardStep::DateTime => match field {
            DateTimeField::Date => {
                println!("Choose a date:");
                for (index, date) in state.available_dates().iter().enumerate() {
                    println!(
                        "  {}) {} {}",
                        index + 1,
                        format_date(*date).unwrap_or_default(),
                        DayOfWeek::from(date.weekday())
                    );
                }
            }
            DateTimeField::Time => {
                println!("Choose a time:");
                for (index, time) in state.available_times().iter().enumerate() {
                    println!("  {}) {}", index + 1, format_time(*time).unwrap_or_default());
                }
            }
            DateTimeField::Name => match &state.draft().customer_name {
                Some(name) => println!("Your name [{}]:", name),
                None => println!("Your name:"),
            },
            DateTimeField::Phone => match &state.draft().customer_phone {
                Some(phone) => println!("Your phone [{}]:", phone),
                None => println!("Your phone:"),
            },
        },
        WizardStep::Confirm => {
            let draft = state.draft();
            println!("Please confirm your booking:");
            println!("  Shop:    {}", draft.shop_name.as_deref().unwrap_or("-"));
            println!("  Service: {}", draft.service_name.as_deref().unwrap_or("-"));
            println!(
                "  Price:   {}",
                draft.price.map_or_else(|| "-".into(), |p| p.to_string())
            );
            println!(
                "  When:    {} {}",
                draft
                    .date
                    .and_then(|date| format_date(date).ok())
                    .unwrap_or_else(|| "-".into()),
                draft
                    .time
                    .and_then(|time| format_time(time).ok())
                    .unwrap_or_else(|| "-".into())
            );
            println!(
                "  Name:    {}",
                draft.customer_name.as_deref().unwrap_or("-")
            );
            println!(
                "  Phone:   {}",
                draft.customer_phone.as_deref().unwrap_or("-")
            );
            println!("Book now? (yes/back)");
        }
        WizardStep::Payment => {
            println!("Choose a payment method:");
            println!("  1) card");
            println!("  2) bank [depositor name]");
            println!("  3) easy [provider]");
        }
        WizardStep::Success => {}
    }
    print!("> ");
}
