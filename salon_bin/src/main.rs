mod console;

use std::{sync::Arc, time::Duration};

use dao::DaoError;
use dao_impl_http::{
    booking::BookingDaoImpl, payment::PaymentDaoImpl, shop::ShopDaoImpl, ApiClient,
};
use service::{
    session::{Identity, SessionService as _},
    wizard::BookingReference,
};
use tokio::{io::BufReader, sync::watch};
#[cfg(feature = "json_logging")]
use tracing_subscriber::fmt::format::FmtSpan;

use crate::console::Console;

type ShopDao = ShopDaoImpl;
type BookingDao = BookingDaoImpl;
type PaymentDao = PaymentDaoImpl;

type ConfigService = service_impl::config::ConfigServiceImpl;
type ClockService = service_impl::clock::ClockServiceImpl;
type UuidService = service_impl::uuid_service::UuidServiceImpl;
type SessionService = service_impl::session::SessionServiceImpl;
type NavigationService = service_impl::navigation::ConsoleNavigationServiceImpl;

pub struct CatalogServiceDependencies;
impl service_impl::catalog::CatalogServiceDeps for CatalogServiceDependencies {
    type ShopDao = ShopDao;
}
type CatalogService = service_impl::catalog::CatalogServiceImpl<CatalogServiceDependencies>;

pub struct BookingServiceDependencies;
impl service_impl::booking::BookingServiceDeps for BookingServiceDependencies {
    type BookingDao = BookingDao;
}
type BookingService = service_impl::booking::BookingServiceImpl<BookingServiceDependencies>;

pub struct PaymentServiceDependencies;
impl service_impl::payment::PaymentServiceDeps for PaymentServiceDependencies {
    type PaymentDao = PaymentDao;
    type ConfigService = ConfigService;
}
type PaymentService = service_impl::payment::PaymentServiceImpl<PaymentServiceDependencies>;

pub struct BookingWizardServiceDependencies;
impl service_impl::wizard::BookingWizardServiceDeps for BookingWizardServiceDependencies {
    type CatalogService = CatalogService;
    type BookingService = BookingService;
    type PaymentService = PaymentService;
    type SessionService = SessionService;
    type NavigationService = NavigationService;
    type ClockService = ClockService;
    type UuidService = UuidService;
}
type BookingWizardService =
    service_impl::wizard::BookingWizardServiceImpl<BookingWizardServiceDependencies>;

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub wizard_service: Arc<BookingWizardService>,
}

impl AppState {
    pub fn new(
        config_service: Arc<ConfigService>,
        session_service: Arc<SessionService>,
    ) -> Result<Self, DaoError> {
        let config = config_service.config();
        let client = Arc::new(ApiClient::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?);
        let shop_dao = Arc::new(ShopDao::new(client.clone()));
        let booking_dao = Arc::new(BookingDao::new(client.clone()));
        let payment_dao = Arc::new(PaymentDao::new(client));

        let clock_service = Arc::new(ClockService::from_hours(config.utc_offset_hours));
        let uuid_service = Arc::new(service_impl::uuid_service::UuidServiceImpl);
        let navigation_service = Arc::new(service_impl::navigation::ConsoleNavigationServiceImpl);

        let catalog_service = Arc::new(service_impl::catalog::CatalogServiceImpl {
            shop_dao,
        });
        let booking_service = Arc::new(service_impl::booking::BookingServiceImpl { booking_dao });
        let payment_service = Arc::new(service_impl::payment::PaymentServiceImpl {
            payment_dao,
            config_service,
        });
        let wizard_service = Arc::new(service_impl::wizard::BookingWizardServiceImpl {
            catalog_service,
            booking_service,
            payment_service,
            session_service: session_service.clone(),
            navigation_service,
            clock_service,
            uuid_service,
        });

        Ok(Self {
            session_service,
            wizard_service,
        })
    }
}

fn identity_from_env() -> Option<Identity> {
    let user_id = std::env::var("SALON_USER_ID").ok()?;
    let name = std::env::var("SALON_USER_NAME").unwrap_or_else(|_| user_id.clone());
    Some(Identity {
        user_id: user_id.into(),
        name: name.into(),
        phone: std::env::var("SALON_USER_PHONE").ok().map(Arc::from),
    })
}

/// `salon_bin <shop-id> <service-id>` opens the wizard at the date/time step.
fn reference_from_args(mut args: impl Iterator<Item = String>) -> Option<BookingReference> {
    let shop_id = args.next()?;
    let service_id = args.next()?;
    Some(BookingReference {
        shop_id: shop_id.into(),
        service_id: service_id.into(),
    })
}

fn log_session_changes(mut receiver: watch::Receiver<Option<Identity>>) {
    tokio::spawn(async move {
        while receiver.changed().await.is_ok() {
            match receiver.borrow_and_update().as_ref() {
                Some(identity) => tracing::info!("Session identity is now {}", identity.user_id),
                None => tracing::info!("Session ended"),
            }
        }
    });
}

#[tokio::main]
async fn main() {
    let version = env!("CARGO_PKG_VERSION");

    #[cfg(feature = "local_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::TRACE)
        .pretty()
        .with_file(true)
        .with_writer(std::io::stderr)
        .finish();

    #[cfg(feature = "json_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_span_list(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    tracing::info!("Salon booking version: {}", version);
    dotenvy::dotenv().ok();

    let config_service = match ConfigService::from_env() {
        Ok(config_service) => Arc::new(config_service),
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Using marketplace API at {}",
        config_service.config().api_base_url
    );

    let session_service = Arc::new(SessionService::new(identity_from_env()));
    log_session_changes(session_service.subscribe());
    let app_state = match AppState::new(config_service, session_service) {
        Ok(app_state) => app_state,
        Err(err) => {
            tracing::error!("Could not set up the API client: {}", err);
            std::process::exit(1);
        }
    };

    let reference = reference_from_args(std::env::args().skip(1));
    let console = Console::new(app_state.wizard_service, app_state.session_service);
    if let Err(err) = console
        .run(reference, BufReader::new(tokio::io::stdin()))
        .await
    {
        tracing::error!("Console failed: {}", err);
        std::process::exit(1);
    }
}
