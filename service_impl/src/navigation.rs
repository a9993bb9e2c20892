use service::navigation::NavigationService;

/// Navigation for the console front end: there is no browser, so the
/// checkout url is printed for the customer to open.
pub struct ConsoleNavigationServiceImpl;

impl NavigationService for ConsoleNavigationServiceImpl {
    fn redirect(&self, url: &str) {
        tracing::info!("Redirecting to {}", url);
        println!("Continue the payment at: {}", url);
    }
}
