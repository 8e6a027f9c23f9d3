use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "plant_identifier_lib=info";

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// `PLANT_ID_LOG_FORMAT=json` switches to JSON lines. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let json = std::env::var("PLANT_ID_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let result = if json {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .try_init()
        } else {
            tracing_subscriber::fmt().with_env_filter(filter).try_init()
        };

        if let Err(e) = result {
            eprintln!("Tracing subscriber already installed: {}", e);
        }
    });
}
