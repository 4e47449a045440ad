//! Tracing subscriber setup. `log` records from the library crates are
//! bridged into the same subscriber.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "surat_core=info,surat_content=info,surat_auth=info,\
surat_google=info,surat_api=info,surat_cli=info,surat=info,tower_http=info";

const VERBOSE_FILTER: &str = "surat_core=debug,surat_content=debug,surat_auth=debug,\
surat_google=debug,surat_api=debug,surat_cli=debug,surat=debug,tower_http=debug";

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("logging already initialised: {e}");
    }
}
