use tracing_subscriber::EnvFilter;

/// Install a formatted `tracing` subscriber for host applications.
///
/// `RUST_LOG` directives are honored; service events default to `info`.
/// Calling this twice is harmless: the second install is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(
        "services=info"
            .parse()
            .unwrap_or_else(|_| tracing::Level::INFO.into()),
    );
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
