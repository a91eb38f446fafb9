//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! LOG_LEVEL takes filter directives (e.g. "debug", or
//! "info,quiz=debug,slovicka_backend=debug"); LOG_FORMAT selects "pretty"
//! (default) or "json" structured logs. Targets are included in the output:
//! `quiz` carries selection and evaluation events, `slovicka_backend` the
//! server lifecycle.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
        EnvFilter::new("info,quiz=debug,slovicka_backend=debug,tower_http=info,axum=info")
    });

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
