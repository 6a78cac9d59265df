//! Tracing subscriber setup shared by both binaries.
//!
//! The filter comes from `RUST_LOG` (default `info`). Setting
//! `LOG_FORMAT=json` switches to one JSON object per line. Logs go to
//! stderr so the panel's counter line on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if wants_json(std::env::var("LOG_FORMAT").ok().as_deref()) {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn wants_json(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_format_is_opt_in() {
        assert!(!wants_json(None));
        assert!(!wants_json(Some("pretty")));
        assert!(wants_json(Some("JSON")));
    }
}
