//! `tracing` subscriber setup for the `immo` binary.
//!
//! Log lines go to stderr so reports printed on stdout stay pipeable.

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;

use crate::error::AppError;

/// Compact one-line formatter: `[level-symbol] target: fields`.
pub struct ImmoFormatter;

impl<S, N> FormatEvent<S, N> for ImmoFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let symbol = level_symbol(*meta.level());

        write!(writer, "{symbol} {}: ", meta.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_symbol(level: Level) -> &'static str {
    match level {
        Level::TRACE => "[ ]",
        Level::DEBUG => "[?]",
        Level::INFO => "[+]",
        Level::WARN => "[*]",
        Level::ERROR => "[-]",
    }
}

/// Install the global subscriber with the given filter directive.
///
/// `filter` uses `EnvFilter` syntax (e.g. `warn`, `immo_calc=debug`).
pub fn init(filter: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| AppError::new(2, format!("Invalid log filter '{filter}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(ImmoFormatter)
        .try_init()
        .map_err(|e| AppError::new(4, format!("Failed to install logger: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_filter_is_an_input_error() {
        let err = init("immo_calc=notalevel").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn symbols_are_distinct() {
        let all = [Level::TRACE, Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR];
        let mut symbols: Vec<_> = all.iter().map(|l| level_symbol(*l)).collect();
        symbols.dedup();
        assert_eq!(symbols.len(), 5);
    }
}
