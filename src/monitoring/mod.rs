/*!
 * Monitoring
 * Structured tracing setup and per-command spans
 */

mod tracer;

pub use tracer::{init_tracing, span_command, CommandSpan};
