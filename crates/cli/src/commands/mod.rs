//! CLI command implementations.

pub mod address;
pub mod order;

use serde::Serialize;

/// Write `value` to stdout as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
