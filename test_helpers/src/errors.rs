//! Assertions over error messages and their `source()` chains.

use std::error::Error;

use anyhow::{Result, ensure};

/// Rendered messages of `err` and each of its sources, outermost first.
#[must_use]
pub fn chain(err: &(dyn Error + 'static)) -> Vec<String> {
    std::iter::successors(Some(err), |current| (*current).source())
        .map(ToString::to_string)
        .collect()
}

/// Checks that the top-level message of `err` contains every fragment.
///
/// # Errors
///
/// Returns an error naming the first missing fragment.
pub fn expect_message(err: &(dyn Error + 'static), fragments: &[&str]) -> Result<()> {
    let message = err.to_string();
    for fragment in fragments {
        ensure!(
            message.contains(fragment),
            "expected `{fragment}` in `{message}`"
        );
    }
    Ok(())
}
