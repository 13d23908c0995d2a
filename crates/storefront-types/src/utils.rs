//! Utility functions shared across storefront crates.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current time as epoch seconds.
///
/// Falls back to 0 if the system clock is before the epoch.
pub fn current_timestamp() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs())
		.unwrap_or(0)
}

/// Utility function to truncate an id string for display purposes.
///
/// Shows only the first 8 characters followed by ".." for longer strings.
/// Counts characters rather than bytes so multibyte ids stay intact.
pub fn truncate_id(id: &str) -> String {
	match id.char_indices().nth(8) {
		Some((idx, _)) => format!("{}..", &id[..idx]),
		None => id.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_truncate_id() {
		assert_eq!(truncate_id("short"), "short");
		assert_eq!(truncate_id("12345678"), "12345678");
		assert_eq!(truncate_id("123456789abcdef"), "12345678..");
	}

	#[test]
	fn test_truncate_id_multibyte() {
		// A multibyte char straddling the cut point must not split.
		assert_eq!(truncate_id("abcdefgü-customer"), "abcdefgü..");
		assert_eq!(truncate_id("日本語のユーザー識別子"), "日本語のユーザー..");
		assert_eq!(truncate_id("ümlautid"), "ümlautid");
	}
}
