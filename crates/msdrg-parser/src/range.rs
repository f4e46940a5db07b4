//! DRG range expansion
//!
//! The manual writes DRG lists as ranges (`371-373`), singletons (`303`) or
//! comma-separated mixtures (`371,373`). Downstream code wants the ordered
//! expansion as 3-digit zero-padded identifiers.

/// Expand a DRG range token into its ordered list of 3-digit DRGs
///
/// Order follows the input; duplicates are kept (consumers either take index 0
/// or iterate). A non-numeric part passes through unchanged so future
/// alphanumeric identifiers survive the round trip.
pub fn expand_drg_range(range: &str) -> Vec<String> {
    let mut drgs = Vec::new();
    let cleaned = range.replace(' ', "");

    for part in cleaned.split(',') {
        if let Some((start, end)) = part.split_once('-') {
            match (start.parse::<u32>(), end.parse::<u32>()) {
                (Ok(start), Ok(end)) => {
                    for n in start..=end {
                        drgs.push(format!("{n:03}"));
                    }
                }
                _ => drgs.push(part.to_string()),
            }
        } else if let Ok(n) = part.parse::<u32>() {
            drgs.push(format!("{n:03}"));
        } else if !part.is_empty() {
            drgs.push(part.to_string());
        }
    }

    drgs
}
