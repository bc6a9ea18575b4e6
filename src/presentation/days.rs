//! Day blocks as shown on the page and posted back for export

use crate::{models::DayItinerary, services::itinerary::strip_bold_headers};

/// One display block per generated day, in day order
pub fn day_blocks(days: &[DayItinerary]) -> Vec<String> {
    days.iter().map(|day| day.text.clone()).collect()
}

/// Clean day blocks posted by the download form.
///
/// Each block keeps its boundaries: bold header lines are dropped, surrounding
/// whitespace trimmed, and blank blocks skipped.
pub fn normalise_blocks(blocks: &[String]) -> Vec<String> {
    blocks
        .iter()
        .map(|block| strip_bold_headers(block))
        .filter(|block| !block.is_empty())
        .collect()
}
