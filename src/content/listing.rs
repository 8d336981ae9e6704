//! Home page listing - all posts, newest first

use super::{PostRecord, PostStore, PostSummary};
use crate::error::PostError;

/// Read every post and order the summaries newest-first.
///
/// Dates compare as strings, which is chronological for `YYYY-MM-DD`.
/// Posts sharing a date are ordered by id.
pub fn get_sorted_posts_data(store: &PostStore) -> Result<Vec<PostSummary>, PostError> {
    let mut summaries: Vec<PostSummary> = store
        .list_all_posts()?
        .into_iter()
        .map(PostSummary::from)
        .collect();

    sort_summaries(&mut summaries);
    Ok(summaries)
}

/// Listing for records already read from the store
pub fn summarize(records: &[PostRecord]) -> Vec<PostSummary> {
    let mut summaries: Vec<PostSummary> = records.iter().map(PostRecord::summary).collect();
    sort_summaries(&mut summaries);
    summaries
}

/// Sort by date descending, then id ascending
pub fn sort_summaries(summaries: &mut [PostSummary]) {
    summaries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}
