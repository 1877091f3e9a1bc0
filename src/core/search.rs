//! Search index + matching for the search overlay.
//!
//! Matching is a case-insensitive substring test on title and category.
//! Results keep catalog order.

use super::video::VideoItem;

/// Most results the overlay shows.
pub const RESULT_LIMIT: usize = 15;

/// Pre-lowered haystacks for one catalog entry.
#[derive(Debug, Clone)]
pub struct SearchEntry {
    /// Index into the catalog's video list.
    pub index: usize,
    pub title_lower: String,
    pub category_lower: String,
}

/// Build the index.  Unplayable videos are never searchable.
pub fn build_index(videos: &[VideoItem]) -> Vec<SearchEntry> {
    videos
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_playable())
        .map(|(index, v)| SearchEntry {
            index,
            title_lower: v.title.to_lowercase(),
            category_lower: v.category.to_lowercase(),
        })
        .collect()
}

/// Return up to `limit` catalog indices matching `query`.
///
/// The raw query is lowered but not trimmed, so `"ghost "` only matches
/// text that contains the trailing space.  A blank query matches nothing.
pub fn search_entries(entries: &[SearchEntry], query: &str, limit: usize) -> Vec<usize> {
    if query.trim().is_empty() || limit == 0 {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| e.title_lower.contains(&needle) || e.category_lower.contains(&needle))
        .take(limit)
        .map(|e| e.index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::video;
    use crate::core::video::VideoType;

    fn catalog() -> Vec<VideoItem> {
        let mut a = video("a", "u", VideoType::Shorts);
        a.title = "The Haunted Doll".into();
        a.category = "Dolls".into();
        let mut b = video("b", "u", VideoType::Long);
        b.title = "Cellar".into();
        b.category = "Haunted Houses".into();
        let mut c = video("c", "", VideoType::Long);
        c.title = "Haunted but unplayable".into();
        vec![a, b, c]
    }

    #[test]
    fn blank_query_matches_nothing() {
        let index = build_index(&catalog());
        assert!(search_entries(&index, "", RESULT_LIMIT).is_empty());
        assert!(search_entries(&index, "   ", RESULT_LIMIT).is_empty());
    }

    #[test]
    fn matches_title_or_category_case_insensitively() {
        let index = build_index(&catalog());
        assert_eq!(search_entries(&index, "HAUNTED", RESULT_LIMIT), vec![0, 1]);
        assert_eq!(search_entries(&index, "dolls", RESULT_LIMIT), vec![0]);
        assert!(search_entries(&index, "zombie", RESULT_LIMIT).is_empty());
    }

    #[test]
    fn limit_is_respected() {
        let videos: Vec<VideoItem> = (0..40)
            .map(|i| {
                let mut v = video(&format!("v{i}"), "u", VideoType::Shorts);
                v.title = format!("ghost {i}");
                v
            })
            .collect();
        let index = build_index(&videos);
        let hits = search_entries(&index, "ghost", RESULT_LIMIT);
        assert_eq!(hits.len(), RESULT_LIMIT);
        assert_eq!(hits[0], 0);
    }
}
