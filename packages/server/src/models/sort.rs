//! Page-scoped sort selector.
//!
//! Reorders an already-paginated slice in place. Because it runs after the
//! pager has taken its slice, a sort key can only rearrange entities within
//! the current page; it never pulls an entity in from another page. Callers
//! that need a globally sorted listing must push the ordering into the store
//! query before slicing.

use super::model::ModelResponse;
use super::video::VideoResponse;

/// Model sort keys. Unknown or absent keys leave the slice untouched.
pub fn apply_model_sort(items: &mut [ModelResponse], sort: Option<&str>) {
    match sort {
        Some("a-z") => items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        Some("z-a") => items.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase())),
        Some("most-videos") => items.sort_by(|a, b| b.videos.len().cmp(&a.videos.len())),
        Some("least-videos") => items.sort_by(|a, b| a.videos.len().cmp(&b.videos.len())),
        _ => {}
    }
}

/// Video sort keys. Unknown or absent keys leave the slice untouched.
pub fn apply_video_sort(items: &mut [VideoResponse], sort: Option<&str>) {
    match sort {
        Some("recent") => items.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at)),
        Some("oldest") => items.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at)),
        Some("most-views") => items.sort_by(|a, b| b.views.cmp(&a.views)),
        Some("title-az") => items.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        _ => {}
    }
}
