//! JSON output of a delivered feed.
//!
//! The document written is a [`Feed`]:
//!
//! ```json
//! {
//!   "fetched_at": "2025-05-06T20:30:00Z",
//!   "subject": "technology",
//!   "order_by": "newest",
//!   "items": [
//!     {"title": "...", "section_name": "...", "image_url": "...", "web_url": "..."}
//!   ]
//! }
//! ```

use crate::models::Feed;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `feed` as pretty-printed JSON to `path`, creating parent directories.
///
/// # Arguments
///
/// * `feed` - The delivered feed to serialize
/// * `path` - Destination file; an existing file is overwritten
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization, directory creation or
/// file writing fails.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = feed.items.len()))]
pub async fn write_feed(feed: &Feed, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(feed)?;

    if let Err(e) = ensure_parent_dir(path).await {
        error!(error = %e, "Output directory is not writable");
        return Err(e);
    }

    fs::write(path, json).await?;
    info!("Wrote feed JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewsItem, OrderBy};

    #[tokio::test]
    async fn test_write_feed_round_trips() {
        let dir = std::env::temp_dir().join(format!("newsup-json-{}", std::process::id()));
        let path = dir.join("out").join("feed.json");
        let feed = Feed {
            fetched_at: "2025-05-06T20:30:00Z".to_string(),
            subject: "science".to_string(),
            order_by: OrderBy::Newest,
            items: vec![
                NewsItem::new("First", "Science", "http://img/1", "http://x/1"),
                NewsItem::new("Second", "Science", "http://img/2", "http://x/2"),
            ],
        };

        write_feed(&feed, &path).await.unwrap();

        let written: Feed = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.items, feed.items);
        assert_eq!(written.subject, "science");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
