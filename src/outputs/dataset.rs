//! CSV dataset writer.
//!
//! One row per [`NewsItem`], newest first:
//!
//! ```text
//! date,title,time,link,content,symbols_found
//! 2025-03-04,Tesla opens new plant,"March 04, 2025",https://…,"…","[""TSLA""]"
//! ```
//!
//! `symbols_found` is the sorted ticker set rendered as a JSON list.

use crate::error::NewsError;
use crate::models::NewsItem;
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
struct DatasetRow<'a> {
    date: String,
    title: &'a str,
    time: &'a str,
    link: &'a str,
    content: &'a str,
    symbols_found: String,
}

impl<'a> DatasetRow<'a> {
    fn from_item(item: &'a NewsItem) -> Result<Self, NewsError> {
        Ok(Self {
            date: item.published_date.format("%Y-%m-%d").to_string(),
            title: &item.title,
            time: &item.raw_time,
            link: item.link.as_str(),
            content: &item.content,
            symbols_found: serde_json::to_string(&item.symbols)?,
        })
    }
}

/// Render `items` as CSV bytes, newest first.
pub fn render_dataset(items: &[NewsItem]) -> Result<Vec<u8>, NewsError> {
    let mut sorted: Vec<&NewsItem> = items.iter().collect();
    sorted.sort_by(|a, b| {
        b.published_date
            .cmp(&a.published_date)
            .then_with(|| a.title.cmp(&b.title))
    });

    let mut writer = csv::Writer::from_writer(Vec::new());
    if sorted.is_empty() {
        writer.write_record(["date", "title", "time", "link", "content", "symbols_found"])?;
    }
    for item in sorted {
        writer.serialize(DatasetRow::from_item(item)?)?;
    }
    writer.into_inner().map_err(|e| NewsError::Io(e.into_error()))
}

/// Write the dataset to `path`, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn write_dataset(items: &[NewsItem], path: impl AsRef<Path>) -> Result<(), NewsError> {
    let path = path.as_ref();
    let bytes = render_dataset(items)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, bytes).await?;
    info!(rows = items.len(), "Wrote news dataset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use url::Url;

    fn item(title: &str, day: u32, symbols: &[&str]) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            raw_time: format!("March {day:02}, 2025"),
            published_date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            date_known: true,
            link: Url::parse(&format!("https://www.prnewswire.com/news-releases/{day}.html")).unwrap(),
            content: "Line one\nLine, two".to_string(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_dataset_header_and_order() {
        let items = vec![item("Older", 2, &[]), item("Newer", 9, &["TSLA", "GM"])];
        let csv_text = String::from_utf8(render_dataset(&items).unwrap()).unwrap();
        let mut lines = csv_text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "date,title,time,link,content,symbols_found"
        );
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "2025-03-09");
        assert_eq!(&rows[0][1], "Newer");
        assert_eq!(&rows[0][2], "March 09, 2025");
        assert_eq!(&rows[0][4], "Line one\nLine, two");
        assert_eq!(&rows[0][5], r#"["GM","TSLA"]"#);
        assert_eq!(&rows[1][5], "[]");
    }

    #[test]
    fn test_render_empty_dataset_keeps_header() {
        let csv_text = String::from_utf8(render_dataset(&[]).unwrap()).unwrap();
        assert_eq!(csv_text.trim_end(), "date,title,time,link,content,symbols_found");
    }

    #[tokio::test]
    async fn test_write_dataset_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/parsed_news.csv");
        write_dataset(&[item("Only", 4, &["F"])], &path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.starts_with("date,title,time,link,content,symbols_found"));
        assert!(written.contains("https://www.prnewswire.com/news-releases/4.html"));
    }
}
