//! Reading already-extracted statement content from disk.
//!
//! Text dumps separate pages with form feeds.
//! Tables and mixed inputs come as JSON.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs;
use std::path::Path;

use tally_ingest::PageInput;

const PAGE_BREAK: char = '\u{000C}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// Line-oriented text, pages split on form feeds
    Text,
    /// Text whose line breaks were lost, pages split on form feeds
    Continuous,
    /// JSON array of tables (one per page), each an array of rows of cells
    Table,
    /// JSON array of tagged pages: {"kind": "text" | "table" | "continuous", "content": ...}
    Pages,
}

pub fn split_pages(text: &str, shape: Shape) -> Vec<PageInput> {
    text.split(PAGE_BREAK)
        .filter(|p| !p.trim().is_empty())
        .map(|p| match shape {
            Shape::Continuous => PageInput::Continuous(p.to_string()),
            _ => PageInput::Text(p.to_string()),
        })
        .collect()
}

pub fn read_pages(path: &Path, shape: Shape) -> Result<Vec<PageInput>> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let pages = match shape {
        Shape::Text | Shape::Continuous => split_pages(&s, shape),
        Shape::Table => {
            let tables: Vec<Vec<Vec<String>>> = serde_json::from_str(&s)
                .with_context(|| format!("parse tables in {}", path.display()))?;
            tables.into_iter().map(PageInput::Table).collect()
        }
        Shape::Pages => serde_json::from_str(&s)
            .with_context(|| format!("parse pages in {}", path.display()))?,
    };
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("page one\n\u{000C}page two\n\u{000C}  \n", Shape::Text);
        assert_eq!(
            pages,
            vec![
                PageInput::Text("page one\n".into()),
                PageInput::Text("page two\n".into())
            ]
        );
        let pages = split_pages("a 01/01/2023 b", Shape::Continuous);
        assert_eq!(pages, vec![PageInput::Continuous("a 01/01/2023 b".into())]);
    }

    #[test]
    fn test_read_tables_and_tagged_pages() {
        let dir = tempfile::tempdir().unwrap();
        let tables = dir.path().join("tables.json");
        fs::write(&tables, r#"[[["05/03/2023", "PnP Norwood", "45.50", "1,004.48"]]]"#).unwrap();
        let pages = read_pages(&tables, Shape::Table).unwrap();
        assert!(matches!(&pages[0], PageInput::Table(rows) if rows[0][1] == "PnP Norwood"));

        let tagged = dir.path().join("pages.json");
        fs::write(
            &tagged,
            r#"[{"kind": "text", "content": "05/03/2023 PnP 45.50 1,004.48"},
                {"kind": "table", "content": [["Date", "Description"]]}]"#,
        )
        .unwrap();
        let pages = read_pages(&tagged, Shape::Pages).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(matches!(pages[1], PageInput::Table(_)));

        assert!(read_pages(&dir.path().join("nope.txt"), Shape::Text).is_err());
    }
}
