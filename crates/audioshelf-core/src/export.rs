/// Export: write a book list as JSON, CSV or a plain-text summary.
///
/// All writers take any `io::Write`, so the CLI can target stdout and tests
/// can target a `Vec<u8>`.
use crate::model::Book;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

/// Errors raised while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Output format for a book list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Write `books` to `out` in the given format.
pub fn write_books<W: Write>(
    out: W,
    books: &[Book],
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Text => write_text(out, books),
        ExportFormat::Json => write_json(out, books),
        ExportFormat::Csv => write_csv(out, books),
    }
}

/// Pretty-printed JSON array of books.
pub fn write_json<W: Write>(mut out: W, books: &[Book]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut out, books)?;
    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
struct CsvRow<'a> {
    book: &'a str,
    folder: String,
    cover: String,
    track: usize,
    name: &'a str,
    path: String,
}

/// One CSV row per book file, tracks numbered from 1 in play order.
pub fn write_csv<W: Write>(out: W, books: &[Book]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(out);
    for book in books {
        let folder = book.folder_path.display().to_string();
        let cover = book
            .cover_image_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        for (i, file) in book.files.iter().enumerate() {
            wtr.serialize(CsvRow {
                book: &book.caption,
                folder: folder.clone(),
                cover: cover.clone(),
                track: i + 1,
                name: &file.name,
                path: file.file_path.display().to_string(),
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Human-readable listing followed by a totals line.
pub fn write_text<W: Write>(mut out: W, books: &[Book]) -> Result<(), ExportError> {
    for book in books {
        let files = book.files.len();
        writeln!(
            out,
            "{}  [{} {}]",
            book.caption,
            format_count(files as u64),
            if files == 1 { "file" } else { "files" }
        )?;
        writeln!(out, "  folder: {}", book.folder_path.display())?;
        if let Some(cover) = &book.cover_image_path {
            writeln!(out, "  cover:  {}", cover.display())?;
        }
    }
    let total: usize = books.iter().map(|b| b.files.len()).sum();
    writeln!(
        out,
        "{} books, {} files",
        format_count(books.len() as u64),
        format_count(total as u64)
    )?;
    Ok(())
}

/// Format a count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
