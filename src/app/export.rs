use crate::config::OutputFormat;
use crate::domain::model::{ItemSummary, MovieDetails};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    id: u64,
    title: &'a str,
    year: i32,
    imdb_score: f64,
    duration: Option<u32>,
    image_url: &'a str,
    url: &'a str,
}

impl<'a> From<&'a ItemSummary> for ItemRow<'a> {
    fn from(item: &'a ItemSummary) -> Self {
        Self {
            id: item.id,
            title: &item.title,
            year: item.year,
            imdb_score: item.score,
            duration: item.duration,
            image_url: &item.image_url,
            url: &item.detail_url,
        }
    }
}

/// Writes a list of titles in a machine-readable format. Text output is
/// the renderer's job, so `Text` falls back to JSON here.
pub fn write_items<W: Write>(out: W, format: OutputFormat, items: &[ItemSummary]) -> Result<()> {
    match format {
        OutputFormat::Csv => write_delimited(out, b',', items),
        OutputFormat::Tsv => write_delimited(out, b'\t', items),
        OutputFormat::Json | OutputFormat::Text => write_json(out, items),
    }
}

pub fn write_details<W: Write>(out: W, details: &MovieDetails) -> Result<()> {
    write_json(out, details)
}

fn write_delimited<W: Write>(out: W, delimiter: u8, items: &[ItemSummary]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);
    for item in items {
        writer.serialize(ItemRow::from(item))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
