use crate::crawler::CrawlRecord;
use crate::output::OutputResult;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the crawl results to a pretty-printed JSON file
///
/// Shape: one top-level key per visited URL, each mapping to its record:
///
/// ```json
/// {
///   "http://a.test/": { "urls": ["http://a.test/x"] }
/// }
/// ```
///
/// Keys come pre-sorted from the snapshot, so output is deterministic for a
/// given result set.
pub fn write_json(path: &Path, results: &BTreeMap<String, CrawlRecord>) -> OutputResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
