//! Output tables, manifests and synchronous action responses.
//!
//! Files are written to a temp file next to the destination and renamed into
//! place, so a failed run never leaves a half-written table behind.
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const OUT_TABLES_REL: &str = "out/tables";

pub fn out_tables_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(OUT_TABLES_REL)
}

pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("output path {} has no parent", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    let mut staged = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    staged
        .write_all(bytes)
        .with_context(|| format!("write {}", path.display()))?;
    staged
        .persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("publish {}", path.display()))?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serialize JSON")?;
    write_atomic(path, &bytes)
}

/// Render rows with a header line: comma delimiter, `"` quoting only where
/// needed, `\n` line endings.
pub fn render_csv<R, C>(columns: &[&str], rows: R) -> Result<String>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = String>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(columns).context("write CSV header")?;
    for row in rows {
        writer.write_record(row).context("write CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("flush CSV: {}", err.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

#[derive(Serialize)]
struct TableManifest<'a> {
    primary_key: &'a [&'a str],
    incremental: bool,
}

/// Write `<name>` and `<name>.manifest` under `out/tables`. Returns the table path.
pub fn write_table(
    data_dir: &Path,
    name: &str,
    csv: &str,
    primary_key: &[&str],
) -> Result<PathBuf> {
    let table_path = out_tables_dir(data_dir).join(name);
    write_atomic(&table_path, csv.as_bytes())?;
    let manifest_path = out_tables_dir(data_dir).join(format!("{name}.manifest"));
    write_json(
        &manifest_path,
        &TableManifest {
            primary_key,
            incremental: false,
        },
    )?;
    Ok(table_path)
}

/// Response body of a synchronous action, printed on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value).context("serialize action response")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("write action response")?;
    Ok(())
}

/// Status message returned by validation-style synchronous actions.
#[derive(Debug, Serialize)]
pub struct ValidationMessage {
    pub status: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
}

impl ValidationMessage {
    pub fn info(message: String) -> Self {
        Self {
            status: "success",
            kind: "info",
            message,
        }
    }
}
