//! Common, IO-related code.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use flate2::{bufread::MultiGzDecoder, write::GzEncoder, Compression};

fn is_gz(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

/// Transparently open a file with gzip decoder.
pub fn open_read_maybe_gz<P>(path: P) -> Result<Box<dyn BufRead>, anyhow::Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("could not open {:?} for reading: {}", path, e))?;
    if is_gz(path) {
        tracing::trace!("Opening {:?} as gzip for reading", path);
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(
            file,
        )))))
    } else {
        tracing::trace!("Opening {:?} as plain text for reading", path);
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Transparently open a file with gzip encoder.
pub fn open_write_maybe_gz<P>(path: P) -> Result<Box<dyn Write>, anyhow::Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| anyhow::anyhow!("could not open {:?} for writing: {}", path, e))?;
    if is_gz(path) {
        tracing::trace!("Opening {:?} as gzip for writing", path);
        Ok(Box::new(GzEncoder::new(
            BufWriter::new(file),
            Compression::default(),
        )))
    } else {
        tracing::trace!("Opening {:?} as plain text for writing", path);
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Read a JSON document from a possibly gzip-compressed file.
pub fn read_json<T, P>(path: P) -> Result<T, anyhow::Error>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let reader = open_read_maybe_gz(path.as_ref())?;
    serde_json::from_reader(reader)
        .map_err(|e| anyhow::anyhow!("could not parse JSON from {:?}: {}", path.as_ref(), e))
}

/// Write `value` as pretty-printed JSON to a possibly gzip-compressed file.
pub fn write_json<T, P>(path: P, value: &T) -> Result<(), anyhow::Error>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let mut writer = open_write_maybe_gz(path.as_ref())?;
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
