//! Document loading.
//!
//! Files and streams are read fully into memory, gunzipped when they carry
//! the gzip magic bytes, and decoded into a [`Dmap`].

use anyhow::{bail, Context, Result};
use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::document::parser::Format;
use crate::document::tree::Dmap;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and decodes a file.
///
/// When `format` is `None` it is guessed from the file name (`.yaml`/`.yml`,
/// optionally followed by `.gz`, is YAML; anything else is JSON).
///
/// # Examples
///
/// ```no_run
/// use dmap::file::loader::load_file;
/// use dmap::path;
///
/// let dmap = load_file("config.yaml", None).unwrap();
/// let name = dmap.get_str(path!["name"]).unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read, is corrupted gzip data, or
/// does not decode in the chosen format.
pub fn load_file<P: AsRef<Path>>(path: P, format: Option<Format>) -> Result<Dmap> {
    let path_ref = path.as_ref();
    let bytes = fs::read(path_ref)
        .with_context(|| format!("Failed to read file {}", path_ref.display()))?;
    let bytes = decompress_if_gzipped(bytes)?;

    let format = format.unwrap_or_else(|| Format::from_path(path_ref));
    debug!("loading {} as {:?}", path_ref.display(), format);

    Dmap::from_slice(&bytes, format)
        .with_context(|| format!("Failed to parse {} as {:?}", path_ref.display(), format))
}

/// Loads and decodes everything readable from `reader`.
///
/// When `format` is `None` the input is tried as JSON first and then as a YAML
/// mapping or sequence.
pub fn load_from_reader<R: Read>(mut reader: R, format: Option<Format>) -> Result<Dmap> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;
    let bytes = decompress_if_gzipped(buffer)?;

    match format {
        Some(format) => Dmap::from_slice(&bytes, format)
            .with_context(|| format!("Failed to parse input as {:?}", format)),
        None => parse_auto(&bytes),
    }
}

/// Loads and decodes standard input.
pub fn load_from_stdin(format: Option<Format>) -> Result<Dmap> {
    load_from_reader(std::io::stdin().lock(), format)
}

/// Tries JSON, then YAML.
///
/// Almost any text is a valid YAML scalar, so the YAML fallback only accepts
/// documents whose root is a mapping or sequence. Scalar YAML documents need
/// an explicit format.
fn parse_auto(bytes: &[u8]) -> Result<Dmap> {
    let json_err = match Dmap::from_json_slice(bytes) {
        Ok(dmap) => return Ok(dmap),
        Err(err) => err,
    };
    debug!("input is not JSON ({}), trying YAML", json_err);

    let dmap = Dmap::from_yaml_slice(bytes)
        .context("Failed to parse input: it is neither valid JSON nor valid YAML")?;
    if !dmap.value().is_container() {
        bail!(
            "Failed to parse input as JSON ({}); as YAML it is a bare {}, use --format yaml to accept it",
            json_err,
            dmap.value().kind()
        );
    }
    Ok(dmap)
}

fn decompress_if_gzipped(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }

    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes.as_slice());
    let mut content = Vec::new();
    decoder
        .read_to_end(&mut content)
        .context("Failed to decompress gzipped input - data may be corrupted")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Value;
    use crate::path;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_reader_auto_detects_json() {
        let dmap = load_from_reader(&br#"{"a": [1, 2]}"#[..], None).unwrap();
        assert_eq!(dmap.get_i64(path!["a", 1]).unwrap(), 2);
    }

    #[test]
    fn test_reader_auto_falls_back_to_yaml() {
        let dmap = load_from_reader(&b"a:\n  - x\n  - y\n"[..], None).unwrap();
        assert_eq!(dmap.get_str(path!["a", 0]).unwrap(), "x");
    }

    #[test]
    fn test_reader_explicit_format_does_not_fall_back() {
        let result = load_from_reader(&b"a: b\n"[..], Some(Format::Json));
        assert!(result.is_err());
    }

    #[test]
    fn test_reader_neither_format() {
        let err = load_from_reader(&b"{ [ unbalanced"[..], None).unwrap_err();
        assert!(err.to_string().contains("neither valid JSON nor valid YAML"));
    }

    #[test]
    fn test_reader_auto_rejects_bare_yaml_scalar() {
        let err = load_from_reader(&b"this is { not json"[..], None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bare string"), "{}", message);
        assert!(message.contains("--format yaml"), "{}", message);

        let dmap = load_from_reader(&b"this is { not json"[..], Some(Format::Yaml)).unwrap();
        assert_eq!(dmap.value(), &Value::from("this is { not json"));
    }

    #[test]
    fn test_reader_gzipped() {
        let compressed = gzip(br#"{"name": "Alice"}"#);
        let dmap = load_from_reader(compressed.as_slice(), None).unwrap();
        assert_eq!(dmap.get(path!["name"]).unwrap().value(), &Value::from("Alice"));
    }

    #[test]
    fn test_corrupted_gzip() {
        let mut bytes = GZIP_MAGIC.to_vec();
        bytes.extend_from_slice(b"not gzip data");
        let err = decompress_if_gzipped(bytes).unwrap_err();
        assert!(err.to_string().contains("decompress"));
    }

    #[test]
    fn test_load_gzipped_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.yml.gz");
        fs::write(&path, gzip(b"items: [1, 2, 3]\n")).unwrap();

        let dmap = load_file(&path, None).unwrap();
        assert_eq!(dmap.get_array(path!["items"]).unwrap().len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file("/definitely/not/here.json", None).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
