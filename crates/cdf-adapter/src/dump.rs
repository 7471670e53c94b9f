//! `cdfdump`-backed store for real CDF files.
//!
//! Binary CDF decoding is delegated to the NASA CDF distribution's
//! `cdfdump` tool; this module parses its text output into a
//! [`MemoryStore`]. Direct bindings to the CDF C library would avoid the
//! subprocess, but the tool is ubiquitous wherever CDF data is handled and
//! keeps this crate free of native dependencies.

use std::path::Path;
use std::process::Command;

use ndarray::ArrayD;
use swa_common::{SwaError, SwaResult};
use tracing::debug;

use crate::store::{CdfStore, MemoryStore, VarData};

/// A CDF file materialized from `cdfdump` output.
#[derive(Debug, Clone)]
pub struct DumpStore {
    inner: MemoryStore,
}

impl DumpStore {
    /// Open `path` by running `cdfdump -dump all` and parsing its output.
    pub fn open<P: AsRef<Path>>(path: P) -> SwaResult<Self> {
        let path = path.as_ref();
        let output = Command::new("cdfdump")
            .arg("-dump")
            .arg("all")
            .arg(path)
            .output()
            .map_err(|e| SwaError::Command(format!("failed to run cdfdump: {}", e)))?;

        if !output.status.success() {
            return Err(SwaError::Command(format!(
                "cdfdump failed for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let inner = parse_dump(&text)?;
        debug!(
            path = %path.display(),
            variables = inner.variable_names().len(),
            "parsed cdfdump output"
        );
        Ok(Self { inner })
    }
}

impl CdfStore for DumpStore {
    fn global_attribute(&self, name: &str) -> Option<String> {
        self.inner.global_attribute(name)
    }

    fn variable_names(&self) -> Vec<String> {
        self.inner.variable_names()
    }

    fn variable_data(&self, name: &str) -> SwaResult<VarData> {
        self.inner.variable_data(name)
    }

    fn variable_attribute(&self, name: &str, attr: &str) -> Option<String> {
        self.inner.variable_attribute(name, attr)
    }
}

/// Parse the text produced by `cdfdump -dump all`.
fn parse_dump(text: &str) -> SwaResult<MemoryStore> {
    let mut store = MemoryStore::new();

    // Section boundaries in cdfdump output are underlined headers; the
    // parser keys off the header lines themselves.
    let mut in_globals = false;
    let mut pending_global: Option<String> = None;

    let mut current_var: Option<VarBuilder> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("Global Attributes") {
            in_globals = true;
            continue;
        }
        if trimmed.starts_with("Variable Information") || trimmed.starts_with("Variable (No.") {
            in_globals = false;
            if trimmed.starts_with("Variable (No.") {
                if let Some(builder) = current_var.take() {
                    builder.finish(&mut store)?;
                }
                current_var = Some(VarBuilder::default());
            }
            continue;
        }

        if in_globals {
            // "Descriptor (1 entry):" then "0 (CDF_CHAR/12): \"SWA-EAS1-NMc\""
            if let Some(name) = trimmed.strip_suffix("entry):").or_else(|| trimmed.strip_suffix("entries):")) {
                pending_global = name.split('(').next().map(|s| s.trim().to_string());
            } else if let (Some(name), Some(value)) = (&pending_global, extract_quoted(trimmed)) {
                store.set_global(name, &value);
            }
            continue;
        }

        if let Some(builder) = current_var.as_mut() {
            builder.feed(trimmed);
        }
    }

    if let Some(builder) = current_var.take() {
        builder.finish(&mut store)?;
    }

    Ok(store)
}

#[derive(Debug, Default)]
struct VarBuilder {
    name: Option<String>,
    is_epoch: bool,
    dim_sizes: Vec<usize>,
    values: Vec<f64>,
    epochs: Vec<i64>,
    attributes: Vec<(String, String)>,
    records: usize,
}

impl VarBuilder {
    fn feed(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix("Name:") {
            self.name = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("Data Type:") {
            self.is_epoch = rest.contains("TT2000") || rest.contains("EPOCH");
        } else if let Some(rest) = line.strip_prefix("Dim Sizes:") {
            self.dim_sizes = rest
                .split(',')
                .filter_map(|tok| tok.trim().parse().ok())
                .collect();
        } else if let Some(rest) = line.strip_prefix("Record #") {
            self.records += 1;
            if let Some((_, data)) = rest.split_once(':') {
                self.push_values(data);
            }
        } else if let Some((attr, rest)) = parse_attribute_line(line) {
            self.attributes.push((attr, rest));
        } else if self.records > 0 && looks_numeric(line) {
            // Record payloads wrap across lines.
            self.push_values(line);
        }
    }

    fn push_values(&mut self, data: &str) {
        for tok in data.split(|c: char| c == ',' || c.is_whitespace()) {
            let tok = tok.trim();
            if tok.is_empty() {
                continue;
            }
            if self.is_epoch {
                if let Ok(v) = tok.parse::<i64>() {
                    self.epochs.push(v);
                    self.values.push(v as f64);
                }
            } else if let Ok(v) = tok.parse::<f64>() {
                self.values.push(v);
            }
        }
    }

    fn finish(self, store: &mut MemoryStore) -> SwaResult<()> {
        let name = match self.name {
            Some(name) => name,
            // A trailing section without a Name line is not a variable.
            None => return Ok(()),
        };

        // Every declared dimension is kept, singletons included: a burst
        // counts variable dimensioned [1, 4, 2] must materialize as rank 4
        // [record, 1, 4, 2], not collapse to [record, 4, 2].
        let mut shape = Vec::with_capacity(1 + self.dim_sizes.len());
        shape.push(self.records.max(1));
        shape.extend(self.dim_sizes.iter().copied());

        let expected: usize = shape.iter().product();
        if self.values.len() != expected {
            return Err(SwaError::InvalidData(format!(
                "variable '{}': {} values for shape {:?}",
                name,
                self.values.len(),
                shape
            )));
        }

        let data = ArrayD::from_shape_vec(shape, self.values)
            .map_err(|e| SwaError::InvalidData(format!("variable '{}': {}", name, e)))?;
        let epochs = if self.is_epoch { Some(self.epochs) } else { None };
        store.insert(&name, data, epochs);
        for (attr, value) in self.attributes {
            store.set_attribute(&name, &attr, &value);
        }
        Ok(())
    }
}

/// "UNITS   CDF_CHAR { \"Degrees\" }" -> ("UNITS", "Degrees")
fn parse_attribute_line(line: &str) -> Option<(String, String)> {
    let brace = line.find('{')?;
    let (head, tail) = line.split_at(brace);
    let attr = head.split_whitespace().next()?;
    if !attr.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
        return None;
    }
    let value = extract_quoted(tail)?;
    Some((attr.to_string(), value))
}

fn extract_quoted(s: &str) -> Option<String> {
    let start = s.find('"')?;
    let end = s[start + 1..].find('"')?;
    Some(s[start + 1..start + 1 + end].to_string())
}

fn looks_numeric(line: &str) -> bool {
    let mut any = false;
    for tok in line.split(|c: char| c == ',' || c.is_whitespace()) {
        let tok = tok.trim();
        if tok.is_empty() {
            continue;
        }
        if tok.parse::<f64>().is_err() {
            return false;
        }
        any = true;
    }
    any
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
Global Attributes (2 attributes)
=========================================
Descriptor (1 entry):
	0 (CDF_CHAR/12): 	"SWA-EAS1-NMc"
Instrument (1 entry):
	0 (CDF_CHAR/3): 	"SWA"

Variable (No. 0)
=========================================
Name:     SWA_EAS1_SCET
Data Type:     CDF_TT2000
Dim Sizes:
Attribute
  UNITS   CDF_CHAR { "ns" }
Record # 1: 0
Record # 2: 1000000000

Variable (No. 1)
=========================================
Name:     SWA_EAS_AZIMUTH
Data Type:     CDF_REAL4
Dim Sizes:     2
Attribute
  UNITS   CDF_CHAR { "Degrees" }
Record # 1: 0.0, 11.25
"#;

    #[test]
    fn test_parse_globals() {
        let store = parse_dump(SAMPLE).unwrap();
        assert_eq!(
            store.global_attribute("Descriptor").as_deref(),
            Some("SWA-EAS1-NMc")
        );
        assert_eq!(store.global_attribute("Instrument").as_deref(), Some("SWA"));
    }

    #[test]
    fn test_parse_epoch_variable() {
        let store = parse_dump(SAMPLE).unwrap();
        let data = store.variable_data("SWA_EAS1_SCET").unwrap();
        assert_eq!(data.epochs.as_deref(), Some(&[0, 1_000_000_000][..]));
        assert_eq!(data.values.shape(), &[2]);
    }

    #[test]
    fn test_parse_numeric_variable_with_units() {
        let store = parse_dump(SAMPLE).unwrap();
        let data = store.variable_data("SWA_EAS_AZIMUTH").unwrap();
        assert_eq!(data.values.shape(), &[1, 2]);
        assert_eq!(
            store.variable_attribute("SWA_EAS_AZIMUTH", "UNITS").as_deref(),
            Some("Degrees")
        );
    }

    #[test]
    fn test_multi_dim_shape_keeps_singleton_dims() {
        // Burst-mode counts are dimensioned [elevation=1, energy, azimuth];
        // the single elevation bin must survive into the shape.
        let sample = r#"
Global Attributes (1 attribute)
=========================================
Descriptor (1 entry):
	0 (CDF_CHAR/16): 	"SWA-EAS-2DBurstc"

Variable (No. 0)
=========================================
Name:     SWA_EAS_BM_Data
Data Type:     CDF_REAL4
Dim Sizes:     1, 4, 2
Attribute
  UNITS   CDF_CHAR { "Total Counts" }
Record # 1: 0, 1, 2, 3, 4, 5, 6, 7
"#;
        let store = parse_dump(sample).unwrap();
        let data = store.variable_data("SWA_EAS_BM_Data").unwrap();
        assert_eq!(data.values.shape(), &[1, 1, 4, 2]);
        assert_eq!(data.values[[0, 0, 3, 1]], 7.0);
    }

    #[test]
    fn test_missing_cdfdump_is_command_error() {
        // Open a path with no cdfdump on PATH or a nonexistent file; either
        // way the error must be Command, never a panic.
        let err = DumpStore::open("/nonexistent/file.cdf").unwrap_err();
        assert!(matches!(err, SwaError::Command(_)));
    }
}
