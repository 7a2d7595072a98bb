//! JSON output adapter.

use anyhow::Result;
use listing_qa_core::{ResultOutput, ScoreReport};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes one JSON document per report.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    pretty: bool,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), pretty)
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            pretty,
        }
    }

    /// Writes any serializable value as a single JSON document.
    #[allow(clippy::significant_drop_tightening)]
    pub fn write_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, report: &ScoreReport) -> Result<()> {
        self.write_value(report)
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use listing_qa_core::{FingerprintHistory, ScoringResult};
    use std::sync::Arc;

    /// Writer that keeps everything in a shared buffer.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn report() -> ScoreReport {
        ScoreReport {
            result: ScoringResult {
                category: "Footwear".into(),
                required_attrs: vec!["brand".into(), "size".into(), "color".into(), "gender".into()],
                missing_attrs: vec!["gender".into()],
                issues: vec![listing_qa_core::QualityIssue::missing_attributes(&[
                    "gender".to_string(),
                ])],
                quality_score: 90,
                gate_pass: true,
                gate_threshold: 70,
            },
            known_hashes: FingerprintHistory::from(vec!["8f3c0a0000000000".to_string()]),
            images: vec!["front.jpg".into()],
            scored_at: "2024-05-01T10:00:00Z".into(),
        }
    }

    #[test]
    fn test_compact_output_is_one_line() {
        let buffer = SharedBuffer::default();
        let output = JsonOutput::new(Box::new(buffer.clone()), false);

        output.write(&report()).unwrap();
        output.flush().unwrap();

        let text = buffer.contents();
        assert_eq!(text.lines().count(), 1);

        let parsed: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(parsed["category"], "Footwear");
        assert_eq!(parsed["quality_score"], 90);
        assert_eq!(parsed["issues"][0]["code"], "ATTR_MISSING");
        assert_eq!(parsed["known_hashes"][0], "8f3c0a0000000000");
    }

    #[test]
    fn test_pretty_output_spans_lines() {
        let buffer = SharedBuffer::default();
        let output = JsonOutput::new(Box::new(buffer.clone()), true);

        output.write(&report()).unwrap();

        let text = buffer.contents();
        assert!(text.lines().count() > 1);
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["gate_pass"], true);
    }
}
