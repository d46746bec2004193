use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};

use anyhow::{Context, Result};
use meshcap::{Decoder, RecordWriter, Summary};
use regex::Regex;
use tracing::{debug, info};

const CHUNK_SIZE: usize = 1024;
const PROGRESS_INTERVAL: usize = 100;

/// Lines of `reader` with the line ending removed.
///
/// Invalid UTF-8 is replaced rather than failing the read, so a corrupt line still
/// yields a record carrying its decode error.
pub fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(match String::from_utf8(line) {
            Ok(line) => line,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    })
}

/// Decode capture lines from `reader` and write one CSV row per non-blank line.
///
/// Lines are decoded in parallel chunks; row order matches input order.
pub fn decode<R: BufRead, W: Write>(
    reader: R,
    dest: W,
    decoder: &Decoder,
    topic: Option<&Regex>,
) -> Result<Summary> {
    let mut writer = RecordWriter::new(dest).context("writing header")?;
    let mut summary = Summary::default();
    let mut lines = lossy_lines(reader);
    let mut line_no = 1;

    loop {
        let mut chunk = Vec::with_capacity(CHUNK_SIZE);
        for line in lines.by_ref().take(CHUNK_SIZE) {
            chunk.push(line.context("reading input")?);
        }
        if chunk.is_empty() {
            break;
        }
        debug!(first = line_no, len = chunk.len(), "decoding chunk");

        for record in decoder.decode_lines(line_no, &chunk) {
            if let Some(rx) = topic {
                if !rx.is_match(&record.topic) {
                    continue;
                }
            }
            writer.write(&record).context("writing record")?;
            summary.add(&record);
            if summary.records % PROGRESS_INTERVAL == 0 {
                info!("processed {} messages", summary.records);
            }
        }
        line_no += chunk.len();
    }

    writer.into_inner().context("flushing output")?;
    Ok(summary)
}

pub fn decode_file(input: &Path, output: &Path, decoder: &Decoder, topic: Option<&Regex>) -> Result<()> {
    let src = File::open(input).with_context(|| format!("opening input {input:?}"))?;
    let dest =
        File::create(output).with_context(|| format!("failed to create output {output:?}"))?;

    let summary = decode(BufReader::new(src), dest, decoder, topic)?;

    info!(
        records = summary.records,
        errors = summary.errors,
        "wrote {output:?}"
    );
    for (kind, count) in &summary.error_kinds {
        info!("  error {kind}: {count}");
    }
    for (name, count) in &summary.message_types {
        info!("  message {name}: {count}");
    }
    for (name, count) in &summary.payload_types {
        info!("  payload {name}: {count}");
    }
    for (key, count) in &summary.keys {
        info!("  key {key}: {count}");
    }
    if let Some(rate) = summary.decrypt_rate() {
        info!("decrypted {:.1}% of encrypted packets", rate * 100.0);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshcap::FlatRecord;

    const INPUT: &str = "01.02.2025 10:11:12 | msh/EU_868/2/e/LongFast/!a1b2c3d4 | 0a0422020801

01.02.2025 10:11:13 | msh/EU_868/2/e/LongFast/!a1b2c3d4 | zz
only | two
";

    fn rows(out: &[u8]) -> Vec<FlatRecord> {
        csv::Reader::from_reader(out)
            .deserialize()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn decode_all() {
        let mut out = Vec::new();

        let summary = decode(INPUT.as_bytes(), &mut out, &Decoder::default(), None).unwrap();

        assert_eq!(summary.records, 3);
        assert_eq!(summary.errors, 2);
        let rows = rows(&out);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].portnum_name, "TEXT_MESSAGE_APP");
        assert_eq!(rows[1].error, "invalid hex payload at line 3: Invalid character 'z' at position 0");
        assert_eq!(rows[2].timestamp, "only");
        assert_eq!(rows[2].topic, "two");
    }

    #[test]
    fn decode_invalid_utf8_line() {
        let mut input = Vec::new();
        input.extend_from_slice(b"01.02.2025 10:11:12 | msh/EU_868/2/e/LongFast/!a1b2c3d4 | 0a0422020801\n");
        input.extend_from_slice(b"01.02.2025 10:11:13 | msh/EU_868/\xff/e | 0a0422020801\n");
        input.extend_from_slice(b"01.02.2025 10:11:14 | msh/EU_868/2/e/LongFast/!a1b2c3d4 | 0a04\xff20801\r\n");
        let mut out = Vec::new();

        let summary = decode(input.as_slice(), &mut out, &Decoder::default(), None).unwrap();

        assert_eq!(summary.records, 3);
        let rows = rows(&out);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].portnum_name, "TEXT_MESSAGE_APP");
        assert_eq!(rows[1].topic, "msh/EU_868/\u{fffd}/e");
        assert_eq!(rows[1].portnum_name, "TEXT_MESSAGE_APP");
        assert!(rows[2].error.starts_with("invalid hex payload at line 3"), "{}", rows[2].error);
    }

    #[test]
    fn lossy_lines_strip_endings() {
        let lines: Vec<String> = lossy_lines(&b"a\r\nb\xff\n\nc"[..])
            .map(|l| l.unwrap())
            .collect();

        assert_eq!(lines, vec!["a", "b\u{fffd}", "", "c"]);
    }

    #[test]
    fn decode_with_topic_filter() {
        let mut out = Vec::new();
        let rx = Regex::new("^msh/EU_868/").unwrap();

        let summary = decode(INPUT.as_bytes(), &mut out, &Decoder::default(), Some(&rx)).unwrap();

        assert_eq!(summary.records, 2);
        assert_eq!(rows(&out).len(), 2);
    }

    #[test]
    fn decode_empty_input_writes_header() {
        let mut out = Vec::new();

        let summary = decode("".as_bytes(), &mut out, &Decoder::default(), None).unwrap();

        assert_eq!(summary.records, 0);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Timestamp,Topic,MessageType,"));
    }
}
