//! JUnit report extraction.
//!
//! Reads a JUnit XML document and partitions its `<testcase>` elements into
//! passed, failed and skipped groups.
//!
//! Classification looks at direct children of each `<testcase>`:
//! - `<failure>` or `<error>`: failed. Message is the `message` attribute,
//!   falling back to the element text.
//! - `<skip>` or `<skipped>`: skipped (unless it also failed). Message is the
//!   text of `<system-out>`, falling back to the `message` attribute.
//! - neither: passed.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, info};

use crate::errors::ParseError;
use crate::model::{ResultGroups, TestRecord};

/// Load and classify the results of a JUnit file.
pub fn load_junit_results(path: impl AsRef<Path>) -> Result<ResultGroups, ParseError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let xml = String::from_utf8(bytes).map_err(|e| ParseError::Encoding {
        path: path.to_path_buf(),
        message: e.utf8_error().to_string(),
    })?;

    let groups = parse_document(&xml, &path.display().to_string())?;
    info!(
        junit_file = %path.display(),
        passed = groups.passed.len(),
        failed = groups.failed.len(),
        skipped = groups.skipped.len(),
        "loaded JUnit results"
    );
    Ok(groups)
}

/// Classify the results of an in-memory JUnit document.
pub fn parse_results(xml: &str) -> Result<ResultGroups, ParseError> {
    parse_document(xml, "<input>")
}

#[derive(Debug, Default)]
struct CaseBuilder {
    name: String,
    classname: String,
    time: String,
    failure_message: Option<String>,
    failure_text: String,
    skip_message: Option<String>,
    system_out: Option<String>,
}

impl CaseBuilder {
    fn from_element(e: &BytesStart<'_>) -> Result<Self, quick_xml::Error> {
        Ok(Self {
            name: attribute(e, b"name")?.unwrap_or_default(),
            classname: attribute(e, b"classname")?.unwrap_or_default(),
            time: attribute(e, b"time")?
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "0".to_string()),
            ..Self::default()
        })
    }

    fn finish(self) -> TestRecord {
        if let Some(message) = self.failure_message {
            let message = if message.is_empty() {
                self.failure_text.trim().to_string()
            } else {
                message
            };
            return TestRecord::failed(self.name, self.classname, self.time, message);
        }

        if let Some(skip_message) = self.skip_message {
            let message = self
                .system_out
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(skip_message);
            return TestRecord::skipped(self.name, self.classname, self.time, message);
        }

        TestRecord::passed(self.name, self.classname, self.time)
    }
}

/// Which child text is being collected, and at what depth it closes.
#[derive(Debug, Clone, Copy)]
enum Capture {
    Failure(usize),
    SystemOut(usize),
}

struct OpenCase {
    depth: usize,
    builder: CaseBuilder,
}

fn parse_document(xml: &str, origin: &str) -> Result<ResultGroups, ParseError> {
    let malformed = |message: String| ParseError::Malformed {
        origin: origin.to_string(),
        message,
    };

    let mut reader = Reader::from_str(xml);
    let mut groups = ResultGroups::default();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut open: Option<OpenCase> = None;
    let mut capture: Option<Capture> = None;

    loop {
        let event = reader.read_event().map_err(|e| malformed(e.to_string()))?;
        match event {
            Event::Start(e) => {
                depth += 1;
                saw_root = true;
                if let Some(case) = open.as_mut() {
                    if depth == case.depth + 1 {
                        capture = open_child(&mut case.builder, &e, depth, false)
                            .map_err(|e| malformed(e.to_string()))?;
                    }
                } else if e.local_name().as_ref() == b"testcase" {
                    let builder =
                        CaseBuilder::from_element(&e).map_err(|e| malformed(e.to_string()))?;
                    open = Some(OpenCase { depth, builder });
                }
            }
            Event::Empty(e) => {
                saw_root = true;
                if let Some(case) = open.as_mut() {
                    if depth == case.depth {
                        open_child(&mut case.builder, &e, depth + 1, true)
                            .map_err(|e| malformed(e.to_string()))?;
                    }
                } else if e.local_name().as_ref() == b"testcase" {
                    let builder =
                        CaseBuilder::from_element(&e).map_err(|e| malformed(e.to_string()))?;
                    groups.push(builder.finish());
                }
            }
            Event::End(_) => {
                if let Some(Capture::Failure(d) | Capture::SystemOut(d)) = capture {
                    if d == depth {
                        capture = None;
                    }
                }
                if open.as_ref().is_some_and(|case| case.depth == depth) {
                    if let Some(case) = open.take() {
                        let record = case.builder.finish();
                        debug!(name = %record.name(), status = %record.status(), "testcase");
                        groups.push(record);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(t) => {
                if let (Some(capture), Some(case)) = (capture, open.as_mut()) {
                    let text = t.unescape().map_err(|e| malformed(e.to_string()))?;
                    append_capture(&mut case.builder, capture, &text);
                }
            }
            Event::CData(c) => {
                if let (Some(capture), Some(case)) = (capture, open.as_mut()) {
                    append_capture(&mut case.builder, capture, &String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(malformed("no root element".to_string()));
    }
    if depth != 0 || open.is_some() {
        return Err(malformed("unexpected end of document".to_string()));
    }

    Ok(groups)
}

/// Record a direct child of a `<testcase>`. Returns the capture to start, if any.
fn open_child(
    case: &mut CaseBuilder,
    e: &BytesStart<'_>,
    depth: usize,
    empty: bool,
) -> Result<Option<Capture>, quick_xml::Error> {
    match e.local_name().as_ref() {
        b"failure" | b"error" => {
            // first failure wins
            if case.failure_message.is_some() {
                return Ok(None);
            }
            case.failure_message = Some(attribute(e, b"message")?.unwrap_or_default());
            Ok((!empty).then_some(Capture::Failure(depth)))
        }
        b"skip" | b"skipped" => {
            if case.skip_message.is_none() {
                case.skip_message = Some(attribute(e, b"message")?.unwrap_or_default());
            }
            Ok(None)
        }
        b"system-out" => {
            case.system_out.get_or_insert_with(String::new);
            Ok((!empty).then_some(Capture::SystemOut(depth)))
        }
        _ => Ok(None),
    }
}

fn append_capture(case: &mut CaseBuilder, capture: Capture, text: &str) {
    match capture {
        Capture::Failure(_) => case.failure_text.push_str(text),
        Capture::SystemOut(_) => case
            .system_out
            .get_or_insert_with(String::new)
            .push_str(text),
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, quick_xml::Error> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
