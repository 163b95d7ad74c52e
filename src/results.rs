// Result interpreter: reads the endpoint's XML answer. Only `testCase`
// elements matter, wherever they sit below the root element:
//
//   <root>
//     <testCase id="7" name="Login" passed="true"/>
//   </root>

use crate::error::MalformedResponseError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

const TEST_CASE_TAG: &[u8] = b"testCase";

/// Pass/fail of one test case as reported by the endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    pub identifier: String,
    pub passed: bool,
}

/// All outcomes for one submitted file, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    pub outcomes: Vec<TestOutcome>,
}

impl SubmissionResult {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Identifiers of the failed test cases. Duplicates are kept.
    pub fn failing(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed)
            .map(|o| o.identifier.clone())
            .collect()
    }
}

/// `"Login [7]"` when a name is given, `"id: 7"` otherwise.
pub fn identifier(id: &str, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("{} [{}]", name, id),
        _ => format!("id: {}", id),
    }
}

/// Parse a 200 response body into the outcomes it reports.
///
/// A well-formed document without any `testCase` element gives an empty
/// result. Non-UTF-8 bodies, bodies without a root element and XML syntax
/// errors are [`MalformedResponseError`]s.
pub fn parse(body: &[u8]) -> Result<SubmissionResult, MalformedResponseError> {
    let text = std::str::from_utf8(body)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = Reader::from_str(text);
    let mut open: Vec<String> = Vec::new();
    let mut saw_root = false;
    let mut root_closed = false;
    let mut outcomes = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if root_closed {
                    return Err(MalformedResponseError::MultipleRoots);
                }
                saw_root = true;
                if e.name().as_ref() == TEST_CASE_TAG {
                    outcomes.push(outcome(&e)?);
                }
                open.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Empty(e) => {
                if root_closed {
                    return Err(MalformedResponseError::MultipleRoots);
                }
                saw_root = true;
                if e.name().as_ref() == TEST_CASE_TAG {
                    outcomes.push(outcome(&e)?);
                }
                root_closed = open.is_empty();
            }
            Event::End(_) => {
                open.pop();
                root_closed = open.is_empty();
            }
            Event::Text(t) => {
                // unescaping surfaces unknown entity references
                let text = t.unescape()?;
                if open.is_empty() && !text.trim().is_empty() {
                    return Err(MalformedResponseError::ContentOutsideRoot);
                }
            }
            Event::CData(_) if open.is_empty() => {
                return Err(MalformedResponseError::ContentOutsideRoot);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(name) = open.pop() {
        return Err(MalformedResponseError::Unclosed(name));
    }
    if !saw_root {
        return Err(MalformedResponseError::NoRoot);
    }
    Ok(SubmissionResult { outcomes })
}

fn outcome(e: &BytesStart) -> Result<TestOutcome, MalformedResponseError> {
    let id = attribute(e, "id")?.unwrap_or_default();
    let name = attribute(e, "name")?;
    let passed = attribute(e, "passed")?.as_deref() == Some("true");
    Ok(TestOutcome {
        identifier: identifier(&id, name.as_deref()),
        passed,
    })
}

fn attribute(e: &BytesStart, key: &str) -> Result<Option<String>, MalformedResponseError> {
    let attr = e.try_get_attribute(key).map_err(quick_xml::Error::from)?;
    match attr {
        Some(attr) => {
            let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}
