//! CTRF report models.

use std::ops::{Deref, DerefMut};

use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use super::{Insights, ReportStats, TestResult};

/// Build and source metadata for a run.
///
/// Every field is optional; producing tools fill in what the CI system exposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    /// Build (workflow) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_name: Option<String>,
    /// Build number; preferred identity for historical runs.
    /// CI systems write it either as a string or as a number.
    #[serde(
        default,
        deserialize_with = "deserialize_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub build_number: Option<String>,
    /// Link to the build in the CI system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    /// Commit SHA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
    #[serde(flatten)]
    pub other: Map<String, JsonValue>,
}

/// Tool that produced the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, JsonValue>,
}

/// The `results` section of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    #[serde(default)]
    pub tool: Tool,
    #[serde(default)]
    pub summary: ReportStats,
    /// Test outcomes. `None` when the report is structurally invalid
    /// (the key is missing or does not hold a list).
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_tests",
        skip_serializing_if = "Option::is_none"
    )]
    pub tests: Option<TestList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
    #[serde(flatten)]
    pub other: Map<String, JsonValue>,
}

/// The `results.tests` list.
///
/// Entries that do not parse as a test are kept verbatim at their original
/// position so that writing the report back reproduces them. They take no
/// part in insights. Derefs to the parsed tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestList {
    parsed: Vec<TestResult>,
    /// Unparsable entries with their index in the original list, ascending
    unparsed: Vec<(usize, JsonValue)>,
}

impl TestList {
    /// Entries that could not be parsed, in list order.
    pub fn unparsed(&self) -> impl Iterator<Item = &JsonValue> {
        self.unparsed.iter().map(|(_, raw)| raw)
    }

    /// Number of entries in the list, parsed or not.
    pub fn total_len(&self) -> usize {
        self.parsed.len() + self.unparsed.len()
    }

    fn from_entries(entries: Vec<JsonValue>) -> Self {
        let mut list = TestList::default();

        for (index, entry) in entries.into_iter().enumerate() {
            match TestResult::deserialize(&entry) {
                Ok(test) => list.parsed.push(test),
                Err(e) => {
                    debug!("Keeping test entry {} as-is: {}", index, e);
                    list.unparsed.push((index, entry));
                }
            }
        }

        list
    }
}

impl From<Vec<TestResult>> for TestList {
    fn from(parsed: Vec<TestResult>) -> Self {
        TestList {
            parsed,
            unparsed: Vec::new(),
        }
    }
}

impl Deref for TestList {
    type Target = [TestResult];

    fn deref(&self) -> &Self::Target {
        &self.parsed
    }
}

impl DerefMut for TestList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.parsed
    }
}

impl Serialize for TestList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let total = self.total_len();
        let mut seq = serializer.serialize_seq(Some(total))?;
        let mut parsed = self.parsed.iter();
        let mut unparsed = self.unparsed.iter().peekable();

        for position in 0..total {
            match unparsed.next_if(|(index, _)| *index == position) {
                Some((_, raw)) => seq.serialize_element(raw)?,
                None => match parsed.next() {
                    Some(test) => seq.serialize_element(test)?,
                    // Indices past the parsed tail; flush in order.
                    None => {
                        if let Some((_, raw)) = unparsed.next() {
                            seq.serialize_element(raw)?;
                        }
                    }
                },
            }
        }

        seq.end()
    }
}

/// One recorded test-execution session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<String>,
    #[serde(default)]
    pub results: Results,
    /// Run-level insights attached by a previous enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
    /// Unrecognized fields, preserved on round-trip
    #[serde(flatten)]
    pub other: Map<String, JsonValue>,
}

impl Report {
    /// Create a report from a summary and its tests.
    pub fn new(summary: ReportStats, tests: Vec<TestResult>) -> Self {
        Report {
            report_format: Some("CTRF".to_string()),
            spec_version: None,
            results: Results {
                summary,
                tests: Some(TestList::from(tests)),
                ..Default::default()
            },
            insights: None,
            extra: None,
            other: Map::new(),
        }
    }

    /// Tests of a structurally valid report, `None` otherwise.
    pub fn tests(&self) -> Option<&[TestResult]> {
        self.results.tests.as_deref()
    }

    pub fn summary(&self) -> &ReportStats {
        &self.results.summary
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.results.environment.as_ref()
    }
}

/// Accept any JSON for `tests`, keeping it only when it is a list.
///
/// The aggregator skips reports whose tests come back as `None`. Bad entries
/// inside a list are kept raw by [`TestList`].
fn deserialize_lenient_tests<'de, D>(deserializer: D) -> Result<Option<TestList>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Array(entries) => Ok(Some(TestList::from_entries(entries))),
        _ => Ok(None),
    }
}

fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "invalid type: {}, expected a string or number",
            other
        ))),
    }
}
