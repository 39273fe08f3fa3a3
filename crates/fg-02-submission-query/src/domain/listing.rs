//! Listing response body and submission URLs.

use serde::ser::{Serialize, Serializer};
use shared_types::SubmissionHandle;

/// Builds absolute URLs of single-submission resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionUrlBuilder {
    base_url: String,
}

impl SubmissionUrlBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// `{base}/forms/{form_id}/submissions/{uuid}` with encoded segments.
    pub fn submission_url(&self, form_id: &str, uuid: &str) -> String {
        format!(
            "{}/forms/{}/submissions/{}",
            self.base_url,
            urlencoding::encode(form_id),
            urlencoding::encode(uuid)
        )
    }
}

/// `uuid -> url` pairs, serialized as a JSON object in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionUrls(Vec<(String, String)>);

impl SubmissionUrls {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(uuid, url)| (uuid.as_str(), url.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SubmissionUrls {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(uuid, url)| (uuid, url)))
    }
}

/// Body of the submission listing endpoint.
///
/// Filter values are echoed exactly as the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubmissionListing {
    pub webform_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starttime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endtime: Option<String>,
    pub submissions: SubmissionUrls,
}

impl SubmissionListing {
    pub fn new(webform_id: impl Into<String>) -> Self {
        Self {
            webform_id: webform_id.into(),
            starttime: None,
            endtime: None,
            submissions: SubmissionUrls::default(),
        }
    }

    /// Echo the raw filter values. Empty values are treated as absent.
    pub fn with_filters(mut self, starttime: Option<&str>, endtime: Option<&str>) -> Self {
        self.starttime = starttime.filter(|s| !s.is_empty()).map(str::to_string);
        self.endtime = endtime.filter(|s| !s.is_empty()).map(str::to_string);
        self
    }

    pub fn with_handles(mut self, handles: &[SubmissionHandle], urls: &SubmissionUrlBuilder) -> Self {
        self.submissions = SubmissionUrls(
            handles
                .iter()
                .map(|h| (h.uuid.clone(), urls.submission_url(&self.webform_id, &h.uuid)))
                .collect(),
        );
        self
    }
}
