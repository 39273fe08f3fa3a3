use crate::ports::outbound::FileUrlResolver;
use shared_types::FileObject;

/// Serves files under `{base}/files/{scheme}/{path}`.
#[derive(Debug, Clone)]
pub struct BaseUrlFileResolver {
    base_url: String,
}

impl BaseUrlFileResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl FileUrlResolver for BaseUrlFileResolver {
    fn file_url(&self, file: &FileObject) -> String {
        let path = match file.uri.split_once("://") {
            Some((scheme, rest)) => format!("{scheme}/{rest}"),
            None => file.uri.trim_start_matches('/').to_string(),
        };
        let encoded: Vec<_> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/files/{}", self.base_url, encoded.join("/"))
    }
}
