use serde::Serialize;

/// Body returned by `GET /api/aries/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AriesResponse {
    #[serde(rename = "identifier", skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service_url: Vec<ServiceUrl>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub access_url: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata_url: Vec<String>,
}

/// Service endpoint with the protocol it speaks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceUrl {
    pub url: String,
    pub protocol: String,
}

impl ServiceUrl {
    pub const INDEX_LOOKUP: &'static str = "index-lookup";
    pub const IIIF_PRESENTATION: &'static str = "iiif-presentation";

    pub fn new(url: impl Into<String>, protocol: &str) -> Self {
        Self {
            url: url.into(),
            protocol: protocol.to_string(),
        }
    }
}
