use serde::Deserialize;

/// Complete Solr select response: a header and the hit data
#[derive(Debug, Clone, Deserialize)]
pub struct SolrFullResponse {
    #[serde(rename = "responseHeader")]
    pub response_header: SolrHeader,
    #[serde(default)]
    pub response: SolrResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolrHeader {
    pub status: i32,
}

/// Hit details of a Solr query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolrResponse {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<SolrDoc>,
}

/// Fields requested for a single document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SolrDoc {
    pub id: String,
    /// Absent means visible
    #[serde(default)]
    pub shadowed_location_facet: Option<Vec<String>>,
    #[serde(default)]
    pub marc_display: String,
    #[serde(default)]
    pub alternate_id_facet: Vec<String>,
    #[serde(default)]
    pub barcode_facet: Vec<String>,
    #[serde(default)]
    pub feature_facet: Vec<String>,
}

impl SolrDoc {
    /// Field list passed as `fl` so Solr returns exactly what `SolrDoc` reads.
    pub const FIELDS: [&'static str; 6] = [
        "id",
        "shadowed_location_facet",
        "marc_display",
        "alternate_id_facet",
        "barcode_facet",
        "feature_facet",
    ];

    pub const VISIBLE: &'static str = "VISIBLE";
    pub const IIIF_FEATURE: &'static str = "iiif";

    /// Visible when no location tags are present, or when they include VISIBLE.
    pub fn is_visible(&self) -> bool {
        match &self.shadowed_location_facet {
            None => true,
            Some(tags) => tags.is_empty() || tags.iter().any(|t| t == Self::VISIBLE),
        }
    }

    pub fn has_iiif_manifest(&self) -> bool {
        self.feature_facet.iter().any(|f| f == Self::IIIF_FEATURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "responseHeader": {"status": 0, "QTime": 3, "params": {"q": "id:\"u1\""}},
            "response": {"numFound": 1, "start": 0, "docs": [{
                "id": "u1",
                "barcode_facet": ["X000111"],
                "marc_display": "<record/>"
            }]}
        }"#;

        let resp: SolrFullResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.response_header.status, 0);
        assert_eq!(resp.response.num_found, 1);

        let doc = &resp.response.docs[0];
        assert_eq!(doc.id, "u1");
        assert_eq!(doc.barcode_facet, vec!["X000111"]);
        assert!(doc.alternate_id_facet.is_empty());
        assert!(doc.shadowed_location_facet.is_none());
    }

    #[test]
    fn test_parse_error_header_without_response() {
        let body = r#"{"responseHeader": {"status": 400, "QTime": 0}, "error": {"msg": "bad"}}"#;
        let resp: SolrFullResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.response_header.status, 400);
        assert_eq!(resp.response.num_found, 0);
    }

    #[test]
    fn test_visibility() {
        let mut doc = SolrDoc {
            id: "u1".to_string(),
            ..Default::default()
        };
        assert!(doc.is_visible());

        doc.shadowed_location_facet = Some(vec![]);
        assert!(doc.is_visible());

        doc.shadowed_location_facet = Some(vec!["HIDDEN".to_string(), "VISIBLE".to_string()]);
        assert!(doc.is_visible());

        doc.shadowed_location_facet = Some(vec!["SHADOWED".to_string()]);
        assert!(!doc.is_visible());
    }

    #[test]
    fn test_iiif_feature() {
        let doc = SolrDoc {
            id: "u1".to_string(),
            feature_facet: vec!["dl_metadata".to_string(), "iiif".to_string()],
            ..Default::default()
        };
        assert!(doc.has_iiif_manifest());
        assert!(!SolrDoc::default().has_iiif_manifest());
    }
}
