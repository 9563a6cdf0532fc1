use tracing::{info, warn};
use url::Url;

use crate::error::{LookupError, SiteLinksError};
use crate::models::{AriesResponse, ServiceUrl, SolrDoc};
use crate::solr::{SolrClient, SolrError, SolrQuery};

/// Public Virgo pages for a catalog record
#[derive(Debug, Clone)]
pub struct SiteLinks {
    base: Url,
}

impl SiteLinks {
    pub fn new(virgo_url: &str) -> Result<Self, SiteLinksError> {
        let base = Url::parse(virgo_url)?;
        if base.cannot_be_a_base() {
            return Err(SiteLinksError::NotABase(virgo_url.to_string()));
        }
        Ok(Self { base })
    }

    pub fn access_url(&self, id: &str) -> String {
        self.catalog(&[id])
    }

    pub fn metadata_url(&self, id: &str) -> String {
        let file = format!("{}.xml", id);
        self.catalog(&[file.as_str()])
    }

    pub fn manifest_url(&self, id: &str) -> String {
        self.catalog(&[id, "iiif", "manifest.json"])
    }

    fn catalog(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        // new() rejects cannot-be-a-base URLs, so segments are always editable
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("catalog").extend(segments);
        }
        url.to_string()
    }
}

/// Resolves an external identifier to the URLs of exactly one Solr record
pub struct Resolver {
    solr: SolrClient,
    links: SiteLinks,
}

impl Resolver {
    pub fn new(solr: SolrClient, links: SiteLinks) -> Self {
        Self { solr, links }
    }

    pub fn solr(&self) -> &SolrClient {
        &self.solr
    }

    pub async fn resolve(&self, id: &str) -> Result<AriesResponse, LookupError> {
        let result = self.lookup(id).await;
        match &result {
            Ok(_) => info!(id = %id, "lookup resolved"),
            Err(e) => warn!(id = %id, error = %e, "lookup failed"),
        }
        result
    }

    async fn lookup(&self, id: &str) -> Result<AriesResponse, LookupError> {
        let query = SolrQuery::for_identifier(id);
        let resp = self
            .solr
            .select(&query, &SolrDoc::FIELDS)
            .await
            .map_err(|e| backend_failure(id, e))?;

        match resp.response.num_found {
            0 => {
                return Err(LookupError::NotFound { id: id.to_string() });
            }
            1 => {}
            hits => {
                return Err(LookupError::Ambiguous {
                    id: id.to_string(),
                    hits,
                    query: query.to_string(),
                });
            }
        }

        let doc = resp
            .response
            .docs
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::BackendError {
                id: id.to_string(),
                reason: "numFound is 1 but no document was returned".to_string(),
            })?;

        Ok(build_response(&doc, &self.solr.document_url(&doc.id), &self.links))
    }
}

fn backend_failure(id: &str, err: SolrError) -> LookupError {
    match err {
        SolrError::Unreachable(source) => LookupError::BackendUnreachable {
            id: id.to_string(),
            source,
        },
        other => LookupError::BackendError {
            id: id.to_string(),
            reason: other.to_string(),
        },
    }
}

/// Shape one matched document into the lookup response.
pub fn build_response(doc: &SolrDoc, solr_url: &str, links: &SiteLinks) -> AriesResponse {
    let mut resp = AriesResponse::default();

    resp.identifiers.push(doc.id.clone());
    resp.identifiers.extend(doc.alternate_id_facet.iter().cloned());
    resp.identifiers.extend(doc.barcode_facet.iter().cloned());

    resp.service_url.push(ServiceUrl::new(solr_url, ServiceUrl::INDEX_LOOKUP));
    if doc.has_iiif_manifest() {
        resp.service_url.push(ServiceUrl::new(
            links.manifest_url(&doc.id),
            ServiceUrl::IIIF_PRESENTATION,
        ));
    }

    // shadowed records expose only the index lookup
    if doc.is_visible() {
        resp.access_url.push(links.access_url(&doc.id));
        if !doc.marc_display.is_empty() {
            resp.metadata_url.push(links.metadata_url(&doc.id));
        }
    }

    resp
}
