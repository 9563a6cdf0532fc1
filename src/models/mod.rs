pub mod aries;
pub mod solr;

pub use aries::{AriesResponse, ServiceUrl};
pub use solr::{SolrDoc, SolrFullResponse};
