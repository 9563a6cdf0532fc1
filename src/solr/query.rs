use url::form_urlencoded;

/// A field/value clause matched as an exact phrase
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub field: String,
    pub value: String,
}

impl Clause {
    /// Render as `field:"value"`, escaping what would end the phrase early.
    pub fn render(&self) -> String {
        let mut phrase = String::with_capacity(self.value.len());
        for c in self.value.chars() {
            if c == '"' || c == '\\' {
                phrase.push('\\');
            }
            phrase.push(c);
        }
        format!("{}:\"{}\"", self.field, phrase)
    }
}

/// Boolean OR of phrase clauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolrQuery {
    clauses: Vec<Clause>,
}

impl SolrQuery {
    pub const ID_FIELDS: [&'static str; 3] = ["id", "alternate_id_facet", "barcode_facet"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn or(mut self, field: &str, value: &str) -> Self {
        self.clauses.push(Clause {
            field: field.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Match the identifier against the primary id, alternate ids, and barcodes.
    pub fn for_identifier(id: &str) -> Self {
        Self::ID_FIELDS
            .iter()
            .fold(Self::new(), |query, field| query.or(field, id))
    }

    #[cfg(test)]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Form-encoded value for the `q` parameter; clauses are escaped one by one.
    pub fn encode(&self) -> String {
        if self.clauses.is_empty() {
            return encode_component("*:*");
        }
        self.clauses
            .iter()
            .map(|c| encode_component(&c.render()))
            .collect::<Vec<_>>()
            .join("+OR+")
    }
}

impl std::fmt::Display for SolrQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "*:*");
        }
        let rendered: Vec<String> = self.clauses.iter().map(Clause::render).collect();
        write!(f, "{}", rendered.join(" OR "))
    }
}

pub(crate) fn encode_component(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
