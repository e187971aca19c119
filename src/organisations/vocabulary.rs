//! Graph node labels to public ontology type URIs.

/// Ontology URI for a graph label, if it has a public equivalent.
///
/// Exact, case-sensitive match.
pub fn ontology_type(label: &str) -> Option<&'static str> {
    match label {
        "Company" => Some("http://www.ft.com/ontology/company/Company"),
        "Organisation" => Some("http://www.ft.com/ontology/organisation/Organisation"),
        "PublicCompany" => Some("http://www.ft.com/ontology/company/PublicCompany"),
        "Person" => Some("http://www.ft.com/ontology/person/Person"),
        _ => None,
    }
}

/// Translate raw labels in order, dropping the ones with no public type.
pub fn map_types<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .filter_map(|label| {
            let label = label.as_ref();
            let mapped = ontology_type(label);
            if mapped.is_none() {
                log::debug!("can't map type {}, skipping", label);
            }
            mapped
        })
        .map(str::to_string)
        .collect()
}
