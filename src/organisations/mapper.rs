//! Query rows to the public representation.
//!
//! All presence decisions for optional graph matches live here: a related node
//! exists iff its `uuid` is non-empty.

use super::model::{
    api_url, thing_uri, Collection, IndustryClassification, Membership, Organisation, Person,
    Subsidiary,
};
use super::query::{IndustryNode, MembershipRecord, OrganisationRecord, RelatedOrganisationNode};
use super::vocabulary::map_types;

pub fn map_organisation(record: OrganisationRecord, memberships: Vec<MembershipRecord>) -> Organisation {
    let OrganisationRecord {
        organisation: org,
        industry,
        subs,
        ..
    } = record;

    Organisation {
        api_url: api_url(Collection::Organisations, &org.uuid),
        id: thing_uri(&org.uuid),
        types: map_types(&org.labs),
        industry_classification: map_industry(&industry),
        subsidiaries: map_subsidiaries(subs),
        memberships: memberships.into_iter().map(map_membership).collect(),
        lei_code: non_empty(org.lei_code),
        profile: non_empty(org.profile),
        // Fixed order, empty strings included
        labels: vec![
            org.pref_label.clone(),
            org.hidden_label,
            org.legal_name,
            org.short_name,
        ],
        pref_label: org.pref_label,
    }
}

pub fn map_industry(industry: &IndustryNode) -> Option<IndustryClassification> {
    if industry.uuid.is_empty() {
        return None;
    }
    Some(IndustryClassification {
        api_url: api_url(Collection::Things, &industry.uuid),
        id: thing_uri(&industry.uuid),
        pref_label: industry.pref_label.clone(),
    })
}

/// Drops the placeholder `collect()` yields when no subsidiary matched and
/// sorts by label then id so repeated reads serialize identically.
pub fn map_subsidiaries(subs: Vec<RelatedOrganisationNode>) -> Vec<Subsidiary> {
    let mut mapped: Vec<Subsidiary> = subs
        .into_iter()
        .filter(|s| !s.uuid.is_empty())
        .map(|s| Subsidiary {
            api_url: api_url(Collection::Organisations, &s.uuid),
            id: thing_uri(&s.uuid),
            types: map_types(&s.labs),
            pref_label: s.pref_label,
        })
        .collect();

    mapped.sort_by(|a, b| a.pref_label.cmp(&b.pref_label).then_with(|| a.id.cmp(&b.id)));
    mapped
}

pub fn map_membership(record: MembershipRecord) -> Membership {
    Membership {
        title: record.title,
        person: Person {
            api_url: api_url(Collection::People, &record.uuid),
            id: thing_uri(&record.uuid),
            types: map_types(&record.labs),
            pref_label: record.name,
        },
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
