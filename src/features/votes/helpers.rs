use std::collections::BTreeMap;

use crate::core::error::AppError;
use crate::features::congress::BillVotesPayload;
use crate::features::votes::dto::{PartyTally, VoteKind, VoteRecord, VoteTypeFilter};

pub fn bill_key(session: &str, bill_number: &str) -> String {
    format!("{session}-{bill_number}")
}

pub(crate) fn normalise_bill_id(session: &str, bill_number: &str) -> Result<(String, String), AppError> {
    let session = session.trim();
    let bill_number = bill_number.trim();

    if session.is_empty() || bill_number.is_empty() {
        return Err(AppError::bad_request(
            "session and bill number must not be empty".to_string(),
        ));
    }

    Ok((session.to_string(), bill_number.to_string()))
}

pub fn flatten_votes(session: &str, bill_number: &str, payload: BillVotesPayload) -> Vec<VoteRecord> {
    let key = bill_key(session, bill_number);

    payload
        .votes
        .into_iter()
        .flat_map(|event| {
            let chamber = event.chamber.unwrap_or_default();
            let date = event.date.unwrap_or_default();
            let key = key.clone();

            event.members.into_iter().map(move |ballot| VoteRecord {
                member_name: ballot.name.unwrap_or_default(),
                party: ballot.party.unwrap_or_default(),
                vote: VoteKind::from(ballot.vote.unwrap_or_default()),
                chamber: chamber.clone(),
                date: date.clone(),
                bill_key: key.clone(),
            })
        })
        .collect()
}

pub fn filter_by_vote_type(records: Vec<VoteRecord>, filter: VoteTypeFilter) -> Vec<VoteRecord> {
    if filter == VoteTypeFilter::All {
        return records;
    }

    records
        .into_iter()
        .filter(|record| filter.matches(&record.vote))
        .collect()
}

pub fn tally_by_party(records: &[VoteRecord]) -> Vec<PartyTally> {
    let mut tallies: BTreeMap<&str, PartyTally> = BTreeMap::new();

    for record in records {
        let tally = tallies
            .entry(record.party.as_str())
            .or_insert_with(|| PartyTally {
                party: record.party.clone(),
                ..PartyTally::default()
            });

        match record.vote {
            VoteKind::Yea => tally.yea += 1,
            VoteKind::Nay => tally.nay += 1,
            VoteKind::Other(_) => tally.other += 1,
        }
    }

    tallies.into_values().collect()
}
