//! Conversion from federation wire records into `clubmap-core` domain types.

use clubmap_core::{Club, Engagement, Pool};

use crate::types::{ClubRecord, EngagementRecord, PouleRecord};

/// Convert a [`ClubRecord`] into a [`Club`].
///
/// `requested_id` is used when the record itself carries no `cl_no`.
#[must_use]
pub fn normalize_club(record: ClubRecord, requested_id: u64) -> Club {
    Club {
        id: record.cl_no.unwrap_or(requested_id),
        name: record.name,
        latitude: record.latitude,
        longitude: record.longitude,
        affiliation_number: record.affiliation_number,
    }
}

#[must_use]
pub fn normalize_poule(record: &PouleRecord) -> Pool {
    Pool {
        stage_number: record.stage_number,
    }
}

#[must_use]
pub fn normalize_engagement(record: EngagementRecord) -> Engagement {
    Engagement {
        club_id: record.equipe.club.cl_no,
        competition_name: record.competition.name,
    }
}
