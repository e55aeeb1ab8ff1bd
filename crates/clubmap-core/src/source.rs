//! The read-only data seam between the toggle controller and the
//! federation API.

use std::future::Future;

use crate::model::{Club, Engagement, Pool};

/// Read-only access to championship, pool, engagement and club records.
///
/// Every operation falls back instead of failing: `None` or an empty list
/// means "no data available" and is never fatal to the caller.
pub trait ClubSource: Send + Sync {
    fn fetch_club(&self, club_id: u64) -> impl Future<Output = Option<Club>> + Send;

    fn fetch_poules(&self, champ_id: &str) -> impl Future<Output = Vec<Pool>> + Send;

    fn fetch_engagements(
        &self,
        champ_id: &str,
        poule_id: u32,
    ) -> impl Future<Output = Vec<Engagement>> + Send;
}
