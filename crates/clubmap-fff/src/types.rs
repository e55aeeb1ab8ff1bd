//! Federation API response types.
//!
//! These model the JSON records returned by the `.json` resources. Only the
//! fields the overlay reads are declared; everything else is ignored.
//! Numeric fields are accepted either as JSON numbers or numeric strings.

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// clubs/{id}.json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ClubRecord {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub cl_no: Option<u64>,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub affiliation_number: Option<u64>,
}

// ---------------------------------------------------------------------------
// compets/{id}/phases/1/poules.json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PouleRecord {
    pub stage_number: u32,
}

// ---------------------------------------------------------------------------
// engagements.json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct EngagementRecord {
    pub equipe: EquipeRecord,
    pub competition: CompetitionRecord,
}

#[derive(Debug, Deserialize)]
pub struct EquipeRecord {
    pub club: ClubRefRecord,
}

#[derive(Debug, Deserialize)]
pub struct ClubRefRecord {
    #[serde(deserialize_with = "required_u64")]
    pub cl_no: u64,
}

#[derive(Debug, Deserialize)]
pub struct CompetitionRecord {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => n.as_f64(),
        Some(NumberOrText::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => n.as_u64(),
        Some(NumberOrText::Text(s)) => s.trim().parse::<u64>().ok(),
        None => None,
    })
}

fn required_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_u64(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected an unsigned integer or numeric string"))
}
