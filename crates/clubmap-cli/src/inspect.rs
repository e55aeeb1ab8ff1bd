//! Raw gateway reads, printed as JSON. Failures are reported instead of
//! being swallowed, which is the point of these commands.

use clubmap_fff::FffClient;

pub(crate) async fn run_club(client: &FffClient, id: u64) -> anyhow::Result<()> {
    let club = client.try_fetch_club(id).await?;
    println!("{}", serde_json::to_string_pretty(&club)?);
    Ok(())
}

pub(crate) async fn run_poules(client: &FffClient, champ: &str) -> anyhow::Result<()> {
    let poules = client.try_fetch_poules(champ).await?;
    println!("{}", serde_json::to_string_pretty(&poules)?);
    Ok(())
}

pub(crate) async fn run_engagements(
    client: &FffClient,
    champ: &str,
    poule: u32,
) -> anyhow::Result<()> {
    let engagements = client.try_fetch_engagements(champ, poule).await?;
    println!("{}", serde_json::to_string_pretty(&engagements)?);
    Ok(())
}
