use std::time::Duration;

use dupr_rs::{ClubCrawl, DuprClientBuilder, Pacing, TracingLog};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dupr_rs::init_tracing();

    // Usage: crawl_club <club-id> [max-members] [max-matches]
    let mut args = std::env::args().skip(1);
    let club_id = args.next().unwrap_or_else(|| "5986040853".to_string());
    let max_members: i64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(20);
    let max_matches: i64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(5);

    // 1. Build a client from DUPR_EMAIL / DUPR_PASSWORD and log in once.
    let client = DuprClientBuilder::from_env()?
        .timeout(Duration::from_secs(30))
        .build()?;
    client.login().await?;

    // 2. Run the crawl. Ctrl-C stops it and keeps what was collected.
    let crawl = ClubCrawl::new(&client, club_id)
        .max_members(max_members)
        .max_matches(max_matches)
        .pacing(Pacing {
            request_delay: Duration::from_secs(1),
        });
    let token = crawl.token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
    let result = crawl.run(&mut TracingLog).await?;

    // 3. Summarize, then dump the full result as JSON.
    let info = result.club_info();
    eprintln!("--- {} ({}) ---", info.name, info.id);
    eprintln!("Members: {}", info.total_members);
    eprintln!("Profiles: {}", result.profiles().len());
    eprintln!(
        "Matches: {} across {} players",
        info.scraped_matches, info.players_with_history
    );
    for row in result.match_rows().iter().take(5) {
        eprintln!(
            "  {} {} {:?} {}",
            row.player_id,
            row.event_date.as_deref().unwrap_or("-"),
            row.result,
            row.score_summary.as_deref().unwrap_or("")
        );
    }

    println!("{}", result.to_json()?);
    Ok(())
}
