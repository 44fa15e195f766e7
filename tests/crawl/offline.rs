use crate::common;
use dupr_rs::{ClubCrawl, DuprError, MatchOutcome, NullLog};
use httpmock::Method::POST;

fn roster() -> Vec<serde_json::Value> {
    (1..=3)
        .map(|i| common::member_json(i, &format!("Member {i}")))
        .collect()
}

#[tokio::test]
async fn full_crawl_collects_every_stage() {
    let server = common::setup_server();
    let roster_mock = common::mock_roster(&server, roster());
    let players: Vec<_> = (1..=3)
        .map(|i| common::mock_player(&server, i, "3.100", "3.900"))
        .collect();
    let h1 = common::mock_history_page(
        &server,
        1,
        0,
        10,
        common::paged(
            0,
            10,
            2,
            vec![common::match_json(11, 1, 2, true), common::match_json(12, 1, 3, false)],
        ),
    );
    let h2 = common::mock_history_page(&server, 2, 0, 10, common::paged(0, 10, 0, vec![]));
    let h3 = server.mock(|when, then| {
        when.method(POST).path("/player/v1.0/3/history");
        then.status(200).json_body(common::paged(0, 10, 0, vec![]));
    });
    let client = common::client_for(&server);

    let mut lines = Vec::new();
    let mut log = |m: &str| lines.push(m.to_string());
    let result = ClubCrawl::new(&client, common::CLUB)
        .max_members(3)
        .max_matches(2)
        .matches_per_player(10)
        .pacing(common::no_pacing())
        .retry_policy(common::no_wait_retry())
        .run(&mut log)
        .await
        .unwrap();

    roster_mock.assert();
    for p in &players {
        p.assert();
    }
    h1.assert();
    h2.assert();
    h3.assert_hits(0);

    let info = result.club_info();
    assert_eq!(info.id, common::CLUB);
    assert_eq!(info.name, "Riverside Pickleball");
    assert_eq!(info.total_members, 3);
    assert_eq!(info.players_with_history, 1);
    assert_eq!(info.scraped_matches, 2);

    assert_eq!(result.members().len(), 3);
    assert_eq!(result.profiles().len(), 3);
    assert_eq!(result.profiles()[2].doubles_rating, "3.900");

    assert!(result.matches_for("2").is_none());
    let rows = result.match_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].player_id, "1");
    assert_eq!(rows[0].result, Some(MatchOutcome::Win));
    assert_eq!(rows[0].score_summary.as_deref(), Some("11-6"));
    assert_eq!(rows[1].result, Some(MatchOutcome::Loss));
    let own = rows[1].player_team.as_ref().unwrap();
    assert_eq!(own.rating_before, Some(3.5));
    assert_eq!(own.rating_after, Some(3.6));

    assert!(lines[0].starts_with("Starting crawl for club ID"));
    assert!(lines.iter().any(|l| l == "Could not fetch match history for player 2"));

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["club_info"]["scraped_matches"], 2);
    assert_eq!(json["player_profiles"].as_array().unwrap().len(), 3);
    assert_eq!(json["match_history"]["1"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn roster_failure_aborts_the_crawl() {
    let server = common::setup_server();
    let roster_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/club/{}/members/v1.0/all", common::CLUB));
        then.status(403).body("forbidden");
    });
    let client = common::client_for(&server);

    let err = ClubCrawl::new(&client, common::CLUB)
        .pacing(common::no_pacing())
        .run(&mut NullLog)
        .await
        .unwrap_err();

    roster_mock.assert_hits(1);
    assert!(matches!(err, DuprError::MembersUnavailable { .. }), "got {err:?}");
}

#[tokio::test]
async fn a_cancelled_crawl_returns_what_it_has() {
    let server = common::setup_server();
    let _roster = common::mock_roster(&server, roster());
    let players: Vec<_> = (1..=3)
        .map(|i| common::mock_player(&server, i, "3.0", "3.0"))
        .collect();
    let history: Vec<_> = (1..=3)
        .map(|i| common::mock_history_page(&server, i, 0, 10, common::paged(0, 10, 0, vec![])))
        .collect();
    let client = common::client_for(&server);

    let crawl = ClubCrawl::new(&client, common::CLUB)
        .max_matches(3)
        .pacing(common::no_pacing());
    let trigger = crawl.token();
    let mut log = move |m: &str| {
        if m.contains("Processing player 2/3") {
            trigger.cancel();
        }
    };
    let result = crawl.run(&mut log).await.unwrap();

    assert_eq!(result.members().len(), 3);
    assert_eq!(result.profiles().len(), 2);
    players[2].assert_hits(0);
    for h in &history {
        h.assert_hits(0);
    }
    assert!(result.match_history().is_empty());
    assert_eq!(result.club_info().scraped_matches, 0);
}

#[tokio::test]
async fn zero_history_cap_skips_match_history() {
    let server = common::setup_server();
    let _roster = common::mock_roster(&server, roster());
    let _players: Vec<_> = (1..=3)
        .map(|i| common::mock_player(&server, i, "3.0", "3.0"))
        .collect();
    let history: Vec<_> = (1..=3)
        .map(|i| common::mock_history_page(&server, i, 0, 10, common::paged(0, 10, 0, vec![])))
        .collect();
    let client = common::client_for(&server);

    let result = ClubCrawl::new(&client, common::CLUB)
        .max_matches(0)
        .pacing(common::no_pacing())
        .run(&mut NullLog)
        .await
        .unwrap();

    for h in &history {
        h.assert_hits(0);
    }
    assert_eq!(result.profiles().len(), 3);
    assert_eq!(result.club_info().players_with_history, 0);
}
