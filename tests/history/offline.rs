use crate::common;
use dupr_rs::history::{self, HistoryRequest, HistoryStop};
use dupr_rs::NullLog;
use httpmock::Method::POST;
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn request(limit: u32) -> HistoryRequest {
    HistoryRequest {
        matches_per_player: limit,
        retry: common::no_wait_retry(),
        pacing: common::no_pacing(),
    }
}

#[tokio::test]
async fn pages_are_followed_by_offset() {
    let server = common::setup_server();
    let login = common::mock_login(&server, "unused");
    let first = common::mock_history_page(
        &server,
        4711,
        0,
        20,
        common::paged(
            0,
            20,
            40,
            vec![common::match_json(1, 4711, 9, true), common::match_json(2, 4711, 9, false)],
        ),
    );
    let second = common::mock_history_page(
        &server,
        4711,
        20,
        20,
        common::paged(20, 20, 40, vec![common::match_json(3, 4711, 8, true)]),
    );
    let client = common::client_for(&server);

    let h = history::fetch_player_history(
        &client,
        "4711",
        &request(20),
        &CancellationToken::new(),
        &mut NullLog,
    )
    .await;

    first.assert();
    second.assert();
    login.assert_hits(0);

    let ids: Vec<_> = h.matches.iter().map(|m| m.id.as_deref().unwrap()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert_eq!(h.stop, HistoryStop::Exhausted);
    assert_eq!(h.attempts, 2);
    assert_eq!(h.reauths, 0);
}

#[tokio::test]
async fn undecodable_pages_use_up_the_retry_budget() {
    let server = common::setup_server();
    let login = common::mock_login(&server, "unused");
    let page = server.mock(|when, then| {
        when.method(POST).path("/player/v1.0/4711/history");
        then.status(200).body("not json");
    });
    let client = common::client_for(&server);

    let h = history::fetch_player_history(
        &client,
        "4711",
        &request(10),
        &CancellationToken::new(),
        &mut NullLog,
    )
    .await;

    page.assert_hits(3);
    login.assert_hits(0);
    assert!(h.is_empty());
    assert_eq!(h.stop, HistoryStop::RetriesExhausted);
}

#[tokio::test]
async fn permanently_forbidden_player_is_left_out() {
    let server = common::setup_server();
    let login = common::mock_login(&server, "token-1");
    let page = server.mock(|when, then| {
        when.method(POST).path("/player/v1.0/4711/history");
        then.status(403).body("forbidden");
    });
    let client = common::client_for(&server);

    let mut lines = Vec::new();
    let mut log = |m: &str| lines.push(m.to_string());
    let map = history::fetch_histories(
        &client,
        ["4711"],
        &request(10),
        &CancellationToken::new(),
        &mut log,
    )
    .await;

    page.assert_hits(3);
    login.assert_hits(3);
    assert!(map.is_empty());
    assert!(
        lines
            .iter()
            .any(|l| l == "Could not fetch match history for player 4711")
    );
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = common::setup_server();
    let page = server.mock(|when, then| {
        when.method(POST).path("/player/v1.0/4711/history");
        then.status(500).body("boom");
    });
    let client = common::client_for(&server);

    let h = history::fetch_player_history(
        &client,
        "4711",
        &request(10),
        &CancellationToken::new(),
        &mut NullLog,
    )
    .await;

    page.assert_hits(1);
    assert_eq!(h.stop, HistoryStop::Rejected(500));
    assert_eq!(h.attempts, 1);
}

#[tokio::test]
async fn expired_token_is_refreshed_and_the_page_retried() {
    let server = common::setup_server();
    let login = common::mock_login(&server, "token-1");
    let stale = server.mock(|when, then| {
        when.method(POST)
            .path("/player/v1.0/4711/history")
            .header("authorization", format!("Bearer {}", common::START_TOKEN));
        then.status(403).body("expired");
    });
    let fresh = server.mock(|when, then| {
        when.method(POST)
            .path("/player/v1.0/4711/history")
            .header("authorization", "Bearer token-1")
            .json_body(common::history_query(0, 10));
        then.status(200).json_body(json!({
            "status": "SUCCESS",
            "result": {
                "offset": 0,
                "limit": 10,
                "total": 1,
                "hits": [common::match_json(5, 4711, 9, true)]
            }
        }));
    });
    let client = common::client_for(&server);

    let h = history::fetch_player_history(
        &client,
        "4711",
        &request(10),
        &CancellationToken::new(),
        &mut NullLog,
    )
    .await;

    stale.assert_hits(1);
    login.assert_hits(1);
    fresh.assert_hits(1);
    assert_eq!(h.reauths, 1);
    assert_eq!(h.matches.len(), 1);
    assert_eq!(h.stop, HistoryStop::Exhausted);
}

#[tokio::test]
async fn cancelled_before_start_sends_nothing() {
    let server = common::setup_server();
    let page = server.mock(|when, then| {
        when.method(POST).path("/player/v1.0/4711/history");
        then.status(200).json_body(common::paged(0, 10, 0, vec![]));
    });
    let client = common::client_for(&server);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let h = history::fetch_player_history(&client, "4711", &request(10), &cancel, &mut NullLog)
        .await;

    page.assert_hits(0);
    assert_eq!(h.stop, HistoryStop::Canceled);
    assert!(h.is_empty());
}

#[tokio::test]
async fn fixture_page_decodes_doubles_matches() {
    let server = common::setup_server();
    let body = common::fixture("history_page", "4711", "json");
    let page = server.mock(|when, then| {
        when.method(POST).path("/player/v1.0/4711/history");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });
    let client = common::client_for(&server);

    let h = history::fetch_player_history(
        &client,
        "4711",
        &request(10),
        &CancellationToken::new(),
        &mut NullLog,
    )
    .await;
    page.assert();

    assert_eq!(h.matches.len(), 2);
    let m = &h.matches[0];
    assert!(m.is_doubles());
    assert_eq!(
        m.match_date(),
        chrono::NaiveDate::from_ymd_opt(2024, 9, 14)
    );
    assert_eq!(m.outcome_for("4711"), Some(dupr_rs::MatchOutcome::Win));
    assert_eq!(m.score_summary_for("4711").as_deref(), Some("11-7, 8-11, 11-5"));

    let second = &h.matches[1];
    assert!(!second.is_doubles());
    assert_eq!(second.outcome_for("4711"), Some(dupr_rs::MatchOutcome::Loss));
    assert_eq!(second.score_summary_for("4711").as_deref(), Some("9-11"));
}

#[tokio::test]
async fn one_odd_match_does_not_lose_the_page() {
    let server = common::setup_server();
    let mut loose = common::match_json(7, 4711, 9, true);
    loose["confirmed"] = json!("true");
    loose["teams"][0]["game1"] = json!(11.0);
    let hits = vec![
        common::match_json(6, 4711, 9, false),
        json!({ "id": 8, "teams": null }),
        loose,
        json!("not a match"),
    ];
    let first = common::mock_history_page(&server, 4711, 0, 4, common::paged(0, 4, 8, hits));
    let second = common::mock_history_page(
        &server,
        4711,
        4,
        4,
        common::paged(4, 4, 8, vec![common::match_json(9, 4711, 3, true)]),
    );
    let client = common::client_for(&server);

    let h = history::fetch_player_history(
        &client,
        "4711",
        &request(4),
        &CancellationToken::new(),
        &mut NullLog,
    )
    .await;

    first.assert_hits(1);
    second.assert_hits(1);
    assert_eq!(h.stop, HistoryStop::Exhausted);
    assert_eq!(h.attempts, 2);
    let ids: Vec<_> = h.matches.iter().map(|m| m.id.as_deref().unwrap()).collect();
    assert_eq!(ids, ["6", "8", "7", "9"]);
    assert!(h.matches[1].teams.is_empty());
    assert_eq!(h.matches[2].confirmed, Some(true));
    assert_eq!(h.matches[2].teams[0].game1, Some(11));
}
