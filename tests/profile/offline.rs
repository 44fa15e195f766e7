use crate::common;
use dupr_rs::profile::{self, RATING_NOT_AVAILABLE};
use dupr_rs::{Member, NullLog};
use httpmock::Method::GET;
use tokio_util::sync::CancellationToken;

fn members(n: u64) -> Vec<Member> {
    (1..=n)
        .map(|i| serde_json::from_value(common::member_json(i, &format!("Member {i}"))).unwrap())
        .collect()
}

#[tokio::test]
async fn failing_member_is_skipped_and_the_batch_continues() {
    let server = common::setup_server();
    let p1 = common::mock_player(&server, 1, "3.600", "4.100");
    let p2 = server.mock(|when, then| {
        when.method(GET).path("/player/v1.0/2");
        then.status(404).body("not found");
    });
    let p3 = server.mock(|when, then| {
        when.method(GET).path("/player/v1.0/3");
        then.status(200)
            .json_body(serde_json::json!({ "status": "SUCCESS", "result": { "id": 3 } }));
    });
    let client = common::client_for(&server);

    let mut lines = Vec::new();
    let mut log = |m: &str| lines.push(m.to_string());
    let profiles = profile::enrich(
        &client,
        &members(3),
        &CancellationToken::new(),
        &mut log,
        &common::no_pacing(),
    )
    .await;

    p1.assert();
    p2.assert();
    p3.assert();

    let ids: Vec<_> = profiles.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);

    assert_eq!(profiles[0].singles_rating, "3.600");
    assert_eq!(profiles[0].doubles_rating, "4.100");
    assert_eq!(profiles[0].full_name.as_deref(), Some("Member 1"));
    assert_eq!(profiles[0].singles.as_deref(), Some("3.512"));
    assert_eq!(profiles[1].singles_rating, RATING_NOT_AVAILABLE);
    assert_eq!(profiles[1].doubles_rating, RATING_NOT_AVAILABLE);

    assert!(lines.iter().any(|l| l.contains("Failed to fetch profile 2")));
}

#[tokio::test]
async fn cancelled_before_start_yields_no_profiles() {
    let server = common::setup_server();
    let p1 = common::mock_player(&server, 1, "3.0", "3.0");
    let client = common::client_for(&server);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let profiles = profile::enrich(
        &client,
        &members(3),
        &cancel,
        &mut NullLog,
        &common::no_pacing(),
    )
    .await;

    assert!(profiles.is_empty());
    p1.assert_hits(0);
}

#[tokio::test]
async fn cancelled_midway_keeps_processed_members_in_order() {
    let server = common::setup_server();
    let mocks: Vec<_> = (1..=5)
        .map(|i| common::mock_player(&server, i, "3.0", "3.5"))
        .collect();
    let client = common::client_for(&server);

    // Cancel while the third member is being processed: its lookup still
    // completes, the fourth is never started.
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let mut log = move |m: &str| {
        if m.contains("Processing player 3/5") {
            trigger.cancel();
        }
    };
    let profiles = profile::enrich(
        &client,
        &members(5),
        &cancel,
        &mut log,
        &common::no_pacing(),
    )
    .await;

    let ids: Vec<_> = profiles.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    mocks[2].assert_hits(1);
    mocks[3].assert_hits(0);
    mocks[4].assert_hits(0);
}
