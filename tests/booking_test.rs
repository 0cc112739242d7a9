//! Integration tests for game and table booking.

mod helpers;

use futures::future::join_all;

use helpers::{DAY, TestApp, doc};
use tablehub_core::config::AdmissionStrategy;
use tablehub_core::error::ErrorKind;
use tablehub_core::types::UserId;
use tablehub_entity::reservation::{Admission, RejectionReason};

const STRATEGIES: [AdmissionStrategy; 2] =
    [AdmissionStrategy::Conditional, AdmissionStrategy::Serialized];

#[tokio::test]
async fn test_catan_afternoon_scenario() {
    // 14:00 for an hour, plus a 15:00 record written without a duration.
    let app = TestApp::new(
        AdmissionStrategy::Conditional,
        vec![doc("Catan", DAY, "14:00", Some(60)), doc("Catan", DAY, "15:00", None)],
    );

    let outcome = app
        .booking
        .book_game_on(app.today(), UserId::new("carol"), "Catan", 4, DAY, "14:30")
        .await
        .unwrap();

    let reservation = outcome.reservation().expect("admitted");
    assert_eq!(reservation.resource_id, "Catan");
    assert_eq!(reservation.time.to_string(), "14:30");
    assert_eq!(reservation.day.to_string(), DAY);
    assert_eq!(reservation.players, 4);
    assert_eq!(app.store.len().await, 3);

    // Both copies are now taken at 14:30.
    let next = app
        .booking
        .book_game_on(app.today(), UserId::new("dave"), "Catan", 3, DAY, "14:30")
        .await
        .unwrap();
    assert!(!next.is_admitted());
}

#[tokio::test]
async fn test_back_to_back_sessions_share_one_copy() {
    for strategy in STRATEGIES {
        let app = TestApp::new(strategy, vec![]);
        for time in ["14:00", "15:00", "16:00"] {
            let outcome = app
                .booking
                .book_game_on(app.today(), UserId::new("erin"), "Azul", 2, DAY, time)
                .await
                .unwrap();
            assert!(outcome.is_admitted(), "{strategy} at {time}");
        }
        assert_eq!(app.store.len().await, 3);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_never_exceed_stock() {
    for strategy in STRATEGIES {
        let app = TestApp::new(strategy, vec![]);

        let attempts = (0..16).map(|i| {
            let booking = app.booking.clone();
            let today = app.today();
            tokio::spawn(async move {
                let user = UserId::new(format!("p{i}"));
                booking.book_game_on(today, user, "Catan", 3, DAY, "19:00").await
            })
        });

        let outcomes: Vec<Admission> = join_all(attempts)
            .await
            .into_iter()
            .map(|joined| joined.unwrap().unwrap())
            .collect();

        let admitted = outcomes.iter().filter(|o| o.is_admitted()).count();
        assert_eq!(admitted, 2, "{strategy}");
        assert_eq!(app.store.len().await, 2, "{strategy}");

        for outcome in outcomes.iter().filter(|o| !o.is_admitted()) {
            match outcome {
                Admission::Rejected(r) => assert_eq!(r.reason, RejectionReason::NoCapacity),
                Admission::Admitted(_) => unreachable!(),
            }
        }
    }
}

#[tokio::test]
async fn test_other_days_do_not_count() {
    let app = TestApp::new(
        AdmissionStrategy::Conditional,
        vec![doc("Azul", "2025-06-02", "16:00", Some(45))],
    );
    assert!(app.booking.availability("Azul", DAY, "16:00").await.unwrap());
    assert!(!app.booking.availability("Azul", "2025-06-02", "16:00").await.unwrap());
}

#[tokio::test]
async fn test_errors_are_categorised() {
    let app = TestApp::new(AdmissionStrategy::Conditional, vec![]);

    let parse = app
        .booking
        .book_game_on(app.today(), UserId::new("x"), "Catan", 3, DAY, "7pm")
        .await
        .unwrap_err();
    assert!(parse.is(ErrorKind::Parse));

    let missing = app
        .booking
        .book_game_on(app.today(), UserId::new("x"), "Monopoly", 3, DAY, "16:00")
        .await
        .unwrap_err();
    assert!(missing.is(ErrorKind::NotFound));

    let players = app
        .booking
        .book_game_on(app.today(), UserId::new("x"), "Azul", 1, DAY, "16:00")
        .await
        .unwrap_err();
    assert!(players.is(ErrorKind::Validation));

    let past = app
        .booking
        .book_game_on(app.today(), UserId::new("x"), "Azul", 2, "2025-05-31", "16:00")
        .await
        .unwrap_err();
    assert!(past.is(ErrorKind::Validation));
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_table_bookings() {
    let app = TestApp::new(AdmissionStrategy::Conditional, vec![]);
    for _ in 0..5 {
        let outcome = app
            .booking
            .book_table_on(app.today(), UserId::new("club"), 6, DAY, "20:00")
            .await
            .unwrap();
        assert!(outcome.is_admitted());
    }

    let reservations = app.admin.list_reservations().await.unwrap();
    assert_eq!(reservations.len(), 5);
    assert!(reservations.iter().all(|r| r.resource_id == "table"));
    assert!(reservations.iter().all(|r| r.duration_minutes.is_none()));
}
