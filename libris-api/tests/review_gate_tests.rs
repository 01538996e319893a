//! Review gate tests: completion unlocks exactly one reviewing opportunity

mod helpers;

use helpers::{seed_book, seed_category, seed_user, setup_pool};
use libris_api::store::{ProgressStore, ReviewGate, ReviewStore};
use libris_common::Error;

#[tokio::test]
async fn no_progress_record_means_not_eligible() {
    let pool = setup_pool().await;
    let (reader, _) = seed_user(&pool, "alice", false).await;
    let category = seed_category(&pool, "Fiction").await;
    let book = seed_book(&pool, "Dune", &category).await;

    let gate = ReviewGate::new(pool.clone());
    assert!(!gate.can_review(&reader, &book).await.unwrap());
}

#[tokio::test]
async fn partial_progress_is_not_eligible() {
    let pool = setup_pool().await;
    let (reader, _) = seed_user(&pool, "alice", false).await;
    let category = seed_category(&pool, "Fiction").await;
    let book = seed_book(&pool, "Dune", &category).await;

    ProgressStore::new(pool.clone())
        .record_progress(&reader, &book, 99)
        .await
        .unwrap();

    let gate = ReviewGate::new(pool.clone());
    assert!(!gate.can_review(&reader, &book).await.unwrap());
}

#[tokio::test]
async fn completion_without_review_is_eligible() {
    let pool = setup_pool().await;
    let (reader, _) = seed_user(&pool, "alice", false).await;
    let category = seed_category(&pool, "Fiction").await;
    let book = seed_book(&pool, "Dune", &category).await;

    ProgressStore::new(pool.clone())
        .record_progress(&reader, &book, 100)
        .await
        .unwrap();

    let gate = ReviewGate::new(pool.clone());
    assert!(gate.can_review(&reader, &book).await.unwrap());
    gate.assert_reviewable(&reader, &book).await.unwrap();
}

#[tokio::test]
async fn existing_review_locks_the_gate() {
    let pool = setup_pool().await;
    let (reader, _) = seed_user(&pool, "alice", false).await;
    let category = seed_category(&pool, "Fiction").await;
    let book = seed_book(&pool, "Dune", &category).await;

    let progress = ProgressStore::new(pool.clone());
    progress.record_progress(&reader, &book, 100).await.unwrap();

    ReviewStore::new(pool.clone())
        .create(&book, &reader, "A classic.")
        .await
        .unwrap();

    let gate = ReviewGate::new(pool.clone());
    assert!(!gate.can_review(&reader, &book).await.unwrap());

    // Re-submitting 100% does not reopen the gate
    progress.record_progress(&reader, &book, 100).await.unwrap();
    assert!(!gate.can_review(&reader, &book).await.unwrap());

    let err = gate.assert_reviewable(&reader, &book).await.unwrap_err();
    assert!(matches!(err, Error::NotEligible(_)));
}

#[tokio::test]
async fn scenario_forty_thirty_hundred_then_review() {
    let pool = setup_pool().await;
    let (reader, _) = seed_user(&pool, "alice", false).await;
    let category = seed_category(&pool, "Fiction").await;
    let book = seed_book(&pool, "Dune", &category).await;

    let progress = ProgressStore::new(pool.clone());
    let gate = ReviewGate::new(pool.clone());

    progress.record_progress(&reader, &book, 40).await.unwrap();
    assert!(!gate.can_review(&reader, &book).await.unwrap());

    progress.record_progress(&reader, &book, 30).await.unwrap();
    assert!(!gate.can_review(&reader, &book).await.unwrap());

    progress.record_progress(&reader, &book, 100).await.unwrap();
    assert!(gate.can_review(&reader, &book).await.unwrap());

    ReviewStore::new(pool.clone())
        .create(&book, &reader, "Finished at last.")
        .await
        .unwrap();
    assert!(!gate.can_review(&reader, &book).await.unwrap());

    progress.record_progress(&reader, &book, 100).await.unwrap();
    assert!(!gate.can_review(&reader, &book).await.unwrap());
}

#[tokio::test]
async fn eligibility_is_per_reader() {
    let pool = setup_pool().await;
    let (alice, _) = seed_user(&pool, "alice", false).await;
    let (bob, _) = seed_user(&pool, "bob", false).await;
    let category = seed_category(&pool, "Fiction").await;
    let book = seed_book(&pool, "Dune", &category).await;

    let progress = ProgressStore::new(pool.clone());
    progress.record_progress(&alice, &book, 100).await.unwrap();
    progress.record_progress(&bob, &book, 50).await.unwrap();

    let gate = ReviewGate::new(pool.clone());
    assert!(gate.can_review(&alice, &book).await.unwrap());
    assert!(!gate.can_review(&bob, &book).await.unwrap());
}

#[tokio::test]
async fn another_readers_review_does_not_lock_the_gate() {
    let pool = setup_pool().await;
    let (alice, _) = seed_user(&pool, "alice", false).await;
    let (bob, _) = seed_user(&pool, "bob", false).await;
    let category = seed_category(&pool, "Fiction").await;
    let book = seed_book(&pool, "Dune", &category).await;

    let progress = ProgressStore::new(pool.clone());
    progress.record_progress(&alice, &book, 100).await.unwrap();
    progress.record_progress(&bob, &book, 100).await.unwrap();

    ReviewStore::new(pool.clone())
        .create(&book, &bob, "Bob's take.")
        .await
        .unwrap();

    let gate = ReviewGate::new(pool.clone());
    assert!(gate.can_review(&alice, &book).await.unwrap());
}
