//! Catalog facade tests: detail composition, listings, cascading deletes

mod helpers;

use helpers::{
    link_book_author, seed_author, seed_book, seed_category, seed_user, setup_pool,
};
use libris_api::store::catalog::BookFilters;
use libris_api::store::{BookStore, CatalogQuery, CategoryStore, ProgressStore, ReviewStore};
use libris_common::Error;

#[tokio::test]
async fn detail_composes_category_authors_and_reviews() {
    let pool = setup_pool().await;
    let (alice, _) = seed_user(&pool, "alice", false).await;
    let (bob, _) = seed_user(&pool, "bob", false).await;
    let category = seed_category(&pool, "Science Fiction").await;
    let author = seed_author(&pool, "Frank Herbert").await;
    let book = seed_book(&pool, "Dune", &category).await;
    link_book_author(&pool, &book, &author).await;

    let progress = ProgressStore::new(pool.clone());
    progress.record_progress(&alice, &book, 100).await.unwrap();
    progress.record_progress(&bob, &book, 100).await.unwrap();

    let reviews = ReviewStore::new(pool.clone());
    let first = reviews.create(&book, &alice, "First!").await.unwrap();
    let second = reviews.create(&book, &bob, "Second.").await.unwrap();

    let detail = CatalogQuery::new(pool.clone())
        .get_book_detail(&book, None)
        .await
        .unwrap();

    assert_eq!(detail.name, "Dune");
    assert_eq!(detail.category.name, "Science Fiction");
    assert_eq!(detail.authors.len(), 1);
    assert_eq!(detail.authors[0].name, "Frank Herbert");

    // Reviews sorted by creation time ascending
    assert_eq!(detail.reviews.len(), 2);
    assert_eq!(detail.reviews[0].guid, first.guid);
    assert_eq!(detail.reviews[1].guid, second.guid);
}

#[tokio::test]
async fn detail_without_reader_identity_never_allows_review() {
    let pool = setup_pool().await;
    let (alice, _) = seed_user(&pool, "alice", false).await;
    let category = seed_category(&pool, "Fiction").await;
    let book = seed_book(&pool, "Dune", &category).await;

    ProgressStore::new(pool.clone())
        .record_progress(&alice, &book, 100)
        .await
        .unwrap();

    let catalog = CatalogQuery::new(pool.clone());

    let anonymous = catalog.get_book_detail(&book, None).await.unwrap();
    assert!(!anonymous.can_review);

    let identified = catalog.get_book_detail(&book, Some(&alice)).await.unwrap();
    assert!(identified.can_review);
}

#[tokio::test]
async fn missing_book_is_not_found_not_ineligible() {
    let pool = setup_pool().await;
    let (alice, _) = seed_user(&pool, "alice", false).await;

    let err = CatalogQuery::new(pool.clone())
        .get_book_detail("no-such-book", Some(&alice))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn listing_paginates_and_reports_totals() {
    let pool = setup_pool().await;
    let category = seed_category(&pool, "Fiction").await;
    for i in 0..7 {
        seed_book(&pool, &format!("Book {}", i), &category).await;
    }

    let catalog = CatalogQuery::new(pool.clone());
    let page = catalog
        .list_books(1, 3, &BookFilters::default())
        .await
        .unwrap();
    assert_eq!(page.data.len(), 3);
    assert_eq!(page.meta.total_records, 7);
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.meta.page, 1);

    let last = catalog
        .list_books(3, 3, &BookFilters::default())
        .await
        .unwrap();
    assert_eq!(last.data.len(), 1);

    // Out-of-bounds page clamps to the last page
    let clamped = catalog
        .list_books(99, 3, &BookFilters::default())
        .await
        .unwrap();
    assert_eq!(clamped.meta.page, 3);
}

#[tokio::test]
async fn listing_filters_by_category_author_and_search() {
    let pool = setup_pool().await;
    let fiction = seed_category(&pool, "Fiction").await;
    let poetry = seed_category(&pool, "Poetry").await;
    let herbert = seed_author(&pool, "Frank Herbert").await;

    let dune = seed_book(&pool, "Dune", &fiction).await;
    seed_book(&pool, "Leaves of Grass", &poetry).await;
    link_book_author(&pool, &dune, &herbert).await;

    let catalog = CatalogQuery::new(pool.clone());

    let by_category = catalog
        .list_books(
            1,
            10,
            &BookFilters {
                category: Some(poetry.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_category.data.len(), 1);
    assert_eq!(by_category.data[0].name, "Leaves of Grass");

    let by_author = catalog
        .list_books(
            1,
            10,
            &BookFilters {
                author: Some(herbert.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_author.data.len(), 1);
    assert_eq!(by_author.data[0].guid, dune);

    let by_search = catalog
        .list_books(
            1,
            10,
            &BookFilters {
                search: Some("une".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_search.data.len(), 1);
    assert_eq!(by_search.data[0].name, "Dune");
}

#[tokio::test]
async fn books_in_unknown_category_is_not_found() {
    let pool = setup_pool().await;
    let err = CatalogQuery::new(pool.clone())
        .books_in_category("no-such-category")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn deleting_book_removes_reviews_and_progress() {
    let pool = setup_pool().await;
    let (alice, _) = seed_user(&pool, "alice", false).await;
    let category = seed_category(&pool, "Fiction").await;
    let author = seed_author(&pool, "Frank Herbert").await;
    let book = seed_book(&pool, "Dune", &category).await;
    link_book_author(&pool, &book, &author).await;

    ProgressStore::new(pool.clone())
        .record_progress(&alice, &book, 100)
        .await
        .unwrap();
    ReviewStore::new(pool.clone())
        .create(&book, &alice, "Gone soon.")
        .await
        .unwrap();

    BookStore::new(pool.clone()).delete(&book).await.unwrap();

    for table in ["reviews", "progress_records", "book_authors"] {
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {} WHERE book_guid = ?", table))
                .bind(&book)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 0, "{} rows should be gone", table);
    }

    // The author itself survives
    let authors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(authors, 1);
}

#[tokio::test]
async fn deleting_category_cascades_through_books() {
    let pool = setup_pool().await;
    let (alice, _) = seed_user(&pool, "alice", false).await;
    let doomed = seed_category(&pool, "Doomed").await;
    let safe = seed_category(&pool, "Safe").await;
    let doomed_book = seed_book(&pool, "Ephemeral", &doomed).await;
    let safe_book = seed_book(&pool, "Evergreen", &safe).await;

    let progress = ProgressStore::new(pool.clone());
    progress.record_progress(&alice, &doomed_book, 100).await.unwrap();
    progress.record_progress(&alice, &safe_book, 50).await.unwrap();

    CategoryStore::new(pool.clone()).delete(&doomed).await.unwrap();

    let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(books, 1);

    let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM progress_records")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(records, 1);

    let remaining = progress.get_progress(&alice, &safe_book).await.unwrap();
    assert!(remaining.is_some());
}
