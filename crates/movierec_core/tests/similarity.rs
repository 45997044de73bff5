use movierec_core::{Rating, RatingStore, SimilarityEngine, UnknownUserError};

fn store(rows: &[(&str, &str, f64)]) -> RatingStore {
    RatingStore::from_ratings(
        rows.iter()
            .map(|(user, item, value)| Rating::new(*user, *item, *value)),
    )
    .unwrap()
}

fn sample_store() -> RatingStore {
    store(&[
        ("Alice", "The Matrix", 5.0),
        ("Alice", "Inception", 4.0),
        ("Alice", "The Godfather", 3.0),
        ("Alice", "Pulp Fiction", 5.0),
        ("Bob", "The Matrix", 4.0),
        ("Bob", "Inception", 5.0),
        ("Bob", "The Dark Knight", 5.0),
        ("Bob", "Forrest Gump", 2.0),
        ("Charlie", "The Godfather", 5.0),
        ("Charlie", "Pulp Fiction", 4.0),
        ("Charlie", "The Dark Knight", 3.0),
        ("David", "Inception", 3.0),
        ("David", "The Dark Knight", 4.0),
        ("David", "Forrest Gump", 5.0),
        ("David", "The Matrix", 2.0),
        ("Eve", "Pulp Fiction", 5.0),
        ("Eve", "The Godfather", 4.0),
        ("Eve", "The Matrix", 4.0),
        ("Frank", "The Dark Knight", 5.0),
        ("Frank", "Forrest Gump", 5.0),
        ("Frank", "Inception", 4.0),
    ])
}

#[test]
fn self_similarity_is_exactly_one_or_undefined() {
    let store = sample_store();
    let engine = SimilarityEngine::new(&store);

    for user in store.users() {
        assert_eq!(engine.similarity(user, user), Some(1.0), "user {user}");
    }

    let flat = store_with_flat_user();
    let engine = SimilarityEngine::new(&flat);
    assert_eq!(engine.similarity("Flat", "Flat"), None);
}

fn store_with_flat_user() -> RatingStore {
    store(&[
        ("Flat", "A", 3.0),
        ("Flat", "B", 3.0),
        ("Flat", "C", 3.0),
    ])
}

#[test]
fn similarity_is_symmetric_for_every_pair() {
    let store = sample_store();
    let engine = SimilarityEngine::new(&store);

    for a in store.users() {
        for b in store.users() {
            let forward = engine.similarity(a, b);
            let backward = engine.similarity(b, a);
            assert_eq!(
                forward.map(f64::to_bits),
                backward.map(f64::to_bits),
                "pair {a}/{b}"
            );
            if let Some(score) = forward {
                assert!((-1.0..=1.0).contains(&score));
            }
        }
    }
}

#[test]
fn single_shared_item_is_undefined() {
    let store = store(&[
        ("Alice", "Matrix", 5.0),
        ("Alice", "Inception", 4.0),
        ("Bob", "Matrix", 4.0),
        ("Bob", "DarkKnight", 5.0),
    ]);
    let engine = SimilarityEngine::new(&store);

    assert_eq!(engine.similarity("Alice", "Bob"), None);
}

#[test]
fn zero_variance_over_shared_items_is_undefined() {
    let store = store(&[
        ("Alice", "A", 4.0),
        ("Alice", "B", 4.0),
        ("Alice", "C", 1.0),
        ("Bob", "A", 2.0),
        ("Bob", "B", 5.0),
    ]);
    let engine = SimilarityEngine::new(&store);

    // Alice rated both shared items 4.
    assert_eq!(engine.similarity("Alice", "Bob"), None);
}

#[test]
fn similarity_uses_only_intersection() {
    let store = store(&[
        ("Alice", "A", 1.0),
        ("Alice", "B", 2.0),
        ("Alice", "C", 3.0),
        ("Alice", "Only Alice", 1.0),
        ("Bob", "A", 1.0),
        ("Bob", "B", 5.0),
        ("Bob", "C", 3.0),
        ("Bob", "Only Bob", 5.0),
    ]);
    let engine = SimilarityEngine::new(&store);

    let score = engine.similarity("Alice", "Bob").unwrap();
    assert!((score - 0.5).abs() < 1e-12, "unexpected score {score}");
}

#[test]
fn ranked_similar_users_orders_by_score_then_user() {
    let store = store(&[
        ("Target", "A", 1.0),
        ("Target", "B", 2.0),
        ("Target", "C", 3.0),
        ("Zoe", "A", 1.0),
        ("Zoe", "B", 2.0),
        ("Zoe", "C", 3.0),
        ("Amy", "A", 1.0),
        ("Amy", "B", 2.0),
        ("Amy", "C", 3.0),
        ("Partial", "A", 1.0),
        ("Partial", "B", 5.0),
        ("Partial", "C", 3.0),
        ("Inverse", "A", 3.0),
        ("Inverse", "B", 2.0),
        ("Inverse", "C", 1.0),
        ("Loner", "A", 5.0),
        ("Stranger", "X", 5.0),
        ("Stranger", "Y", 1.0),
    ]);
    let engine = SimilarityEngine::new(&store);

    let ranked = engine.ranked_similar_users("Target").unwrap();
    let users: Vec<&str> = ranked.iter().map(|entry| entry.user.as_str()).collect();

    // Amy and Zoe both correlate perfectly; the tie resolves alphabetically.
    assert_eq!(users, vec!["Amy", "Zoe", "Partial", "Inverse"]);
    assert_eq!(ranked[0].score, 1.0);
    assert_eq!(ranked[1].score, 1.0);
    assert!((ranked[2].score - 0.5).abs() < 1e-12);
    assert!((ranked[3].score + 1.0).abs() < 1e-12);
}

#[test]
fn ranked_similar_users_rejects_unknown_target() {
    let store = sample_store();
    let engine = SimilarityEngine::new(&store);

    let err = engine.ranked_similar_users("Zed").unwrap_err();
    assert_eq!(
        err,
        UnknownUserError {
            requested_user: "Zed".to_string(),
            known_users: vec![
                "Alice".to_string(),
                "Bob".to_string(),
                "Charlie".to_string(),
                "David".to_string(),
                "Eve".to_string(),
                "Frank".to_string(),
            ],
        }
    );
}

#[test]
fn huge_ratings_still_produce_bounded_scores() {
    let store = store(&[
        ("Target", "A", 1e200),
        ("Target", "B", -1e200),
        ("Twin", "A", 1e200),
        ("Twin", "B", -1e200),
        ("Mirror", "A", -1e200),
        ("Mirror", "B", 1e200),
    ]);
    let engine = SimilarityEngine::new(&store);

    assert_eq!(engine.similarity("Target", "Twin"), Some(1.0));
    let ranked = engine.ranked_similar_users("Target").unwrap();
    assert_eq!(ranked.len(), 2);
    for entry in &ranked {
        assert!(entry.score.is_finite(), "score {}", entry.score);
        assert!((-1.0..=1.0).contains(&entry.score));
    }
    assert_eq!(ranked[0].user, "Twin");
    assert!((ranked[1].score + 1.0).abs() < 1e-12);
}
