//! Watchlist store integration tests
//!
//! Runs the store against JSON documents in a temporary data directory.

mod utils;

use serde_json::json;
use shiori_lib::modules::watchlist::{DisplayOrder, EpisodeCount, TitleDraft};
use shiori_lib::shared::{
    config::ReorderPolicy, domain::MediaKind, errors::AppError, utils::Validator,
};
use std::time::Duration;
use utils::factories::TitleFactory;
use utils::helpers::{build_test_services, build_test_services_with_policy};

#[tokio::test]
async fn test_add_inserts_then_merges_by_title() {
    let services = build_test_services();
    let watchlist = &services.watchlist;

    let first = watchlist
        .add(TitleFactory::anime("Mushishi").episodes(26).notes("calm").build())
        .await
        .unwrap();
    assert!(first.created);
    assert_eq!(first.record.watched_episodes(), 0);
    assert_eq!(first.record.order(), 0);
    assert!(!first.record.is_completed());

    tokio::time::sleep(Duration::from_millis(5)).await;

    let second = watchlist
        .add(
            TitleFactory::anime("Mushishi")
                .episodes(26)
                .notes("rewatch")
                .extra("score", json!(8.7))
                .build(),
        )
        .await
        .unwrap();

    assert!(!second.created);
    assert_eq!(second.record.id(), first.record.id());
    assert_eq!(second.record.created_at(), first.record.created_at());
    assert!(second.record.updated_at() > first.record.updated_at());
    assert_eq!(second.record.notes(), "rewatch");
    assert_eq!(second.record.extra().get("score"), Some(&json!(8.7)));
    assert_eq!(watchlist.list().await.len(), 1);
}

#[tokio::test]
async fn test_blank_title_is_rejected_and_nothing_written() {
    let services = build_test_services();

    let result = services.watchlist.add(TitleDraft::new("   ")).await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert!(!services.watchlist_path().exists());
}

#[tokio::test]
async fn test_episode_counts_above_the_limit_are_rejected() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    let limit = Validator::MAX_EPISODES;

    let result = watchlist
        .add(TitleFactory::anime("Endless").episodes(3_000_000).build())
        .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert!(!services.watchlist_path().exists());

    let at_limit = watchlist
        .add(TitleFactory::manga("Long Runner").episodes(limit).build())
        .await
        .unwrap();
    assert_eq!(at_limit.record.total_episodes(), EpisodeCount::Known(limit));

    let grown = watchlist
        .add(TitleFactory::manga("Long Runner").episodes(limit + 1).build())
        .await;
    assert!(matches!(grown, Err(AppError::ValidationError(_))));
    let stored = watchlist.get("Long Runner").await.unwrap();
    assert_eq!(stored.total_episodes(), EpisodeCount::Known(limit));
}

#[tokio::test]
async fn test_thirty_episodes_split_into_four_seasons() {
    let services = build_test_services();
    let record = services
        .watchlist
        .add(TitleFactory::anime("Trigun Stampede").episodes(30).build())
        .await
        .unwrap()
        .record;

    let sizes: Vec<usize> = record
        .seasons()
        .iter()
        .map(|s| record.season_episodes().season(s).unwrap().len())
        .collect();
    assert_eq!(sizes, vec![8, 8, 8, 6]);

    let numbers: Vec<u32> = record
        .seasons()
        .iter()
        .flat_map(|s| record.season_episodes().season(s).unwrap().iter().map(|e| e.number))
        .collect();
    assert_eq!(numbers, (1..=30).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_watched_count_matches_recount_and_toggles_are_idempotent() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    watchlist
        .add(TitleFactory::anime("Cowboy Bebop").episodes(26).build())
        .await
        .unwrap();

    assert_eq!(watchlist.set_episode_watched("Cowboy Bebop", "Season 1", 1, true).await.unwrap(), 1);
    assert_eq!(watchlist.set_episode_watched("Cowboy Bebop", "Season 1", 1, true).await.unwrap(), 1);
    assert_eq!(watchlist.set_episode_watched("Cowboy Bebop", "Season 2", 14, true).await.unwrap(), 2);
    assert_eq!(watchlist.set_episode_watched("Cowboy Bebop", "Season 1", 1, false).await.unwrap(), 1);

    let record = watchlist.get("Cowboy Bebop").await.unwrap();
    let recount = record.season_episodes().episodes().filter(|e| e.watched).count() as u32;
    assert_eq!(record.watched_episodes(), recount);
    assert_eq!(recount, 1);
}

#[tokio::test]
async fn test_completion_follows_threshold_both_ways() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    watchlist
        .add(TitleFactory::anime("FLCL").episodes(6).build())
        .await
        .unwrap();

    watchlist.mark_episodes_through("FLCL", "Season 1", 6, true).await.unwrap();
    assert!(watchlist.get("FLCL").await.unwrap().is_completed());

    watchlist.set_episode_watched("FLCL", "Season 1", 4, false).await.unwrap();
    let record = watchlist.get("FLCL").await.unwrap();
    assert!(!record.is_completed());
    assert_eq!(record.watched_episodes(), 5);
    assert_eq!(record.progress_percentage(), 83);
}

#[tokio::test]
async fn test_mark_through_only_touches_the_named_season() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    watchlist
        .add(TitleFactory::anime("Frieren").episodes(28).build())
        .await
        .unwrap();

    let count = watchlist
        .mark_episodes_through("Frieren", "Season 2", 10, true)
        .await
        .unwrap();

    // Season 2 covers 8..=14
    assert_eq!(count, 3);
    let record = watchlist.get("Frieren").await.unwrap();
    assert!(!record.season_episodes().is_watched(7));
    assert!(record.season_episodes().is_watched(8));
    assert!(!record.season_episodes().is_watched(11));
}

#[tokio::test]
async fn test_operations_on_missing_title_are_not_found() {
    let services = build_test_services();
    let watchlist = &services.watchlist;

    let results = [
        watchlist.set_episode_watched("Ghost", "Season 1", 1, true).await.err(),
        watchlist.mark_episodes_through("Ghost", "Season 1", 3, true).await.err(),
        watchlist.set_season("Ghost", "Season 1").await.err(),
        watchlist.set_notes("Ghost", "boo".to_string()).await.err(),
        watchlist
            .set_custom_fields("Ghost", "S2".to_string(), "5".to_string())
            .await
            .err(),
        watchlist.get("Ghost").await.err(),
    ];

    for result in results {
        assert!(matches!(result, Some(AppError::NotFound(_))), "{:?}", result);
    }
}

#[tokio::test]
async fn test_invalid_episode_leaves_record_untouched() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    watchlist
        .add(TitleFactory::anime("Akira").episodes(1).build())
        .await
        .unwrap();
    let before = watchlist.get("Akira").await.unwrap();

    let result = watchlist.set_episode_watched("Akira", "Season 1", 2, true).await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert_eq!(watchlist.get("Akira").await.unwrap(), before);
}

#[tokio::test]
async fn test_unknown_length_titles_track_lazily() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    let record = watchlist
        .add(TitleFactory::anime("One Piece").build())
        .await
        .unwrap()
        .record;
    assert_eq!(record.total_episodes(), EpisodeCount::Unknown);
    assert!(record.seasons().is_empty());

    let count = watchlist
        .set_episode_watched("One Piece", "Season 3", 1090, true)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let record = watchlist
        .set_custom_fields("One Piece", "Egghead".to_string(), "1090".to_string())
        .await
        .unwrap();
    assert_eq!(record.custom_season(), "Egghead");
    assert!(!record.is_completed());
    assert_eq!(record.progress_percentage(), 0);
}

#[tokio::test]
async fn test_single_field_updates_refresh_updated_at() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    let original = watchlist
        .add(TitleFactory::manga("Berserk").episodes(41).build())
        .await
        .unwrap()
        .record;

    tokio::time::sleep(Duration::from_millis(5)).await;
    let updated = watchlist.set_season("Berserk", "Volume 3").await.unwrap();
    assert_eq!(updated.current_season(), Some("Season 3"));
    assert!(updated.updated_at() > original.updated_at());

    tokio::time::sleep(Duration::from_millis(5)).await;
    let noted = watchlist.set_notes("Berserk", "Golden Age".to_string()).await.unwrap();
    assert_eq!(noted.notes(), "Golden Age");
    assert!(noted.updated_at() > updated.updated_at());
    assert_eq!(noted.created_at(), original.created_at());

    let result = watchlist.set_season("Berserk", "Season 9").await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

/// Reorder keeps only the titles it is given. C is not named, so it is
/// removed from the watchlist entirely.
#[tokio::test]
async fn test_reorder_drops_unnamed_titles() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    for (title, order) in [("A", 0), ("B", 1), ("C", 5)] {
        watchlist
            .add(TitleFactory::anime(title).episodes(12).order(order).build())
            .await
            .unwrap();
    }

    let outcome = watchlist
        .reorder(&["B".to_string(), "A".to_string()])
        .await
        .unwrap();

    let orders: Vec<(&str, i64)> = outcome.titles.iter().map(|r| (r.title(), r.order())).collect();
    assert_eq!(orders, vec![("B", 0), ("A", 1)]);
    assert_eq!(outcome.dropped, vec!["C".to_string()]);

    let stored = watchlist.list().await;
    assert_eq!(stored.len(), 2);
    assert!(watchlist.get("C").await.is_err());
}

#[tokio::test]
async fn test_reorder_skips_names_not_in_store() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    watchlist.add(TitleFactory::anime("A").build()).await.unwrap();

    let outcome = watchlist
        .reorder(&["Z".to_string(), "A".to_string()])
        .await
        .unwrap();

    assert_eq!(outcome.missing, vec!["Z".to_string()]);
    assert_eq!(outcome.titles[0].title(), "A");
    assert_eq!(outcome.titles[0].order(), 1);
}

/// Order follows the position in the requested list, so an unknown name
/// still takes up its slot.
#[tokio::test]
async fn test_reorder_uses_requested_positions() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    for title in ["A", "B"] {
        watchlist.add(TitleFactory::anime(title).build()).await.unwrap();
    }

    let outcome = watchlist
        .reorder(&["Z".to_string(), "B".to_string(), "A".to_string()])
        .await
        .unwrap();

    let orders: Vec<(&str, i64)> = outcome.titles.iter().map(|r| (r.title(), r.order())).collect();
    assert_eq!(orders, vec![("B", 1), ("A", 2)]);

    let stored: Vec<(String, i64)> = watchlist
        .list()
        .await
        .iter()
        .map(|r| (r.title().to_string(), r.order()))
        .collect();
    assert_eq!(stored, vec![("B".to_string(), 1), ("A".to_string(), 2)]);
}

#[tokio::test]
async fn test_reorder_append_policy_keeps_unnamed_titles() {
    let services = build_test_services_with_policy(ReorderPolicy::AppendUnnamed);
    let watchlist = &services.watchlist;
    for title in ["A", "B", "C"] {
        watchlist.add(TitleFactory::anime(title).build()).await.unwrap();
    }

    let outcome = watchlist
        .reorder(&["C".to_string(), "Z".to_string(), "A".to_string()])
        .await
        .unwrap();

    let orders: Vec<(&str, i64)> = outcome.titles.iter().map(|r| (r.title(), r.order())).collect();
    assert_eq!(orders, vec![("C", 0), ("A", 2), ("B", 3)]);
    assert!(outcome.dropped.is_empty());
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    watchlist.add(TitleFactory::anime("Paprika").build()).await.unwrap();

    assert!(watchlist.remove("Paprika").await.unwrap());
    assert!(!watchlist.remove("Paprika").await.unwrap());
    assert!(watchlist.list().await.is_empty());
}

#[tokio::test]
async fn test_concurrent_toggles_are_not_lost() {
    let services = build_test_services();
    let watchlist = services.watchlist.clone();
    watchlist
        .add(TitleFactory::anime("Haibane Renmei").episodes(13).build())
        .await
        .unwrap();

    let (first, second, third) = futures::join!(
        watchlist.set_episode_watched("Haibane Renmei", "Season 1", 1, true),
        watchlist.set_episode_watched("Haibane Renmei", "Season 1", 2, true),
        watchlist.set_notes("Haibane Renmei", "wings".to_string()),
    );
    first.unwrap();
    second.unwrap();
    third.unwrap();

    let record = watchlist.get("Haibane Renmei").await.unwrap();
    assert_eq!(record.watched_episodes(), 2);
    assert!(record.season_episodes().is_watched(1));
    assert!(record.season_episodes().is_watched(2));
    assert_eq!(record.notes(), "wings");
}

#[tokio::test]
async fn test_spawned_toggles_from_many_tasks_all_apply() {
    let services = build_test_services();
    let watchlist = services.watchlist.clone();
    watchlist
        .add(TitleFactory::anime("Monster").episodes(74).build())
        .await
        .unwrap();
    let seasons = watchlist.get("Monster").await.unwrap().seasons().to_vec();
    let season_one = seasons[0].clone();

    let handles: Vec<_> = (1..=10)
        .map(|episode| {
            let watchlist = watchlist.clone();
            let season = season_one.clone();
            tokio::spawn(async move {
                watchlist
                    .set_episode_watched("Monster", &season, episode, true)
                    .await
            })
        })
        .collect();

    for handle in futures::future::join_all(handles).await {
        handle.unwrap().unwrap();
    }

    assert_eq!(watchlist.get("Monster").await.unwrap().watched_episodes(), 10);
}

#[tokio::test]
async fn test_state_survives_restart() {
    let services = build_test_services();
    services
        .watchlist
        .add(TitleFactory::anime("Planetes").episodes(26).catalog_id(329).build())
        .await
        .unwrap();
    services
        .watchlist
        .set_episode_watched("Planetes", "Season 2", 20, true)
        .await
        .unwrap();

    let (watchlist, _) = services.reopen();
    let record = watchlist.get("Planetes").await.unwrap();

    assert_eq!(record.watched_episodes(), 1);
    assert_eq!(record.catalog_id().map(|id| id.as_str()), Some("329"));
    assert_eq!(record.season_episodes().season_of(20), Some("Season 2"));
}

#[tokio::test]
async fn test_display_order_sinks_completed_titles() {
    let services = build_test_services();
    let watchlist = &services.watchlist;
    watchlist
        .add(TitleFactory::anime("Done").episodes(1).order(0).build())
        .await
        .unwrap();
    watchlist
        .add(TitleFactory::anime("Ongoing").episodes(12).order(3).build())
        .await
        .unwrap();
    watchlist
        .add(TitleFactory::manga("Vagabond").episodes(37).build())
        .await
        .unwrap();
    watchlist.set_episode_watched("Done", "Season 1", 1, true).await.unwrap();

    let (anime, manga) = DisplayOrder::partition_by_kind(watchlist.list().await);

    let titles: Vec<&str> = anime.iter().map(|r| r.title()).collect();
    assert_eq!(titles, vec!["Ongoing", "Done"]);
    assert_eq!(manga.len(), 1);
    assert_eq!(manga[0].kind(), MediaKind::Manga);
}
