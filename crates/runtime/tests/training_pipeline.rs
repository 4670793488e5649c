//! Sample logging, retraining, and model swap behavior.

use warden_core::{
    AiConfig, Cluster, ClusterSet, GuardId, GuardMode, GuardState, PlayerState, Position, Tick,
};
use warden_runtime::{
    ArtifactRepository, Event, FileArtifactStore, FileSampleLog, GridMap, InMemoryArtifactStore,
    InMemorySampleLog, Runtime, SampleRepository, Topic,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Walks the player east through the guard's field of view long enough to
/// fill the feature window and produce samples.
async fn observe_walk(handle: &warden_runtime::RuntimeHandle) {
    let mut player = PlayerState::new(Position::new(2, 10));
    for tick in 1..=8u64 {
        player.advance_to(Position::new(2 + tick as i32, 10), Tick(tick));
        handle.advance(player.clone(), Vec::new()).await.unwrap();
    }
}

#[tokio::test]
async fn retrain_publishes_models_and_persists_artifacts() {
    init_tracing();
    let samples = InMemorySampleLog::new();
    let artifacts = InMemoryArtifactStore::new();
    let runtime = Runtime::builder()
        .map(GridMap::open(24, 24))
        .ai_config(AiConfig {
            sight_radius: 12.0,
            ..AiConfig::default()
        })
        .guard(GuardState::new(GuardId(0), Position::new(8, 8)))
        .sample_repository(samples.clone())
        .artifact_repository(artifacts.clone())
        .build()
        .unwrap();
    let handle = runtime.handle();
    let mut training_rx = handle.subscribe(Topic::Training);

    observe_walk(&handle).await;
    handle.retrain_now().await.unwrap();

    // Samples reached the append-only log...
    assert!(samples.count().unwrap() > 0);

    // ...the stored predictor is trained...
    let predictor = artifacts.load_predictor().unwrap();
    assert!(predictor.trained_at.is_some());
    assert!(!predictor.table.is_empty());
    assert!(predictor.sample_count > 0);

    // ...the cluster snapshot covers the observed corridor...
    let clusters = artifacts.load_clusters().unwrap();
    assert!(!clusters.is_empty());
    let top = clusters.iter().next().unwrap();
    assert_eq!(top.centroid.y, 10);

    // ...and the swap was announced.
    let mut saw_swap = false;
    while let Ok(event) = training_rx.try_recv() {
        if let Event::Training(warden_runtime::TrainingEvent::ModelSwapped {
            sample_count,
            cluster_count,
            ..
        }) = event
        {
            assert!(sample_count > 0);
            assert!(cluster_count > 0);
            saw_swap = true;
        }
    }
    assert!(saw_swap);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn preloaded_cluster_artifacts_steer_patrol_routes() {
    let artifacts = InMemoryArtifactStore::new();
    artifacts
        .store_clusters(&ClusterSet::new(vec![Cluster::new(
            Position::new(4, 4),
            20,
            Tick(1),
        )]))
        .unwrap();

    let runtime = Runtime::builder()
        .map(GridMap::open(20, 20))
        .guard(GuardState::new(GuardId(0), Position::new(12, 4)))
        .artifact_repository(artifacts)
        .build()
        .unwrap();
    let handle = runtime.handle();

    // Player far away; the guard patrols towards the stored hotspot.
    let player = PlayerState::new(Position::new(19, 19));
    let reports = handle.advance(player.clone(), Vec::new()).await.unwrap();
    assert_eq!(reports[0].mode, GuardMode::Patrol);
    assert_eq!(reports[0].position, Position::new(11, 4));

    let state = handle.query_state().await.unwrap();
    assert_eq!(
        state.guard(GuardId(0)).unwrap().patrol.waypoint,
        Some(Position::new(4, 4))
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn file_backed_session_survives_a_restart() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let sample_path = dir.path().join("samples.log");
    let artifact_dir = dir.path().join("models");

    // First session: observe, retrain, shut down.
    {
        let runtime = Runtime::builder()
            .map(GridMap::open(24, 24))
            .ai_config(AiConfig {
                sight_radius: 12.0,
                ..AiConfig::default()
            })
            .guard(GuardState::new(GuardId(0), Position::new(8, 8)))
            .sample_repository(FileSampleLog::open(&sample_path).unwrap())
            .artifact_repository(FileArtifactStore::open(&artifact_dir).unwrap())
            .build()
            .unwrap();
        let handle = runtime.handle();
        observe_walk(&handle).await;
        handle.retrain_now().await.unwrap();
        runtime.shutdown().await.unwrap();
    }

    // Second session resumes from the stored artifacts.
    let store = FileArtifactStore::open(&artifact_dir).unwrap();
    let predictor = store.load_predictor().unwrap();
    assert!(predictor.trained_at.is_some());

    let log = FileSampleLog::open(&sample_path).unwrap();
    assert!(log.count().unwrap() > 0);

    let runtime = Runtime::builder()
        .map(GridMap::open(24, 24))
        .guard(GuardState::new(GuardId(0), Position::new(8, 8)))
        .sample_repository(log)
        .artifact_repository(store)
        .build()
        .unwrap();
    let handle = runtime.handle();
    let player = PlayerState::new(Position::new(20, 20));
    assert!(handle.advance(player, Vec::new()).await.is_ok());
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn cold_start_without_artifacts_still_ticks() {
    let runtime = Runtime::builder()
        .map(GridMap::open(16, 16))
        .guard(GuardState::new(GuardId(0), Position::new(8, 8)))
        .build()
        .unwrap();
    let handle = runtime.handle();

    let player = PlayerState::new(Position::new(1, 1));
    let reports = handle.advance(player, Vec::new()).await.unwrap();
    // No clusters yet: the guard walks the default corner circuit.
    assert_eq!(reports[0].mode, GuardMode::Patrol);

    runtime.shutdown().await.unwrap();
}
