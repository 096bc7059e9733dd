//! Exercise detail loading
//!
//! Consults the detail cache before going to the network, writes fresh
//! fetches back, and looks up related videos once the exercise is known.
//! Concurrent loads of the same identifier are not coalesced: each one may
//! miss, fetch and write, and the last write wins.

use tracing::{debug, warn};

use crate::cache::DetailCache;
use crate::data::videos::related_query;
use crate::data::{Exercise, ExerciseSource, VideoSource, VideoSummary};
use crate::error::ApiError;

/// An exercise plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedExercise {
    pub exercise: Exercise,
    /// True when the cache answered and no request was made
    pub from_cache: bool,
}

/// Loads exercise details through the cache
#[derive(Debug, Clone)]
pub struct DetailLoader<E, V> {
    cache: Option<DetailCache>,
    exercises: E,
    videos: V,
}

impl<E: ExerciseSource, V: VideoSource> DetailLoader<E, V> {
    /// Creates a loader; without a cache every load goes to the network
    pub fn new(cache: Option<DetailCache>, exercises: E, videos: V) -> Self {
        Self {
            cache,
            exercises,
            videos,
        }
    }

    /// Returns the exercise for `id`, from the cache when fresh
    ///
    /// A failed fetch is returned as-is and nothing is written. A failed cache
    /// write is logged and otherwise ignored; the fetched exercise is still
    /// returned.
    pub async fn load_exercise(&self, id: &str) -> Result<LoadedExercise, ApiError> {
        if let Some(ref cache) = self.cache {
            if let Some(exercise) = cache.get::<Exercise>(id) {
                return Ok(LoadedExercise {
                    exercise,
                    from_cache: true,
                });
            }
        }

        let exercise = self.exercises.fetch_exercise(id).await?;

        if let Some(ref cache) = self.cache {
            if let Err(e) = cache.put(id, &exercise) {
                warn!(exercise_id = %id, error = %e, "Failed to cache exercise");
            }
        }

        Ok(LoadedExercise {
            exercise,
            from_cache: false,
        })
    }

    /// Searches videos related to an exercise; failures yield an empty list
    pub async fn related_videos(&self, exercise: &Exercise) -> Vec<VideoSummary> {
        match self.videos.search_videos(&related_query(&exercise.name)).await {
            Ok(videos) => {
                debug!(exercise_id = %exercise.id, count = videos.len(), "Related videos loaded");
                videos
            }
            Err(e) => {
                warn!(exercise_id = %exercise.id, error = %e, "Related video search failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{KeyValueStore, ManualClock, MemoryStore, StoreError, DETAIL_TTL};
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Barrier;

    const T0: i64 = 1_721_044_800_000;

    fn exercise(id: &str, name: &str) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: name.to_string(),
            body_part: "chest".to_string(),
            target: "pectorals".to_string(),
            equipment: "body weight".to_string(),
            gif_url: String::new(),
            instructions: vec!["Lower.".to_string(), "Push.".to_string()],
        }
    }

    /// Serves names in call order, or a fixed error
    #[derive(Debug, Default)]
    struct FakeExercises {
        calls: AtomicUsize,
        names: Vec<&'static str>,
        fail_with: Option<u16>,
        barrier: Option<Arc<Barrier>>,
    }

    impl FakeExercises {
        fn serving(names: Vec<&'static str>) -> Self {
            Self {
                names,
                ..Default::default()
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                fail_with: Some(status),
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ExerciseSource for FakeExercises {
        async fn fetch_exercise(&self, id: &str) -> Result<Exercise, ApiError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(ref barrier) = self.barrier {
                barrier.wait().await;
            }
            if let Some(status) = self.fail_with {
                return Err(ApiError::from_status(
                    StatusCode::from_u16(status).unwrap(),
                    String::new(),
                ));
            }
            let name = self.names.get(call).copied().unwrap_or("unnamed");
            Ok(exercise(id, name))
        }
    }

    impl ExerciseSource for Arc<FakeExercises> {
        async fn fetch_exercise(&self, id: &str) -> Result<Exercise, ApiError> {
            self.as_ref().fetch_exercise(id).await
        }
    }

    #[derive(Debug, Default)]
    struct FakeVideos {
        fail: bool,
        queries: Mutex<Vec<String>>,
    }

    impl VideoSource for FakeVideos {
        async fn search_videos(&self, query: &str) -> Result<Vec<VideoSummary>, ApiError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(ApiError::RateLimited);
            }
            Ok(vec![VideoSummary {
                id: "vid1".to_string(),
                title: format!("How to {}", query),
                description: String::new(),
                channel_title: "Coach".to_string(),
            }])
        }
    }

    /// Records every successful write in order
    #[derive(Debug, Default)]
    struct RecordingStore {
        inner: MemoryStore,
        writes: Mutex<Vec<String>>,
    }

    impl KeyValueStore for RecordingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.put(key, value)?;
            self.writes.lock().unwrap().push(value.to_string());
            Ok(())
        }
    }

    fn cache_with_clock() -> (DetailCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(T0));
        let cache = DetailCache::with_clock(Arc::new(MemoryStore::new()), clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_miss_fetches_and_writes() {
        let (cache, _clock) = cache_with_clock();
        let loader = DetailLoader::new(
            Some(cache.clone()),
            FakeExercises::serving(vec!["push-up"]),
            FakeVideos::default(),
        );

        let loaded = loader.load_exercise("0001").await.expect("Should load");

        assert!(!loaded.from_cache);
        assert_eq!(loaded.exercise.name, "push-up");
        assert_eq!(cache.get::<Exercise>("0001"), Some(loaded.exercise));
    }

    #[tokio::test]
    async fn test_fresh_hit_skips_fetch() {
        let (cache, _clock) = cache_with_clock();
        cache.put("0001", &exercise("0001", "push-up")).unwrap();
        let exercises = FakeExercises::serving(vec!["should not be fetched"]);
        let loader = DetailLoader::new(Some(cache), exercises, FakeVideos::default());

        let loaded = loader.load_exercise("0001").await.expect("Should load");

        assert!(loaded.from_cache);
        assert_eq!(loaded.exercise.name, "push-up");
        assert_eq!(loader.exercises.calls(), 0);
    }

    #[tokio::test]
    async fn test_stale_entry_is_refetched_and_replaced() {
        let (cache, clock) = cache_with_clock();
        cache.put("0001", &exercise("0001", "push-up")).unwrap();
        clock.advance(DETAIL_TTL + std::time::Duration::from_secs(3600));

        let loader = DetailLoader::new(
            Some(cache.clone()),
            FakeExercises::serving(vec!["push-up v2"]),
            FakeVideos::default(),
        );
        let loaded = loader.load_exercise("0001").await.expect("Should load");

        assert!(!loaded.from_cache);
        assert_eq!(loaded.exercise.name, "push-up v2");
        assert_eq!(
            cache.get::<Exercise>("0001").map(|e| e.name),
            Some("push-up v2".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let cache = DetailCache::with_clock(store.clone(), Arc::new(ManualClock::new(T0)));
        let loader = DetailLoader::new(
            Some(cache),
            FakeExercises::failing(429),
            FakeVideos::default(),
        );

        let result = loader.load_exercise("0001").await;

        assert!(matches!(result, Err(ApiError::RateLimited)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_quota_failure_still_returns_fetched_exercise() {
        let store = Arc::new(MemoryStore::with_quota(4));
        let cache = DetailCache::with_clock(store.clone(), Arc::new(ManualClock::new(T0)));
        let loader = DetailLoader::new(
            Some(cache),
            FakeExercises::serving(vec!["push-up"]),
            FakeVideos::default(),
        );

        let loaded = loader.load_exercise("0001").await.expect("Write failure is not fatal");

        assert_eq!(loaded.exercise.name, "push-up");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_without_cache_always_fetches() {
        let loader = DetailLoader::new(
            None,
            FakeExercises::serving(vec!["a", "b"]),
            FakeVideos::default(),
        );

        loader.load_exercise("0001").await.unwrap();
        loader.load_exercise("0001").await.unwrap();

        assert_eq!(loader.exercises.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_both_fetch_and_last_write_wins() {
        let store = Arc::new(RecordingStore::default());
        let cache = DetailCache::with_clock(store.clone(), Arc::new(ManualClock::new(T0)));
        let exercises = Arc::new(FakeExercises {
            names: vec!["first", "second"],
            barrier: Some(Arc::new(Barrier::new(2))),
            ..Default::default()
        });
        let loader = DetailLoader::new(Some(cache.clone()), exercises.clone(), FakeVideos::default());

        let (a, b) = tokio::join!(loader.load_exercise("0001"), loader.load_exercise("0001"));

        assert!(!a.unwrap().from_cache);
        assert!(!b.unwrap().from_cache);
        assert_eq!(exercises.calls(), 2);

        let writes = store.writes.lock().unwrap().clone();
        assert_eq!(writes.len(), 2);
        let last_written: serde_json::Value = serde_json::from_str(writes.last().unwrap()).unwrap();
        let cached = cache.get::<Exercise>("0001").unwrap();
        assert_eq!(last_written["data"]["name"], cached.name.as_str());
    }

    #[tokio::test]
    async fn test_related_videos_uses_exercise_name() {
        let loader = DetailLoader::new(None, FakeExercises::default(), FakeVideos::default());

        let videos = loader.related_videos(&exercise("0001", "push-up")).await;

        assert_eq!(videos.len(), 1);
        assert_eq!(
            loader.videos.queries.lock().unwrap().as_slice(),
            ["push-up exercise".to_string()]
        );
    }

    #[tokio::test]
    async fn test_related_video_failure_is_empty() {
        let loader = DetailLoader::new(
            None,
            FakeExercises::default(),
            FakeVideos {
                fail: true,
                ..Default::default()
            },
        );

        let videos = loader.related_videos(&exercise("0001", "push-up")).await;

        assert!(videos.is_empty());
    }
}
