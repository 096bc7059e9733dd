//! Background request execution
//!
//! The UI loop never awaits the network. Screens queue `Request`s, the worker
//! runs each on the tokio runtime, and results come back as `AppEvent`s over
//! a channel that the loop drains every tick.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::config::Config;
use crate::data::{
    CatalogClient, CatalogItem, Category, CategoryKind, ChatClient, Exercise, ExerciseDbClient,
    VideoClient, VideoSummary,
};
use crate::detail::{DetailLoader, LoadedExercise};
use crate::error::{MessageKey, Surface};

/// Detail loader wired to the real services
pub type ExerciseLoader = DetailLoader<ExerciseDbClient, VideoClient>;

/// Capacity of the result channel
const CHANNEL_CAPACITY: usize = 32;

/// Work the UI wants done
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// List exercises for a category
    Category { generation: u64, category: Category },
    /// Load an exercise through the cache, then its related videos
    Detail { generation: u64, id: String },
    /// Load the muscle or equipment catalog
    Catalog(CategoryKind),
    /// Load both catalogs concurrently
    Catalogs,
    /// Ask the chat assistant
    Chat(String),
}

/// Results sent from background tasks to the app
#[derive(Debug)]
pub enum AppEvent {
    CategoryLoaded {
        generation: u64,
        result: Result<Vec<Exercise>, MessageKey>,
    },
    DetailLoaded {
        generation: u64,
        result: Result<LoadedExercise, MessageKey>,
    },
    VideosLoaded {
        generation: u64,
        videos: Vec<VideoSummary>,
    },
    CatalogLoaded {
        kind: CategoryKind,
        result: Result<Vec<CatalogItem>, MessageKey>,
    },
    ChatReply(Result<String, MessageKey>),
}

/// The upstream clients shared by all tasks
#[derive(Debug)]
pub struct Services {
    pub loader: ExerciseLoader,
    pub exercises: ExerciseDbClient,
    pub catalog: CatalogClient,
    pub chat: ChatClient,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        let exercises = config.exercise_client();
        Self {
            loader: DetailLoader::new(
                config.detail_cache(),
                exercises.clone(),
                config.video_client(),
            ),
            exercises,
            catalog: config.catalog_client(),
            chat: config.chat_client(),
        }
    }
}

/// Spawns requests and owns the sending half of the result channel
pub struct Worker {
    services: Arc<Services>,
    sender: mpsc::Sender<AppEvent>,
}

impl Worker {
    /// Creates a worker and the receiver its results arrive on
    pub fn new(services: Services) -> (Self, mpsc::Receiver<AppEvent>) {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let worker = Self {
            services: Arc::new(services),
            sender,
        };
        (worker, receiver)
    }

    /// Runs a request in the background
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, request: Request) {
        let services = Arc::clone(&self.services);
        let tx = self.sender.clone();

        tokio::spawn(async move {
            match request {
                Request::Category {
                    generation,
                    category,
                } => {
                    let result = services
                        .exercises
                        .fetch_by_category(&category)
                        .await
                        .map_err(|e| {
                            warn!(category = %category, error = %e, "Category fetch failed");
                            MessageKey::for_failure(Surface::CategoryList, &e)
                        });
                    let _ = tx.send(AppEvent::CategoryLoaded { generation, result }).await;
                }
                Request::Detail { generation, id } => {
                    match services.loader.load_exercise(&id).await {
                        Ok(loaded) => {
                            let exercise = loaded.exercise.clone();
                            let _ = tx
                                .send(AppEvent::DetailLoaded {
                                    generation,
                                    result: Ok(loaded),
                                })
                                .await;

                            let videos = services.loader.related_videos(&exercise).await;
                            let _ = tx
                                .send(AppEvent::VideosLoaded { generation, videos })
                                .await;
                        }
                        Err(e) => {
                            warn!(exercise_id = %id, error = %e, "Exercise fetch failed");
                            let message = MessageKey::for_failure(Surface::ExerciseDetail, &e);
                            let _ = tx
                                .send(AppEvent::DetailLoaded {
                                    generation,
                                    result: Err(message),
                                })
                                .await;
                        }
                    }
                }
                Request::Catalog(kind) => {
                    let event = load_catalog(&services, kind).await;
                    let _ = tx.send(event).await;
                }
                Request::Catalogs => {
                    let (body_parts, equipment) = futures::future::join(
                        load_catalog(&services, CategoryKind::BodyPart),
                        load_catalog(&services, CategoryKind::Equipment),
                    )
                    .await;
                    let _ = tx.send(body_parts).await;
                    let _ = tx.send(equipment).await;
                }
                Request::Chat(question) => {
                    let result = services.chat.ask(&question).await.map_err(|e| {
                        warn!(error = %e, "Chat request failed");
                        MessageKey::for_failure(Surface::Chat, &e)
                    });
                    let _ = tx.send(AppEvent::ChatReply(result)).await;
                }
            }
        });
    }
}

async fn load_catalog(services: &Services, kind: CategoryKind) -> AppEvent {
    let surface = match kind {
        CategoryKind::BodyPart => Surface::BodyPartCatalog,
        CategoryKind::Equipment => Surface::EquipmentCatalog,
    };
    let result = services.catalog.fetch_for(kind).await.map_err(|e| {
        warn!(?kind, error = %e, "Catalog fetch failed");
        MessageKey::for_failure(surface, &e)
    });
    AppEvent::CatalogLoaded { kind, result }
}

/// Checks for a pending result without blocking
pub fn try_recv(receiver: &mut mpsc::Receiver<AppEvent>) -> Option<AppEvent> {
    receiver.try_recv().ok()
}
