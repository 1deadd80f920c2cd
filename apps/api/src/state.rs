use std::sync::Arc;

use anyhow::Result;

use crate::articles::Articles;
use crate::careers::{CareerChat, CareerDetails, CareerSeed, ImageCache, TransitionPlans};
use crate::catalog::{Catalog, ItemDetails};
use crate::config::Config;
use crate::content::{ContentCache, DiskStore};
use crate::llm_client::{ImageGenerator, TextGenerator};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub careers: Arc<CareerSeed>,
    pub item_details: Arc<ContentCache<ItemDetails>>,
    pub articles: Arc<ContentCache<Articles>>,
    pub career_details: Arc<ContentCache<CareerDetails>>,
    pub transition_plans: Arc<ContentCache<TransitionPlans>>,
    pub images: Arc<ImageCache>,
    pub chat: Arc<CareerChat>,
}

impl AppState {
    /// Wires one cache per content type, each over its own file under `cache_dir`.
    pub fn new(
        config: Config,
        llm: Arc<dyn TextGenerator>,
        image_generator: Arc<dyn ImageGenerator>,
    ) -> Result<Self> {
        let model = config.model_name.clone();

        Ok(AppState {
            catalog: Arc::new(Catalog::load()?),
            careers: Arc::new(CareerSeed::load()?),
            item_details: Arc::new(ContentCache::new(
                DiskStore::new(config.detail_cache_path()),
                llm.clone(),
                &model,
            )),
            articles: Arc::new(ContentCache::new(
                DiskStore::new(config.article_cache_path()),
                llm.clone(),
                &config.article_model,
            )),
            career_details: Arc::new(ContentCache::new(
                DiskStore::new(config.career_cache_path()),
                llm.clone(),
                &model,
            )),
            transition_plans: Arc::new(ContentCache::new(
                DiskStore::new(config.transition_cache_path()),
                llm.clone(),
                &model,
            )),
            images: Arc::new(ImageCache::new(config.image_dir(), image_generator)),
            chat: Arc::new(CareerChat::new(llm, &model)),
            config,
        })
    }
}
