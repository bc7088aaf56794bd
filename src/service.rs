//! Query and mutation layers over an [`ArticleStore`].
//!
//! Every list operation is one whole-collection fetch followed by a pure
//! in-memory transform. Read paths never fail: a store error degrades to the
//! in-code fallback dataset and the caller sees stale-but-renderable data.
//! Write paths propagate errors; a write cannot be silently redirected to
//! the fallback set.
//!
//! Timeouts are the caller's concern: race any of these futures against a
//! timer and drop it on expiry; dropping cancels the underlying request.
use crate::fallback;
use crate::model::{Article, ArticleUpdate, NewsStats};
use crate::store::{ArticleStore, Counter, StoreError};

/// Default window for [`NewsService::get_recent_news`].
pub const DEFAULT_RECENT_LIMIT: usize = 6;

/// Behavior knobs for the query layer.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// When false, `get_news_by_id` hides unpublished articles. Defaults to
    /// true: direct links reach unpublished articles (preview behavior),
    /// intentionally inconsistent with the listing queries.
    pub include_unpublished: bool,
    /// When true, an empty published set is served from the fallback dataset,
    /// the same as an unreachable store. When false, an intentionally emptied
    /// collection shows as empty.
    pub fallback_on_empty: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            include_unpublished: true,
            fallback_on_empty: true,
        }
    }
}

/// The content access layer: queries, mutations, and the health probe.
///
/// Generic over the store so tests can substitute an in-memory fake. Clone of
/// the options is cheap; the store is owned.
pub struct NewsService<S> {
    store: S,
    options: ServiceOptions,
}

impl<S: ArticleStore> NewsService<S> {
    pub fn new(store: S) -> Self {
        Self::with_options(store, ServiceOptions::default())
    }

    pub fn with_options(store: S, options: ServiceOptions) -> Self {
        Self { store, options }
    }

    // ------------------------------------------------------------------
    // Query layer
    // ------------------------------------------------------------------

    /// All published articles, date descending.
    ///
    /// Degrades to the fallback dataset on store failure, and (by default) on
    /// an empty published set: "store empty" and "store unreachable" render
    /// the same offline content unless `fallback_on_empty` is off.
    pub async fn get_all_news(&self) -> Vec<Article> {
        match self.store.fetch_all().await {
            Ok(all) => {
                let mut published: Vec<Article> =
                    all.into_iter().filter(|a| a.published).collect();
                sort_date_descending(&mut published);
                if published.is_empty() && self.options.fallback_on_empty {
                    tracing::warn!("Store returned no published articles, serving fallback dataset");
                    return fallback::published_sorted();
                }
                published
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch articles, serving fallback dataset");
                fallback::published_sorted()
            }
        }
    }

    /// Published and featured articles, date descending.
    pub async fn get_featured_news(&self) -> Vec<Article> {
        match self.store.fetch_all().await {
            Ok(all) => {
                let mut featured: Vec<Article> = all
                    .into_iter()
                    .filter(|a| a.published && a.featured)
                    .collect();
                sort_date_descending(&mut featured);
                featured
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch featured articles, serving fallback dataset");
                fallback::featured_sorted()
            }
        }
    }

    /// Published articles in `category`, exact string equality.
    pub async fn get_news_by_category(&self, category: &str) -> Vec<Article> {
        self.get_all_news()
            .await
            .into_iter()
            .filter(|a| a.category == category)
            .collect()
    }

    /// Point lookup by id, optionally bumping the view counter.
    ///
    /// Does not filter on `published` unless `include_unpublished` is off.
    /// When `increment_views` is set and the article exists, the store applies
    /// a relative `+1` and the returned article carries the post-increment
    /// count the store reported. A failed increment is logged and the stale
    /// count returned; a missed view is low-stakes.
    pub async fn get_news_by_id(&self, id: &str, increment_views: bool) -> Option<Article> {
        match self.store.fetch_by_id(id).await {
            Ok(Some(mut article)) => {
                if !self.options.include_unpublished && !article.published {
                    return None;
                }
                if increment_views {
                    match self.store.increment(id, Counter::Views, 1).await {
                        Ok(views) => article.views = views,
                        Err(e) => {
                            tracing::warn!(id, error = %e, "Failed to increment view counter")
                        }
                    }
                }
                Some(article)
            }
            Ok(None) => fallback::by_id(id),
            Err(e) => {
                tracing::error!(id, error = %e, "Failed to fetch article, trying fallback dataset");
                fallback::by_id(id)
            }
        }
    }

    /// Case-insensitive substring search over the published set.
    ///
    /// Matches any of title, subtitle, content, tags, or author name. No
    /// ranking; results keep the date-descending order of `get_all_news`.
    pub async fn search_news(&self, term: &str) -> Vec<Article> {
        let needle = term.to_lowercase();
        self.get_all_news()
            .await
            .into_iter()
            .filter(|a| a.matches_search(&needle))
            .collect()
    }

    /// The `limit` most recent published articles.
    pub async fn get_recent_news(&self, limit: usize) -> Vec<Article> {
        let mut articles = self.get_all_news().await;
        articles.truncate(limit);
        articles
    }

    /// Distinct categories across the published set, lexicographically sorted.
    pub async fn get_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .get_all_news()
            .await
            .into_iter()
            .map(|a| a.category)
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Aggregate counts over the published set.
    pub async fn get_news_stats(&self) -> NewsStats {
        let articles = self.get_all_news().await;
        NewsStats {
            total_articles: articles.len(),
            featured_articles: articles.iter().filter(|a| a.featured).count(),
            total_views: articles.iter().map(|a| a.views).sum(),
            total_likes: articles.iter().map(|a| a.likes).sum(),
        }
    }

    // ------------------------------------------------------------------
    // Mutation layer
    // ------------------------------------------------------------------

    /// Create a new article; returns the store-assigned id.
    pub async fn add_news(&self, article: &Article) -> Result<String, StoreError> {
        let id = self.store.create(article).await?;
        tracing::info!(%id, title = %article.title, "Added article");
        Ok(id)
    }

    /// Partial update of an existing article.
    pub async fn update_news(&self, id: &str, update: &ArticleUpdate) -> Result<(), StoreError> {
        self.store.update(id, update).await
    }

    /// Hard delete by id.
    pub async fn delete_news(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(id).await?;
        tracing::info!(id, "Deleted article");
        Ok(())
    }

    /// Like or unlike an article; returns the new like count.
    ///
    /// Expressed as a signed delta applied at the store, so concurrent
    /// toggles from different readers converge. The returned count is the
    /// store's post-transform value, not a client-side recomputation.
    pub async fn toggle_like(&self, id: &str, is_liking: bool) -> Result<i64, StoreError> {
        let delta = if is_liking { 1 } else { -1 };
        self.store.increment(id, Counter::Likes, delta).await
    }

    // ------------------------------------------------------------------
    // Connection health
    // ------------------------------------------------------------------

    /// One bounded query against the collection; false on any error.
    ///
    /// Used only to choose UI messaging ("live" vs "offline data"), never to
    /// gate correctness.
    pub async fn check_connection(&self) -> bool {
        match self.store.probe().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Store connection check failed");
                false
            }
        }
    }
}

fn sort_date_descending(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}
