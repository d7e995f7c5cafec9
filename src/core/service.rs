use crate::core::fetcher::{genre_filter, GenreFetcher};
use crate::domain::model::{
    Carousel, CarouselRequest, Hero, HomePage, ItemSummary, MovieDetails, TitleQuery,
};
use crate::domain::ports::Catalogue;
use crate::utils::error::{CatalogueError, Result};
use std::sync::Arc;
use tokio::task::JoinSet;

pub const SEARCH_PAGE_SIZE: u32 = 20;

const AVAILABLE_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film-Noir",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Sport",
    "Thriller",
    "War",
    "Western",
];

/// Catalogue operations the front end is built from.
pub struct MovieService<C: Catalogue + 'static> {
    catalogue: Arc<C>,
}

impl<C: Catalogue + 'static> Clone for MovieService<C> {
    fn clone(&self) -> Self {
        Self {
            catalogue: Arc::clone(&self.catalogue),
        }
    }
}

impl<C: Catalogue + 'static> MovieService<C> {
    pub fn new(catalogue: C) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
        }
    }

    pub fn available_genres() -> &'static [&'static str] {
        AVAILABLE_GENRES
    }

    /// Highest-scored title of the whole collection.
    pub async fn best_movie(&self) -> Result<ItemSummary> {
        let query = TitleQuery {
            page_size: Some(1),
            ..TitleQuery::genre("")
        };
        let page = self.catalogue.titles(&query).await?;

        page.results
            .into_iter()
            .next()
            .ok_or_else(|| CatalogueError::NotFound {
                what: "best movie".to_string(),
            })
    }

    pub async fn best_movie_with_details(&self) -> Result<Hero> {
        let movie = self.best_movie().await?;
        tracing::debug!("Best movie is '{}' ({})", movie.title, movie.id);
        let details = self.catalogue.details(movie.id).await?;
        Ok(Hero { movie, details })
    }

    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        self.catalogue.details(id).await
    }

    /// `category` is a genre name or the `best` sentinel.
    pub async fn movies_by_genre(
        &self,
        category: &str,
        skip: usize,
        total: usize,
    ) -> Result<Vec<ItemSummary>> {
        GenreFetcher::new(self.catalogue.as_ref())
            .fetch(genre_filter(category), skip, total)
            .await
    }

    pub async fn search(&self, title: &str, page: u32) -> Result<Vec<ItemSummary>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(Vec::new());
        }

        let query = TitleQuery {
            page_size: Some(SEARCH_PAGE_SIZE),
            ..TitleQuery::search(title, page.max(1))
        };
        let page = self.catalogue.titles(&query).await?;
        tracing::debug!("Search '{}' matched {} titles", title, page.count);
        Ok(page.results)
    }

    /// Details for every id, fetched concurrently, in the order given.
    pub async fn movies_by_ids(&self, ids: &[u64]) -> Result<Vec<MovieDetails>> {
        let mut tasks = JoinSet::new();
        for (index, id) in ids.iter().copied().enumerate() {
            let catalogue = Arc::clone(&self.catalogue);
            tasks.spawn(async move { (index, catalogue.details(id).await) });
        }

        let mut slots: Vec<Option<MovieDetails>> = vec![None; ids.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, details) = joined.map_err(|e| CatalogueError::TaskFailed {
                message: e.to_string(),
            })?;
            slots[index] = Some(details?);
        }

        Ok(slots.into_iter().flatten().collect())
    }

    /// Hero and carousels are fetched concurrently; each section keeps
    /// its own outcome.
    pub async fn home_page(&self, carousels: &[CarouselRequest], with_hero: bool) -> HomePage {
        let hero = async {
            if with_hero {
                Some(self.best_movie_with_details().await)
            } else {
                None
            }
        };
        let (hero, carousels) = tokio::join!(hero, self.carousels(carousels));

        if let Some(Err(e)) = &hero {
            tracing::warn!("Best movie unavailable: {}", e);
        }

        HomePage { hero, carousels }
    }

    async fn carousels(&self, requests: &[CarouselRequest]) -> Vec<Carousel> {
        let mut tasks = JoinSet::new();
        for (index, request) in requests.iter().cloned().enumerate() {
            let service = self.clone();
            tasks.spawn(async move {
                let items = service
                    .movies_by_genre(&request.category, request.skip, request.total)
                    .await;
                (index, items)
            });
        }

        let mut outcomes: Vec<Option<Result<Vec<ItemSummary>>>> =
            (0..requests.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, items)) => outcomes[index] = Some(items),
                Err(e) => tracing::error!("Carousel task failed: {}", e),
            }
        }

        requests
            .iter()
            .zip(outcomes)
            .map(|(request, outcome)| {
                let items = outcome.unwrap_or_else(|| {
                    Err(CatalogueError::TaskFailed {
                        message: format!("carousel '{}' did not finish", request.title),
                    })
                });
                if let Err(e) = &items {
                    tracing::warn!("Carousel '{}' unavailable: {}", request.title, e);
                }
                Carousel {
                    title: request.title.clone(),
                    genre: genre_filter(&request.category).to_string(),
                    items,
                }
            })
            .collect()
    }
}
