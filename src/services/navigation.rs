use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        Movie, MovieDetails, NavigationState, Notice, RecommendedMovie, SelectedMovie, Transition,
    },
    services::{catalog::CatalogStore, providers::MetadataEnricher, ranking::RankingEngine},
};

const EMPTY_QUERY: &str = "Please enter a movie name to get recommendations.";
const NOT_FOUND: &str = "Movie not found! Please check the spelling or try another movie.";
const NO_RECOMMENDATIONS: &str = "No recommendations found for this movie. Please try another one.";

/// Drives the navigation state machine for every session
///
/// The handler itself holds no per-session data: each operation takes the
/// caller's current [`NavigationState`] and hands back a [`Transition`] with
/// the next one. All errors are absorbed here and surface as notices.
#[derive(Clone)]
pub struct Navigator {
    catalog: Arc<CatalogStore>,
    engine: Arc<RankingEngine>,
    metadata: Arc<dyn MetadataEnricher>,
    recommendation_count: usize,
}

impl Navigator {
    pub fn new(
        catalog: Arc<CatalogStore>,
        engine: Arc<RankingEngine>,
        metadata: Arc<dyn MetadataEnricher>,
        recommendation_count: usize,
    ) -> Self {
        Self {
            catalog,
            engine,
            metadata,
            recommendation_count,
        }
    }

    /// Selects the first catalog match for `query` and ranks its neighbors.
    ///
    /// With no match the session falls back to `Empty`. A blank query or a
    /// ranking failure leaves `state` untouched.
    pub async fn search(&self, state: NavigationState, query: &str) -> Transition {
        let query = query.trim();
        if query.is_empty() {
            let error = AppError::InvalidInput(EMPTY_QUERY.to_string());
            return Transition::with_notice(state, Notice::warning(error.to_string()));
        }

        let Some(movie) = self.catalog.search(query).into_iter().next() else {
            tracing::info!(query = %query, "Search matched no movie");
            return Transition::with_notice(NavigationState::Empty, Notice::warning(NOT_FOUND));
        };

        tracing::info!(query = %query, title = %movie.title, "Search selected movie");
        self.view(state, movie).await
    }

    /// Re-centers the session on a recommended title.
    ///
    /// The title must resolve exactly in the catalog; otherwise the prior
    /// state is kept and an error notice is returned.
    pub async fn click_recommendation(&self, state: NavigationState, title: &str) -> Transition {
        let movie = match self.catalog.find_by_title_exact(title) {
            Ok(movie) => movie,
            Err(e) => {
                tracing::error!(error = %e, title = %title, "Recommended title is not in the catalog");
                let error = AppError::DataInconsistency(format!(
                    "Recommended title '{}' is not in the catalog",
                    title
                ));
                return Transition::with_notice(state, Notice::error(error.to_string()));
            }
        };

        tracing::info!(title = %movie.title, "Recommendation clicked");
        self.view(state, movie).await
    }

    async fn view(&self, previous: NavigationState, movie: Movie) -> Transition {
        match self.build_viewing(movie).await {
            Ok(state) => {
                let empty = state.recommendations().map_or(true, |r| r.is_empty());
                if empty {
                    Transition::with_notice(state, Notice::warning(NO_RECOMMENDATIONS))
                } else {
                    Transition::to(state)
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Navigation aborted, keeping previous state");
                Transition::with_notice(previous, Notice::error(e.to_string()))
            }
        }
    }

    /// Ranks first so a data problem aborts before any network traffic.
    async fn build_viewing(&self, movie: Movie) -> AppResult<NavigationState> {
        let neighbors = self.engine.recommend(&movie, self.recommendation_count)?;

        let poster = self.poster_or_none(movie.id).await;
        let details = match self.metadata.fetch_details(movie.id).await {
            Ok(details) => details,
            Err(e) => {
                self.log_degraded(&e, movie.id, "Details unavailable, showing placeholders");
                MovieDetails::unavailable()
            }
        };

        let ids: Vec<u64> = neighbors.iter().map(|n| n.movie.id).collect();
        let posters = self.fetch_posters(ids).await;

        let recommendations = neighbors
            .into_iter()
            .zip(posters)
            .map(|(neighbor, poster)| RecommendedMovie {
                movie: neighbor.movie,
                score: neighbor.score,
                poster,
            })
            .collect();

        Ok(NavigationState::Viewing {
            selected: SelectedMovie {
                movie,
                poster,
                details,
            },
            recommendations,
        })
    }

    async fn poster_or_none(&self, movie_id: u64) -> Option<String> {
        match self.metadata.fetch_poster(movie_id).await {
            Ok(url) => Some(url),
            Err(e) => {
                self.log_degraded(&e, movie_id, "Poster unavailable");
                None
            }
        }
    }

    /// Provider outages are expected and only warned about; anything else is
    /// a local fault and logged as an error.
    fn log_degraded(&self, error: &AppError, movie_id: u64, message: &str) {
        let provider = self.metadata.name();
        if error.is_upstream() {
            tracing::warn!(error = %error, movie_id, provider, "{}", message);
        } else {
            tracing::error!(error = %error, movie_id, provider, "{}", message);
        }
    }

    /// Fetches posters concurrently, returning them in the order of `movie_ids`
    async fn fetch_posters(&self, movie_ids: Vec<u64>) -> Vec<Option<String>> {
        let tasks: Vec<_> = movie_ids
            .into_iter()
            .map(|movie_id| {
                let metadata = Arc::clone(&self.metadata);
                let task = tokio::spawn(async move { metadata.fetch_poster(movie_id).await });
                (movie_id, task)
            })
            .collect();

        let mut posters = Vec::with_capacity(tasks.len());
        let mut failures = 0usize;

        for (movie_id, task) in tasks {
            let poster = match task.await {
                Ok(Ok(url)) => Some(url),
                Ok(Err(e)) => {
                    tracing::debug!(error = %e, movie_id, "Recommendation poster unavailable");
                    failures += 1;
                    None
                }
                Err(e) => {
                    tracing::error!(error = %e, movie_id, "Poster task join error");
                    failures += 1;
                    None
                }
            };
            posters.push(poster);
        }

        if failures > 0 {
            tracing::warn!(
                success_count = posters.len() - failures,
                error_count = failures,
                "Partial poster fetch failure"
            );
        }

        posters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{CatalogRecord, NoticeLevel, Rating},
        services::{providers::MockMetadataEnricher, similarity::SimilarityTable},
    };

    fn catalog_fixture() -> (Arc<CatalogStore>, Arc<RankingEngine>) {
        let records = [
            (1, "Avatar"),
            (2, "Aliens"),
            (3, "Titanic"),
            (4, "The Abyss"),
        ]
        .into_iter()
        .map(|(movie_id, title)| CatalogRecord {
            movie_id,
            title: title.to_string(),
        })
        .collect();
        let catalog = Arc::new(CatalogStore::new(records));
        let table = Arc::new(
            SimilarityTable::from_rows(vec![
                vec![1.0, 0.6, 0.2, 0.8],
                vec![0.6, 1.0, 0.1, 0.7],
                vec![0.2, 0.1, 1.0, 0.3],
                vec![0.8, 0.7, 0.3, 1.0],
            ])
            .unwrap(),
        );
        let engine = Arc::new(RankingEngine::new(catalog.clone(), table).unwrap());
        (catalog, engine)
    }

    fn working_metadata() -> MockMetadataEnricher {
        let mut mock = MockMetadataEnricher::new();
        mock.expect_fetch_poster()
            .returning(|id| Ok(format!("https://image.example/{}.jpg", id)));
        mock.expect_fetch_details().returning(|_| {
            let mut details = MovieDetails::unavailable();
            details.rating = Rating::Score(7.9);
            details.release_year = "2009".to_string();
            Ok(details)
        });
        mock.expect_name().return_const("mock");
        mock
    }

    fn failing_metadata() -> MockMetadataEnricher {
        let mut mock = MockMetadataEnricher::new();
        mock.expect_fetch_poster()
            .returning(|_| Err(AppError::Upstream("provider down".to_string())));
        mock.expect_fetch_details()
            .returning(|_| Err(AppError::Upstream("provider down".to_string())));
        mock.expect_name().return_const("mock");
        mock
    }

    fn navigator(metadata: MockMetadataEnricher, count: usize) -> Navigator {
        let (catalog, engine) = catalog_fixture();
        Navigator::new(catalog, engine, Arc::new(metadata), count)
    }

    fn recommended_titles(state: &NavigationState) -> Vec<String> {
        state
            .recommendations()
            .unwrap()
            .iter()
            .map(|r| r.movie.title.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_search_selects_first_match() {
        let nav = navigator(working_metadata(), 20);

        let transition = nav.search(NavigationState::Empty, "  a  ").await;

        let selected = transition.state.selected().unwrap();
        assert_eq!(selected.movie.title, "Avatar");
        assert_eq!(selected.poster.as_deref(), Some("https://image.example/1.jpg"));
        assert_eq!(selected.details.rating, Rating::Score(7.9));
        assert_eq!(
            recommended_titles(&transition.state),
            vec!["The Abyss", "Aliens", "Titanic"]
        );
        assert!(transition.notice.is_none());
    }

    #[tokio::test]
    async fn test_recommendation_posters_follow_ranking_order() {
        let nav = navigator(working_metadata(), 2);

        let transition = nav.search(NavigationState::Empty, "titanic").await;

        let posters: Vec<_> = transition
            .state
            .recommendations()
            .unwrap()
            .iter()
            .map(|r| r.poster.clone().unwrap())
            .collect();
        assert_eq!(
            posters,
            vec!["https://image.example/4.jpg", "https://image.example/1.jpg"]
        );
    }

    #[tokio::test]
    async fn test_search_without_match_stays_empty() {
        let mut metadata = MockMetadataEnricher::new();
        metadata.expect_fetch_poster().never();
        metadata.expect_fetch_details().never();
        let nav = navigator(metadata, 20);

        let transition = nav.search(NavigationState::Empty, "zzz").await;

        assert!(transition.state.is_empty());
        let notice = transition.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_without_match_discards_viewing_state() {
        let nav = navigator(working_metadata(), 20);
        let viewing = nav.search(NavigationState::Empty, "Avatar").await.state;

        let transition = nav.search(viewing, "zzz").await;

        assert!(transition.state.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_keeps_state() {
        let nav = navigator(working_metadata(), 20);
        let viewing = nav.search(NavigationState::Empty, "Titanic").await.state;

        let transition = nav.search(viewing.clone(), "   ").await;

        assert_eq!(transition.state, viewing);
        let notice = transition.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, format!("Invalid input: {}", EMPTY_QUERY));
    }

    #[tokio::test]
    async fn test_click_replaces_state() {
        let nav = navigator(working_metadata(), 20);
        let viewing = nav.search(NavigationState::Empty, "Avatar").await.state;

        let transition = nav.click_recommendation(viewing, "Titanic").await;

        assert_eq!(transition.state.selected().unwrap().movie.title, "Titanic");
        assert_eq!(
            recommended_titles(&transition.state),
            vec!["The Abyss", "Avatar", "Aliens"]
        );
    }

    #[tokio::test]
    async fn test_click_with_failing_metadata_degrades_fields() {
        let (catalog, engine) = catalog_fixture();
        let healthy = Navigator::new(
            catalog.clone(),
            engine.clone(),
            Arc::new(working_metadata()),
            20,
        );
        let broken = Navigator::new(catalog, engine, Arc::new(failing_metadata()), 20);
        let viewing = healthy.search(NavigationState::Empty, "Avatar").await.state;

        let transition = broken.click_recommendation(viewing, "Aliens").await;

        let selected = transition.state.selected().unwrap();
        assert_eq!(selected.movie.title, "Aliens");
        assert_eq!(selected.poster, None);
        assert_eq!(selected.details.rating, Rating::NotAvailable);
        assert_eq!(
            recommended_titles(&transition.state),
            vec!["The Abyss", "Avatar", "Titanic"]
        );
        assert!(transition
            .state
            .recommendations()
            .unwrap()
            .iter()
            .all(|r| r.poster.is_none()));
        assert!(transition.notice.is_none());
    }

    #[tokio::test]
    async fn test_non_upstream_failure_still_degrades_details() {
        let mut metadata = MockMetadataEnricher::new();
        metadata
            .expect_fetch_poster()
            .returning(|id| Ok(format!("https://image.example/{}.jpg", id)));
        metadata
            .expect_fetch_details()
            .returning(|_| Err(AppError::Internal("decoder broke".to_string())));
        metadata.expect_name().return_const("mock");
        let nav = navigator(metadata, 20);

        let transition = nav.search(NavigationState::Empty, "Titanic").await;

        let selected = transition.state.selected().unwrap();
        assert_eq!(selected.details, MovieDetails::unavailable());
        assert!(selected.poster.is_some());
        assert!(transition.notice.is_none());
    }

    #[tokio::test]
    async fn test_click_unknown_title_keeps_state() {
        let nav = navigator(working_metadata(), 20);
        let viewing = nav.search(NavigationState::Empty, "Avatar").await.state;

        let transition = nav.click_recommendation(viewing.clone(), "avatar").await;

        assert_eq!(transition.state, viewing);
        let notice = transition.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Data inconsistency"));
    }

    #[tokio::test]
    async fn test_zero_recommendations_warns() {
        let nav = navigator(working_metadata(), 0);

        let transition = nav.search(NavigationState::Empty, "Avatar").await;

        assert_eq!(transition.state.selected().unwrap().movie.title, "Avatar");
        assert!(transition.state.recommendations().unwrap().is_empty());
        assert_eq!(transition.notice.unwrap().message, NO_RECOMMENDATIONS);
    }

    #[tokio::test]
    async fn test_ranking_failure_keeps_previous_state() {
        let nav = navigator(working_metadata(), 20);
        let viewing = nav.search(NavigationState::Empty, "Avatar").await.state;

        let transition = nav
            .view(viewing.clone(), Movie::new(77, "Ghost Entry", 99))
            .await;

        assert_eq!(transition.state, viewing);
        assert_eq!(transition.notice.unwrap().level, NoticeLevel::Error);
    }
}
