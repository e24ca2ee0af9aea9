//! Anime service.
//!
//! Thin layer over [`AnimeRepository`]: validates request bodies, maps them onto
//! domain types, and turns a missed id lookup into [`ServiceError::BadRequest`].

use crate::app::error::{ServiceError, ServiceResult};
use crate::domain::{Anime, AnimePostRequestBody, AnimePutRequestBody, NewAnime};
use crate::storage::{AnimeRepository, Page, PageRequest, RepositoryError};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct AnimeService {
    repository: Arc<dyn AnimeRepository>,
}

impl AnimeService {
    pub fn new(repository: Arc<dyn AnimeRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn AnimeRepository> {
        &self.repository
    }

    pub async fn list_all(&self, request: PageRequest) -> ServiceResult<Page<Anime>> {
        debug!(page = request.page, size = request.size, "listing anime page");
        Ok(self.repository.find_all_paged(request).await?)
    }

    pub async fn list_all_non_pageable(&self) -> ServiceResult<Vec<Anime>> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn find_by_name(&self, name: &str) -> ServiceResult<Vec<Anime>> {
        Ok(self.repository.find_by_name(name).await?)
    }

    pub async fn find_by_id_or_throw_bad_request(&self, id: i64) -> ServiceResult<Anime> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(ServiceError::anime_not_found)
    }

    pub async fn save(&self, body: AnimePostRequestBody) -> ServiceResult<Anime> {
        body.validate()?;
        let saved = self.repository.save(NewAnime::from(body)).await?;
        info!(id = saved.id, name = %saved.name, "anime saved");
        Ok(saved)
    }

    pub async fn replace(&self, body: AnimePutRequestBody) -> ServiceResult<()> {
        body.validate()?;
        let existing = self.find_by_id_or_throw_bad_request(body.id).await?;
        let anime = Anime::from(body);
        match self.repository.update(anime).await {
            Ok(updated) => {
                info!(id = updated.id, from = %existing.name, to = %updated.name, "anime replaced");
                Ok(())
            }
            // Deleted between the lookup and the write.
            Err(RepositoryError::Missing(_)) => Err(ServiceError::anime_not_found()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let existing = self.find_by_id_or_throw_bad_request(id).await?;
        self.repository.delete(existing.id).await?;
        info!(id, "anime deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repository::MockAnimeRepository;
    use mockall::predicate::eq;

    fn valid_anime() -> Anime {
        Anime::new(1, "Hajime no Ippo")
    }

    fn valid_updated_anime() -> Anime {
        Anime::new(1, "Hajime no Ippo 2")
    }

    /// Mock with the happy-path behaviour every test starts from.
    fn mock_repository() -> MockAnimeRepository {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_all_paged()
            .returning(|req| Ok(Page::new(vec![valid_anime()], &req, 1)));
        mock.expect_find_all().returning(|| Ok(vec![valid_anime()]));
        mock.expect_find_by_id()
            .returning(|_| Ok(Some(valid_anime())));
        mock.expect_find_by_name()
            .returning(|_| Ok(vec![valid_anime()]));
        mock.expect_save().returning(|_| Ok(valid_anime()));
        mock.expect_update().returning(Ok);
        mock.expect_delete().returning(|_| Ok(()));
        mock
    }

    fn service(mock: MockAnimeRepository) -> AnimeService {
        AnimeService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn list_all_returns_page_of_anime() {
        let page = service(mock_repository())
            .list_all(PageRequest::of(1, 1))
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].name, valid_anime().name);
    }

    #[tokio::test]
    async fn list_all_non_pageable_returns_every_anime() {
        let animes = service(mock_repository())
            .list_all_non_pageable()
            .await
            .unwrap();
        assert_eq!(animes, vec![valid_anime()]);
    }

    #[tokio::test]
    async fn find_by_id_returns_anime() {
        let anime = service(mock_repository())
            .find_by_id_or_throw_bad_request(1)
            .await
            .unwrap();
        assert_eq!(anime.id, valid_anime().id);
    }

    #[tokio::test]
    async fn find_by_id_fails_with_bad_request_when_missing() {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));

        let err = service(mock)
            .find_by_id_or_throw_bad_request(1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(ref m) if m == "Anime not found"));
    }

    #[tokio::test]
    async fn find_by_name_returns_matches() {
        let animes = service(mock_repository())
            .find_by_name("anime")
            .await
            .unwrap();
        assert_eq!(animes[0].name, valid_anime().name);
    }

    #[tokio::test]
    async fn find_by_name_returns_empty_list_when_nothing_matches() {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_name().returning(|_| Ok(Vec::new()));

        let animes = service(mock).find_by_name("some name").await.unwrap();
        assert!(animes.is_empty());
    }

    #[tokio::test]
    async fn save_returns_stored_anime() {
        let saved = service(mock_repository())
            .save(AnimePostRequestBody::new("Hajime no Ippo"))
            .await
            .unwrap();
        assert_eq!(saved, valid_anime());
    }

    #[tokio::test]
    async fn save_rejects_empty_name_without_touching_repository() {
        let mock = MockAnimeRepository::new();
        let err = service(mock)
            .save(AnimePostRequestBody::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn replace_updates_existing_anime() {
        let expected = valid_updated_anime();
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(valid_anime())));
        mock.expect_update()
            .with(eq(expected.clone()))
            .times(1)
            .returning(Ok);

        service(mock)
            .replace(AnimePutRequestBody::from(expected))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn replace_missing_anime_is_bad_request() {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));
        mock.expect_update().never();

        let err = service(mock)
            .replace(AnimePutRequestBody::new(42, "Nobody"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn replace_with_empty_name_is_validation_error() {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_id().never();
        mock.expect_update().never();

        let err = service(mock)
            .replace(AnimePutRequestBody::new(1, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn replace_with_null_name_is_validation_error() {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_id().never();
        mock.expect_update().never();

        let body = AnimePutRequestBody { id: 1, name: None };
        let err = service(mock).replace(body).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn replace_racing_a_delete_is_bad_request() {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_id()
            .returning(|_| Ok(Some(valid_anime())));
        mock.expect_update()
            .returning(|a| Err(RepositoryError::Missing(a.id)));

        let err = service(mock)
            .replace(AnimePutRequestBody::from(valid_updated_anime()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn delete_removes_anime() {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_id()
            .returning(|_| Ok(Some(valid_anime())));
        mock.expect_delete().with(eq(1)).times(1).returning(|_| Ok(()));

        service(mock).delete(1).await.unwrap();
    }

    #[tokio::test]
    async fn delete_missing_anime_is_bad_request() {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));
        mock.expect_delete().never();

        assert!(service(mock).delete(1).await.is_err());
    }
}
