//! In-memory anime repository.
//!
//! Keeps rows in a `BTreeMap` keyed by id, so iteration order matches the
//! `ORDER BY id` of the Postgres implementation. Used by the integration tests
//! and by the server when no `DATABASE_URL` is configured.

use crate::domain::{Anime, NewAnime};
use crate::storage::page::{Page, PageRequest, SortDirection, SortProperty};
use crate::storage::repository::{AnimeRepository, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone, Default)]
pub struct InMemoryAnimeRepository {
    data: Arc<RwLock<MemoryData>>,
}

struct MemoryData {
    rows: BTreeMap<i64, Anime>,
    next_id: i64,
}

impl Default for MemoryData {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryAnimeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.rows.len())
    }

    pub fn is_empty(&self) -> RepositoryResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, MemoryData>> {
        self.data
            .read()
            .map_err(|_| RepositoryError::Internal("anime store lock poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, MemoryData>> {
        self.data
            .write()
            .map_err(|_| RepositoryError::Internal("anime store lock poisoned".to_string()))
    }
}

#[async_trait]
impl AnimeRepository for InMemoryAnimeRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Anime>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn find_all_paged(&self, request: PageRequest) -> RepositoryResult<Page<Anime>> {
        let mut all: Vec<Anime> = self.read()?.rows.values().cloned().collect();
        if let Some(sort) = request.sort {
            // Stable sorts keep id order among equal names.
            match (sort.property, sort.direction) {
                (SortProperty::Id, SortDirection::Asc) => {}
                (SortProperty::Id, SortDirection::Desc) => all.reverse(),
                (SortProperty::Name, SortDirection::Asc) => all.sort_by(|a, b| a.name.cmp(&b.name)),
                (SortProperty::Name, SortDirection::Desc) => all.sort_by(|a, b| b.name.cmp(&a.name)),
            }
        }

        let total = all.len() as u64;
        let content = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size as usize)
            .collect();
        Ok(Page::new(content, &request, total))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Anime>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Anime>> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|a| a.name == name)
            .cloned()
            .collect())
    }

    async fn save(&self, anime: NewAnime) -> RepositoryResult<Anime> {
        let mut data = self.write()?;
        let id = data.next_id;
        data.next_id += 1;
        let stored = Anime::new(id, anime.name);
        data.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, anime: Anime) -> RepositoryResult<Anime> {
        let mut data = self.write()?;
        match data.rows.get_mut(&anime.id) {
            Some(row) => {
                row.name = anime.name;
                Ok(row.clone())
            }
            None => Err(RepositoryError::Missing(anime.id)),
        }
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        self.write()?.rows.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.read().map(|_| ())
    }
}
