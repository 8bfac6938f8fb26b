//! In-memory implementation of every store, for tests. Failure flags let a
//! test make one area of the backend error out.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use anyhow::bail;
use axum::async_trait;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{
    ads::{
        repo::AdStore,
        repo_types::{Ad, AdCounter, NewAd},
    },
    auth::{
        repo::UserStore,
        repo_types::{NewUser, Role, User},
    },
    categories::{
        repo::CategoryStore,
        repo_types::{Category, CategoryCountRow},
    },
    games::{
        repo::GameStore,
        repo_types::{Game, GameIdentifier, PlaySession},
    },
    ratings::{
        repo::RatingStore,
        repo_types::{Rating, RatingSummary, ReviewRow},
    },
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    games: Vec<Game>,
    categories: Vec<Category>,
    ratings: Vec<Rating>,
    sessions: Vec<PlaySession>,
    ads: Vec<Ad>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_games: AtomicBool,
    fail_sessions: AtomicBool,
    fail_ratings: AtomicBool,
    fail_ads: AtomicBool,
}

/// Distinct, increasing timestamps so "newest first" is deterministic.
fn stamp(seq: usize) -> OffsetDateTime {
    OffsetDateTime::now_utc() + Duration::milliseconds(seq as i64)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn fail_games(&self, on: bool) {
        self.fail_games.store(on, Ordering::SeqCst);
    }

    pub fn fail_sessions(&self, on: bool) {
        self.fail_sessions.store(on, Ordering::SeqCst);
    }

    pub fn fail_ratings(&self, on: bool) {
        self.fail_ratings.store(on, Ordering::SeqCst);
    }

    pub fn fail_ads(&self, on: bool) {
        self.fail_ads.store(on, Ordering::SeqCst);
    }

    pub fn add_user(&self, username: &str, password_hash: &str, role: Role) -> User {
        let mut t = self.tables();
        let user = User {
            id: Uuid::new_v4(),
            email: format!("{username}@example.com"),
            username: username.into(),
            password_hash: password_hash.into(),
            name: None,
            avatar: None,
            role,
            is_verified: false,
            created_at: stamp(t.users.len()),
        };
        t.users.push(user.clone());
        user
    }

    pub fn user_count(&self) -> usize {
        self.tables().users.len()
    }

    pub fn add_game(&self, slug: &str, published: bool) -> Game {
        self.add_game_in(slug, published, None)
    }

    pub fn add_game_in(&self, slug: &str, published: bool, category_id: Option<Uuid>) -> Game {
        let mut t = self.tables();
        let game = Game {
            id: Uuid::new_v4(),
            slug: slug.into(),
            title: slug.to_uppercase(),
            description: None,
            thumbnail: None,
            category_id,
            is_published: published,
            play_count: 0,
            created_at: stamp(t.games.len()),
        };
        t.games.push(game.clone());
        game
    }

    pub fn game(&self, id: Uuid) -> Option<Game> {
        self.tables().games.iter().find(|g| g.id == id).cloned()
    }

    pub fn sessions(&self) -> Vec<PlaySession> {
        self.tables().sessions.clone()
    }

    pub fn add_category(&self, slug: &str, display_order: i32, is_active: bool) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            slug: slug.into(),
            name: slug.to_uppercase(),
            icon: None,
            display_order,
            is_active,
        };
        self.tables().categories.push(category.clone());
        category
    }

    pub fn add_ad(
        &self,
        position: &str,
        is_active: bool,
        start_date: Option<OffsetDateTime>,
        end_date: Option<OffsetDateTime>,
    ) -> Ad {
        let mut t = self.tables();
        let ad = Ad {
            id: Uuid::new_v4(),
            title: format!("{position} ad"),
            image_url: None,
            target_url: None,
            position: position.into(),
            is_active,
            start_date,
            end_date,
            clicks: 0,
            impressions: 0,
            created_at: stamp(t.ads.len()),
        };
        t.ads.push(ad.clone());
        ad
    }

    pub fn ad(&self, id: Uuid) -> Option<Ad> {
        self.tables().ads.iter().find(|a| a.id == id).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> anyhow::Result<Option<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }

    async fn create(&self, new: NewUser) -> anyhow::Result<Option<User>> {
        let mut t = self.tables();
        if t
            .users
            .iter()
            .any(|u| u.email == new.email || u.username == new.username)
        {
            return Ok(None);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            username: new.username,
            password_hash: new.password_hash,
            name: new.name,
            avatar: None,
            role: Role::User,
            is_verified: false,
            created_at: stamp(t.users.len()),
        };
        t.users.push(user.clone());
        Ok(Some(user))
    }

    async fn set_role(&self, username: &str, role: Role) -> anyhow::Result<Option<User>> {
        let mut t = self.tables();
        Ok(t.users.iter_mut().find(|u| u.username == username).map(|u| {
            u.role = role;
            u.clone()
        }))
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn find_by_identifier(&self, ident: &GameIdentifier) -> anyhow::Result<Option<Game>> {
        if self.fail_games.load(Ordering::SeqCst) {
            bail!("games table unavailable");
        }
        let t = self.tables();
        let by_slug = t.games.iter().find(|g| g.slug == ident.slug);
        Ok(by_slug
            .or_else(|| t.games.iter().find(|g| ident.matches(g)))
            .cloned())
    }

    async fn list_published(
        &self,
        category_slug: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Game>> {
        if self.fail_games.load(Ordering::SeqCst) {
            bail!("games table unavailable");
        }
        let t = self.tables();
        let category_id = match category_slug {
            Some(slug) => match t.categories.iter().find(|c| c.slug == slug) {
                Some(c) => Some(c.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        let mut games: Vec<Game> = t
            .games
            .iter()
            .filter(|g| g.is_published)
            .filter(|g| category_id.is_none() || g.category_id == category_id)
            .cloned()
            .collect();
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(games
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn increment_play_count(&self, game_id: Uuid) -> anyhow::Result<Option<i64>> {
        if self.fail_games.load(Ordering::SeqCst) {
            bail!("games table unavailable");
        }
        let mut t = self.tables();
        Ok(t.games.iter_mut().find(|g| g.id == game_id).map(|g| {
            g.play_count += 1;
            g.play_count
        }))
    }

    async fn create_play_session(
        &self,
        user_id: Uuid,
        game_id: Uuid,
    ) -> anyhow::Result<PlaySession> {
        if self.fail_sessions.load(Ordering::SeqCst) {
            bail!("play_sessions insert failed");
        }
        let mut t = self.tables();
        let session = PlaySession {
            id: Uuid::new_v4(),
            user_id,
            game_id,
            duration: 0,
            started_at: stamp(t.sessions.len()),
        };
        t.sessions.push(session.clone());
        Ok(session)
    }

    async fn set_published(&self, game_id: Uuid, published: bool) -> anyhow::Result<Option<Game>> {
        let mut t = self.tables();
        Ok(t.games.iter_mut().find(|g| g.id == game_id).map(|g| {
            g.is_published = published;
            g.clone()
        }))
    }
}

#[async_trait]
impl RatingStore for MemoryStore {
    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<ReviewRow>> {
        if self.fail_ratings.load(Ordering::SeqCst) {
            bail!("ratings query failed");
        }
        let t = self.tables();
        let mut rows: Vec<ReviewRow> = t
            .ratings
            .iter()
            .filter_map(|r| {
                let u = t.users.iter().find(|u| u.id == r.user_id)?;
                let g = t.games.iter().find(|g| g.id == r.game_id)?;
                Some(ReviewRow {
                    id: r.id,
                    is_like: r.is_like,
                    created_at: r.created_at,
                    user_id: u.id,
                    username: u.username.clone(),
                    user_name: u.name.clone(),
                    user_avatar: u.avatar.clone(),
                    game_id: g.id,
                    game_slug: g.slug.clone(),
                    game_title: g.title.clone(),
                    game_thumbnail: g.thumbnail.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn upsert(&self, user_id: Uuid, game_id: Uuid, is_like: bool) -> anyhow::Result<Rating> {
        if self.fail_ratings.load(Ordering::SeqCst) {
            bail!("ratings upsert failed");
        }
        let mut t = self.tables();
        let now = stamp(t.ratings.len());
        if let Some(existing) = t
            .ratings
            .iter_mut()
            .find(|r| r.user_id == user_id && r.game_id == game_id)
        {
            existing.is_like = is_like;
            existing.updated_at = now;
            return Ok(existing.clone());
        }
        let rating = Rating {
            id: Uuid::new_v4(),
            user_id,
            game_id,
            is_like,
            created_at: now,
            updated_at: now,
        };
        t.ratings.push(rating.clone());
        Ok(rating)
    }

    async fn summary(&self, game_id: Uuid) -> anyhow::Result<RatingSummary> {
        let t = self.tables();
        let mut summary = RatingSummary::default();
        for r in t.ratings.iter().filter(|r| r.game_id == game_id) {
            if r.is_like {
                summary.likes += 1;
            } else {
                summary.dislikes += 1;
            }
        }
        Ok(summary)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_active(&self, limit: i64) -> anyhow::Result<Vec<Category>> {
        let t = self.tables();
        let mut rows: Vec<Category> = t.categories.iter().filter(|c| c.is_active).cloned().collect();
        rows.sort_by_key(|c| c.display_order);
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn list_active_with_counts(&self, limit: i64) -> anyhow::Result<Vec<CategoryCountRow>> {
        let active = self.list_active(limit).await?;
        let t = self.tables();
        Ok(active
            .into_iter()
            .map(|category| {
                let count = t
                    .games
                    .iter()
                    .filter(|g| g.is_published && g.category_id == Some(category.id))
                    .count() as i64;
                CategoryCountRow {
                    category,
                    // Mirrors the LEFT JOIN: no published games, no count row.
                    game_count: (count > 0).then_some(count),
                }
            })
            .collect())
    }
}

#[async_trait]
impl AdStore for MemoryStore {
    async fn list_eligible(
        &self,
        position: Option<&str>,
        now: OffsetDateTime,
    ) -> anyhow::Result<Vec<Ad>> {
        if self.fail_ads.load(Ordering::SeqCst) {
            bail!("ads query failed");
        }
        let t = self.tables();
        let mut ads: Vec<Ad> = t
            .ads
            .iter()
            .filter(|a| a.is_eligible_at(now))
            .filter(|a| position.map_or(true, |p| a.position == p))
            .cloned()
            .collect();
        ads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ads)
    }

    async fn increment(&self, ad_id: Uuid, counter: AdCounter) -> anyhow::Result<bool> {
        if self.fail_ads.load(Ordering::SeqCst) {
            bail!("ads update failed");
        }
        let mut t = self.tables();
        let Some(ad) = t.ads.iter_mut().find(|a| a.id == ad_id) else {
            return Ok(false);
        };
        match counter {
            AdCounter::Clicks => ad.clicks += 1,
            AdCounter::Impressions => ad.impressions += 1,
        }
        Ok(true)
    }

    async fn create(&self, new: NewAd) -> anyhow::Result<Ad> {
        let mut t = self.tables();
        let ad = Ad {
            id: Uuid::new_v4(),
            title: new.title,
            image_url: new.image_url,
            target_url: new.target_url,
            position: new.position,
            is_active: new.is_active,
            start_date: new.start_date,
            end_date: new.end_date,
            clicks: 0,
            impressions: 0,
            created_at: stamp(t.ads.len()),
        };
        t.ads.push(ad.clone());
        Ok(ad)
    }
}
