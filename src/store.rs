use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{NewMovie, RatingUpdate},
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Rating descending, unrated last, ties by id.
    pub async fn list_by_rating(&self) -> AppResult<Vec<movie::Model>> {
        by_rating(&self.db).await
    }

    /// Rewrites every row's ranking from the current ratings in one transaction
    /// and returns the rows best-ranked first.
    pub async fn recompute_rankings(&self) -> AppResult<Vec<movie::Model>> {
        let txn = self.db.begin().await?;
        let mut movies = by_rating(&txn).await?;
        let ranks = rank_order(&movies);

        for &(id, ranking) in &ranks {
            movie::Entity::update_many()
                .col_expr(movie::Column::Ranking, Expr::value(ranking))
                .filter(movie::Column::Id.eq(id))
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        for (movie, (_, ranking)) in movies.iter_mut().zip(ranks) {
            movie.ranking = Some(ranking);
        }

        debug!(count = movies.len(), "recomputed rankings");
        Ok(movies)
    }

    pub async fn list_by_ranking(&self) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .order_by_desc(movie::Column::Ranking)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get_or_not_found(&self, id: i32) -> AppResult<movie::Model> {
        self.get(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<movie::Model> {
        let title = new.title.clone();
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(None),
            ranking: Set(None),
            review: Set(None),
            img_url: Set(new.img_url),
        };

        match model.insert(&self.db).await {
            Ok(movie) => {
                debug!(movie_id = movie.id, title = %movie.title, "inserted movie");
                Ok(movie)
            },
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AppError::Conflict(format!("\"{title}\" is already in your collection")))
                },
                _ => Err(err.into()),
            },
        }
    }

    pub async fn update_review(&self, id: i32, update: RatingUpdate) -> AppResult<movie::Model> {
        let existing = self.get_or_not_found(id).await?;

        let mut model: movie::ActiveModel = existing.into();
        model.rating = Set(Some(update.rating));
        if let Some(review) = update.review {
            model.review = Set(Some(review));
        }

        let movie = model.update(&self.db).await?;
        debug!(movie_id = id, rating = update.rating, "updated rating");
        Ok(movie)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(not_found(id));
        }
        debug!(movie_id = id, "deleted movie");
        Ok(())
    }
}

async fn by_rating<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<movie::Model>> {
    let mut movies = movie::Entity::find().all(conn).await?;
    sort_by_rating(&mut movies);
    Ok(movies)
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("No movie with id {id}"))
}

fn sort_by_rating(movies: &mut [movie::Model]) {
    movies.sort_by(|a, b| match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.total_cmp(&x).then(a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}

/// `(id, ranking)` pairs for movies already sorted by rating; rankings are 1-based.
pub fn rank_order(sorted: &[movie::Model]) -> Vec<(i32, i32)> {
    sorted.iter().zip(1..).map(|(m, rank)| (m.id, rank)).collect()
}
