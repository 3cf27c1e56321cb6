//! Movie persistence: paged, filtered listing and CRUD.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::{PgBinOper, PgExpr};
use sea_orm::sea_query::{BinOper, Expr, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set, Unchanged,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::base::EntityRepository;
use super::entities::movie::{self, ActiveModel, Entity as MovieEntity};
use crate::domain::{Movie, MovieCriterion, MovieQuery, MovieSort, NewMovie, SortDirection, SortField};
use crate::errors::AppResult;
use crate::types::PageRequest;

/// Movie repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// One page of movies matching the query, plus the total match count
    async fn find_page(&self, query: &MovieQuery, page: PageRequest)
        -> AppResult<(Vec<Movie>, u64)>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Movie>>;

    async fn create(&self, movie: NewMovie) -> AppResult<Movie>;

    /// Overwrite every stored field of an existing movie
    async fn update(&self, movie: Movie) -> AppResult<Movie>;

    /// Returns false when no movie had the id
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// SeaORM-backed movie repository
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl EntityRepository<MovieEntity> for MovieStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl MovieRepository for MovieStore {
    async fn find_page(
        &self,
        query: &MovieQuery,
        page: PageRequest,
    ) -> AppResult<(Vec<Movie>, u64)> {
        let select = movie_select(query);
        let paginator = select.paginate(&self.db, page.limit);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        tracing::debug!(total, page = page.page, "Fetched movie page");
        Ok((models.into_iter().map(Movie::from).collect(), total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Movie>> {
        Ok(self.fetch_by_id(id).await?.map(Movie::from))
    }

    async fn create(&self, movie: NewMovie) -> AppResult<Movie> {
        let model = ActiveModel::for_insert(movie).insert(&self.db).await?;
        Ok(Movie::from(model))
    }

    async fn update(&self, movie: Movie) -> AppResult<Movie> {
        let active = ActiveModel {
            id: Unchanged(movie.id),
            title: Set(movie.title),
            release_date: Set(movie.release_date),
            trailer_link: Set(movie.trailer_link),
            poster_url: Set(movie.poster_url),
            genres: Set(movie.genres),
        };

        let model = active.update(&self.db).await?;
        Ok(Movie::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.remove_by_id(id).await
    }
}

/// Filtered and ordered select for a list query.
pub(crate) fn movie_select(query: &MovieQuery) -> Select<MovieEntity> {
    let mut select = MovieEntity::find();
    if !query.criteria.is_empty() {
        let condition = query
            .criteria
            .iter()
            .fold(Condition::all(), |cond, c| cond.add(criterion_expr(c)));
        select = select.filter(condition);
    }
    apply_sort(select, query.sort)
}

/// Translate a single criterion into a SQL expression.
pub(crate) fn criterion_expr(criterion: &MovieCriterion) -> SimpleExpr {
    match criterion {
        MovieCriterion::TitleContains(needle) => {
            let pattern = format!("%{}%", escape_like(needle));
            Expr::col((MovieEntity, movie::Column::Title)).ilike(LikeExpr::new(pattern).escape('\\'))
        }
        MovieCriterion::HasAllGenres(genres) => Expr::col((MovieEntity, movie::Column::Genres))
            .binary(BinOper::PgOperator(PgBinOper::Contains), Expr::val(genres.clone())),
        MovieCriterion::ReleasedBetween { from, until } => movie::Column::ReleaseDate
            .gte(*from)
            .and(movie::Column::ReleaseDate.lt(*until)),
        MovieCriterion::TrailerLinkIs(link) => movie::Column::TrailerLink.eq(link.as_str()),
        MovieCriterion::PosterUrlIs(poster) => movie::Column::PosterUrl.eq(poster.as_str()),
    }
}

fn apply_sort(select: Select<MovieEntity>, sort: MovieSort) -> Select<MovieEntity> {
    let order = match sort.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };
    let column = match sort.field {
        SortField::ReleaseDate => movie::Column::ReleaseDate,
        SortField::Title => movie::Column::Title,
    };

    // Id breaks ties so pages never overlap.
    select
        .order_by(column, order)
        .order_by(movie::Column::Id, Order::Asc)
}

/// Escape LIKE metacharacters so the needle matches literally.
pub(crate) fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
