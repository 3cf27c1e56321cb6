//! Movie database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Movie, NewMovie};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub release_date: Date,
    pub trailer_link: String,
    pub poster_url: String,
    pub genres: Vec<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Movie {
    fn from(model: Model) -> Self {
        Movie {
            id: model.id,
            title: model.title,
            release_date: model.release_date,
            trailer_link: model.trailer_link,
            poster_url: model.poster_url,
            genres: model.genres,
        }
    }
}

impl ActiveModel {
    /// Active model for a fresh insert with a generated id.
    pub fn for_insert(movie: NewMovie) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            title: Set(movie.title),
            release_date: Set(movie.release_date),
            trailer_link: Set(movie.trailer_link),
            poster_url: Set(movie.poster_url),
            genres: Set(movie.genres),
        }
    }
}
