use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::venue::{CreateVenueParam, Venue};

pub struct VenueRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VenueRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a venue without coordinates.
    pub async fn create(&self, param: CreateVenueParam) -> Result<Venue, DbErr> {
        let entity = entity::venue::ActiveModel {
            name: ActiveValue::Set(param.name),
            address1: ActiveValue::Set(param.address1),
            address2: ActiveValue::Set(param.address2),
            address3: ActiveValue::Set(param.address3),
            city: ActiveValue::Set(param.city),
            country: ActiveValue::Set(param.country),
            phone: ActiveValue::Set(param.phone),
            lat: ActiveValue::Set(None),
            lon: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Venue::from_entity(entity))
    }

    pub async fn find_by_id(&self, venue_id: i32) -> Result<Option<Venue>, DbErr> {
        let entity = entity::prelude::Venue::find_by_id(venue_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Venue::from_entity))
    }

    pub async fn get_by_ids(&self, venue_ids: Vec<i32>) -> Result<Vec<Venue>, DbErr> {
        if venue_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Venue::find()
            .filter(entity::venue::Column::Id.is_in(venue_ids))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Venue::from_entity).collect())
    }
}
