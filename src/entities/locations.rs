use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub search_query: String,
    pub formatted_query: String,
    #[sea_orm(column_type = "Double")]
    pub latitude: f64,
    #[sea_orm(column_type = "Double")]
    pub longitude: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::weathers::Entity")]
    Weathers,
    #[sea_orm(has_many = "super::yelps::Entity")]
    Yelps,
    #[sea_orm(has_many = "super::movies::Entity")]
    Movies,
    #[sea_orm(has_many = "super::meetups::Entity")]
    Meetups,
    #[sea_orm(has_many = "super::trails::Entity")]
    Trails,
}

impl Related<super::weathers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weathers.def()
    }
}

impl Related<super::yelps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Yelps.def()
    }
}

impl Related<super::movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movies.def()
    }
}

impl Related<super::meetups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meetups.def()
    }
}

impl Related<super::trails::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
