use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trails")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub length: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub stars: Option<f64>,
    pub star_votes: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    pub trail_url: Option<String>,
    pub conditions: Option<String>,
    pub condition_date: Option<String>,
    pub condition_time: Option<String>,
    pub created_time: DateTimeUtc,
    pub location_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Locations,
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
