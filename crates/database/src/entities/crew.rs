use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "crews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trip_crew::Entity")]
    TripCrews,
}

impl Related<super::trip_crew::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripCrews.def()
    }
}

// Many-to-many relationship with trips
impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        super::trip_crew::Relation::Trip.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::trip_crew::Relation::Crew.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
