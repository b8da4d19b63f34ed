use models::booking::SeatPlan;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trains")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub cargo_num: i32,
    pub places_in_cargo: i32,
    pub train_type_id: Uuid,
    /// Path of the uploaded image relative to the media root.
    pub image_path: Option<String>,
}

impl Model {
    pub fn seat_plan(&self) -> SeatPlan {
        SeatPlan::new(self.cargo_num, self.places_in_cargo)
    }

    pub fn capacity(&self) -> i64 {
        self.seat_plan().capacity()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::train_type::Entity",
        from = "Column::TrainTypeId",
        to = "super::train_type::Column::Id"
    )]
    TrainType,
    #[sea_orm(has_many = "super::trip::Entity")]
    Trips,
}

impl Related<super::train_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrainType.def()
    }
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
