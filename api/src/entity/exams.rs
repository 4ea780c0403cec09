use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::exam_results::Entity")]
    ExamResults,
}

impl Related<super::exam_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
