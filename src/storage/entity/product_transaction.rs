use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 每日交易行情，一行对应上游一次（市场, 作物, 日期）观测，只追加不修改
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i32,
    pub trans_date: String, // 民国纪年 YYY.MM.DD
    pub crop_code: String,
    pub crop_name: String,
    pub tc_type: String,
    pub market_code: String,
    pub market_name: String,
    pub upper_price: f64,
    pub middle_price: f64,
    pub lower_price: f64,
    pub avg_price: f64,
    pub trans_quantity: f64,
    #[serde(skip)]
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
