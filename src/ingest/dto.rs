use crate::storage::repository::TransactionInput;
use serde::{Deserialize, Serialize};

/// 农产品交易行情 API 的响应外层
#[derive(Debug, Deserialize, Serialize)]
pub struct MarketResponse {
    #[serde(rename = "Data", default)]
    pub data: Vec<MarketRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MarketRecord {
    #[serde(rename = "TransDate")]
    pub trans_date: String,
    #[serde(rename = "CropCode", default)]
    pub crop_code: String,
    #[serde(rename = "CropName", default)]
    pub crop_name: String,
    #[serde(rename = "TcType", default)]
    pub tc_type: String,
    #[serde(rename = "MarketCode", default)]
    pub market_code: String,
    #[serde(rename = "MarketName", default)]
    pub market_name: String,
    #[serde(rename = "Upper_Price", default)]
    pub upper_price: f64,
    #[serde(rename = "Middle_Price", default)]
    pub middle_price: f64,
    #[serde(rename = "Lower_Price", default)]
    pub lower_price: f64,
    #[serde(rename = "Avg_Price", default)]
    pub avg_price: f64,
    #[serde(rename = "Trans_Quantity", default)]
    pub trans_quantity: f64,
}

impl From<MarketRecord> for TransactionInput {
    fn from(r: MarketRecord) -> Self {
        TransactionInput {
            trans_date: r.trans_date,
            crop_code: r.crop_code,
            crop_name: r.crop_name,
            tc_type: r.tc_type,
            market_code: r.market_code,
            market_name: r.market_name,
            upper_price: r.upper_price,
            middle_price: r.middle_price,
            lower_price: r.lower_price,
            avg_price: r.avg_price,
            trans_quantity: r.trans_quantity,
        }
    }
}
