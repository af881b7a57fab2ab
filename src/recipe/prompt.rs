use crate::registry::SeasonalToday;
use crate::storage::entity::product_transaction::Model as TransactionRecord;

pub const SYSTEM_PROMPT: &str =
    "你是一位台灣家常菜主廚，根據當日批發市場行情設計平價、當季的家常料理。只輸出要求的 JSON。";

/// 由排名结果、当季食材与近期菜名组成用户提示
pub struct PromptBuilder<'a> {
    ranked: &'a [TransactionRecord],
    seasonal: &'a [SeasonalToday],
    avoid: &'a [String],
}

impl<'a> PromptBuilder<'a> {
    pub fn new(
        ranked: &'a [TransactionRecord],
        seasonal: &'a [SeasonalToday],
        avoid: &'a [String],
    ) -> Self {
        Self {
            ranked,
            seasonal,
            avoid,
        }
    }

    pub fn build(&self, n: usize) -> String {
        let mut lines = Vec::new();
        lines.push(format!("請設計 {n} 道家常菜，每道至少使用一種下列今日交易量大的食材。"));
        lines.push(String::new());
        lines.push("今日行情（作物 / 市場 / 平均價 元/公斤 / 交易量 公斤）:".to_string());
        for r in self.ranked.iter().take(30) {
            lines.push(format!(
                "- {} / {} / {:.1} / {:.0}",
                r.crop_name.trim(),
                r.market_name.trim(),
                r.avg_price,
                r.trans_quantity
            ));
        }

        if !self.seasonal.is_empty() {
            lines.push(String::new());
            let names: Vec<&str> = self.seasonal.iter().map(|s| s.name.as_str()).collect();
            lines.push(format!("當季食材: {}", names.join("、")));
        }

        if !self.avoid.is_empty() {
            lines.push(String::new());
            lines.push(format!("請避免與近期菜色重複: {}", self.avoid.join("、")));
        }

        lines.push(String::new());
        lines.push("只輸出一個 ```json 區塊，格式如下：".to_string());
        lines.push("```json".to_string());
        lines.push(
            r#"{"recipes": [{"name": "菜名", "ingredients": [{"name": "食材", "amount": "300", "unit": "克"}], "steps": ["步驟一", "步驟二"], "calories": "每人約 350 大卡", "price": "約 120 元"}]}"#
                .to_string(),
        );
        lines.push("```".to_string());
        lines.join("\n")
    }
}
