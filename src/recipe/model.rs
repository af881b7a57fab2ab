use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RecipeBatch {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub calories: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub price: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub amount: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub unit: String,
}

// 模型常把数量、热量写成数字，统一转成字符串
fn loose_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_fields() {
        let r: Recipe = serde_json::from_str(
            r#"{"name":"涼拌筍","ingredients":[{"name":"筍","amount":300,"unit":"克"},{"name":"鹽","amount":"少許","unit":null}],
                "steps":["切塊","拌勻"],"calories":180,"price":"約 60 元"}"#,
        )
        .unwrap();
        assert_eq!(r.ingredients[0].amount, "300");
        assert_eq!(r.ingredients[1].unit, "");
        assert_eq!(r.calories, "180");
        assert_eq!(r.price, "約 60 元");
    }
}
