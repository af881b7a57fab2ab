use super::model::RecipeBatch;
use super::RecipeError;
use regex::Regex;
use serde_json::Value;

/// 从模型回复中取出 ```json 区块并解析为食谱列表
///
/// 先去掉 `<think>` 推理段并压缩空行；不做 JSON 修复。
pub fn parse_llm_response(text: &str) -> Result<RecipeBatch, RecipeError> {
    let think = Regex::new(r"(?s)<think>.*?</think>").map_err(|e| RecipeError::Parse(e.to_string()))?;
    let blank = Regex::new(r"\n+").map_err(|e| RecipeError::Parse(e.to_string()))?;
    let block = Regex::new(r"```json\s*(\{[\s\S]*\})\s*")
        .map_err(|e| RecipeError::Parse(e.to_string()))?;

    let cleaned = think.replace_all(text, "");
    let cleaned = blank.replace_all(&cleaned, "\n");
    let cleaned = cleaned.trim();

    let json_str = block
        .captures(cleaned)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| RecipeError::Parse("no ```json block found".to_string()))?;

    let v: Value = serde_json::from_str(json_str)
        .map_err(|e| RecipeError::Parse(format!("json parse failed: {e}")))?;
    if !v.get("recipes").map(Value::is_array).unwrap_or(false) {
        return Err(RecipeError::Parse("missing 'recipes' array".to_string()));
    }
    serde_json::from_value(v).map_err(|e| RecipeError::Parse(format!("bad recipe shape: {e}")))
}
