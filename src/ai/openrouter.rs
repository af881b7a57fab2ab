use crate::ai::types::{ChatRequest, ChatResponse, LlmError, LlmProvider};
use crate::ai::{build_llm_http_client, split_keys};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// OpenAI 兼容的 chat/completions 接口（默认 OpenRouter）
#[derive(Clone)]
pub struct OpenRouterProvider {
    client: reqwest::Client,
    base_url: String,
    api_keys: Vec<String>,
    index: Arc<AtomicUsize>,
}

impl OpenRouterProvider {
    pub fn from_env() -> Result<Self, LlmError> {
        let mut api_keys = std::env::var("OPENROUTER_API_KEYS")
            .map(|s| split_keys(&s))
            .unwrap_or_default();
        if api_keys.is_empty() {
            let key = std::env::var("OPENROUTER_API_KEY")
                .map_err(|_| LlmError::MissingEnv("OPENROUTER_API_KEY"))?;
            api_keys.push(key.trim().to_string());
        }
        let base_url = std::env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());

        Ok(Self {
            client: build_llm_http_client()?,
            base_url,
            api_keys,
            index: Arc::new(AtomicUsize::new(0)),
        })
    }

    // 多个 key 时轮询使用
    fn next_key(&self) -> &str {
        let i = self.index.fetch_add(1, Ordering::Relaxed);
        &self.api_keys[i % self.api_keys.len()]
    }
}

/// 兼容 message.content（字符串或分段数组）、choices[0].text 与顶层 output_text
pub(crate) fn extract_text(v: &Value) -> Result<String, LlmError> {
    let choice0 = v
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| LlmError::InvalidResponse("missing choices[0]".to_string()))?;

    let content = choice0
        .get("message")
        .and_then(|m| m.get("content"))
        .or_else(|| choice0.get("content"));

    match content {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Array(arr)) => Ok(arr
            .iter()
            .filter_map(|it| {
                it.get("text")
                    .and_then(|x| x.as_str())
                    .or_else(|| it.as_str())
            })
            .collect::<Vec<_>>()
            .join("\n")),
        Some(_) => Err(LlmError::InvalidResponse(
            "unexpected content type".to_string(),
        )),
        None => match (choice0.get("text"), v.get("output_text")) {
            (Some(Value::String(s)), _) | (None, Some(Value::String(s))) => Ok(s.clone()),
            _ => Err(LlmError::InvalidResponse(
                "missing content/text in choices[0]".to_string(),
            )),
        },
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, LlmError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": req.model,
            "temperature": req.temperature,
            "max_tokens": req.max_tokens,
            "messages": [
                {"role": "system", "content": req.system},
                {"role": "user", "content": req.user}
            ]
        });

        let mut resp = None;
        for _ in 0..2 {
            match self
                .client
                .post(url.clone())
                .bearer_auth(self.next_key())
                .json(&body)
                .send()
                .await
            {
                Ok(r) => {
                    resp = Some(r);
                    break;
                }
                Err(e) if e.is_timeout() => continue,
                Err(e) => return Err(LlmError::Http(e.to_string())),
            }
        }
        let resp = resp.ok_or_else(|| LlmError::Http("timeout".to_string()))?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(LlmError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(LlmError::RateLimited),
            _ => {}
        }

        let status = resp.status();
        let raw = resp
            .text()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::Http(format!("{} {}", status.as_u16(), raw)));
        }

        let v: Value = serde_json::from_str(&raw)
            .map_err(|e| LlmError::InvalidResponse(format!("json parse failed: {e}, raw={raw}")))?;
        let text = extract_text(&v)?;

        Ok(ChatResponse { text })
    }
}
