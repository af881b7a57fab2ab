use super::dto::{MarketRecord, MarketResponse};
use super::IngestError;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// 单日行情数据来源
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn fetch_day(&self, roc_date: &str) -> Result<Vec<MarketRecord>, IngestError>;
}

/// 农业部开放资料 API 客户端
///
/// 网络错误、5xx 与 429 按指数退避重试，其余非 2xx 直接返回错误。
pub struct MoaClient {
    client: Client,
    base_url: String,
    max_tries: usize,
    retry_base: Duration,
}

impl MoaClient {
    pub fn new(base_url: String, max_tries: usize, retry_base: Duration) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("seasonal-market/0.1")
            .build()
            .map_err(|e| IngestError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            max_tries: max_tries.max(1),
            retry_base,
        })
    }

    pub fn day_url(&self, roc_date: &str) -> String {
        format!(
            "{}?Start_time={}&End_time={}",
            self.base_url.trim_end_matches('?'),
            roc_date,
            roc_date
        )
    }

    fn backoff(&self, try_num: usize) -> Duration {
        let exp = self
            .retry_base
            .saturating_mul(1u32 << (try_num.saturating_sub(1) as u32).min(6));
        // jitter: 0~16%
        let jitter = exp.mul_f64(rand::random::<u8>() as f64 % 5.0 / 25.0);
        exp + jitter
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

#[async_trait]
impl MarketSource for MoaClient {
    async fn fetch_day(&self, roc_date: &str) -> Result<Vec<MarketRecord>, IngestError> {
        let url = self.day_url(roc_date);
        let mut last_err = IngestError::Http("no attempt made".to_string());

        for try_num in 1..=self.max_tries {
            match self.client.get(&url).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    let raw = resp
                        .text()
                        .await
                        .map_err(|e| IngestError::Http(e.to_string()))?;
                    if status.is_success() {
                        let parsed: MarketResponse = serde_json::from_str(&raw).map_err(|e| {
                            IngestError::Decode(format!("json parse failed: {e}"))
                        })?;
                        info!(
                            "{} fetch_day({}) [{} tries, {} rows]",
                            self,
                            roc_date,
                            try_num,
                            parsed.data.len()
                        );
                        return Ok(parsed.data);
                    }
                    let err = IngestError::Status {
                        status: status.as_u16(),
                        body: raw.chars().take(200).collect(),
                    };
                    if !is_retryable(status) {
                        return Err(err);
                    }
                    last_err = err;
                }
                Err(e) => {
                    last_err = IngestError::Http(e.to_string());
                }
            }

            if try_num < self.max_tries {
                let delay = self.backoff(try_num);
                warn!(
                    "{} fetch_day({}) attempt {} failed: {}; retrying in {:?}",
                    self, roc_date, try_num, last_err, delay
                );
                tokio::time::sleep(delay).await;
            }
        }

        warn!(
            "{} fetch_day({}) [max {} tries ran out]",
            self, roc_date, self.max_tries
        );
        Err(last_err)
    }
}

impl std::fmt::Display for MoaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<MoaClient [{}]>", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: Duration) -> MoaClient {
        MoaClient::new(
            "https://data.moa.gov.tw/api/v1/AgriProductsTransType/".to_string(),
            3,
            base,
        )
        .unwrap()
    }

    #[test]
    fn builds_single_day_query() {
        assert_eq!(
            client(Duration::from_millis(1)).day_url("114.10.18"),
            "https://data.moa.gov.tw/api/v1/AgriProductsTransType/?Start_time=114.10.18&End_time=114.10.18"
        );
    }

    #[test]
    fn backoff_grows_and_stays_within_jitter() {
        let c = client(Duration::from_millis(100));
        for try_num in 1..=4 {
            let base = Duration::from_millis(100) * (1u32 << (try_num - 1));
            let d = c.backoff(try_num);
            assert!(d >= base, "try {try_num}: {d:?}");
            assert!(d <= base.mul_f64(1.2), "try {try_num}: {d:?}");
        }
    }

    #[test]
    fn only_transient_statuses_are_retried() {
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
    }
}
