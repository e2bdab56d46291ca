//! Control API Client
//!
//! 管理図データを配信する外部APIとの統合を抽象化

use crate::{
    engine::ControlParameters,
    error::{Error, Result},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 管理図データソースの共通インターフェース
///
/// ダッシュボードとワンショット実行はこのシームを通してのみ取得を行う。
#[async_trait]
pub trait ControlDataSource: Send + Sync {
    /// ケース識別子で系列と管理限界を取得
    async fn fetch_case(&self, case: &str) -> Result<ControlCase>;
}

/// APIレスポンス（ワイヤ形式）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlResponse {
    /// 成否フラグ
    pub success: bool,
    /// ケースデータ（先頭要素のみ使用する）
    #[serde(default)]
    pub data: Vec<ControlRecord>,
    /// API側の診断メッセージ（失敗時）
    #[serde(default)]
    pub messages: serde_json::Value,
}

impl ControlResponse {
    /// レスポンスを検証して1ケース分のデータに変換
    ///
    /// `success: false` と空の `data` はどちらもAPIレベルの失敗として扱う。
    pub fn into_case(self, case: &str) -> Result<ControlCase> {
        if !self.success {
            return Err(Error::Api(format!(
                "API reported failure for case {}: {}",
                case, self.messages
            )));
        }

        let record = self
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::Api(format!("API returned no data for case {}", case)))?;

        Ok(record.into())
    }
}

/// 1ケース分のワイヤレコード
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlRecord {
    /// 測定値の列
    #[serde(rename = "valores")]
    pub values: Vec<MeasurementPoint>,
    /// 中心線
    #[serde(rename = "media")]
    pub mean: f64,
    /// 上方管理限界
    #[serde(rename = "lsc")]
    pub upper_limit: f64,
    /// 下方管理限界
    #[serde(rename = "lic")]
    pub lower_limit: f64,
}

/// 測定点（ラベルと値）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementPoint {
    /// 表示用ラベル（計算には使わない）
    pub x: serde_json::Value,
    /// 測定値
    pub y: f64,
}

impl MeasurementPoint {
    /// ラベルを表示用文字列に変換
    pub fn label(&self) -> String {
        match &self.x {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// 取得済みの1ケース（エンジンとレンダラが消費する形）
#[derive(Debug, Clone, PartialEq)]
pub struct ControlCase {
    /// 表示用ラベル列
    pub labels: Vec<String>,
    /// 測定値の系列（観測順）
    pub values: Vec<f64>,
    /// 管理図パラメータ
    pub params: ControlParameters,
}

impl From<ControlRecord> for ControlCase {
    fn from(record: ControlRecord) -> Self {
        let labels = record.values.iter().map(MeasurementPoint::label).collect();
        let values = record.values.iter().map(|p| p.y).collect();
        Self {
            labels,
            values,
            params: ControlParameters {
                center: record.mean,
                upper_limit: record.upper_limit,
                lower_limit: record.lower_limit,
            },
        }
    }
}

/// Control API クライアント
pub struct ControlApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ControlApiClient {
    /// 新しいクライアントを作成
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn case_url(&self, case: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), case)
    }
}

#[async_trait]
impl ControlDataSource for ControlApiClient {
    async fn fetch_case(&self, case: &str) -> Result<ControlCase> {
        let url = self.case_url(case);
        tracing::debug!(%url, "fetching control case");

        let response = self.client.get(&url).send().await?;
        let body: ControlResponse = response.json().await?;

        let control_case = body.into_case(case)?;
        tracing::info!(case, points = control_case.values.len(), "control case fetched");
        Ok(control_case)
    }
}
