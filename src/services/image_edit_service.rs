//! 图片编辑服务 - 业务能力层
//!
//! 只负责"编辑单张图片"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `reqwest` 直接调用 Gemini 风格的 generateContent 端点
//! - 请求携带图片 inlineData + 自然语言指令，响应模态为图片
//! - 单张图片失败不向上抛错，只返回"缺席"（None）

use reqwest::Client;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::infrastructure::ImageStore;
use crate::models::listing::{EditedImage, ImagePayload};

/// 图片编辑服务
///
/// 职责：
/// - 提交单张图片的远程编辑调用
/// - 只处理单张图片
/// - 不出现 Vec<PropertyImage>
/// - 不关心流程顺序
pub struct ImageEditService {
    http: Client,
    base_url: String,
    api_key: String,
    model_name: String,
}

impl ImageEditService {
    /// 创建新的图片编辑服务
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.image_api_base_url.clone(),
            api_key: config.llm_api_key.clone(),
            model_name: config.image_model_name.clone(),
        }
    }

    /// 编辑单张图片
    ///
    /// # 参数
    /// - `store`: 图片存取器（解码返回的 base64 数据）
    /// - `payload`: 已编码的图片载荷
    /// - `instruction`: 自然语言编辑指令
    ///
    /// # 返回
    /// 成功返回编辑后的图片；任何单张失败（网络、响应缺图、解码）
    /// 都降级为 None，由调用方保留原图
    pub async fn edit(
        &self,
        store: &ImageStore,
        payload: &ImagePayload,
        instruction: &str,
    ) -> Option<EditedImage> {
        match self.call_edit_api(store, payload, instruction).await {
            Ok(edited) => Some(edited),
            Err(e) => {
                warn!("图片编辑调用失败: {}", e);
                None
            }
        }
    }

    /// 调用远程编辑 API
    async fn call_edit_api(
        &self,
        store: &ImageStore,
        payload: &ImagePayload,
        instruction: &str,
    ) -> AppResult<EditedImage> {
        let endpoint = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model_name
        );

        debug!("调用图片编辑 API，模型: {}", self.model_name);

        let body = json!({
            "contents": [{
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": payload.mime_type,
                            "data": payload.base64_data,
                        }
                    },
                    { "text": instruction }
                ]
            }],
            "generationConfig": {
                "responseModalities": ["IMAGE"]
            }
        });

        let response = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok();
            return Err(AppError::Api(ApiError::BadResponse {
                endpoint,
                status: Some(status.as_u16()),
                message,
            }));
        }

        let result: JsonValue = response.json().await?;

        debug!("图片编辑 API 调用成功，解析响应");

        let (mime_type, data) = Self::extract_inline_image(&result)
            .ok_or(AppError::Api(ApiError::EmptyResponse { endpoint }))?;

        store.decode_base64(&mime_type, &data)
    }

    /// 从响应 JSON 中提取第一段 inlineData 图片
    ///
    /// 返回 (mime_type, base64_data)
    fn extract_inline_image(result: &JsonValue) -> Option<(String, String)> {
        let parts = result
            .get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .as_array()?;

        for part in parts {
            if let Some(inline) = part.get("inlineData") {
                let mime_type = inline
                    .get("mimeType")
                    .and_then(|v| v.as_str())
                    .unwrap_or("image/png");
                let data = inline.get("data").and_then(|v| v.as_str())?;
                return Some((mime_type.to_string(), data.to_string()));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_inline_image() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                    ]
                }
            }]
        });

        let (mime_type, data) = ImageEditService::extract_inline_image(&response).unwrap();
        assert_eq!(mime_type, "image/png");
        assert_eq!(data, "aGVsbG8=");
    }

    #[test]
    fn test_extract_inline_image_skips_text_parts() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Aquí tienes la imagen editada" },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "ZGF0YQ==" } }
                    ]
                }
            }]
        });

        let (mime_type, _) = ImageEditService::extract_inline_image(&response).unwrap();
        assert_eq!(mime_type, "image/jpeg");
    }

    #[test]
    fn test_extract_inline_image_absent() {
        // 模型拒绝或只返回文本时，响应里没有图片
        let text_only = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "No puedo editar esta imagen" }] }
            }]
        });
        assert!(ImageEditService::extract_inline_image(&text_only).is_none());

        let empty = json!({ "candidates": [] });
        assert!(ImageEditService::extract_inline_image(&empty).is_none());
    }

    /// 测试真实编辑调用
    ///
    /// 运行方式：
    /// ```bash
    /// cargo test test_edit_image_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_edit_image_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let service = ImageEditService::new(&config);
        let store = ImageStore::new();

        let payload = store
            .load_payload("listados/fotos/salon.jpg")
            .await
            .expect("读取测试图片失败");

        let result = service
            .edit(
                &store,
                &payload,
                crate::models::treatment::Treatment::Empty
                    .edit_prompt()
                    .unwrap(),
            )
            .await;

        match result {
            Some(edited) => {
                println!("✅ 编辑成功: {} ({} 字节)", edited.mime_type, edited.bytes.len());
                assert!(!edited.bytes.is_empty());
            }
            None => panic!("编辑调用失败"),
        }
    }
}
