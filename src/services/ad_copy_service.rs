//! 广告文案服务 - 业务能力层
//!
//! 只负责"生成广告文案"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini, Azure 等）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs, ImageDetail,
        ImageUrl,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::ad::AdSettings;
use crate::models::listing::PropertyImage;

/// 广告文案服务
///
/// 职责：
/// - 调用 LLM API 根据房源照片生成广告文案
/// - 提供通用的 LLM 调用接口
/// - 只处理单个房源的文案
/// - 不出现 Vec<Listing>
/// - 不关心流程顺序
pub struct AdCopyService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl AdCopyService {
    /// 创建新的广告文案服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.text_model_name.clone(),
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// 这是最基础的 LLM 调用接口，其他所有 LLM 相关功能都应该基于此函数。
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    /// - `imgs`: 图片 data URL 列表（可选），会追加到用户消息中
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        imgs: Option<&[String]>,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());
        if let Some(img_urls) = imgs {
            debug!("包含 {} 张图片", img_urls.len());
        }

        // 构建消息列表
        let mut messages = Vec::new();

        // 添加系统消息（如果提供）
        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        // 构建用户消息内容（支持图片）
        let user_msg = if let Some(img_urls) = imgs {
            if !img_urls.is_empty() {
                // 使用 Vision API：构建包含文本和图片的内容
                let mut content_parts: Vec<ChatCompletionRequestUserMessageContentPart> =
                    Vec::new();

                // 添加图片部分（先图后文，与原始调用一致）
                for url in img_urls.iter() {
                    content_parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(
                        ChatCompletionRequestMessageContentPartImage {
                            image_url: ImageUrl {
                                url: url.clone(),
                                detail: Some(ImageDetail::Auto),
                            },
                        },
                    ));
                }

                // 添加文本部分
                content_parts.push(ChatCompletionRequestUserMessageContentPart::Text(
                    ChatCompletionRequestMessageContentPartText {
                        text: user_message.to_string(),
                    },
                ));

                debug!("使用 Vision API，包含 {} 张图片", img_urls.len());

                // 构建包含多部分内容的用户消息
                ChatCompletionRequestUserMessageArgs::default()
                    .content(ChatCompletionRequestUserMessageContent::Array(
                        content_parts,
                    ))
                    .build()?
            } else {
                // 没有图片，只有文本
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()?
            }
        } else {
            // 没有图片参数，只有文本
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()?
        };

        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.7)
            .max_tokens(2048u32)
            .build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        Ok(content.trim().to_string())
    }

    /// 根据房源照片和广告参数生成广告文案
    ///
    /// 文案调用使用原始照片（编辑前），让模型理解房源的真实状态。
    /// 空文案视为失败：批处理工具不能把占位文本写进结果。
    ///
    /// # 参数
    /// - `images`: 参与本次生成的图片（已编码载荷）
    /// - `settings`: 广告参数（受众 / 篇幅 / 语气）
    ///
    /// # 返回
    /// 返回生成的广告文案（西班牙语）
    pub async fn generate_ad_text(
        &self,
        images: &[PropertyImage],
        settings: &AdSettings,
    ) -> Result<String> {
        if images.is_empty() {
            anyhow::bail!("图片集合为空，无法生成文案");
        }

        debug!(
            "开始生成广告文案，图片数量: {}, 模型: {}",
            images.len(),
            self.model_name
        );

        // 收集原始照片的 data URL
        let img_urls: Vec<String> = images
            .iter()
            .filter_map(|img| img.preview.as_ref().map(|p| p.data_url()))
            .collect();

        if img_urls.len() != images.len() {
            anyhow::bail!(
                "图片载荷未就绪: {}/{} 张已编码",
                img_urls.len(),
                images.len()
            );
        }

        let (user_message, system_message) = self.build_ad_messages(settings);

        let response = self
            .send_to_llm(&user_message, Some(&system_message), Some(&img_urls))
            .await?;

        if response.is_empty() {
            anyhow::bail!("LLM 返回了空文案");
        }

        Ok(response)
    }

    /// 构建用于广告生成的消息
    ///
    /// 返回 (user_message, system_message)
    fn build_ad_messages(&self, settings: &AdSettings) -> (String, String) {
        let system_message =
            "Actúa como un experto redactor inmobiliario (copywriter).".to_string();

        let user_message = format!(
            r#"Tu tarea es escribir un anuncio inmobiliario atractivo basado en las imágenes proporcionadas de una propiedad.

Configuración del anuncio:
- Público Objetivo: {}
- Extensión: {}
- Tono: {}

Instrucciones:
1. Analiza las imágenes para identificar características clave (luz, espacios, materiales, distribución).
2. Escribe el anuncio en español.
3. Usa saltos de línea para facilitar la lectura.
4. No inventes características que no se vean, pero puedes inferir la calidad o el ambiente.
5. Estructura el texto con un título llamativo y un cuerpo persuasivo."#,
            settings.audience.name(),
            settings.length.name(),
            settings.tone.name()
        );

        (user_message, system_message)
    }
}
