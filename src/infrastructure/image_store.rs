//! 图片存取 - 基础设施层
//!
//! 持有文件系统与编码能力，只暴露"读取载荷 / 解码结果 / 写出文件"的能力

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use std::path::Path;

use crate::error::{AppError, AppResult, FileError};
use crate::models::listing::{EditedImage, ImagePayload};

/// 图片存取器
///
/// 职责：
/// - 读取本地图片并编码为 base64 载荷
/// - 解码远程返回的 base64 / data URL 图片
/// - 写出结果文件
/// - 不认识 Listing / PropertyImage
/// - 不处理业务流程
pub struct ImageStore;

impl ImageStore {
    /// 创建新的图片存取器
    pub fn new() -> Self {
        Self
    }

    /// 根据文件扩展名推断 mime 类型
    pub fn mime_type_for(&self, path: &str) -> AppResult<&'static str> {
        let ext = Path::new(path)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => Ok("image/png"),
            "jpg" | "jpeg" => Ok("image/jpeg"),
            "webp" => Ok("image/webp"),
            _ => Err(AppError::unsupported_image_format(path)),
        }
    }

    /// 读取本地图片并编码为载荷（base64 + mime）
    pub async fn load_payload(&self, path: &str) -> AppResult<ImagePayload> {
        let mime_type = self.mime_type_for(path)?;

        if !Path::new(path).exists() {
            return Err(AppError::File(FileError::NotFound {
                path: path.to_string(),
            }));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path, e))?;

        Ok(ImagePayload {
            mime_type: mime_type.to_string(),
            base64_data: STANDARD.encode(bytes),
        })
    }

    /// 解码 base64 字符串为图片字节
    pub fn decode_base64(&self, mime_type: &str, data: &str) -> AppResult<EditedImage> {
        let bytes = STANDARD.decode(data.trim())?;
        Ok(EditedImage {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    /// 拆解 data URL（"data:image/png;base64,..."）并解码
    pub fn decode_data_url(&self, data_url: &str) -> AppResult<EditedImage> {
        let re = Regex::new(r"^data:(image/[a-zA-Z0-9.+-]+);base64,(.+)$")?;
        let caps = re.captures(data_url).ok_or_else(|| {
            AppError::File(FileError::Base64DecodeFailed {
                source: format!("不是合法的 data URL: {}", truncate(data_url, 40)).into(),
            })
        })?;

        self.decode_base64(&caps[1], &caps[2])
    }

    /// 根据 mime 类型选择输出文件扩展名
    pub fn extension_for_mime(&self, mime_type: &str) -> &'static str {
        match mime_type {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            // 编辑模型默认返回 PNG
            _ => "png",
        }
    }

    /// 写出图片文件
    pub fn write_image(&self, path: &Path, bytes: &[u8]) -> AppResult<()> {
        std::fs::write(path, bytes)
            .map_err(|e| AppError::file_write_failed(path.to_string_lossy(), e))
    }

    /// 复制原始文件到目标路径
    pub fn copy_original(&self, from: &str, to: &Path) -> AppResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| AppError::file_write_failed(to.to_string_lossy(), e))
    }
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 截断长字符串用于错误信息
fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
