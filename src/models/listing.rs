use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult, BusinessError};
use crate::models::treatment::Treatment;

/// 房源 TOML 文件中的单个图片条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageEntry {
    /// 图片源文件路径
    pub path: String,
    /// 处理方式（keep / stage / empty）
    #[serde(default = "default_treatment")]
    pub treatment: String,
    /// 在生成前从集合中移除该图片
    #[serde(default)]
    pub exclude: bool,
}

fn default_treatment() -> String {
    "keep".to_string()
}

/// 房源数据（一次生成动作的输入单元）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    /// 目标受众（familias / parejas / inversores / estudiantes / lujo）
    #[serde(default = "default_audience")]
    pub audience: String,
    /// 广告篇幅（corto / medio / largo）
    #[serde(default = "default_length")]
    pub length: String,
    /// 广告语气（profesional / emocional / urgente / minimalista）
    #[serde(default = "default_tone")]
    pub tone: String,
    pub images: Vec<ImageEntry>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

fn default_audience() -> String {
    "familias".to_string()
}

fn default_length() -> String {
    "medio".to_string()
}

fn default_tone() -> String {
    "profesional".to_string()
}

impl Listing {
    /// 获取参与本次生成的图片条目（排除 exclude 标记的条目）
    ///
    /// 被排除的条目既不进入文案调用，也不进入编辑批次
    pub fn active_entries(&self) -> Vec<&ImageEntry> {
        self.images.iter().filter(|e| !e.exclude).collect()
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

/// 图片生命周期状态
///
/// pending → processing → completed | error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl ImageStatus {
    pub fn name(self) -> &'static str {
        match self {
            ImageStatus::Pending => "pending",
            ImageStatus::Processing => "processing",
            ImageStatus::Completed => "completed",
            ImageStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 本地编码后的图片载荷（base64 + mime），同时充当生成前的预览引用
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub base64_data: String,
}

impl ImagePayload {
    /// 拼接成 data URL 形式（远程 API 与预览共用）
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// 远程编辑成功后得到的图片
#[derive(Debug, Clone)]
pub struct EditedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 一张待处理的房源照片
///
/// 不变量：processed 有值 当且仅当 处理方式不是 Keep 且远程编辑调用成功
#[derive(Debug, Clone)]
pub struct PropertyImage {
    /// 不透明标识（仅用于日志和结果命名）
    pub id: Uuid,
    pub source_path: String,
    pub treatment: Treatment,
    /// 本地编码载荷，在准备阶段填充
    pub preview: Option<ImagePayload>,
    pub processed: Option<EditedImage>,
    pub status: ImageStatus,
}

impl PropertyImage {
    /// 从 TOML 条目构建图片对象
    pub fn from_entry(entry: &ImageEntry) -> AppResult<Self> {
        let treatment = Treatment::find(&entry.treatment).ok_or_else(|| {
            AppError::Business(BusinessError::TreatmentParseFailed {
                value: entry.treatment.clone(),
            })
        })?;

        Ok(Self {
            id: Uuid::new_v4(),
            source_path: entry.path.clone(),
            treatment,
            preview: None,
            processed: None,
            status: ImageStatus::Pending,
        })
    }

    /// 是否需要远程编辑调用
    pub fn needs_edit(&self) -> bool {
        self.treatment != Treatment::Keep
    }
}

/// 一次生成动作完成时的结果配对（文案 + 当时的图片集合）
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub ad_text: String,
    pub images: Vec<PropertyImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, treatment: &str, exclude: bool) -> ImageEntry {
        ImageEntry {
            path: path.to_string(),
            treatment: treatment.to_string(),
            exclude,
        }
    }

    #[test]
    fn test_active_entries_filters_excluded() {
        let listing = Listing {
            name: "Piso en Chamberí".to_string(),
            audience: "familias".to_string(),
            length: "medio".to_string(),
            tone: "profesional".to_string(),
            images: vec![
                entry("salon.jpg", "stage", false),
                entry("trastero.jpg", "keep", true),
                entry("dormitorio.jpg", "empty", false),
            ],
            file_path: None,
        };

        let active = listing.active_entries();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|e| !e.exclude));
        assert!(active.iter().all(|e| e.path != "trastero.jpg"));
    }

    #[test]
    fn test_from_entry_parses_treatment() {
        let image = PropertyImage::from_entry(&entry("salon.jpg", "stage", false)).unwrap();
        assert_eq!(image.treatment, Treatment::Stage);
        assert_eq!(image.status, ImageStatus::Pending);
        assert!(image.processed.is_none());
        assert!(image.needs_edit());
    }

    #[test]
    fn test_from_entry_rejects_unknown_treatment() {
        let result = PropertyImage::from_entry(&entry("salon.jpg", "pintar", false));
        assert!(result.is_err());
    }

    #[test]
    fn test_keep_image_needs_no_edit() {
        let image = PropertyImage::from_entry(&entry("fachada.jpg", "keep", false)).unwrap();
        assert!(!image.needs_edit());
    }

    #[test]
    fn test_payload_data_url() {
        let payload = ImagePayload {
            mime_type: "image/png".to_string(),
            base64_data: "aGVsbG8=".to_string(),
        };
        assert_eq!(payload.data_url(), "data:image/png;base64,aGVsbG8=");
    }
}
