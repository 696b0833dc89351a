//! 警告写入服务 - 业务能力层
//!
//! 只负责"写 avisos.txt"能力，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 警告写入服务
///
/// 职责：
/// - 将编辑失败的图片记录到 avisos.txt
/// - 只处理单张图片的警告
/// - 不出现 Vec<PropertyImage>
/// - 不关心流程顺序
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: "avisos.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `listing_name`: 房源名称
    /// - `image_index`: 图片索引
    /// - `source_path`: 图片源文件路径
    /// - `reason`: 失败原因
    pub async fn write(
        &self,
        listing_name: &str,
        image_index: usize,
        source_path: &str,
        reason: &str,
    ) -> Result<()> {
        debug!(
            "写入警告: 房源 {} | 图片 {} | 原因: {}",
            listing_name, image_index, reason
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)?;

        let warn_msg = format!(
            "房源 {} | 图片 {} | 文件: {} | 原因: {}\n",
            listing_name, image_index, source_path, reason
        );

        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}
