//! 结果写出服务 - 业务能力层
//!
//! 只负责"把一次生成的结果落盘"能力，不关心流程

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::infrastructure::ImageStore;
use crate::models::listing::GenerationResult;

/// 结果写出服务
///
/// 职责：
/// - 为一个房源创建结果目录
/// - 写出广告文案 anuncio.txt
/// - 写出最终图片集合（编辑成功写编辑版，否则复制原图）
/// - 不关心流程顺序，不做成败判断
pub struct ResultWriter {
    output_root: String,
}

impl ResultWriter {
    /// 创建新的结果写出服务
    pub fn new(output_root: impl Into<String>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    /// 写出一个房源的完整结果
    ///
    /// # 参数
    /// - `store`: 图片存取器
    /// - `listing_name`: 房源名称（用作结果目录名）
    /// - `result`: 生成结果（文案 + 完成时的图片集合）
    ///
    /// # 返回
    /// 返回结果目录路径
    pub async fn write(
        &self,
        store: &ImageStore,
        listing_name: &str,
        result: &GenerationResult,
    ) -> Result<PathBuf> {
        let dir = PathBuf::from(&self.output_root).join(sanitize_name(listing_name));
        fs::create_dir_all(&dir)
            .with_context(|| format!("无法创建结果目录: {}", dir.display()))?;

        // 写出广告文案
        let ad_path = dir.join("anuncio.txt");
        fs::write(&ad_path, &result.ad_text)
            .with_context(|| format!("无法写入文案文件: {}", ad_path.display()))?;

        debug!("文案已写入: {}", ad_path.display());

        // 写出最终图片集合
        for (index, image) in result.images.iter().enumerate() {
            let source_name = Path::new(&image.source_path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| format!("imagen_{}", index + 1));

            match &image.processed {
                Some(edited) => {
                    let stem = Path::new(&source_name)
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_else(|| format!("imagen_{}", index + 1));
                    let file_name = format!(
                        "{:02}_{}_editada.{}",
                        index + 1,
                        stem,
                        store.extension_for_mime(&edited.mime_type)
                    );
                    store.write_image(&dir.join(file_name), &edited.bytes)?;
                }
                None => {
                    // 保留原图（Keep 或编辑失败降级）
                    let file_name = format!("{:02}_{}", index + 1, source_name);
                    store.copy_original(&image.source_path, &dir.join(file_name))?;
                }
            }
        }

        Ok(dir)
    }
}

/// 把房源名称转成安全的目录名
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c == ' ' || c == '-' || c == '_' {
                '_'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect();

    if cleaned.is_empty() {
        "resultado".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::{EditedImage, ImageStatus, PropertyImage};
    use crate::models::treatment::Treatment;
    use uuid::Uuid;

    fn image(source: &str, treatment: Treatment, processed: Option<EditedImage>) -> PropertyImage {
        let status = if processed.is_some() {
            ImageStatus::Completed
        } else {
            ImageStatus::Pending
        };
        PropertyImage {
            id: Uuid::new_v4(),
            source_path: source.to_string(),
            treatment,
            preview: None,
            processed,
            status,
        }
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Piso en Chamberí"), "Piso_en_Chamberí");
        assert_eq!(sanitize_name("a/b\\c"), "abc");
        assert_eq!(sanitize_name("///"), "resultado");
    }

    #[tokio::test]
    async fn test_write_result_folder() {
        let root = std::env::temp_dir().join("inmo_genius_writer_test");
        let _ = std::fs::remove_dir_all(&root);

        // 准备一张"原图"
        let fotos = root.join("fotos");
        std::fs::create_dir_all(&fotos).unwrap();
        let original = fotos.join("salon.jpg");
        std::fs::write(&original, b"original bytes").unwrap();

        let store = ImageStore::new();
        let writer = ResultWriter::new(root.join("out").to_string_lossy().to_string());

        let result = GenerationResult {
            ad_text: "Luminoso piso en el centro.".to_string(),
            images: vec![
                image(
                    original.to_str().unwrap(),
                    Treatment::Stage,
                    Some(EditedImage {
                        mime_type: "image/png".to_string(),
                        bytes: b"edited bytes".to_vec(),
                    }),
                ),
                image(original.to_str().unwrap(), Treatment::Keep, None),
            ],
        };

        let dir = writer
            .write(&store, "Piso Prueba", &result)
            .await
            .unwrap();

        let ad_text = std::fs::read_to_string(dir.join("anuncio.txt")).unwrap();
        assert_eq!(ad_text, "Luminoso piso en el centro.");

        // 编辑成功的写编辑版，Keep 的复制原图
        assert!(dir.join("01_salon_editada.png").exists());
        assert!(dir.join("02_salon.jpg").exists());

        let _ = std::fs::remove_dir_all(&root);
    }
}
