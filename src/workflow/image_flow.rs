//! 图片处理流程 - 流程层
//!
//! 核心职责：定义"一张图片"的完整处理流程
//!
//! 流程顺序：
//! 1. Keep → 直接返回原图（不发起编辑调用）
//! 2. Stage / Empty → 远程编辑 → 成功挂载编辑结果
//! 3. 编辑缺席 → 降级保留原图 + avisos.txt（兜底）

use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure::ImageStore;
use crate::models::listing::{ImageStatus, PropertyImage};
use crate::services::{ImageEditService, WarnWriter};
use crate::workflow::image_ctx::ImageCtx;

/// 图片处理流程
///
/// - 编排单张图片的编辑流程
/// - 单张失败只降级该图片，绝不中止批次
/// - 不持有任何资源（文件）
/// - 只依赖业务能力（services）
pub struct ImageFlow {
    edit_service: ImageEditService,
    warn_writer: WarnWriter,
    verbose_logging: bool,
}

impl ImageFlow {
    /// 创建新的图片处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            edit_service: ImageEditService::new(config),
            warn_writer: WarnWriter::new(),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理单张图片，返回更新后的图片对象
    ///
    /// 编辑调用对单张失败只返回缺席，所以本流程不返回 Result：
    /// 任何失败都体现为 status = Error + 保留原图
    pub async fn run(
        &self,
        store: &ImageStore,
        image: &PropertyImage,
        ctx: &ImageCtx,
    ) -> PropertyImage {
        let mut image = image.clone();

        // ========== 流程 1: Keep 捷径 ==========
        // 保留原图的图片不发起编辑调用，processed 永远不设置
        if !image.needs_edit() {
            info!(
                "[房源 {}] 图片 {} 保留原图，跳过编辑",
                ctx.listing_index, ctx.image_index
            );
            return image;
        }

        let instruction = match image.treatment.edit_prompt() {
            Some(p) => p,
            None => return image,
        };

        // 载荷必须在准备阶段就绪
        let payload = match image.preview.clone() {
            Some(p) => p,
            None => {
                error!(
                    "[房源 {}] ❌ 图片 {} 载荷未编码，降级保留原图",
                    ctx.listing_index, ctx.image_index
                );
                image.status = ImageStatus::Error;
                self.write_warn(ctx, &image.source_path, "载荷未编码").await;
                return image;
            }
        };

        // ========== 流程 2: 远程编辑 ==========
        image.status = ImageStatus::Processing;
        info!(
            "[房源 {}] 🖼️ 正在编辑图片 {} ({})",
            ctx.listing_index,
            ctx.image_index,
            image.treatment.name()
        );

        if self.verbose_logging {
            info!(
                "[房源 {}]   文件: {} | 载荷: {} 字符",
                ctx.listing_index,
                image.source_path,
                payload.base64_data.len()
            );
        }

        match self.edit_service.edit(store, &payload, instruction).await {
            Some(edited) => {
                info!(
                    "[房源 {}] ✓ 图片 {} 编辑完成 ({} 字节)",
                    ctx.listing_index,
                    ctx.image_index,
                    edited.bytes.len()
                );
                image.processed = Some(edited);
                image.status = ImageStatus::Completed;
            }
            None => {
                // ========== 流程 3: 降级兜底 ==========
                warn!(
                    "[房源 {}] ⚠️ 图片 {} 编辑缺席，降级保留原图",
                    ctx.listing_index, ctx.image_index
                );
                image.processed = None;
                image.status = ImageStatus::Error;
                self.write_warn(ctx, &image.source_path, "编辑调用失败").await;
            }
        }

        image
    }

    /// 写入警告日志（失败不向上传播，只记录）
    async fn write_warn(&self, ctx: &ImageCtx, source_path: &str, reason: &str) {
        if let Err(e) = self
            .warn_writer
            .write(&ctx.listing_name, ctx.image_index, source_path, reason)
            .await
        {
            error!(
                "[房源 {}] avisos.txt 写入失败: {}",
                ctx.listing_index, e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::ImageEntry;
    use crate::models::treatment::Treatment;

    fn test_flow(warn_path: &str) -> ImageFlow {
        let config = Config::default();
        ImageFlow {
            edit_service: ImageEditService::new(&config),
            warn_writer: WarnWriter::with_path(warn_path),
            verbose_logging: false,
        }
    }

    fn pending_image(treatment: &str) -> PropertyImage {
        PropertyImage::from_entry(&ImageEntry {
            path: "fotos/salon.jpg".to_string(),
            treatment: treatment.to_string(),
            exclude: false,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_keep_image_issues_no_edit_call() {
        let flow = test_flow("avisos_test_keep.txt");
        let image = pending_image("keep");
        let ctx = ImageCtx::new("Piso Prueba".to_string(), 1, 1);

        // Keep 捷径在访问载荷/网络之前就返回
        let result = flow.run(&ImageStore::new(), &image, &ctx).await;

        assert_eq!(result.treatment, Treatment::Keep);
        assert_eq!(result.status, ImageStatus::Pending);
        assert!(result.processed.is_none());
    }

    #[tokio::test]
    async fn test_missing_payload_degrades_to_error() {
        let warn_path = std::env::temp_dir()
            .join("inmo_genius_flow_warn_test.txt")
            .to_string_lossy()
            .to_string();
        let flow = test_flow(&warn_path);

        // Stage 图片但载荷未编码：不发起远程调用，直接降级
        let image = pending_image("stage");
        let ctx = ImageCtx::new("Piso Prueba".to_string(), 1, 2);

        let result = flow.run(&ImageStore::new(), &image, &ctx).await;

        assert_eq!(result.status, ImageStatus::Error);
        assert!(result.processed.is_none());

        let _ = std::fs::remove_file(&warn_path);
    }
}
