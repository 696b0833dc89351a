//! 单个房源处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单个房源的一次完整生成动作，是房源级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **参数解析**：把 TOML 里的受众/篇幅/语气字符串解析为枚举
//! 2. **集合准备**：过滤 exclude 条目，构建图片对象并编码载荷
//! 3. **并发扇出**：1 个文案调用 + N 个独立编辑调用同时发起，全部完成才继续
//! 4. **结果合并**：文案失败中止整个可见结果；单张编辑失败只降级该图片
//! 5. **结果落盘**：委托 ResultWriter 写出文案和最终图片集合
//! 6. **统计输出**：记录编辑成功/保留/失败数量

use anyhow::{Context, Result};
use futures::future::join_all;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, BusinessError};
use crate::infrastructure::ImageStore;
use crate::models::ad::{AdAudience, AdLength, AdSettings, AdTone};
use crate::models::listing::{GenerationResult, ImageStatus, Listing, PropertyImage};
use crate::services::{AdCopyService, ResultWriter};
use crate::utils::logging;
use crate::workflow::{ImageCtx, ImageFlow};

/// 图片处理统计
#[derive(Debug, Default)]
pub struct ImageStats {
    /// 编辑成功
    pub edited: usize,
    /// 保留原图（Keep）
    pub kept: usize,
    /// 编辑失败降级
    pub failed: usize,
}

/// 处理单个房源
///
/// # 参数
/// - `store`: 图片存取器
/// - `listing`: 房源数据
/// - `listing_index`: 房源索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 返回是否实际生成了结果（空图片集合视为无操作，返回 false）
pub async fn process_listing(
    store: &ImageStore,
    listing: Listing,
    listing_index: usize,
    config: &Config,
) -> Result<bool> {
    log_listing_start(listing_index, &listing.name, listing.images.len());

    // 解析广告参数（提前计算，避免在远程调用之后才失败）
    let settings = parse_settings(&listing)?;

    // 参与本次生成的图片条目（exclude 条目既不进文案调用也不进编辑批次）
    let entries = listing.active_entries();
    if entries.is_empty() {
        warn!(
            "[房源 {}] ⚠️ 没有可处理的图片，跳过生成",
            listing_index
        );
        return Ok(false);
    }

    // 构建图片对象并编码载荷
    // 源文件读不到属于配置错误，在任何远程调用之前中止本房源
    let mut images = Vec::with_capacity(entries.len());
    for entry in &entries {
        let mut image = PropertyImage::from_entry(entry)
            .with_context(|| format!("图片条目无效: {}", entry.path))?;
        let payload = store
            .load_payload(&image.source_path)
            .await
            .with_context(|| format!("无法编码图片: {}", image.source_path))?;
        image.preview = Some(payload);
        images.push(image);
    }

    // 创建流程对象（只创建一次，复用）
    let ad_copy = AdCopyService::new(config);
    let image_flow = ImageFlow::new(config);
    let writer = ResultWriter::new(config.output_folder.clone());

    let edit_count = images.iter().filter(|img| img.needs_edit()).count();
    info!(
        "[房源 {}] 🚀 并发发起 1 个文案调用 + {} 个编辑调用",
        listing_index, edit_count
    );

    // ========== 并发扇出：文案 + 编辑批次 ==========
    // 所有调用同时在途，全部结束后才合并
    let ad_future = ad_copy.generate_ad_text(&images, &settings);

    let edit_futures = images.iter().enumerate().map(|(idx, image)| {
        let ctx = ImageCtx::new(listing.name.clone(), listing_index, idx + 1);
        let flow = &image_flow;
        async move { flow.run(store, image, &ctx).await }
    });

    let (ad_result, final_images) = tokio::join!(ad_future, join_all(edit_futures));

    // ========== 合并：文案失败中止整个可见结果 ==========
    // 编辑结果全部丢弃，可见状态回到生成之前（不落盘任何东西）
    let ad_text = match ad_result {
        Ok(text) => text,
        Err(e) => {
            error!(
                "[房源 {}] ❌ 文案生成失败，整个结果中止: {}",
                listing_index, e
            );
            return Err(e);
        }
    };

    if config.verbose_logging {
        info!(
            "[房源 {}] 文案预览: {}",
            listing_index,
            logging::truncate_text(&ad_text, 80)
        );
    }

    let stats = collect_stats(&final_images);
    let total = final_images.len();

    let result = GenerationResult {
        ad_text,
        images: final_images,
    };

    // 落盘
    let dir = writer
        .write(store, &listing.name, &result)
        .await
        .with_context(|| format!("无法写出房源结果: {}", listing.name))?;

    info!("[房源 {}] ✓ 结果已写入: {}", listing_index, dir.display());

    log_listing_complete(listing_index, &stats, total);

    Ok(true)
}

/// 解析广告参数
fn parse_settings(listing: &Listing) -> Result<AdSettings> {
    let audience = AdAudience::find(&listing.audience).ok_or_else(|| {
        AppError::Business(BusinessError::AudienceParseFailed {
            value: listing.audience.clone(),
        })
    })?;
    let length = AdLength::find(&listing.length).ok_or_else(|| {
        AppError::Business(BusinessError::LengthParseFailed {
            value: listing.length.clone(),
        })
    })?;
    let tone = AdTone::find(&listing.tone).ok_or_else(|| {
        AppError::Business(BusinessError::ToneParseFailed {
            value: listing.tone.clone(),
        })
    })?;

    Ok(AdSettings {
        audience,
        length,
        tone,
    })
}

/// 汇总图片编辑统计
fn collect_stats(images: &[PropertyImage]) -> ImageStats {
    let mut stats = ImageStats::default();
    for image in images {
        if !image.needs_edit() {
            stats.kept += 1;
        } else if image.status == ImageStatus::Completed && image.processed.is_some() {
            stats.edited += 1;
        } else {
            stats.failed += 1;
        }
    }
    stats
}

// ========== 日志辅助函数 ==========

fn log_listing_start(listing_index: usize, name: &str, image_count: usize) {
    info!("[房源 {}] 开始处理", listing_index);
    info!("[房源 {}] 名称: {}", listing_index, name);
    info!("[房源 {}] 图片总数: {}", listing_index, image_count);
}

fn log_listing_complete(listing_index: usize, stats: &ImageStats, total: usize) {
    info!(
        "[房源 {}] 图片统计: 编辑成功 {}, 保留原图 {}, 编辑失败 {}, 总计 {}",
        listing_index, stats.edited, stats.kept, stats.failed, total
    );
    info!("\n[房源 {}] ✅ 房源处理完成\n", listing_index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::{EditedImage, ImageEntry};
    use crate::models::treatment::Treatment;

    fn listing_with(audience: &str, length: &str, tone: &str) -> Listing {
        Listing {
            name: "Piso Prueba".to_string(),
            audience: audience.to_string(),
            length: length.to_string(),
            tone: tone.to_string(),
            images: vec![],
            file_path: None,
        }
    }

    fn image(treatment: Treatment, status: ImageStatus, processed: bool) -> PropertyImage {
        let mut img = PropertyImage::from_entry(&ImageEntry {
            path: "fotos/salon.jpg".to_string(),
            treatment: "keep".to_string(),
            exclude: false,
        })
        .unwrap();
        img.treatment = treatment;
        img.status = status;
        if processed {
            img.processed = Some(EditedImage {
                mime_type: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            });
        }
        img
    }

    #[test]
    fn test_parse_settings() {
        let settings =
            parse_settings(&listing_with("inversores", "largo", "urgente")).unwrap();
        assert_eq!(settings.audience, AdAudience::Investors);
        assert_eq!(settings.length, AdLength::Long);
        assert_eq!(settings.tone, AdTone::Urgent);
    }

    #[test]
    fn test_parse_settings_rejects_unknown_values() {
        assert!(parse_settings(&listing_with("empresas", "medio", "profesional")).is_err());
        assert!(parse_settings(&listing_with("familias", "gigante", "profesional")).is_err());
        assert!(parse_settings(&listing_with("familias", "medio", "agresivo")).is_err());
    }

    #[test]
    fn test_collect_stats_partial_degrade() {
        // N 张编辑中恰好 1 张失败：其余保持编辑结果，失败的降级
        let images = vec![
            image(Treatment::Stage, ImageStatus::Completed, true),
            image(Treatment::Empty, ImageStatus::Completed, true),
            image(Treatment::Stage, ImageStatus::Error, false),
            image(Treatment::Keep, ImageStatus::Pending, false),
        ];

        let stats = collect_stats(&images);
        assert_eq!(stats.edited, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.kept, 1);
    }

    #[tokio::test]
    async fn test_empty_image_set_is_noop() {
        // 空集合（全部被排除）不发起任何远程调用，返回 false
        let mut listing = listing_with("familias", "medio", "profesional");
        listing.images = vec![ImageEntry {
            path: "fotos/salon.jpg".to_string(),
            treatment: "stage".to_string(),
            exclude: true,
        }];

        let config = Config::default();
        let result = process_listing(&ImageStore::new(), listing, 1, &config)
            .await
            .unwrap();
        assert!(!result);
    }
}
