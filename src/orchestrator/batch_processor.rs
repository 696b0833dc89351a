//! 批量房源处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量房源的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、校验配置、准备输出目录
//! 2. **批量加载**：扫描并加载所有待处理的房源（`Vec<Listing>`）
//! 3. **并发控制**：使用 Semaphore 限制同时处理的房源数量
//! 4. **分批处理**：将房源分批次处理，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有房源的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个房源的细节
//! - **并发安全**：通过 Semaphore 和 tokio::spawn 实现并发
//! - **向下委托**：委托 listing_processor 处理单个房源
//!
//! 注意：批内单个房源的图片扇出不受这里的并发控制影响，
//! 一个房源的全部远程调用始终同时发起、全部等待。

use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::models::loaders;
use crate::models::Listing;
use crate::orchestrator::listing_processor;
use crate::utils::logging;
use anyhow::Result;
use std::fs;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(config.max_concurrent_listings);

        // API 密钥在任何远程调用之前校验
        if config.llm_api_key.is_empty() {
            return Err(AppError::Config(ConfigError::MissingApiKey).into());
        }

        // 准备输出目录
        fs::create_dir_all(&config.output_folder)?;

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待处理的房源
        let all_listings = self.load_listings().await?;

        if all_listings.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(());
        }

        let total_listings = all_listings.len();
        logging::log_listings_loaded(total_listings, self.config.max_concurrent_listings);

        // 处理所有房源
        let stats = self.process_all_listings(all_listings).await?;

        // 输出最终统计
        logging::print_final_stats(
            stats.success,
            stats.skipped,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 加载房源
    async fn load_listings(&self) -> Result<Vec<Listing>> {
        info!("\n📁 正在扫描待处理的房源...");
        loaders::load_all_toml_files(&self.config.listings_folder).await
    }

    /// 处理所有房源
    async fn process_all_listings(&self, all_listings: Vec<Listing>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_listings));
        let total_listings = all_listings.len();
        let mut stats = ProcessingStats {
            total: total_listings,
            ..Default::default()
        };

        // 分批处理
        for batch_start in (0..total_listings).step_by(self.config.max_concurrent_listings) {
            let batch_end =
                (batch_start + self.config.max_concurrent_listings).min(total_listings);
            let batch_listings = &all_listings[batch_start..batch_end];
            let batch_num = (batch_start / self.config.max_concurrent_listings) + 1;
            let total_batches = (total_listings + self.config.max_concurrent_listings - 1)
                / self.config.max_concurrent_listings;

            logging::log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_end,
                total_listings,
            );

            // 处理本批
            let batch_result = self
                .process_batch(batch_listings, batch_start, semaphore.clone())
                .await?;

            stats.success += batch_result.success;
            stats.skipped += batch_result.skipped;
            stats.failed += batch_result.failed;

            logging::log_batch_complete(batch_num, batch_result.success, batch_result.total());
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_listings: &[Listing],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut batch_handles = Vec::new();

        // 为本批创建并发任务
        for (idx, listing) in batch_listings.iter().enumerate() {
            let listing_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let listing_clone = listing.clone();
            let config_clone = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let store = crate::infrastructure::ImageStore::new();
                match listing_processor::process_listing(
                    &store,
                    listing_clone,
                    listing_index,
                    &config_clone,
                )
                .await
                {
                    Ok(true) => Ok(true),
                    Ok(false) => Ok(false),
                    Err(e) => {
                        error!("[房源 {}] ❌ 处理过程中发生错误: {}", listing_index, e);
                        Err(e)
                    }
                }
            });
            batch_handles.push((listing_index, handle));
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();

        for (listing_index, handle) in batch_handles {
            match handle.await {
                Ok(Ok(true)) => {
                    result.success += 1;
                }
                Ok(Ok(false)) => {
                    result.skipped += 1;
                }
                Ok(Err(_)) => {
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[房源 {}] 任务执行失败: {}", listing_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    skipped: usize,
    failed: usize,
}

impl BatchResult {
    fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}
