//! # InmoGenius
//!
//! 一个用于批量生成房源广告（文案 + AI 编辑图片）的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有文件与编码能力，只暴露能力
//! - `ImageStore` - 图片载荷编码 / 解码 / 落盘
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个对象
//! - `AdCopyService` - 根据照片生成广告文案能力
//! - `ImageEditService` - 单张图片远程编辑能力（失败只返回缺席）
//! - `ResultWriter` - 结果落盘能力
//! - `WarnWriter` - 写 avisos.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一张图片"的完整处理流程
//! - `ImageCtx` - 上下文封装（房源 + 图片索引）
//! - `ImageFlow` - 流程编排（keep 捷径 → 编辑 → 降级兜底）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量房源处理器，管理并发
//! - `orchestrator/listing_processor` - 单个房源处理器，
//!   并发扇出 1 个文案调用 + N 个编辑调用并合并结果
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::ImageStore;
pub use models::{
    AdAudience, AdLength, AdSettings, AdTone, GenerationResult, ImageStatus, Listing,
    PropertyImage, Treatment,
};
pub use orchestrator::{process_listing, App};
pub use workflow::{ImageCtx, ImageFlow};
