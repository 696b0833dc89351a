//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量房源处理器
//! - 管理应用生命周期（初始化、运行、清理）
//! - 批量加载房源（Vec<Listing>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `listing_processor` - 单个房源处理器
//! - 准备单个房源的图片集合（过滤排除、编码载荷）
//! - 并发扇出文案调用与编辑批次
//! - 合并结果（文案失败中止，单张编辑失败降级）
//! - 写出结果目录
//! - 输出单个房源的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Listing>)
//!     ↓
//! listing_processor (处理单个 Listing 的一次生成动作)
//!     ↓
//! workflow::ImageFlow (处理单张 PropertyImage)
//!     ↓
//! services (能力层：ad_copy / image_edit / result / warn)
//!     ↓
//! infrastructure (基础设施：ImageStore)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，listing_processor 管单个
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod batch_processor;
pub mod listing_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use listing_processor::{process_listing, ImageStats};
