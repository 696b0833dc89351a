//! 图片处理上下文
//!
//! 封装"我正在处理哪个房源的第几张图片"这一信息

use std::fmt::Display;

/// 图片处理上下文
///
/// 包含处理单张图片所需的所有上下文信息
#[derive(Debug, Clone)]
pub struct ImageCtx {
    /// 房源名称
    pub listing_name: String,

    /// 房源索引（仅用于日志显示）
    pub listing_index: usize,

    /// 图片在房源中的索引（从1开始）
    pub image_index: usize,
}

impl ImageCtx {
    /// 创建新的图片上下文
    pub fn new(listing_name: String, listing_index: usize, image_index: usize) -> Self {
        Self {
            listing_name,
            listing_index,
            image_index,
        }
    }
}

impl Display for ImageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[房源#{} 图片#{}]",
            self.listing_name, self.image_index
        )
    }
}
