/// 图片处理方式枚举
///
/// 每张图片可以选择保留原图、虚拟布置家具或清空房间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Treatment {
    /// 保留原图
    Keep,
    /// 虚拟布置（添加现代家具）
    Stage,
    /// 清空房间（移除所有家具杂物）
    Empty,
}

impl Treatment {
    /// 获取展示名称（西班牙语，与广告面向的市场一致）
    pub fn name(self) -> &'static str {
        match self {
            Treatment::Keep => "Mantener original",
            Treatment::Stage => "Amueblar (staging virtual)",
            Treatment::Empty => "Vaciar estancia",
        }
    }

    /// 尝试从字符串解析处理方式（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "keep" | "mantener" | "original" => Some(Treatment::Keep),
            "stage" | "amueblar" | "staging" => Some(Treatment::Stage),
            "empty" | "vaciar" => Some(Treatment::Empty),
            _ => None,
        }
    }

    /// 智能查找处理方式（支持大小写和空白）
    pub fn find(s: &str) -> Option<Self> {
        Self::from_str(s.trim().to_lowercase().as_str())
    }

    /// 获取远程编辑调用使用的自然语言指令
    ///
    /// Keep 不产生编辑调用，返回 None
    pub fn edit_prompt(self) -> Option<&'static str> {
        match self {
            Treatment::Keep => None,
            Treatment::Stage => Some(
                "Transform this room into a clean, modern living space. \
                 Add stylish, modern Ikea-style furniture appropriate for the room type \
                 (bedroom, living room, etc.). Keep the architectural structure \
                 (walls, windows, floors, ceiling) exactly as they are. \
                 Ensure the lighting is natural and inviting. \
                 Photorealistic real estate photography.",
            ),
            Treatment::Empty => Some(
                "Remove all furniture, decor, clutter, and objects from this room. \
                 Show the empty space with just the bare floor, walls, and windows. \
                 Keep the architectural structure, flooring material, and lighting \
                 exactly as they are. Photorealistic empty room real estate photography.",
            ),
        }
    }
}

impl Default for Treatment {
    fn default() -> Self {
        Treatment::Keep
    }
}

impl std::fmt::Display for Treatment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Treatment::from_str("keep"), Some(Treatment::Keep));
        assert_eq!(Treatment::from_str("stage"), Some(Treatment::Stage));
        assert_eq!(Treatment::from_str("amueblar"), Some(Treatment::Stage));
        assert_eq!(Treatment::from_str("empty"), Some(Treatment::Empty));
        assert_eq!(Treatment::from_str("其他"), None);
    }

    #[test]
    fn test_find_normalizes_input() {
        assert_eq!(Treatment::find("  Stage "), Some(Treatment::Stage));
        assert_eq!(Treatment::find("VACIAR"), Some(Treatment::Empty));
    }

    #[test]
    fn test_keep_has_no_edit_prompt() {
        assert!(Treatment::Keep.edit_prompt().is_none());
        assert!(Treatment::Stage.edit_prompt().is_some());
        assert!(Treatment::Empty.edit_prompt().is_some());
    }

    #[test]
    fn test_default_is_keep() {
        assert_eq!(Treatment::default(), Treatment::Keep);
    }
}
