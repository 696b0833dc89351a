//! 广告参数模型
//!
//! 目标受众 / 篇幅 / 语气三个固定取值集合，展示名称为西班牙语（与原市场一致）

/// 目标受众枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AdAudience {
    /// 家庭买家
    Families,
    /// 年轻伴侣
    Couples,
    /// 投资者
    Investors,
    /// 学生
    Students,
    /// 高端买家
    Luxury,
}

impl AdAudience {
    /// 获取展示名称
    pub fn name(self) -> &'static str {
        match self {
            AdAudience::Families => "Familias",
            AdAudience::Couples => "Parejas jóvenes",
            AdAudience::Investors => "Inversores",
            AdAudience::Students => "Estudiantes",
            AdAudience::Luxury => "Compradores de lujo",
        }
    }

    /// 尝试从字符串解析受众（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "familias" | "families" => Some(AdAudience::Families),
            "parejas" | "couples" => Some(AdAudience::Couples),
            "inversores" | "investors" => Some(AdAudience::Investors),
            "estudiantes" | "students" => Some(AdAudience::Students),
            "lujo" | "luxury" => Some(AdAudience::Luxury),
            _ => None,
        }
    }

    /// 智能查找受众（支持大小写和空白）
    pub fn find(s: &str) -> Option<Self> {
        Self::from_str(s.trim().to_lowercase().as_str())
    }
}

impl Default for AdAudience {
    fn default() -> Self {
        AdAudience::Families
    }
}

impl std::fmt::Display for AdAudience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 广告篇幅枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AdLength {
    /// 短文案（社交平台）
    Short,
    /// 中等篇幅（房产门户）
    Medium,
    /// 长文案（自有网站/博客）
    Long,
}

impl AdLength {
    /// 获取展示名称
    pub fn name(self) -> &'static str {
        match self {
            AdLength::Short => "Corto y directo (Twitter/Instagram)",
            AdLength::Medium => "Medio (Idealista/Fotocasa)",
            AdLength::Long => "Largo y detallado (Web propia/Blog)",
        }
    }

    /// 尝试从字符串解析篇幅（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "corto" | "short" => Some(AdLength::Short),
            "medio" | "medium" => Some(AdLength::Medium),
            "largo" | "long" => Some(AdLength::Long),
            _ => None,
        }
    }

    /// 智能查找篇幅（支持大小写和空白）
    pub fn find(s: &str) -> Option<Self> {
        Self::from_str(s.trim().to_lowercase().as_str())
    }
}

impl Default for AdLength {
    fn default() -> Self {
        AdLength::Medium
    }
}

impl std::fmt::Display for AdLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 广告语气枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AdTone {
    /// 专业严肃
    Professional,
    /// 感性亲切
    Emotional,
    /// 紧迫机会
    Urgent,
    /// 极简优雅
    Minimalist,
}

impl AdTone {
    /// 获取展示名称
    pub fn name(self) -> &'static str {
        match self {
            AdTone::Professional => "Profesional y serio",
            AdTone::Emotional => "Emocional y cercano",
            AdTone::Urgent => "Oportunidad urgente",
            AdTone::Minimalist => "Minimalista y elegante",
        }
    }

    /// 尝试从字符串解析语气（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "profesional" | "professional" => Some(AdTone::Professional),
            "emocional" | "emotional" => Some(AdTone::Emotional),
            "urgente" | "urgent" => Some(AdTone::Urgent),
            "minimalista" | "minimalist" => Some(AdTone::Minimalist),
            _ => None,
        }
    }

    /// 智能查找语气（支持大小写和空白）
    pub fn find(s: &str) -> Option<Self> {
        Self::from_str(s.trim().to_lowercase().as_str())
    }
}

impl Default for AdTone {
    fn default() -> Self {
        AdTone::Professional
    }
}

impl std::fmt::Display for AdTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 广告参数配置
///
/// 三个枚举字段组成一次生成动作的文案配置，不跨会话持久化
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdSettings {
    pub audience: AdAudience,
    pub length: AdLength,
    pub tone: AdTone,
}
