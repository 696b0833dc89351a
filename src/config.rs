/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的房源数量
    pub max_concurrent_listings: usize,
    /// 房源 TOML 文件存放目录
    pub listings_folder: String,
    /// 生成结果输出目录
    pub output_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- LLM 文案配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub text_model_name: String,
    // --- 图片编辑 API 配置 ---
    pub image_api_base_url: String,
    pub image_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_listings: 4,
            listings_folder: "listados".to_string(),
            output_folder: "resultados".to_string(),
            verbose_logging: false,
            output_log_file: "registro.txt".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            text_model_name: "gemini-2.5-flash".to_string(),
            image_api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            image_model_name: "gemini-2.5-flash-image".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_listings: std::env::var("MAX_CONCURRENT_LISTINGS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_listings),
            listings_folder: std::env::var("LISTINGS_FOLDER").unwrap_or(default.listings_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            text_model_name: std::env::var("TEXT_MODEL_NAME").unwrap_or(default.text_model_name),
            image_api_base_url: std::env::var("IMAGE_API_BASE_URL").unwrap_or(default.image_api_base_url),
            image_model_name: std::env::var("IMAGE_MODEL_NAME").unwrap_or(default.image_model_name),
        }
    }
}
