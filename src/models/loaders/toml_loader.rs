use crate::models::listing::Listing;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载数据并转换为 Listing 对象
pub async fn load_toml_to_listing(toml_file_path: &Path) -> Result<Listing> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let listing: Listing = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    // 设置文件路径
    Ok(listing.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有 TOML 文件并转换为 Listing 对象列表
pub async fn load_all_toml_files(folder_path: &str) -> Result<Vec<Listing>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut listings = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            tracing::info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match load_toml_to_listing(&path).await {
                Ok(listing) => {
                    let image_count = listing.images.len();
                    tracing::info!("成功加载 {} 张图片", image_count);
                    listings.push(listing);
                }
                Err(e) => {
                    tracing::warn!("加载文件失败 {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::treatment::Treatment;

    const SAMPLE: &str = r#"
name = "Ático en Malasaña"
audience = "parejas"
length = "corto"
tone = "emocional"

[[images]]
path = "fotos/salon.jpg"
treatment = "stage"

[[images]]
path = "fotos/terraza.jpg"

[[images]]
path = "fotos/trastero.jpg"
treatment = "empty"
exclude = true
"#;

    #[test]
    fn test_parse_listing_toml() {
        let listing: Listing = toml::from_str(SAMPLE).unwrap();
        assert_eq!(listing.name, "Ático en Malasaña");
        assert_eq!(listing.audience, "parejas");
        assert_eq!(listing.images.len(), 3);

        // 未标注处理方式的条目默认为 keep
        assert_eq!(
            Treatment::find(&listing.images[1].treatment),
            Some(Treatment::Keep)
        );

        // exclude 条目在 active_entries 中被过滤
        assert_eq!(listing.active_entries().len(), 2);
    }

    #[test]
    fn test_parse_listing_defaults_settings() {
        let minimal = r#"
name = "Piso sin configurar"

[[images]]
path = "fotos/salon.jpg"
"#;
        let listing: Listing = toml::from_str(minimal).unwrap();
        assert_eq!(listing.audience, "familias");
        assert_eq!(listing.length, "medio");
        assert_eq!(listing.tone, "profesional");
    }

    #[tokio::test]
    async fn test_load_missing_folder_fails() {
        let result = load_all_toml_files("carpeta_inexistente_xyz").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_toml_file_roundtrip() {
        let dir = std::env::temp_dir().join("inmo_genius_loader_test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let file = dir.join("atico.toml");
        tokio::fs::write(&file, SAMPLE).await.unwrap();

        let listing = load_toml_to_listing(&file).await.unwrap();
        assert_eq!(listing.name, "Ático en Malasaña");
        assert!(listing.file_path.is_some());

        tokio::fs::remove_file(&file).await.unwrap();
    }
}
