use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 内容条目的种类
///
/// 这是一个封闭集合，路由中的 `model_name` 只接受这四个名字。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "content.ts")]
pub enum ItemKind {
    Text,
    File,
    Image,
    Video,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Text,
        ItemKind::Video,
        ItemKind::Image,
        ItemKind::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::File => "file",
            ItemKind::Image => "image",
            ItemKind::Video => "video",
        }
    }
}

impl<'de> Deserialize<'de> for ItemKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ItemKind::Text),
            "file" => Ok(ItemKind::File),
            "image" => Ok(ItemKind::Image),
            "video" => Ok(ItemKind::Video),
            _ => Err(format!(
                "Invalid content type: '{s}'. Supported: text, video, image, file"
            )),
        }
    }
}

// 四类条目共享的字段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct ItemBase {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct TextItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub base: ItemBase,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct FileItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub base: ItemBase,
    // 上传文件 token
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct ImageItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub base: ItemBase,
    // 上传图片 token
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct VideoItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub base: ItemBase,
    pub url: String,
}

/// 任意一种具体条目，序列化时带 `model_name` 标签
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "model_name", rename_all = "snake_case")]
#[ts(export, export_to = "content.ts")]
pub enum Item {
    Text(TextItem),
    File(FileItem),
    Image(ImageItem),
    Video(VideoItem),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Text(_) => ItemKind::Text,
            Item::File(_) => ItemKind::File,
            Item::Image(_) => ItemKind::Image,
            Item::Video(_) => ItemKind::Video,
        }
    }

    pub fn base(&self) -> &ItemBase {
        match self {
            Item::Text(item) => &item.base,
            Item::File(item) => &item.base,
            Item::Image(item) => &item.base,
            Item::Video(item) => &item.base,
        }
    }

    pub fn id(&self) -> i64 {
        self.base().id
    }
}

// 模块中的内容行，content_type + object_id 指向一个具体条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct Content {
    pub id: i64,
    pub module_id: i64,
    pub content_type: ItemKind,
    pub object_id: i64,
    pub order: i32,
}

// 内容行及其解析出的条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct ContentDetail {
    pub id: i64,
    pub module_id: i64,
    pub order: i32,
    pub item: Item,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_four_kinds_parse() {
        for name in ["text", "video", "image", "file"] {
            assert_eq!(name.parse::<ItemKind>().unwrap().as_str(), name);
        }
        for name in ["course", "module", "Text", "", "audio"] {
            assert!(name.parse::<ItemKind>().is_err());
        }
    }

    #[test]
    fn test_item_serializes_model_name() {
        let now = chrono::Utc::now();
        let item = Item::Video(VideoItem {
            base: ItemBase {
                id: 3,
                owner_id: 1,
                title: "Intro".to_string(),
                created_at: now,
                updated_at: now,
            },
            url: "https://example.com/v.mp4".to_string(),
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["model_name"], "video");
        assert_eq!(json["id"], 3);
        assert_eq!(json["url"], "https://example.com/v.mp4");
        assert_eq!(item.kind(), ItemKind::Video);
    }
}
