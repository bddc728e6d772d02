//! # 签名数据记录
//!
//! ## 设计思路
//!
//! `SignatureRecord` 是一次渲染的不可变快照：所有字段都是 `String`，
//! 从不出现 `Option`。表单每次编辑都通过 [`SignatureRecord::with_field`]
//! 生成新记录，而不是原地修改共享状态。
//!
//! ## 实现思路
//!
//! - 从 JSON 读取时，缺失键与 `null` 统一变成空字符串，其他值按
//!   [`safe_text`] 规则转成文本；未知键直接忽略。
//! - `RecordField` 对应表单输入框的 `name` 属性（camelCase），
//!   同时接受 `photo_url` / `logo_url` 这类 snake_case 写法，方便命令行输入。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::AppError;

/// 将任意 JSON 值转成文本。
///
/// `null` → `""`，字符串原样返回，布尔与数字取字面形式，
/// 数组按元素转换后以 `,` 连接，对象统一为 `[object Object]`。
pub fn safe_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items.iter().map(safe_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// 数字按浏览器 `String(n)` 的习惯输出：整数值的浮点数不带小数部分，`-0` 记为 `0`。
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

fn coerce_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(safe_text(&value))
}

/// 一次签名渲染所需的全部联系信息。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignatureRecord {
    #[serde(deserialize_with = "coerce_text")]
    pub name: String,
    #[serde(deserialize_with = "coerce_text")]
    pub surname: String,
    #[serde(deserialize_with = "coerce_text")]
    pub title: String,
    #[serde(deserialize_with = "coerce_text")]
    pub phone: String,
    #[serde(deserialize_with = "coerce_text")]
    pub email: String,
    #[serde(deserialize_with = "coerce_text")]
    pub website1: String,
    #[serde(deserialize_with = "coerce_text")]
    pub website2: String,
    #[serde(deserialize_with = "coerce_text")]
    pub address1: String,
    #[serde(deserialize_with = "coerce_text")]
    pub address2: String,
    /// Data URL 或外部图片地址；为空时渲染首字母头像。
    #[serde(deserialize_with = "coerce_text")]
    pub photo_url: String,
    /// 为空时不渲染 Logo。
    #[serde(deserialize_with = "coerce_text")]
    pub logo_url: String,
}

impl SignatureRecord {
    /// 表单首次加载时的示例联系人。
    pub fn seed() -> Self {
        Self {
            name: "Gülenber".to_string(),
            surname: "Enginöz".to_string(),
            title: "AIO Specialist".to_string(),
            phone: "+905318556371".to_string(),
            email: "gulenberhan@cremicro.com".to_string(),
            website1: "https://cremicro.com".to_string(),
            website2: String::new(),
            address1: "Kustepe Mah Mesut Cemil Sok No:20 Sisli Istanbul".to_string(),
            address2: String::new(),
            photo_url: String::new(),
            logo_url: String::new(),
        }
    }

    /// 从 JSON 文本解析记录。
    ///
    /// # 示例
    /// ```rust
    /// use signature_studio::signature::SignatureRecord;
    ///
    /// let record = SignatureRecord::from_json_str(r#"{"name": "Ada", "phone": null}"#)?;
    /// assert_eq!(record.name, "Ada");
    /// assert_eq!(record.phone, "");
    /// # Ok::<(), signature_studio::error::AppError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Record(format!("解析签名记录失败: {}", e)))
    }

    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Name => &self.name,
            RecordField::Surname => &self.surname,
            RecordField::Title => &self.title,
            RecordField::Phone => &self.phone,
            RecordField::Email => &self.email,
            RecordField::Website1 => &self.website1,
            RecordField::Website2 => &self.website2,
            RecordField::Address1 => &self.address1,
            RecordField::Address2 => &self.address2,
            RecordField::PhotoUrl => &self.photo_url,
            RecordField::LogoUrl => &self.logo_url,
        }
    }

    /// 返回替换了单个字段的新记录，原记录保持不变。
    pub fn with_field(&self, field: RecordField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            RecordField::Name => next.name = value,
            RecordField::Surname => next.surname = value,
            RecordField::Title => next.title = value,
            RecordField::Phone => next.phone = value,
            RecordField::Email => next.email = value,
            RecordField::Website1 => next.website1 = value,
            RecordField::Website2 => next.website2 = value,
            RecordField::Address1 => next.address1 = value,
            RecordField::Address2 => next.address2 = value,
            RecordField::PhotoUrl => next.photo_url = value,
            RecordField::LogoUrl => next.logo_url = value,
        }
        next
    }
}

/// 表单中可编辑的字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Name,
    Surname,
    Title,
    Phone,
    Email,
    Website1,
    Website2,
    Address1,
    Address2,
    PhotoUrl,
    LogoUrl,
}

impl RecordField {
    pub const ALL: [RecordField; 11] = [
        Self::Name,
        Self::Surname,
        Self::Title,
        Self::Phone,
        Self::Email,
        Self::Website1,
        Self::Website2,
        Self::Address1,
        Self::Address2,
        Self::PhotoUrl,
        Self::LogoUrl,
    ];

    /// 与表单输入框 `name` 属性一致的字段名。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Title => "title",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Website1 => "website1",
            Self::Website2 => "website2",
            Self::Address1 => "address1",
            Self::Address2 => "address2",
            Self::PhotoUrl => "photoUrl",
            Self::LogoUrl => "logoUrl",
        }
    }
}

impl FromStr for RecordField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "photo_url" => return Ok(Self::PhotoUrl),
            "logo_url" => return Ok(Self::LogoUrl),
            _ => {}
        }

        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s.trim())
            .ok_or_else(|| {
                AppError::Record(format!(
                    "未知字段：{}（可选：{}）",
                    s,
                    Self::ALL.map(Self::as_str).join(" / ")
                ))
            })
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
