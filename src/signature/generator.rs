//! # 签名 HTML 生成
//!
//! ## 设计思路
//!
//! 邮件客户端普遍会丢弃 `<style>`、`<link>` 以及 flex / grid 布局，
//! 只有 `<table>` 结构与 `style="..."` 属性能稳定保留。因此输出固定为
//! 一个内联样式表格：头像、姓名职位、带左边框的联系方式三列，
//! 外加一行通栏页脚放 Logo。
//!
//! ## 实现思路
//!
//! - 纯函数：同一记录多次生成结果逐字节一致，不依赖任何外部状态。
//! - 电话、邮箱、网址、地址、Logo 仅在字段非空时输出，空字段不留图标和标签。
//! - 姓名、姓氏、职位属于布局骨架，即使为空也照常输出。
//! - 字段值按原样插入 HTML，不做转义（见 DESIGN.md 中的说明）。

use super::derive::{display_url, initials, phone_href};
use super::SignatureRecord;

const ICON_PHONE: &str = "\u{1f4de}";
const ICON_EMAIL: &str = "\u{2709}\u{fe0f}";
const ICON_WEB: &str = "\u{1f310}";
const ICON_ADDRESS: &str = "\u{1f4cd}";

const AVATAR_PLACEHOLDER_STYLE: &str = "width: 90px; height: 90px; border-radius: 50%; background: linear-gradient(135deg, #0B5A7D 0%, #6B4FBB 50%, #4F46E5 100%); display: flex; align-items: center; justify-content: center; color: white; font-size: 28px; font-weight: bold;";
const AVATAR_IMAGE_STYLE: &str =
    "width: 90px; height: 90px; border-radius: 50%; object-fit: cover; display: block;";
const CONTACT_LINK_STYLE: &str = "color: #333; text-decoration: none;";
const WEBSITE_LINK_STYLE: &str = "color: #0B5A7D; text-decoration: none;";
const ADDRESS_STYLE: &str = "color: #666; font-size: 12px;";
const LOGO_ALT: &str = "CREMICRO";

/// 根据记录生成可直接粘贴到邮件客户端的签名片段。
///
/// # 示例
/// ```rust
/// use signature_studio::signature::{generate, SignatureRecord};
///
/// let html = generate(&SignatureRecord::seed());
/// assert!(html.starts_with("<table"));
/// assert!(html.contains("tel:+905318556371"));
/// ```
pub fn generate(record: &SignatureRecord) -> String {
    let name = record.name.as_str();
    let surname = record.surname.as_str();

    let photo = photo_cell(record, name, surname);

    let phone = optional(&record.phone, |phone| {
        contact_row(
            ICON_PHONE,
            &format!(
                r#"<a href="tel:{}" style="{CONTACT_LINK_STYLE}">{phone}</a>"#,
                phone_href(phone)
            ),
        )
    });
    let email = optional(&record.email, |email| {
        contact_row(
            ICON_EMAIL,
            &format!(r#"<a href="mailto:{email}" style="{CONTACT_LINK_STYLE}">{email}</a>"#),
        )
    });
    let website1 = optional(&record.website1, website_row);
    let website2 = optional(&record.website2, website_row);
    let address1 = optional(&record.address1, address_row);
    let address2 = optional(&record.address2, address_row);
    let logo = optional(&record.logo_url, |logo| {
        format!(r#"<img src="{logo}" alt="{LOGO_ALT}" style="height: 40px; display: block;">"#)
    });
    let title = record.title.as_str();

    format!(
        r#"<table cellpadding="0" cellspacing="0" border="0" style="font-family: Arial, sans-serif; font-size: 14px; line-height: 1.4; color: #333;">
  <tr>
    <td style="padding-right: 18px; vertical-align: top;">
      {photo}
    </td>

    <td style="vertical-align: top; padding-right: 22px;">
      <div style="margin-bottom: 6px;">
        <span style="font-size: 18px; font-weight: 600; color: #0B5A7D;">{name} {surname}</span>
      </div>
      <div style="font-size: 13px; color: #666;">{title}</div>
    </td>

    <td style="vertical-align: top; padding-left: 22px; border-left: 2px solid #0B5A7D;">
      {phone}

      {email}

      {website1}

      {website2}

      {address1}

      {address2}
    </td>
  </tr>

  <tr>
    <td colspan="3" style="padding-top: 14px;">
      <div style="border-top: 1px solid #ddd; padding-top: 10px;">
        {logo}
      </div>
    </td>
  </tr>
</table>"#
    )
}

fn optional(value: &str, render: impl FnOnce(&str) -> String) -> String {
    if value.is_empty() {
        String::new()
    } else {
        render(value)
    }
}

/// 有照片时输出圆形裁剪的图片，否则输出渐变底色的首字母头像。
fn photo_cell(record: &SignatureRecord, name: &str, surname: &str) -> String {
    if record.photo_url.is_empty() {
        let initials = initials(name, surname);
        format!(
            "<div style=\"{AVATAR_PLACEHOLDER_STYLE}\">\n              {initials}\n            </div>"
        )
    } else {
        format!(
            r#"<img src="{}" alt="{name} {surname}" style="{AVATAR_IMAGE_STYLE}">"#,
            record.photo_url
        )
    }
}

fn contact_row(icon: &str, body: &str) -> String {
    format!(
        "<div style=\"margin-bottom: 4px;\">\n              <span style=\"color: #0B5A7D; margin-right: 8px;\">{icon}</span>\n              {body}\n            </div>"
    )
}

fn website_row(url: &str) -> String {
    contact_row(
        ICON_WEB,
        &format!(
            r#"<a href="{url}" style="{WEBSITE_LINK_STYLE}">{}</a>"#,
            display_url(url)
        ),
    )
}

fn address_row(address: &str) -> String {
    contact_row(
        ICON_ADDRESS,
        &format!(r#"<span style="{ADDRESS_STYLE}">{address}</span>"#),
    )
}
