//! # 派生值
//!
//! 签名中不直接来自表单、而是由字段推导出的三个值：
//! 首字母头像文本、`tel:` 链接目标、去掉协议前缀的网址展示文本。

use once_cell::sync::Lazy;
use regex::Regex;

/// 空白序列，用于压缩电话号码。
///
/// 与浏览器 `\s` 的字符集一致：Unicode White_Space 去掉 U+0085，再加上 U+FEFF。
/// 不能直接用 `\s`，它会匹配 U+0085。
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\t\n\x{0B}\x{0C}\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+",
    )
    .expect("whitespace pattern is valid")
});

/// 行首的 `http://` / `https://`，大小写不敏感。
static HTTP_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("scheme pattern is valid"));

/// 名与姓首字符拼接后转大写；空字段不贡献任何字符。
///
/// # 示例
/// ```rust
/// use signature_studio::signature::initials;
///
/// assert_eq!(initials("Ada", "Lovelace"), "AL");
/// assert_eq!(initials("", "Lovelace"), "L");
/// ```
pub fn initials(name: &str, surname: &str) -> String {
    name.chars()
        .take(1)
        .chain(surname.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

/// 去掉所有空白后的电话号码，仅用于 `tel:` 目标。
pub fn phone_href(phone: &str) -> String {
    WHITESPACE_RUN.replace_all(phone, "").into_owned()
}

/// 链接的展示文本：去掉 http(s) 协议前缀和末尾单个 `/`。
///
/// 链接的 `href` 始终保留原始地址。
pub fn display_url(url: &str) -> String {
    let without_scheme = HTTP_SCHEME.replace(url, "");
    match without_scheme.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => without_scheme.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn initials_skip_empty_parts() {
        assert_eq!(initials("Ada", "Lovelace"), "AL");
        assert_eq!(initials("", "Lovelace"), "L");
        assert_eq!(initials("ada", ""), "A");
        assert_eq!(initials("", ""), "");
    }

    #[test]
    fn initials_handle_non_ascii_letters() {
        assert_eq!(initials("Gülenber", "Enginöz"), "GE");
        assert_eq!(initials("öykü", "şahin"), "ÖŞ");
        assert_eq!(initials("ßen", "x"), "SSX");
    }

    #[test]
    fn phone_href_removes_every_whitespace_run() {
        assert_eq!(phone_href("+90 531 855 63 71"), "+905318556371");
        assert_eq!(phone_href(" +44\t20\u{a0}7946\n0958 "), "+442079460958");
        assert_eq!(phone_href("+1\u{feff}555"), "+1555");
        assert_eq!(phone_href("(0212) 555-00-00"), "(0212)555-00-00");
    }

    #[test]
    fn phone_href_keeps_next_line_character() {
        assert_eq!(phone_href("+1\u{85}555"), "+1\u{85}555");
        assert_eq!(phone_href("+1\u{2028}555\u{3000}0"), "+15550");
    }

    #[test]
    fn display_url_strips_http_schemes_and_one_trailing_slash() {
        assert_eq!(display_url("https://cremicro.com/"), "cremicro.com");
        assert_eq!(display_url("http://example.com"), "example.com");
        assert_eq!(display_url("HTTPS://Example.com/path/"), "Example.com/path");
        assert_eq!(display_url("https://example.com//"), "example.com/");
        assert_eq!(display_url("ftp://x.com"), "ftp://x.com");
        assert_eq!(display_url("www.example.com"), "www.example.com");
        assert_eq!(display_url(""), "");
    }

    proptest! {
        #[test]
        fn phone_href_never_contains_whitespace(phone in "\\PC*") {
            let href = phone_href(&phone);
            prop_assert!(!href.chars().any(|c| c.is_whitespace() && c != '\u{85}'), "href contains whitespace: {:?}", href);
            prop_assert!(!href.contains('\u{feff}'), "href contains BOM: {:?}", href);
        }

        #[test]
        fn phone_href_keeps_non_whitespace_in_order(phone in "[0-9+() -]{0,24}") {
            let expected: String = phone.chars().filter(|c| *c != ' ').collect();
            prop_assert_eq!(phone_href(&phone), expected);
        }

        #[test]
        fn initials_are_uppercase_first_chars(name in "[a-z]{0,8}", surname in "[a-z]{0,8}") {
            let expected: String = name.chars().take(1)
                .chain(surname.chars().take(1))
                .map(|c| c.to_ascii_uppercase())
                .collect();
            prop_assert_eq!(initials(&name, &surname), expected);
        }

        #[test]
        fn display_url_drops_scheme_of_http_links(host in "[a-z]{1,12}\\.[a-z]{2,3}", secure in any::<bool>()) {
            let scheme = if secure { "https://" } else { "http://" };
            prop_assert_eq!(display_url(&format!("{scheme}{host}/")), host.clone());
            prop_assert_eq!(display_url(&format!("{scheme}{host}")), host);
        }
    }
}
