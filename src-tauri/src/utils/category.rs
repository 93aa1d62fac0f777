use crate::models::DeviceCategory;

#[derive(Clone, Copy)]
enum Token {
    /// 部分一致
    Contains(&'static str),
    /// 英数字以外で区切った単語として一致（"inter" が "intervention" に一致しないように）
    Word(&'static str),
}

impl Token {
    fn matches(&self, normalized: &str) -> bool {
        match self {
            Token::Contains(token) => normalized.contains(token),
            Token::Word(word) => normalized
                .split(|c: char| !c.is_alphanumeric())
                .any(|part| part == *word),
        }
    }
}

/// 順序付きルール表（先に一致したものを採用）
const CATEGORY_RULES: &[(Token, DeviceCategory)] = &[
    (Token::Contains("guiding"), DeviceCategory::Guiding),
    (Token::Contains("guide"), DeviceCategory::Guiding),
    (Token::Contains("ガイディング"), DeviceCategory::Guiding),
    (Token::Contains("intermediate"), DeviceCategory::Intermediate),
    (Token::Word("inter"), DeviceCategory::Intermediate),
    (Token::Contains("distal access"), DeviceCategory::Intermediate),
    (Token::Contains("中間"), DeviceCategory::Intermediate),
];

/// カテゴリ文字列を分類する。どれにも一致しなければ Micro。
pub fn classify_category(raw: &str) -> DeviceCategory {
    let normalized = raw.trim().to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(token, _)| token.matches(&normalized))
        .map(|(_, category)| *category)
        .unwrap_or(DeviceCategory::Micro)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_guiding() {
        assert_eq!(classify_category("Guiding"), DeviceCategory::Guiding);
        assert_eq!(classify_category("ガイディングカテーテル"), DeviceCategory::Guiding);
        assert_eq!(classify_category(" guide sheath "), DeviceCategory::Guiding);
    }

    #[test]
    fn test_classify_intermediate() {
        assert_eq!(classify_category("Intermediate"), DeviceCategory::Intermediate);
        assert_eq!(classify_category("Inter"), DeviceCategory::Intermediate);
        assert_eq!(classify_category("inter-catheter"), DeviceCategory::Intermediate);
        assert_eq!(classify_category("中間カテーテル"), DeviceCategory::Intermediate);
        assert_eq!(classify_category("Distal Access"), DeviceCategory::Intermediate);
    }

    #[test]
    fn test_inter_prefix_of_other_words_is_not_intermediate() {
        assert_eq!(classify_category("Micro (for intervention)"), DeviceCategory::Micro);
        assert_eq!(classify_category("interventional micro"), DeviceCategory::Micro);
    }

    #[test]
    fn test_classify_fallback_is_micro() {
        assert_eq!(classify_category("unknown-xyz"), DeviceCategory::Micro);
        assert_eq!(classify_category(""), DeviceCategory::Micro);
        assert_eq!(classify_category("Micro"), DeviceCategory::Micro);
    }
}
