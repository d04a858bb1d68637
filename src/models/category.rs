use serde::{Deserialize, Serialize};

/// 科目枚举
///
/// 别名（如 `EARTH & SPACE`、`MATHEMATICS`）解析后归入标准科目，
/// 序列化时统一写出标准名称，不保留原始写法。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// 生物
    Biology,
    /// 化学
    Chemistry,
    /// 地球与空间科学
    EarthAndSpace,
    /// 能源
    Energy,
    /// 数学
    Math,
    /// 物理
    Physics,
    /// 未登记的科目（保留大写原文）
    Other(String),
}

static KNOWN_CATEGORIES: phf::Map<&'static str, Category> = phf::phf_map! {
    "BIOLOGY" => Category::Biology,
    "CHEMISTRY" => Category::Chemistry,
    "EARTH AND SPACE" => Category::EarthAndSpace,
    "EARTH & SPACE" => Category::EarthAndSpace,
    "ENERGY" => Category::Energy,
    "MATH" => Category::Math,
    "MATHEMATICS" => Category::Math,
    "PHYSICS" => Category::Physics,
};

impl Category {
    /// 获取标准名称（大写）
    pub fn name(&self) -> &str {
        match self {
            Category::Biology => "BIOLOGY",
            Category::Chemistry => "CHEMISTRY",
            Category::EarthAndSpace => "EARTH AND SPACE",
            Category::Energy => "ENERGY",
            Category::Math => "MATH",
            Category::Physics => "PHYSICS",
            Category::Other(name) => name,
        }
    }

    /// 从字符串解析科目（忽略大小写和多余空白）
    pub fn parse(s: &str) -> Self {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        match KNOWN_CATEGORIES.get(normalized.as_str()) {
            Some(category) => category.clone(),
            None => Category::Other(normalized),
        }
    }

    /// 与筛选名称比较：筛选名称按同样规则解析后精确匹配（别名视为同一科目）
    pub fn matches(&self, name: &str) -> bool {
        Category::parse(name) == *self
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.name().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_case_insensitive() {
        assert_eq!(Category::parse("physics"), Category::Physics);
        assert_eq!(Category::parse("Math"), Category::Math);
        assert_eq!(Category::parse("earth  and space"), Category::EarthAndSpace);
    }

    #[test]
    fn test_parse_unknown_keeps_label() {
        assert_eq!(
            Category::parse("astronomy"),
            Category::Other("ASTRONOMY".to_string())
        );
    }

    #[test]
    fn test_matches_is_exact() {
        assert!(Category::Math.matches("math"));
        assert!(!Category::Math.matches("mat"));
        assert!(!Category::EarthAndSpace.matches("earth"));
        assert!(Category::EarthAndSpace.matches("EARTH & SPACE"));
        assert!(Category::Math.matches("Mathematics"));
        assert!(Category::Other("ASTRONOMY".to_string()).matches("astronomy"));
    }

    #[test]
    fn test_serde_as_label() {
        let json = serde_json::to_string(&Category::EarthAndSpace).unwrap();
        assert_eq!(json, "\"EARTH AND SPACE\"");
        let parsed: Category = serde_json::from_str("\"chemistry\"").unwrap();
        assert_eq!(parsed, Category::Chemistry);

        let alias: Category = serde_json::from_str("\"Mathematics\"").unwrap();
        assert_eq!(serde_json::to_string(&alias).unwrap(), "\"MATH\"");
    }
}
