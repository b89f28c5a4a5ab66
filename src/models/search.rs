use crate::config::Config;

/// 搜索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub location: String,
    /// 收集链接数量上限
    pub max_results: usize,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, location: impl Into<String>, max_results: usize) -> Self {
        Self {
            keyword: keyword.into(),
            location: location.into(),
            max_results,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.keyword, &config.location, config.max_applies)
    }

    /// 搜索按钮找不到时直接访问的搜索页
    pub fn fallback_url(&self, site_root: &str) -> String {
        format!(
            "{}/{}-jobs-in-{}",
            site_root.trim_end_matches('/'),
            urlencoding::encode(&self.keyword),
            urlencoding::encode(&self.location)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_url_encodes_parts() {
        let q = SearchQuery::new("QA Engineer", "New Delhi", 3);
        assert_eq!(
            q.fallback_url("https://www.naukri.com/"),
            "https://www.naukri.com/QA%20Engineer-jobs-in-New%20Delhi"
        );
    }

    #[test]
    fn test_fallback_url_plain() {
        let q = SearchQuery::new("SDET", "Bangalore", 3);
        assert_eq!(
            q.fallback_url("https://www.naukri.com"),
            "https://www.naukri.com/SDET-jobs-in-Bangalore"
        );
    }
}
