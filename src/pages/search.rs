use crate::infrastructure::{ResilientLocator, Selector};

/// 职位搜索栏与结果列表
pub struct SearchPage {
    pub keyword_input: ResilientLocator,
    pub location_input: ResilientLocator,
    pub submit_button: ResilientLocator,
    /// 任一出现即认为结果已加载
    pub results_marker: ResilientLocator,
    /// 职位卡片链接（优先）
    pub primary_cards: ResilientLocator,
    /// 职位卡片链接（更宽泛的兜底）
    pub secondary_cards: ResilientLocator,
}

impl SearchPage {
    pub fn new() -> Self {
        Self {
            keyword_input: ResilientLocator::new(
                "关键词输入框",
                vec![
                    Selector::css(r#"input[placeholder*="Skill"]"#),
                    Selector::css(r#"input[placeholder*="Search"]"#),
                    Selector::css(r#"input[name*="keyword"]"#),
                    Selector::css("input#qsb-keyword-sugg"),
                ],
            ),
            location_input: ResilientLocator::new(
                "地点输入框",
                vec![
                    Selector::css(r#"input[placeholder*="Location"]"#),
                    Selector::css(r#"input[name*="location"]"#),
                    Selector::css("input#qsb-location-sugg"),
                ],
            ),
            submit_button: ResilientLocator::new(
                "搜索按钮",
                vec![
                    Selector::css("button").with_text("Search"),
                    Selector::css("button").with_text("Find Jobs"),
                    Selector::css("#qsbForm button"),
                ],
            ),
            results_marker: ResilientLocator::new(
                "搜索结果",
                vec![
                    Selector::css("a.jobTuple__title"),
                    Selector::css(r#"a[href*="/job-detail/"]"#),
                    Selector::css("a").with_text("Apply"),
                    Selector::css(".jobCard a"),
                ],
            ),
            primary_cards: ResilientLocator::new(
                "职位卡片",
                vec![
                    Selector::css("a.jobTuple__title"),
                    Selector::css(r#"a[href*="/job-detail/"]"#),
                    Selector::css("a:has(.jobTuple__title)"),
                    Selector::css(".jobTuple"),
                    Selector::css(".jobCard a"),
                ],
            ),
            secondary_cards: ResilientLocator::new(
                "职位链接",
                vec![
                    Selector::css("a").with_text("Apply"),
                    Selector::css(r#"a[href*="/jobs/"]"#),
                    Selector::css(".jobCard a"),
                    Selector::css("[data-job-id] a"),
                ],
            ),
        }
    }

    /// 按顺序返回两组卡片选择器
    pub fn card_families(&self) -> [&ResilientLocator; 2] {
        [&self.primary_cards, &self.secondary_cards]
    }
}

impl Default for SearchPage {
    fn default() -> Self {
        Self::new()
    }
}
