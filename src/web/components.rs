//! Stateless HTML fragments. All text passed in is escaped; only [`Markup`]
//! is inserted verbatim.

use std::fmt;

/// Already-rendered HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn text(text: &str) -> Self {
        Self(escape_html(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Title and optional description on the left, optional action on the right.
#[derive(Debug, Clone)]
pub struct PageHeader<'a> {
    title: &'a str,
    description: Option<&'a str>,
    action: Option<Markup>,
    class_name: Option<&'a str>,
}

impl<'a> PageHeader<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            description: None,
            action: None,
            class_name: None,
        }
    }

    pub fn description(mut self, description: Option<&'a str>) -> Self {
        self.description = description;
        self
    }

    pub fn action(mut self, action: Markup) -> Self {
        self.action = Some(action);
        self
    }

    /// Extra classes appended to the container's own.
    pub fn class_name(mut self, class_name: &'a str) -> Self {
        self.class_name = Some(class_name);
        self
    }

    pub fn render(&self) -> Markup {
        let class = match self.class_name {
            Some(extra) if !extra.trim().is_empty() => {
                format!("page-header {}", escape_html(extra.trim()))
            }
            _ => "page-header".to_string(),
        };

        let mut html = format!(
            "<div class=\"{}\"><div class=\"page-header__text\"><h1 class=\"page-header__title\">{}</h1>",
            class,
            escape_html(self.title)
        );
        if let Some(description) = self.description {
            html.push_str(&format!(
                "<p class=\"page-header__description\">{}</p>",
                escape_html(description)
            ));
        }
        html.push_str("</div>");
        if let Some(action) = &self.action {
            html.push_str(&format!(
                "<div class=\"page-header__action\">{}</div>",
                action
            ));
        }
        html.push_str("</div>");

        Markup(html)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardValue::Text(text) => f.write_str(text),
            CardValue::Integer(n) => write!(f, "{}", n),
            CardValue::Decimal(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CardValue {
    fn from(value: &str) -> Self {
        CardValue::Text(value.to_string())
    }
}

impl From<String> for CardValue {
    fn from(value: String) -> Self {
        CardValue::Text(value)
    }
}

impl From<i64> for CardValue {
    fn from(value: i64) -> Self {
        CardValue::Integer(value)
    }
}

impl From<i32> for CardValue {
    fn from(value: i32) -> Self {
        CardValue::Integer(value.into())
    }
}

impl From<usize> for CardValue {
    fn from(value: usize) -> Self {
        CardValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for CardValue {
    fn from(value: f64) -> Self {
        CardValue::Decimal(value)
    }
}

/// Bordered box with a label, a prominent value and an optional action.
#[derive(Debug, Clone)]
pub struct SummaryCard<'a> {
    title: &'a str,
    value: CardValue,
    action: Option<Markup>,
}

impl<'a> SummaryCard<'a> {
    pub fn new(title: &'a str, value: impl Into<CardValue>) -> Self {
        Self {
            title,
            value: value.into(),
            action: None,
        }
    }

    pub fn action(mut self, action: Markup) -> Self {
        self.action = Some(action);
        self
    }

    pub fn render(&self) -> Markup {
        let mut html = format!(
            "<div class=\"summary-card\"><div class=\"summary-card__title\">{}</div><div class=\"summary-card__value\">{}</div>",
            escape_html(self.title),
            escape_html(&self.value.to_string())
        );
        if let Some(action) = &self.action {
            html.push_str(&format!(
                "<div class=\"summary-card__action\">{}</div>",
                action
            ));
        }
        html.push_str("</div>");

        Markup(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_header_title_only() {
        let html = PageHeader::new("Acme").render().into_string();

        assert!(html.contains("<h1 class=\"page-header__title\">Acme</h1>"));
        assert!(!html.contains("page-header__description"));
        assert!(!html.contains("page-header__action"));
    }

    #[test]
    fn test_page_header_with_everything() {
        let html = PageHeader::new("Acme")
            .description(Some("Widgets & more"))
            .action(Markup::raw("<a href=\"/edit\">Edit</a>"))
            .class_name("compact")
            .render()
            .into_string();

        assert!(html.starts_with("<div class=\"page-header compact\">"));
        assert!(html.contains("Widgets &amp; more"));
        assert!(html.contains("<a href=\"/edit\">Edit</a>"));
    }

    #[test]
    fn test_summary_card_with_number() {
        let html = SummaryCard::new("Revenue", 1000).render().into_string();

        assert!(html.contains("<div class=\"summary-card__title\">Revenue</div>"));
        assert!(html.contains("<div class=\"summary-card__value\">1000</div>"));
        assert!(!html.contains("summary-card__action"));
    }

    #[test]
    fn test_summary_card_escapes_text_value() {
        let html = SummaryCard::new("Status", "<b>live</b>")
            .action(Markup::text("details"))
            .render()
            .into_string();

        assert!(html.contains("&lt;b&gt;live&lt;/b&gt;"));
        assert!(html.contains("<div class=\"summary-card__action\">details</div>"));
    }
}
