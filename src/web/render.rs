use crate::core::{EntityPage, PageRenderer};
use crate::utils::error::{PageError, Result};
use crate::web::components::{escape_html, Markup, PageHeader, SummaryCard};
use url::Url;

/// Default rendering delegate: a complete, self-contained HTML document.
#[derive(Debug, Clone, Default)]
pub struct HtmlPageRenderer;

impl HtmlPageRenderer {
    pub fn new() -> Self {
        Self
    }

    fn use_case_list(page: &EntityPage) -> String {
        if page.use_cases.is_empty() {
            return "<p class=\"use-cases__empty\">No use cases yet.</p>".to_string();
        }

        let items: String = page
            .use_cases
            .iter()
            .map(|use_case| {
                let summary = use_case
                    .summary()
                    .map(|s| format!("<p>{}</p>", escape_html(s)))
                    .unwrap_or_default();
                format!(
                    "<li class=\"use-case\" id=\"use-case-{}\"><h2>{}</h2>{}</li>",
                    escape_html(&use_case.id),
                    escape_html(use_case.title()),
                    summary
                )
            })
            .collect();

        format!("<ul class=\"use-cases\">{}</ul>", items)
    }
}

pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\"/>\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n<title>{}</title>\n</head>\n<body>\n<main>{}</main>\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

pub fn not_found_page(id: &str) -> String {
    let header = PageHeader::new("Not found")
        .description(Some("The entity you asked for does not exist."))
        .render();
    let detail = format!("<p class=\"not-found__id\">{}</p>", escape_html(id));
    document("Not found", &format!("{}{}", header, detail))
}

/// `/entities/{id}` with the id percent-encoded as a single path segment.
pub fn entity_path(id: &str) -> Result<String> {
    let mut url = Url::parse("http://localhost/").map_err(|e| PageError::RenderError {
        message: format!("cannot build entity link: {}", e),
    })?;
    url.path_segments_mut()
        .map_err(|_| PageError::RenderError {
            message: "cannot build entity link".to_string(),
        })?
        .pop_if_empty()
        .extend(["entities", id]);
    Ok(url.path().to_string())
}

pub fn error_page(status: u16, message: &str) -> String {
    let header = PageHeader::new(message).render();
    document(&format!("{} {}", status, message), header.as_str())
}

impl PageRenderer for HtmlPageRenderer {
    fn render(&self, page: &EntityPage) -> Result<String> {
        let entity = &page.entity;

        let header = PageHeader::new(entity.display_name())
            .description(entity.description())
            .action(Markup::raw(format!(
                "<a href=\"{}\">Permalink</a>",
                escape_html(&entity_path(&entity.id)?)
            )))
            .render();
        let card = SummaryCard::new("Use cases", page.use_cases.len()).render();

        let body = format!(
            "{}<section class=\"summary\">{}</section><section>{}</section>",
            header,
            card,
            Self::use_case_list(page)
        );

        Ok(document(entity.display_name(), &body))
    }
}
