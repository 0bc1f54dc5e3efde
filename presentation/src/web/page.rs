//! HTML rendering for the web form

use pagerag_domain::{LoadedDocument, Notice, NoticeKind};

/// Everything the page shows after a request
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub url: &'a str,
    pub question: &'a str,
    pub notices: &'a [Notice],
    pub answer: Option<&'a str>,
    pub document: Option<&'a LoadedDocument>,
}

const STYLE: &str = "\
body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
input[type=text]{width:100%;padding:.4rem;margin:.3rem 0}\
.notice{padding:.5rem .8rem;margin:.4rem 0;border-radius:4px}\
.success{background:#e6f4ea}.warning{background:#fff4e5}\
.error{background:#fdecea}.fault{background:#fdecea;font-weight:bold}\
.answer{white-space:pre-wrap;background:#f5f5f5;padding:.8rem}\
details pre{white-space:pre-wrap}";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn notice_class(kind: NoticeKind) -> &'static str {
    kind.as_str()
}

pub fn render(view: &PageView<'_>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
    html.push_str("<title>Webpage Q&amp;A with RAG</title>");
    html.push_str(&format!("<style>{}</style></head><body>\n", STYLE));
    html.push_str("<h1>Webpage Q&amp;A with RAG</h1>\n");

    html.push_str("<form method=\"post\" action=\"/ingest\">\n");
    html.push_str("<label for=\"url\">Enter webpage URL:</label>\n");
    html.push_str(&format!(
        "<input type=\"text\" id=\"url\" name=\"url\" value=\"{}\">\n",
        escape_html(view.url)
    ));
    html.push_str("<button type=\"submit\">Load Webpage</button>\n</form>\n");

    for notice in view.notices {
        html.push_str(&format!(
            "<div class=\"notice {}\">{}</div>\n",
            notice_class(notice.kind),
            escape_html(&notice.message)
        ));
    }

    if let Some(doc) = view.document {
        html.push_str(&format!(
            "<details><summary>View loaded content ({})</summary><pre>{}</pre></details>\n",
            escape_html(doc.url.as_str()),
            escape_html(&doc.text)
        ));
    }

    html.push_str("<form method=\"post\" action=\"/ask\">\n");
    html.push_str("<label for=\"question\">Ask a question about the webpage:</label>\n");
    html.push_str(&format!(
        "<input type=\"text\" id=\"question\" name=\"question\" value=\"{}\">\n",
        escape_html(view.question)
    ));
    html.push_str("<button type=\"submit\">Get Answer</button>\n</form>\n");

    if let Some(answer) = view.answer {
        html.push_str("<h2>Answer:</h2>\n");
        html.push_str(&format!(
            "<div class=\"answer\">{}</div>\n",
            escape_html(answer)
        ));
    }

    html.push_str("</body></html>\n");
    html
}
