//! Server-rendered HTML for the chat UI.
//!
//! The chat page is a small htmx shell: the form posts to `/chat` and the
//! returned bot-message fragment is appended into the chat container.
//! Replies are rendered as escaped text, never as raw markup.

use crate::llm::{ChatMessage, Role};
use crate::rag::Citation;

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escaped paragraph markup: blank lines split paragraphs, single
/// newlines become `<br>`.
fn render_paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| format!("<p>{}</p>", escape_html(paragraph).replace('\n', "<br>")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The fragment returned by `POST /chat` and appended under the chat
/// container. `message_id` keys the citations collapse so several
/// replies can coexist on one page.
pub fn bot_message_fragment(reply: &str, citations: &[Citation], message_id: &str) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"message bot-message\">\n");
    html.push_str(&render_paragraphs(reply));
    html.push('\n');

    if !citations.is_empty() {
        html.push_str(&format!(
            "<button class=\"btn btn-link btn-sm sources-toggle\" type=\"button\" \
             data-bs-toggle=\"collapse\" data-bs-target=\"#sources-{}\" \
             aria-expanded=\"false\" aria-controls=\"sources-{}\">Sources</button>\n",
            message_id, message_id
        ));
        html.push_str(&format!(
            "<div class=\"collapse sources\" id=\"sources-{}\">\n<ul>\n",
            message_id
        ));
        for citation in citations {
            html.push_str(&format!(
                "<li>{}</li>\n",
                escape_html(&citation.to_string())
            ));
        }
        html.push_str("</ul>\n</div>\n");
    }

    html.push_str("</div>\n");
    html
}

fn history_message(message: &ChatMessage) -> String {
    let css_class = match message.role {
        Role::User => "user-message",
        _ => "bot-message",
    };
    format!(
        "<div class=\"message {}\">\n{}\n</div>\n",
        css_class,
        render_paragraphs(&message.content)
    )
}

/// The chat shell served at `GET /`, with the current history rendered in.
pub fn chat_page(history: &[ChatMessage]) -> String {
    let rendered_history: String = history.iter().map(|m| history_message(m)).collect();

    // `hx-target="#chat-container"` contains the `"#` sequence, so the
    // raw string needs the wider delimiter.
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>RAG Chat</title>
<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
<script src="https://unpkg.com/htmx.org@1.9.12"></script>
</head>
<body>
<div class="container py-4">
<h1 class="h4 mb-3">RAG Chat</h1>
<div id="chat-container" class="mb-3">
{}</div>
<form hx-post="/chat" hx-target="#chat-container" hx-swap="beforeend">
<div class="input-group">
<input id="message-input" class="form-control" type="text" name="message" placeholder="Ask something" autocomplete="off" required>
<button class="btn btn-primary" type="submit">Send</button>
</div>
</form>
</div>
<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js"></script>
</body>
</html>
"##,
        rendered_history
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(source: &str, content: &str) -> Citation {
        Citation {
            source: source.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn reply_markup_is_escaped_not_rendered() {
        let html = bot_message_fragment("<script>alert(1)</script>", &[], "id-1");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let html = bot_message_fragment("first\nline\n\nsecond", &[], "id-1");
        assert!(html.contains("<p>first<br>line</p>"));
        assert!(html.contains("<p>second</p>"));
    }

    #[test]
    fn citations_render_behind_a_keyed_collapse() {
        let citations = vec![citation("a.txt", "alpha"), citation("b.txt", "beta")];
        let html = bot_message_fragment("reply", &citations, "abc-123");

        assert!(html.contains("data-bs-target=\"#sources-abc-123\""));
        assert!(html.contains("aria-expanded=\"false\""));
        assert!(html.contains("aria-controls=\"sources-abc-123\""));
        assert!(html.contains("id=\"sources-abc-123\""));
        assert!(html.contains("<li>a.txt: alpha...</li>"));
        assert!(html.contains("<li>b.txt: beta...</li>"));
    }

    #[test]
    fn no_citations_means_no_sources_toggle() {
        let html = bot_message_fragment("reply", &[], "id-1");
        assert!(!html.contains("Sources"));
    }

    #[test]
    fn chat_page_renders_history_by_role() {
        let history = vec![
            ChatMessage::user("hello there"),
            ChatMessage::assistant("hi, how can I help?"),
        ];
        let html = chat_page(&history);

        assert!(html.contains("user-message"));
        assert!(html.contains("bot-message"));
        assert!(html.contains("hello there"));
        assert!(html.contains("id=\"chat-container\""));
        assert!(html.contains("hx-post=\"/chat\""));
        assert!(html.contains("hx-target=\"#chat-container\""));
        assert!(html.contains("hx-swap=\"beforeend\""));
    }
}
