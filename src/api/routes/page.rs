use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::api::{error::status_for, state::AppState};
use crate::domain::Message;

const TITLE: &str = "Gemini Tabanlı RAG ile Türk Mutfağı Tarif Uygulaması";

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub query: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_page(session.last(), None))
}

pub async fn submit(State(state): State<AppState>, Form(form): Form<AskForm>) -> Response {
    let mut session = state.session.lock().await;

    match state.assistant.answer(&mut session, &form.query).await {
        Ok(_) => Html(render_page(session.last(), None)).into_response(),
        Err(e) => {
            let status = status_for(&e);
            tracing::error!(error = %e, status = status.as_u16(), "Failed to answer query");
            let notice = format!("Cevap üretilemedi: {e}");
            (status, Html(render_page(session.last(), Some(&notice)))).into_response()
        }
    }
}

/// The form plus the content of the most recent message.
fn render_page(last: Option<&Message>, error: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(error) = error {
        body.push_str(&format!(
            "<p class=\"error\" role=\"alert\">{}</p>\n",
            escape(error)
        ));
    }

    if let Some(message) = last {
        body.push_str(&format!(
            "<p class=\"message\">{}</p>\n",
            escape(&message.content)
        ));
        if let Some(links) = &message.links {
            body.push_str("<ul class=\"links\">\n");
            for link in links {
                let link = escape(link);
                body.push_str(&format!("<li><a href=\"{link}\">{link}</a></li>\n"));
            }
            body.push_str("</ul>\n");
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="tr">
<head>
<meta charset="utf-8">
<title>{TITLE}</title>
</head>
<body>
<h1>{TITLE}</h1>
<form method="post" action="/">
<label for="query">Mesajınızı yazın:</label>
<input type="text" id="query" name="query" value="" autocomplete="off">
<button type="submit">Gönder</button>
</form>
{body}</body>
</html>
"#
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
