use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::models::AdviceResponse;

const STYLE: &str = include_str!("../../static/style.css");
const SCRIPT: &str = include_str!("../../static/app.js");

/// Everything the single page can show.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub question: &'a str,
    pub warning: Option<&'a str>,
    pub advice: Option<&'a AdviceResponse>,
}

pub fn render(view: &PageView<'_>) -> String {
    let warning = view
        .warning
        .map(|w| format!(r#"<div class="warning">{}</div>"#, html_escape::encode_text(w)))
        .unwrap_or_default();

    let result = match view.advice {
        Some(advice) if advice.is_error => format!(
            r#"<div class="error">{}</div>"#,
            html_escape::encode_text(&advice.text)
        ),
        Some(advice) => format!(
            r#"<div class="success">Here's some advice:</div><div class="advice">{}</div>"#,
            render_markdown(&advice.text)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Nutrition Assistant</title>
    <link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🥦</text></svg>">
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <h1>🥦 Gemini-Powered Nutrition Assistant</h1>
        <p class="subtitle">Ask me anything about your diet, nutrition, or healthy food choices, or upload a photo of your meal for a calorie estimate!</p>

        <form id="adviceForm" method="post" action="/advice" enctype="multipart/form-data">
            <label for="question">Enter your question or concern here:</label>
            <textarea id="question" name="question" rows="7">{question}</textarea>

            <label for="image">Upload a food image (optional):</label>
            <input type="file" id="image" name="image" accept=".jpg,.jpeg,.png,.webp,image/jpeg,image/png,image/webp">
            <img id="preview" class="preview" alt="Uploaded image preview">

            <button type="submit">Get Advice</button>
        </form>

        <div class="loading" id="loading">
            <div class="spinner"></div>
            <p>Thinking...</p>
        </div>

        {warning}
        {result}
    </div>
    <script>{script}</script>
</body>
</html>
"#,
        style = STYLE,
        question = html_escape::encode_text(view.question),
        warning = warning,
        result = result,
        script = SCRIPT,
    )
}

/// Render the model's Markdown answer. Raw HTML from the model is shown as
/// text and script links are disarmed.
pub fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::from("#"),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn is_script_url(url: &str) -> bool {
    let lowered = url.trim_start().to_ascii_lowercase();
    lowered.starts_with("javascript:") || lowered.starts_with("vbscript:") || lowered.starts_with("data:")
}
