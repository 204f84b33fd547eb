//! Minimal inline HTML for the query form. Values are escaped before
//! being interpolated into the page.

pub fn render(input_json: &str, output: Option<&str>) -> String {
    let input_escaped = escape_html(input_json);

    let output_section = match output {
        Some(output) => {
            let output_escaped = escape_html(output);
            format!(
                r#"    <h2>Output</h2>
    <pre id="output">{output_escaped}</pre>
    <form action="/download" method="post">
      <input type="hidden" name="output_json" value="{output_escaped}">
      <button type="submit">Download response.json</button>
    </form>
"#
            )
        }
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Resume Q&amp;A</title>
</head>
<body>
  <h1>Resume Q&amp;A</h1>
  <form action="/" method="post">
    <textarea name="input_json" rows="8" cols="80">{input_escaped}</textarea>
    <br>
    <button type="submit">Ask</button>
  </form>
{output_section}</body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
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
