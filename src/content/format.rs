//! Light markdown-ish rendering of generated content for chat bubbles.
//!
//! Generated text is escaped first, so only the markup produced here ever
//! reaches the page.

/// Render generated text as HTML paragraphs.
pub fn format_content(content: &str) -> String {
  let escaped = html_escape::encode_text(content);

  let lines: Vec<String> = escaped.lines().map(format_line).collect();
  let body = lines.join("\n");

  let paragraphs: Vec<String> = body
    .split("\n\n")
    .map(|block| block.replace('\n', "<br>"))
    .collect();

  format!("<p>{}</p>", paragraphs.join("</p><p>"))
}

fn format_line(line: &str) -> String {
  let line = bullet(line);
  let line = numbered(&line);
  let line = bold(&line);
  heading(&line)
}

/// `- item`, `* item` and `• item` all become `• item`
fn bullet(line: &str) -> String {
  let mut chars = line.chars();
  match (chars.next(), chars.next()) {
    (Some('-' | '*' | '•'), Some(c)) if c.is_whitespace() => format!("• {}", chars.as_str()),
    _ => line.to_string(),
  }
}

/// `3. item` becomes `<strong>3.</strong> item`
fn numbered(line: &str) -> String {
  let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
  if digits == 0 {
    return line.to_string();
  }

  let rest = &line[digits..];
  let mut chars = rest.chars();
  match (chars.next(), chars.next()) {
    (Some('.'), Some(c)) if c.is_whitespace() => {
      format!("<strong>{}.</strong> {}", &line[..digits], chars.as_str())
    }
    _ => line.to_string(),
  }
}

/// `**text**` becomes `<strong>text</strong>`; an unmatched `**` is kept
fn bold(line: &str) -> String {
  let mut out = String::with_capacity(line.len());
  let mut rest = line;

  while let Some(open) = rest.find("**") {
    let after_open = &rest[open + 2..];
    let Some(close) = after_open.find("**") else {
      break;
    };
    out.push_str(&rest[..open]);
    out.push_str("<strong>");
    out.push_str(&after_open[..close]);
    out.push_str("</strong>");
    rest = &after_open[close + 2..];
  }

  out.push_str(rest);
  out
}

fn heading(line: &str) -> String {
  match line.strip_prefix("## ") {
    Some(title) => format!("<h3>{}</h3>", title),
    None => line.to_string(),
  }
}
