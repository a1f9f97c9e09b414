//! HTML boilerplate stripping and text normalization

/// Elements whose whole subtree is dropped: page chrome, scripts, and
/// interactive widgets that never carry posting content.
const SKIP_TAGS: &[&str] = &[
    "head", "script", "style", "noscript", "iframe", "svg", "nav", "footer", "header", "form",
    "button", "select", "template",
];

/// Elements whose content is raw text, never markup
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "template"];

/// Elements that end a line of text
const NEWLINE_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "section", "article",
    "main", "ul", "ol", "table", "dt", "dd",
];

/// Check if content is HTML based on content type and body
pub fn is_html(content_type: &Option<String>, body: &str) -> bool {
    if let Some(ct) = content_type {
        let ct_lower = ct.to_lowercase();
        if ct_lower.contains("text/html") || ct_lower.contains("application/xhtml") {
            return true;
        }
    }

    let trimmed = body.trim_start();
    let head: String = trimmed.chars().take(16).collect::<String>().to_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

/// Convert HTML to plain text, dropping navigation, scripts and other boilerplate
pub fn html_to_text(html: &str) -> String {
    let mut output = String::new();
    let mut skip_elements: Vec<String> = Vec::new();

    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<' {
            let mut tag = String::new();
            for next in chars.by_ref() {
                if next == '>' {
                    break;
                }
                tag.push(next);
            }

            let tag_lower = tag.to_lowercase();
            let is_closing = tag_lower.starts_with('/');
            let tag_name = if is_closing {
                tag_lower[1..].split_whitespace().next().unwrap_or("")
            } else {
                tag_lower.split_whitespace().next().unwrap_or("")
            };
            let tag_name = tag_name.trim_end_matches('/');

            if !is_closing && !tag.ends_with('/') && RAW_TEXT_TAGS.contains(&tag_name) {
                skip_raw_text(&mut chars, tag_name);
                continue;
            }

            if SKIP_TAGS.contains(&tag_name) {
                if is_closing {
                    if let Some(pos) = skip_elements.iter().rposition(|t| t == tag_name) {
                        skip_elements.truncate(pos);
                    }
                } else if !tag.ends_with('/') {
                    skip_elements.push(tag_name.to_string());
                }
                continue;
            }

            if !skip_elements.is_empty() {
                continue;
            }

            if NEWLINE_TAGS.contains(&tag_name) {
                if is_closing || tag_name == "br" {
                    output.push('\n');
                } else if matches!(tag_name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "li")
                {
                    output.push('\n');
                }
            } else if matches!(tag_name, "td" | "th" | "span" | "a") {
                output.push(' ');
            }
        } else if skip_elements.is_empty() {
            output.push(decode_entity(c, &mut chars));
        }
    }

    clean_whitespace(&output)
}

/// Consume raw element content up to and including its `</name ...>` closer
///
/// A `<` inside a script is not a tag, so the closer is matched on the raw
/// characters, ignoring case.
fn skip_raw_text(chars: &mut std::iter::Peekable<std::str::Chars>, name: &str) {
    let closer: Vec<char> = format!("</{}", name).chars().collect();
    let mut matched = 0;
    for c in chars.by_ref() {
        if c.to_ascii_lowercase() == closer[matched] {
            matched += 1;
            if matched == closer.len() {
                break;
            }
        } else {
            matched = usize::from(c == '<');
        }
    }
    for c in chars.by_ref() {
        if c == '>' {
            break;
        }
    }
}

/// Extract the document `<title>` text, if any
pub fn extract_title(html: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let content_start = open + lower[open..].find('>')? + 1;
    let content_end = content_start + lower[content_start..].find("</title")?;

    let title = html_to_text(&html[content_start..content_end]);
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Decode HTML entity starting from ampersand
fn decode_entity(c: char, chars: &mut std::iter::Peekable<std::str::Chars>) -> char {
    if c != '&' {
        return c;
    }

    // Only consume when the entity is well formed
    let lookahead: String = chars.clone().take(12).collect();
    let Some(end) = lookahead.find(';') else {
        return '&';
    };
    let entity = &lookahead[..end];
    if entity.is_empty() || entity.chars().any(char::is_whitespace) {
        return '&';
    }

    let decoded = match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some(' '),
        "mdash" => Some('—'),
        "ndash" => Some('–'),
        "rsquo" | "lsquo" => Some('\''),
        "copy" => Some('©'),
        "reg" => Some('®'),
        _ => entity.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse::<u32>().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };

    match decoded {
        Some(ch) => {
            for _ in 0..=entity.chars().count() {
                chars.next();
            }
            ch
        }
        None => '&',
    }
}

/// Clean whitespace: collapse runs, trim, keep max 2 newlines
pub fn clean_whitespace(s: &str) -> String {
    let mut result = String::new();
    let mut last_was_space = false;
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            if last_was_space && result.ends_with(' ') {
                result.pop();
            }
            newline_count += 1;
            last_was_space = true;
            if newline_count <= 2 {
                result.push(c);
            }
        } else if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            newline_count = 0;
            last_was_space = false;
            result.push(c);
        }
    }

    result.trim().to_string()
}

/// Filter excessive newlines: keep at most 2 consecutive newlines
pub fn filter_excessive_newlines(s: &str) -> String {
    let mut result = String::new();
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push(c);
            }
        } else {
            newline_count = 0;
            result.push(c);
        }
    }

    result
}

/// Cut `s` to at most `max_chars` characters. Returns true if anything was removed.
pub fn truncate_chars(s: &mut String, max_chars: usize) -> bool {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            s.truncate(byte_idx);
            true
        }
        None => false,
    }
}
