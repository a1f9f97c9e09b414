//! Output formatting for model responses

use crate::convert::filter_excessive_newlines;
use crate::links::{links_for_role, SearchLink};
use crate::prompts::RECOMMENDED_ROLES_HEADING;

/// Trim trailing whitespace per line, keep at most two newlines in a row, trim the ends
pub fn normalize(content: &str) -> String {
    let lines: Vec<&str> = content.lines().map(str::trim_end).collect();
    filter_excessive_newlines(&lines.join("\n")).trim().to_string()
}

/// Split a recommendation into its prose and the role titles under the roles heading
///
/// Returns `None` when the heading is missing or lists no roles.
pub fn split_recommended_roles(content: &str) -> Option<(String, Vec<String>)> {
    let heading = RECOMMENDED_ROLES_HEADING.trim_start_matches('#').trim().to_lowercase();

    let lines: Vec<&str> = content.lines().collect();
    let start = lines.iter().position(|line| {
        let trimmed = line.trim();
        trimmed.starts_with('#') && trimmed.trim_start_matches('#').trim().to_lowercase() == heading
    })?;

    let mut roles = Vec::new();
    for line in &lines[start + 1..] {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') {
            break;
        }
        let Some(item) = strip_list_marker(trimmed) else {
            break;
        };
        let role = role_title(item);
        if !role.is_empty() && !roles.iter().any(|r: &String| r.eq_ignore_ascii_case(role)) {
            roles.push(role.to_string());
        }
    }

    if roles.is_empty() {
        return None;
    }

    let summary = normalize(&lines[..start].join("\n"));
    Some((summary, roles))
}

/// The title part of a list item, without a trailing `: reason` or ` - reason`
fn role_title(item: &str) -> &str {
    let title = item.split(':').next().unwrap_or(item);
    let title = title.split(" - ").next().unwrap_or(title);
    title
        .trim()
        .trim_matches(|c: char| c == '*' || c == '_' || c == '`')
        .trim()
}

/// `- x`, `* x`, `+ x`, `1. x`, `1) x` → `x`
fn strip_list_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("+ "))
    {
        return Some(rest);
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        return rest
            .strip_prefix(". ")
            .or_else(|| rest.strip_prefix(") "));
    }
    None
}

/// Render one role's search links as a Markdown list
pub fn render_links(links: &[SearchLink]) -> String {
    let mut output = String::new();
    for link in links {
        output.push_str("- [");
        output.push_str(&link.site);
        if !link.location.is_empty() {
            output.push_str(" · ");
            output.push_str(&link.location);
        }
        output.push_str("](");
        output.push_str(&link.url);
        output.push_str(")\n");
    }
    output
}

/// Format a recommendation response with search links for every role
///
/// Only the prose before the roles heading and the role titles are kept. Text
/// after the list and any reason given next to a role are dropped. Falls back
/// to the normalized response when no role list can be found.
pub fn format_recommendations(content: &str, sites: &[String], locations: &[String]) -> String {
    let Some((summary, roles)) = split_recommended_roles(content) else {
        return normalize(content);
    };

    let mut output = String::new();
    if !summary.is_empty() {
        output.push_str(&summary);
        output.push_str("\n\n");
    }
    output.push_str(RECOMMENDED_ROLES_HEADING);
    output.push('\n');

    for role in &roles {
        output.push_str("\n### ");
        output.push_str(role);
        output.push_str("\n\n");
        output.push_str(&render_links(&links_for_role(role, sites, locations)));
    }

    normalize(&output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = "## Summary  \nSeasoned SRE with Rust and Kubernetes.\n\n\n\n\
1. **Site Reliability Engineer**: strong on-call record.\n\n\
## Recommended Roles\n\
- Site Reliability Engineer\n\
- **Platform Engineer**\n\
* DevOps Engineer\n";

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("\n\n# Title   \n\n\n\n\nBody\t\n"), "# Title\n\nBody");
        assert_eq!(normalize("same"), "same");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(RESPONSE);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_split_recommended_roles() {
        let (summary, roles) = split_recommended_roles(RESPONSE).unwrap();
        assert_eq!(
            roles,
            vec![
                "Site Reliability Engineer",
                "Platform Engineer",
                "DevOps Engineer"
            ]
        );
        assert!(summary.starts_with("## Summary"));
        assert!(!summary.contains("Recommended Roles"));
    }

    #[test]
    fn test_split_stops_at_next_heading_and_dedups() {
        let content = "## recommended roles\n1. SRE\n2) sre\n3. Platform Engineer\n\n## Notes\n- Not a role";
        let (_, roles) = split_recommended_roles(content).unwrap();
        assert_eq!(roles, vec!["SRE", "Platform Engineer"]);
    }

    #[test]
    fn test_split_drops_reason_after_title() {
        let content = "## Recommended Roles\n\
- **Site Reliability Engineer**: strong on-call\n\
- Platform Engineer - infra focus\n\
- `Cloud Engineer`\n\
- Site-Reliability Engineer\n";
        let (_, roles) = split_recommended_roles(content).unwrap();
        assert_eq!(
            roles,
            vec![
                "Site Reliability Engineer",
                "Platform Engineer",
                "Cloud Engineer",
                "Site-Reliability Engineer"
            ]
        );
    }

    #[test]
    fn test_format_recommendations_drops_trailing_prose() {
        let content = "## Recommended Roles\n- **SRE**: on-call\n\nGood luck with the search!";
        let output = format_recommendations(content, &["indeed".to_string()], &[]);
        assert!(output.contains("### SRE\n"));
        assert!(!output.contains("on-call"));
        assert!(!output.contains("Good luck"));
    }

    #[test]
    fn test_split_without_heading() {
        assert!(split_recommended_roles("Just prose.\n- a list").is_none());
        assert!(split_recommended_roles("## Recommended Roles\n\nNone fit.").is_none());
    }

    #[test]
    fn test_format_recommendations_with_links() {
        let output = format_recommendations(
            RESPONSE,
            &["linkedin".to_string()],
            &["Berlin".to_string()],
        );
        assert!(output.contains("Seasoned SRE with Rust and Kubernetes."));
        assert!(output.contains("### Platform Engineer"));
        assert!(output.contains(
            "- [LinkedIn · Berlin](https://www.linkedin.com/jobs/search/?keywords=Platform+Engineer&location=Berlin)"
        ));
        assert_eq!(output.matches("https://www.linkedin.com").count(), 3);
    }

    #[test]
    fn test_format_recommendations_falls_back_to_response() {
        let content = "I could not read this resume.  \n";
        assert_eq!(
            format_recommendations(content, &["indeed".to_string()], &[]),
            "I could not read this resume."
        );
    }
}
