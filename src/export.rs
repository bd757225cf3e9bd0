//! Clipboard export rendering
//!
//! Pure formatting: the store hands over structured records and this
//! module turns them into the text that lands on the clipboard.

use crate::resource::{Resource, ResourceKind};
use crate::thread::Thread;
use crate::ui::format_timestamp;

/// Text resources ending in one of these suffixes get fenced as code.
const CODE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".java", ".c", ".cpp", ".html", ".css", ".sh",
];

/// Render a thread with its tags and resources as markdown-ish text.
pub fn render_thread(thread: &Thread, tags: &[String], resources: &[Resource]) -> String {
    let status = if thread.is_archived { "ARCHIVED" } else { "ACTIVE" };

    let mut lines = vec![
        format!("# Thread #{}: {}", thread.id, thread.question),
        format!("Status: {}", status),
        format!("Created: {}", format_timestamp(thread.created_at)),
    ];

    if !tags.is_empty() {
        lines.push(format!("Tags: {}", tags.join(", ")));
    }

    if !resources.is_empty() {
        lines.push("\n## Resources:".to_string());
        for (idx, resource) in resources.iter().enumerate() {
            lines.push(format!(
                "### {}. [{}] - {}",
                idx + 1,
                resource.kind.as_str().to_uppercase(),
                format_timestamp(resource.added_at)
            ));
            if resource.kind == ResourceKind::Text && looks_like_code_file(&resource.content) {
                lines.push(format!("```\n{}\n```\n", resource.content));
            } else {
                lines.push(format!("{}\n", resource.content));
            }
        }
    }

    lines.join("\n")
}

fn looks_like_code_file(content: &str) -> bool {
    CODE_EXTENSIONS.iter().any(|ext| content.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_thread(is_archived: bool) -> Thread {
        Thread {
            id: 3,
            question: "Investigate caching bug".to_string(),
            created_at: 1_700_000_000.0,
            last_active: 1_700_000_100.0,
            is_archived,
        }
    }

    fn resource(kind: ResourceKind, content: &str) -> Resource {
        Resource {
            id: 1,
            kind,
            content: content.to_string(),
            added_at: 1_700_000_050.0,
        }
    }

    #[test]
    fn test_render_header_and_status() {
        let rendered = render_thread(&sample_thread(false), &[], &[]);
        assert!(rendered.starts_with("# Thread #3: Investigate caching bug"));
        assert!(rendered.contains("Status: ACTIVE"));
        assert!(rendered.contains("Created: "));
        assert!(!rendered.contains("Tags:"));
        assert!(!rendered.contains("## Resources:"));
    }

    #[test]
    fn test_render_archived_status() {
        let rendered = render_thread(&sample_thread(true), &[], &[]);
        assert!(rendered.contains("Status: ARCHIVED"));
    }

    #[test]
    fn test_render_tags_line() {
        let tags = vec!["caching".to_string(), "deep".to_string()];
        let rendered = render_thread(&sample_thread(false), &tags, &[]);
        assert!(rendered.contains("Tags: caching, deep"));
    }

    #[test]
    fn test_render_resources_numbered_with_kind() {
        let resources = vec![
            resource(ResourceKind::Url, "https://bugs.example.com/123"),
            resource(ResourceKind::Text, "checked logs, nothing odd"),
        ];
        let rendered = render_thread(&sample_thread(false), &[], &resources);
        assert!(rendered.contains("## Resources:"));
        assert!(rendered.contains("### 1. [URL] - "));
        assert!(rendered.contains("https://bugs.example.com/123"));
        assert!(rendered.contains("### 2. [TEXT] - "));
        assert!(rendered.contains("checked logs, nothing odd"));
    }

    #[test]
    fn test_render_fences_code_paths() {
        let resources = vec![resource(ResourceKind::Text, "src/cache/lru.py")];
        let rendered = render_thread(&sample_thread(false), &[], &resources);
        assert!(rendered.contains("```\nsrc/cache/lru.py\n```"));
    }

    #[test]
    fn test_render_does_not_fence_urls() {
        let resources = vec![resource(ResourceKind::Url, "https://example.com/x.py")];
        let rendered = render_thread(&sample_thread(false), &[], &resources);
        assert!(!rendered.contains("```"));
    }
}
