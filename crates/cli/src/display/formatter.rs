use taskbridge_core::{ClasspathEntry, ClasspathKind, JobStatus, ProjectView};

pub fn format_status(name: &str, status: &JobStatus) -> String {
    match status {
        JobStatus::Ok => format!("✅ {name}"),
        JobStatus::Error(message) => format!("❌ {name}: {message}"),
        JobStatus::Cancelled => format!("⚠️  {name}: cancelled"),
    }
}

pub fn print_view(view: &ProjectView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", view.render_tree());
    }
    Ok(())
}

pub fn format_classpath(entries: &[ClasspathEntry]) -> String {
    if entries.is_empty() {
        return "   (no classpath entries)\n".to_string();
    }

    entries
        .iter()
        .map(|entry| {
            let kind = match entry.kind {
                ClasspathKind::Library => "lib",
                ClasspathKind::Project => "project",
                ClasspathKind::Source => "src",
                ClasspathKind::Output => "output",
            };
            match &entry.source_path {
                Some(source) => format!("   • {kind:<7} {} (sources: {})\n", entry.path.display(), source.display()),
                None => format!("   • {kind:<7} {}\n", entry.path.display()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_status() {
        assert_eq!(format_status("Refreshing tasks of /w/build.x", &JobStatus::Ok), "✅ Refreshing tasks of /w/build.x");
        assert_eq!(
            format_status("Running build", &JobStatus::Error("Build exited with code 1".into())),
            "❌ Running build: Build exited with code 1"
        );
    }

    #[test]
    fn test_format_classpath() {
        let entries = vec![
            ClasspathEntry {
                kind: ClasspathKind::Library,
                path: PathBuf::from("/libs/core.jar"),
                source_path: Some(PathBuf::from("/libs/core-sources.jar")),
            },
            ClasspathEntry {
                kind: ClasspathKind::Project,
                path: PathBuf::from("/w/shared"),
                source_path: None,
            },
        ];
        assert_eq!(
            format_classpath(&entries),
            "   • lib     /libs/core.jar (sources: /libs/core-sources.jar)\n   • project /w/shared\n"
        );
        assert_eq!(format_classpath(&[]), "   (no classpath entries)\n");
    }
}
